use super::{Rig, config};
use proptest::prelude::*;
use rover_common::config::{RoverConfig, SteeringConfig, TractionConfig};
use rover_common::hal::driver::HalDriver;
use rover_common::protocol::ControlCommand;
use rover_control::actuator::{SteeringActuator, TractionActuator, TractionState};
use rover_hal::{SimProbe, SimulationDriver};

fn traction(config: TractionConfig) -> (TractionActuator, SimProbe) {
    let rover = RoverConfig::with_service_name("prop");
    let mut driver = SimulationDriver::new();
    let hw = driver.claim(&rover).unwrap();
    let mut actuator = TractionActuator::new(hw.motor, &config);
    actuator.begin();
    (actuator, driver.probe().unwrap())
}

fn steering(config: SteeringConfig) -> (SteeringActuator, SimProbe) {
    let rover = RoverConfig::with_service_name("prop");
    let mut driver = SimulationDriver::new();
    let hw = driver.claim(&rover).unwrap();
    let mut actuator = SteeringActuator::new(hw.servo, &config);
    actuator.begin();
    (actuator, driver.probe().unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn steering_output_stays_inside_limits(
        a in 0u8..=180,
        b in 0u8..=180,
        angle in -1_000i32..1_000,
    ) {
        let (left_limit, right_limit) = (a.min(b), a.max(b));
        let config = SteeringConfig {
            center: left_limit + (right_limit - left_limit) / 2,
            left_limit,
            right_limit,
            ..SteeringConfig::default()
        };
        let (mut actuator, probe) = steering(config);
        actuator.write(angle);
        let written = probe.servo_angle().unwrap();
        prop_assert!((left_limit..=right_limit).contains(&written));
        if (i32::from(left_limit)..=i32::from(right_limit)).contains(&angle) {
            prop_assert_eq!(i32::from(written), angle);
        }
    }

    #[test]
    fn dead_zone_coasts(dead_zone in 1u8..=60, pick in 0u8..=255, negative: bool) {
        let magnitude = i32::from(pick % dead_zone);
        let magnitude = if negative { -magnitude } else { magnitude };
        let config = TractionConfig {
            dead_zone,
            allow_reverse: true,
            ..TractionConfig::default()
        };
        let (mut actuator, probe) = traction(config);
        actuator.drive(magnitude);
        prop_assert_eq!(actuator.state(), TractionState::Coast);
        prop_assert_eq!(probe.duty(), 0);
    }

    #[test]
    fn out_of_domain_magnitude_writes_nothing(magnitude in prop_oneof![i32::MIN..-255, 256..i32::MAX]) {
        let (mut actuator, probe) = traction(TractionConfig::default());
        let pins = probe.pin_writes();
        let duties = probe.duty_writes();
        actuator.drive(magnitude);
        prop_assert_eq!(probe.pin_writes(), pins);
        prop_assert_eq!(probe.duty_writes(), duties);
        prop_assert_eq!(actuator.state(), TractionState::Brake);
    }

    #[test]
    fn reverse_lockout_brakes(magnitude in -255i32..0) {
        let config = TractionConfig {
            allow_reverse: false,
            ..TractionConfig::default()
        };
        let (mut actuator, probe) = traction(config.clone());
        actuator.drive(200);
        actuator.drive(magnitude);
        prop_assert_eq!(actuator.state(), TractionState::Brake);
        prop_assert_eq!(probe.duty(), 255);
        prop_assert_eq!(probe.level(config.reverse_pin), rover_common::hal::types::PinLevel::Low);
    }

    #[test]
    fn one_actuator_write_per_change(frames in prop::collection::vec((0u8..6, 85u8..95), 1..40)) {
        let mut rig = Rig::boot(config("[control]\nfailsafe_timeout_ms = 100000"));
        let probe = rig.probe.clone();
        let duty_before = probe.duty_writes();
        let servo_before = probe.servo_writes();
        let mut runner = rig.runner();

        for &(throttle, steering) in &frames {
            probe.inject(&ControlCommand::new(throttle, steering).encode());
            runner.run_once();
        }

        let changes = |pick: fn(&(u8, u8)) -> u8| {
            frames
                .iter()
                .map(pick)
                .fold((None, 0usize), |(last, n), v| {
                    (Some(v), if last == Some(v) { n } else { n + 1 })
                })
                .1
        };
        prop_assert_eq!(probe.duty_writes() - duty_before, changes(|f| f.0));
        prop_assert_eq!(probe.servo_writes() - servo_before, changes(|f| f.1));
    }
}
