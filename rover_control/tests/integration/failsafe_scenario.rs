use super::{Rig, config};
use rover_common::protocol::ControlCommand;
use rover_control::actuator::TractionState;
use rover_control::channel::{FailsafeState, FrameReport, PollOutcome};

fn frame(throttle: u8, steering: u8) -> [u8; 2] {
    ControlCommand::new(throttle, steering).encode()
}

#[test]
fn drive_hold_trip_and_recover() {
    let mut rig = Rig::boot(config("[control]\nfailsafe_timeout_ms = 1000"));
    let probe = rig.probe.clone();
    assert_eq!(probe.duty(), 255, "boot leaves the bridge braked");
    let duty_at_boot = probe.duty_writes();
    let servo_at_boot = probe.servo_writes();

    let mut runner = rig.runner();
    let mut trip_at = None;
    let mut outcomes = Vec::new();

    while probe.now_ms() <= 5_010 {
        let now = probe.now_ms();
        match now {
            0 | 50 => probe.inject(&frame(150, 90)),
            5_000 => probe.inject(&frame(0, 90)),
            _ => {}
        }
        let trips = runner.channel().stats().failsafe_trips;
        let outcome = runner.run_once();
        if outcome != PollOutcome::Idle {
            outcomes.push((now, outcome, probe.duty_writes(), probe.servo_writes()));
        }
        if runner.channel().stats().failsafe_trips > trips {
            trip_at = Some(now);
            assert_eq!(probe.duty(), 255, "failsafe brakes");
            assert_eq!(probe.servo_angle(), Some(90), "failsafe centers");
        }
    }

    assert_eq!(outcomes.len(), 3);

    // t=0: both written.
    let (t, outcome, duty, servo) = outcomes[0];
    assert_eq!(t, 0);
    assert_eq!(
        outcome,
        PollOutcome::Applied(FrameReport {
            rearmed: false,
            throttle_written: true,
            steering_written: true,
        })
    );
    assert_eq!(duty, duty_at_boot + 1);
    assert_eq!(servo, servo_at_boot + 1);

    // t=50: identical frame, nothing written, watchdog refreshed.
    let (t, outcome, duty_50, servo_50) = outcomes[1];
    assert_eq!(t, 50);
    assert_eq!(
        outcome,
        PollOutcome::Applied(FrameReport {
            rearmed: false,
            throttle_written: false,
            steering_written: false,
        })
    );
    assert_eq!(duty_50, duty);
    assert_eq!(servo_50, servo);

    // Trips once, just past 50 + 1000.
    let trip_at = trip_at.expect("failsafe should trip");
    assert!((1_050..=1_052).contains(&trip_at), "tripped at {trip_at}");

    // t=5000: re-armed, coast and the unchanged angle written through.
    let (t, outcome, duty_5000, servo_5000) = outcomes[2];
    assert_eq!(t, 5_000);
    assert_eq!(
        outcome,
        PollOutcome::Applied(FrameReport {
            rearmed: true,
            throttle_written: true,
            steering_written: true,
        })
    );
    // brake on trip + coast on recovery
    assert_eq!(duty_5000, duty_50 + 2);
    assert_eq!(servo_5000, servo_50 + 2);

    let stats = runner.channel().stats();
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.failsafe_trips, 1);
    assert_eq!(stats.suppressed_writes, 2);
    assert_eq!(runner.channel().failsafe(), FailsafeState::Armed);
    drop(runner);

    assert_eq!(probe.duty(), 0);
    assert_eq!(rig.traction.state(), TractionState::Coast);
    assert_eq!(rig.steering.angle(), Some(90));
}

#[test]
fn silence_from_boot_trips_once() {
    let mut rig = Rig::boot(config("[control]\nfailsafe_timeout_ms = 500"));
    let probe = rig.probe.clone();
    let mut runner = rig.runner();

    for _ in 0..2_000 {
        runner.run_once();
    }
    assert_eq!(runner.channel().failsafe(), FailsafeState::Tripped);
    assert_eq!(runner.channel().stats().failsafe_trips, 1);
    assert_eq!(probe.duty(), 255);
    assert_eq!(probe.servo_angle(), Some(90));
}

#[test]
fn runt_datagrams_do_not_feed_the_watchdog() {
    let mut rig = Rig::boot(config("[control]\nfailsafe_timeout_ms = 100"));
    let probe = rig.probe.clone();
    let mut runner = rig.runner();

    probe.inject(&frame(200, 100));
    runner.run_once();
    for _ in 0..150 {
        probe.inject(&[7]);
        runner.run_once();
    }
    let stats = runner.channel().stats();
    assert_eq!(stats.frames, 1);
    assert_eq!(stats.discarded, 150);
    assert_eq!(stats.failsafe_trips, 1);
    assert_eq!(probe.duty(), 255);
}

#[test]
fn steering_is_clamped_through_the_channel() {
    let mut rig = Rig::boot(config(
        "[control]\nfailsafe_timeout_ms = 1000\n[steering]\ncenter = 90\nleft_limit = 70\nright_limit = 110",
    ));
    let probe = rig.probe.clone();
    let mut runner = rig.runner();

    probe.inject(&frame(0, 180));
    runner.run_once();
    assert_eq!(probe.servo_angle(), Some(110));

    probe.inject(&frame(0, 0));
    runner.run_once();
    assert_eq!(probe.servo_angle(), Some(70));
}
