//! Board backend registry.
//!
//! Maps the `[hardware] driver` name to a factory. The control binary builds
//! one registry at startup, picks a backend and drops the registry again.

use rover_common::hal::driver::{DriverFactory, HalDriver, HalError};
use std::collections::BTreeMap;
use tracing::debug;

/// Named board backends.
#[derive(Default)]
pub struct DriverRegistry {
    factories: BTreeMap<&'static str, DriverFactory>,
}

impl DriverRegistry {
    /// Registry with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every backend compiled into this build.
    pub fn with_builtin_drivers() -> Self {
        let mut registry = Self::new();
        crate::drivers::register_all_drivers(&mut registry);
        registry
    }

    /// Add a backend.
    ///
    /// # Panics
    /// Panics if `name` is taken; two backends under one name is a build bug.
    pub fn register(&mut self, name: &'static str, factory: DriverFactory) {
        if self.factories.insert(name, factory).is_some() {
            panic!("Driver '{name}' is already registered");
        }
    }

    /// Factory for `name`, if registered.
    pub fn get_factory(&self, name: &str) -> Option<DriverFactory> {
        self.factories.get(name).copied()
    }

    /// Instantiate the backend called `name`.
    ///
    /// # Errors
    /// Returns `HalError::DriverNotFound` naming the available backends.
    pub fn create_driver(&self, name: &str) -> Result<Box<dyn HalDriver>, HalError> {
        let Some(factory) = self.get_factory(name) else {
            return Err(HalError::DriverNotFound(format!(
                "{name} (available: {})",
                self.list_drivers().join(", ")
            )));
        };
        let driver = factory();
        debug!("created driver '{}' v{}", driver.name(), driver.version());
        Ok(driver)
    }

    /// Registered names in alphabetical order.
    pub fn list_drivers(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}
