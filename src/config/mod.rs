//! Configuration module for pio-stepper.
//!
//! Binds named controllers to PIO state machines and interrupt channels,
//! loaded from TOML files (with `std` feature) or pre-parsed data.

mod controller;
#[cfg(feature = "std")]
mod loader;
mod system;
mod validation;

pub use controller::ControllerConfig;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
