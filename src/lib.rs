//! # pio-stepper
//!
//! Completion notification for stepper motors driven by RP2040/RP235x PIO
//! state machines.
//!
//! ## Features
//!
//! - **Relative IRQ routing**: one stepper program raising `irq N rel` on
//!   every state machine; the raised flag identifies the state machine
//! - **Slot registry**: at most one controller per state machine, eviction
//!   reported instead of silently double-booking
//! - **Parameter-less entry points**: one per PIO instance, ready to bind to
//!   the vector table
//! - **Interrupt-safe counters and callbacks**: completion count and an
//!   optional callback per controller
//! - **no_std compatible**: only `critical-section` is needed on target
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pio_stepper::{Command, IrqChannel, NotifiedController, Slot};
//! use static_cell::StaticCell;
//!
//! static X_AXIS: StaticCell<NotifiedController<Board>> = StaticCell::new();
//!
//! let (x, _) = NotifiedController::install(&X_AXIS, Slot::new(0, 0)?);
//! x.on_complete_callback(|c| log::info!("x done, {} commands", c.commands()));
//! x.register_pio_interrupt(IrqChannel::Irq0, true)?;
//! x.take_steps(Command::new(3200, false)?);
//!
//! #[interrupt]
//! fn PIO0_IRQ_0() {
//!     pio_stepper::irq::pio0_irq::<Board>();
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing, host critical section
//! - `log` (default): Log through the `log` facade
//! - `defmt`: Log through defmt instead of the `log` facade
//! - `rp235x`: Three PIO instances instead of two

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod controller;
pub mod error;
pub mod hardware;
pub mod irq;

// Re-exports for ergonomic API
pub use config::{validate_config, ControllerConfig, SystemConfig};
pub use controller::{Command, ControllerState, NotifiedController, Notifier};
pub use error::{Error, Result};
pub use hardware::PioHardware;
pub use irq::{InterruptSource, IrqChannel, PioIrqRouter, Slot, SlotRegistry};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
