//! Stepper controllers bound to one PIO state machine.

mod command;
mod notified;
mod state;

pub use command::{Command, MAX_STEPS};
pub use notified::{NotifiedController, Notifier};
pub use state::ControllerState;
