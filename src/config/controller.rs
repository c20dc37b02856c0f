//! Controller binding from TOML.

use serde::Deserialize;

use crate::controller::NotifiedController;
use crate::error::{Result, SlotError};
use crate::hardware::PioHardware;
use crate::irq::{IrqChannel, Slot};

/// Binding of one named controller to a state machine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ControllerConfig {
    /// PIO instance index.
    pub pio: u8,

    /// State machine index within the instance (0-3).
    pub state_machine: u8,

    /// PIO interrupt output carrying completions (0 or 1).
    #[serde(default)]
    pub irq_channel: u8,

    /// Enable the completion interrupt when applied.
    #[serde(default = "default_notify")]
    pub notify: bool,

    /// Step delay loaded into the program when applied.
    #[serde(default)]
    pub step_delay: Option<u32>,
}

fn default_notify() -> bool {
    true
}

impl ControllerConfig {
    /// Slot addressed by this binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the PIO or state machine index is out of range.
    pub fn slot(&self) -> core::result::Result<Slot, SlotError> {
        Slot::new(self.pio, self.state_machine)
    }

    /// Interrupt channel addressed by this binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is not 0 or 1.
    pub fn channel(&self) -> core::result::Result<IrqChannel, SlotError> {
        IrqChannel::try_from(self.irq_channel)
    }

    /// Load the step delay and enable notification on a claimed controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is invalid or the interrupt cannot be
    /// enabled (see [`NotifiedController::register_pio_interrupt`]).
    pub fn apply<H: PioHardware>(&self, controller: &NotifiedController<H>) -> Result<()> {
        let channel = self.channel()?;

        if let Some(delay) = self.step_delay {
            controller.set_delay(delay);
        }
        if self.notify {
            controller.register_pio_interrupt(channel, true)?;
        }

        Ok(())
    }
}
