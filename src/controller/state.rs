//! Controller lifecycle states.

use crate::irq::IrqChannel;

/// Lifecycle of a [`NotifiedController`](super::NotifiedController).
///
/// ```text
/// Unregistered --claim--> Armed --enable--> Active
///       ^                   |  <--disable--    |
///       +------release / eviction--------------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Not in the routing table; interrupts for the slot do not reach it.
    #[default]
    Unregistered,
    /// Owns its slot, completion interrupt not enabled.
    Armed,
    /// Owns its slot and receives completion interrupts on the given channel.
    Active(IrqChannel),
}

impl ControllerState {
    /// Get the state name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            ControllerState::Unregistered => "Unregistered",
            ControllerState::Armed => "Armed",
            ControllerState::Active(_) => "Active",
        }
    }

    /// Whether the controller occupies its slot.
    #[inline]
    pub fn is_registered(self) -> bool {
        !matches!(self, ControllerState::Unregistered)
    }

    /// Channel carrying the completion interrupt, if enabled.
    #[inline]
    pub fn channel(self) -> Option<IrqChannel> {
        match self {
            ControllerState::Active(channel) => Some(channel),
            _ => None,
        }
    }
}
