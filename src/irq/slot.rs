//! Slot identity: one (PIO instance, state machine) pair.

use core::fmt;

use crate::error::SlotError;

/// Number of PIO instances on the target chip.
#[cfg(not(feature = "rp235x"))]
pub const NUM_PIOS: usize = 2;

/// Number of PIO instances on the target chip.
#[cfg(feature = "rp235x")]
pub const NUM_PIOS: usize = 3;

/// State machines per PIO instance.
pub const SMS_PER_PIO: usize = 4;

/// Total number of addressable state machines.
pub const MAX_SLOTS: usize = NUM_PIOS * SMS_PER_PIO;

/// Identity of one hardware state machine.
///
/// Only constructible through [`Slot::new`], so every `Slot` in circulation is
/// in range for the chip variant the crate was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot {
    pio: u8,
    sm: u8,
}

impl Slot {
    /// Create a slot identity.
    ///
    /// # Errors
    ///
    /// Returns an error if `pio` is not present on this chip or `sm` is not in 0..4.
    pub const fn new(pio: u8, sm: u8) -> Result<Self, SlotError> {
        if pio as usize >= NUM_PIOS {
            return Err(SlotError::PioOutOfRange {
                pio,
                count: NUM_PIOS as u8,
            });
        }
        if sm as usize >= SMS_PER_PIO {
            return Err(SlotError::StateMachineOutOfRange(sm));
        }
        Ok(Self { pio, sm })
    }

    /// PIO instance index.
    #[inline]
    pub const fn pio(self) -> u8 {
        self.pio
    }

    /// State machine index within the instance.
    #[inline]
    pub const fn sm(self) -> u8 {
        self.sm
    }

    /// Position in the routing table.
    #[inline]
    pub const fn index(self) -> usize {
        self.pio as usize * SMS_PER_PIO + self.sm as usize
    }

    /// Inverse of [`Slot::index`].
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= MAX_SLOTS {
            return None;
        }
        Some(Self {
            pio: (index / SMS_PER_PIO) as u8,
            sm: (index % SMS_PER_PIO) as u8,
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PIO{}:SM{}", self.pio, self.sm)
    }
}

/// One of the two interrupt outputs of a PIO instance.
///
/// Each output is wired to its own NVIC vector (`PIOx_IRQ_0`, `PIOx_IRQ_1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqChannel {
    /// `PIOx_IRQ_0`
    Irq0,
    /// `PIOx_IRQ_1`
    Irq1,
}

impl IrqChannel {
    /// Channel number (0 or 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            IrqChannel::Irq0 => 0,
            IrqChannel::Irq1 => 1,
        }
    }
}

impl TryFrom<u8> for IrqChannel {
    type Error = SlotError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(IrqChannel::Irq0),
            1 => Ok(IrqChannel::Irq1),
            other => Err(SlotError::InvalidChannel(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index_layout() {
        let slot = Slot::new(1, 2).unwrap();
        assert_eq!(slot.index(), 6);
        assert_eq!(Slot::from_index(6), Some(slot));
        assert_eq!(Slot::from_index(MAX_SLOTS), None);
    }

    #[test]
    fn test_slot_rejects_out_of_range() {
        assert_eq!(
            Slot::new(NUM_PIOS as u8, 0),
            Err(SlotError::PioOutOfRange {
                pio: NUM_PIOS as u8,
                count: NUM_PIOS as u8
            })
        );
        assert_eq!(Slot::new(0, 4), Err(SlotError::StateMachineOutOfRange(4)));
    }

    #[test]
    fn test_every_index_round_trips() {
        for index in 0..MAX_SLOTS {
            let slot = Slot::from_index(index).unwrap();
            assert_eq!(Slot::new(slot.pio(), slot.sm()), Ok(slot));
            assert_eq!(slot.index(), index);
        }
    }

    #[test]
    fn test_channel_conversion() {
        assert_eq!(IrqChannel::try_from(0), Ok(IrqChannel::Irq0));
        assert_eq!(IrqChannel::try_from(1), Ok(IrqChannel::Irq1));
        assert_eq!(IrqChannel::try_from(2), Err(SlotError::InvalidChannel(2)));
        assert_eq!(IrqChannel::Irq1.index(), 1);
    }
}
