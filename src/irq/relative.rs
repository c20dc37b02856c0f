//! Relative interrupt flag arithmetic.
//!
//! A PIO program raising `irq N rel` sets flag `(N + sm) mod 4` in the low two
//! bits of the flag index. The same program running on four state machines
//! therefore raises four distinct flags, and the flag that fired identifies
//! the state machine.
//!
//! | base | sm 0 | sm 1 | sm 2 | sm 3 |
//! |------|------|------|------|------|
//! | 0    | 0    | 1    | 2    | 3    |
//! | 1    | 1    | 2    | 3    | 0    |
//! | 2    | 2    | 3    | 0    | 1    |
//! | 3    | 3    | 0    | 1    | 2    |

use super::slot::SMS_PER_PIO;

const REL_MASK: u32 = 0b11;

/// Flag index raised by state machine `sm` for a program using base flag `base`.
///
/// Adds `sm` to the two low bits of `base` modulo 4. Higher bits of `base`
/// are preserved; they select a flag bank on parts with more than four flags.
#[inline]
pub const fn relative_index(base: u32, sm: u8) -> u32 {
    (base & !REL_MASK) | (base.wrapping_add(sm as u32) & REL_MASK)
}

/// Flag bits reachable from `base` through relative addressing.
#[inline]
pub fn flag_window(base: u32) -> u32 {
    0b1111u32.checked_shl(base & !REL_MASK).unwrap_or(0)
}

/// State machine that raised `raised_flags`, or `None` if the flags are not
/// exactly one flag of the relative window.
pub fn try_state_machine_from_interrupt(raised_flags: u32, base: u32) -> Option<u8> {
    (0..SMS_PER_PIO as u8).find(|&sm| {
        let index = relative_index(base, sm);
        index < u32::BITS && raised_flags == 1 << index
    })
}

/// State machine that raised `raised_flags`.
///
/// `raised_flags` must have exactly the one bit set that some state machine's
/// [`relative_index`] selects.
///
/// # Panics
///
/// Panics if no state machine matches. That means the caller routed a flag
/// that does not belong to this program.
pub fn state_machine_from_interrupt(raised_flags: u32, base: u32) -> u8 {
    match try_state_machine_from_interrupt(raised_flags, base) {
        Some(sm) => sm,
        None => panic!(
            "flags {:#x} not raised by any state machine for base {}",
            raised_flags, base
        ),
    }
}

/// Interrupt sources of one PIO interrupt output, in `INTE` register bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptSource {
    /// SM0 RX FIFO not empty
    Sm0RxFifoNotEmpty = 0,
    /// SM1 RX FIFO not empty
    Sm1RxFifoNotEmpty = 1,
    /// SM2 RX FIFO not empty
    Sm2RxFifoNotEmpty = 2,
    /// SM3 RX FIFO not empty
    Sm3RxFifoNotEmpty = 3,
    /// SM0 TX FIFO not full
    Sm0TxFifoNotFull = 4,
    /// SM1 TX FIFO not full
    Sm1TxFifoNotFull = 5,
    /// SM2 TX FIFO not full
    Sm2TxFifoNotFull = 6,
    /// SM3 TX FIFO not full
    Sm3TxFifoNotFull = 7,
    /// IRQ flag 0
    Interrupt0 = 8,
    /// IRQ flag 1
    Interrupt1 = 9,
    /// IRQ flag 2
    Interrupt2 = 10,
    /// IRQ flag 3
    Interrupt3 = 11,
}

impl InterruptSource {
    const ALL: [InterruptSource; 12] = [
        InterruptSource::Sm0RxFifoNotEmpty,
        InterruptSource::Sm1RxFifoNotEmpty,
        InterruptSource::Sm2RxFifoNotEmpty,
        InterruptSource::Sm3RxFifoNotEmpty,
        InterruptSource::Sm0TxFifoNotFull,
        InterruptSource::Sm1TxFifoNotFull,
        InterruptSource::Sm2TxFifoNotFull,
        InterruptSource::Sm3TxFifoNotFull,
        InterruptSource::Interrupt0,
        InterruptSource::Interrupt1,
        InterruptSource::Interrupt2,
        InterruptSource::Interrupt3,
    ];

    /// Source with the given ordinal.
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Ordinal, equal to the bit position in `INTE`/`INTF`/`INTS`.
    #[inline]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Register mask for this source.
    #[inline]
    pub const fn mask(self) -> u32 {
        1 << self.ordinal()
    }
}

/// Source `relative_offset` positions after `base_source`.
///
/// Used with [`InterruptSource::Interrupt0`] and a [`relative_index`] to name
/// the source a state machine's flag raises.
pub fn interrupt_source(base_source: InterruptSource, relative_offset: u32) -> Option<InterruptSource> {
    base_source
        .ordinal()
        .checked_add(relative_offset)
        .and_then(InterruptSource::from_ordinal)
}
