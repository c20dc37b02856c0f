//! Step command word.

use crate::error::CommandError;

/// Largest step count a single command can carry.
pub const MAX_STEPS: u32 = u32::MAX >> 1;

/// One motion command as the stepper program pulls it from the TX FIFO.
///
/// Bits 31..1 hold the step count, bit 0 is set for forward motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command(u32);

impl Command {
    /// Encode a command.
    ///
    /// # Errors
    ///
    /// Returns an error if `steps` exceeds [`MAX_STEPS`].
    pub const fn new(steps: u32, reverse: bool) -> Result<Self, CommandError> {
        if steps > MAX_STEPS {
            return Err(CommandError::StepsOutOfRange(steps));
        }
        Ok(Self((steps << 1) | !reverse as u32))
    }

    /// Number of steps.
    #[inline]
    pub const fn steps(self) -> u32 {
        self.0 >> 1
    }

    /// Whether the motor turns in reverse.
    #[inline]
    pub const fn is_reverse(self) -> bool {
        self.0 & 1 == 0
    }

    /// Encoded FIFO word.
    #[inline]
    pub const fn word(self) -> u32 {
        self.0
    }
}

impl From<Command> for u32 {
    fn from(command: Command) -> Self {
        command.0
    }
}
