//! Error types for pio-stepper.
//!
//! Provides unified error handling across configuration, slot addressing,
//! controller lifecycle and command encoding.
//!
//! Programming-contract violations (an interrupt flag no state machine owns, a
//! stray interrupt on an empty slot) are not represented here: they are
//! debug assertions, never recoverable runtime conditions.

use core::fmt;

use crate::irq::IrqChannel;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all pio-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Slot or channel addressing error
    Slot(SlotError),
    /// Controller lifecycle error
    Controller(ControllerError),
    /// Command encoding error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Controller name not found in configuration
    ControllerNotFound(heapless::String<32>),
    /// Two controllers are bound to the same state machine
    DuplicateSlot {
        /// Controller declared first
        first: heapless::String<32>,
        /// Controller that would evict it
        second: heapless::String<32>,
    },
    /// Controller entry has an out-of-range slot or channel
    InvalidController {
        /// Controller name
        name: heapless::String<32>,
        /// Underlying addressing error
        reason: SlotError,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Slot and channel addressing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotError {
    /// PIO instance index is not present on this chip
    PioOutOfRange {
        /// Requested instance
        pio: u8,
        /// Number of instances on this chip
        count: u8,
    },
    /// State machine index is not in 0..4
    StateMachineOutOfRange(u8),
    /// Interrupt channel is not 0 or 1
    InvalidChannel(u8),
}

/// Controller lifecycle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// Controller does not occupy its slot (never claimed, released or evicted)
    NotRegistered,
    /// Interrupt line is active on a different channel
    ChannelMismatch {
        /// Channel currently carrying the completion interrupt
        active: IrqChannel,
        /// Channel named in the request
        requested: IrqChannel,
    },
    /// Relative flag index has no interrupt source on this hardware
    SourceUnavailable(u32),
}

/// Command encoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Step count does not fit in 31 bits
    StepsOutOfRange(u32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Slot(e) => write!(f, "Slot error: {}", e),
            Error::Controller(e) => write!(f, "Controller error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::ControllerNotFound(name) => write!(f, "Controller '{}' not found", name),
            ConfigError::DuplicateSlot { first, second } => write!(
                f,
                "Controllers '{}' and '{}' are bound to the same state machine",
                first, second
            ),
            ConfigError::InvalidController { name, reason } => {
                write!(f, "Controller '{}': {}", name, reason)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::PioOutOfRange { pio, count } => {
                write!(f, "PIO{} does not exist, this chip has {}", pio, count)
            }
            SlotError::StateMachineOutOfRange(sm) => {
                write!(f, "Invalid state machine: {}. Must be 0-3", sm)
            }
            SlotError::InvalidChannel(ch) => {
                write!(f, "Invalid interrupt channel: {}. Must be 0 or 1", ch)
            }
        }
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::NotRegistered => write!(f, "Controller is not registered in its slot"),
            ControllerError::ChannelMismatch { active, requested } => write!(
                f,
                "Interrupt is active on channel {}, not {}",
                active.index(),
                requested.index()
            ),
            ControllerError::SourceUnavailable(index) => {
                write!(f, "No interrupt source for relative flag {}", index)
            }
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::StepsOutOfRange(steps) => {
                write!(f, "Step count {} exceeds maximum {}", steps, u32::MAX >> 1)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SlotError> for Error {
    fn from(e: SlotError) -> Self {
        Error::Slot(e)
    }
}

impl From<ControllerError> for Error {
    fn from(e: ControllerError) -> Self {
        Error::Controller(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for SlotError {}

#[cfg(feature = "std")]
impl std::error::Error for ControllerError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}
