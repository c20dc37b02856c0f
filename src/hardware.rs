//! PIO hardware access.
//!
//! Every register access the crate performs goes through [`PioHardware`]. The
//! trait has associated functions only: the interrupt entry points receive no
//! context, so there is no `self` to call through.
//!
//! An implementation for a real board wraps the PAC (or a HAL) and provides a
//! `static` [`PioIrqRouter`] for the loaded stepper program:
//!
//! ```rust,ignore
//! use pio_stepper::{IrqChannel, InterruptSource, PioHardware, PioIrqRouter};
//!
//! static ROUTER: PioIrqRouter<Board> = PioIrqRouter::new(STEPPER_IRQ_DONE);
//!
//! struct Board;
//!
//! impl PioHardware for Board {
//!     fn router() -> &'static PioIrqRouter<Self> {
//!         &ROUTER
//!     }
//!     // register accessors ...
//! }
//! ```

use crate::irq::{InterruptSource, IrqChannel, PioIrqRouter};

/// Register-level operations on the PIO blocks and the interrupt controller.
///
/// `pio` and `sm` arguments are always in range: callers pass indices taken
/// from a validated [`Slot`](crate::irq::Slot).
pub trait PioHardware: Sized + 'static {
    /// Router for the stepper program running on this hardware.
    fn router() -> &'static PioIrqRouter<Self>;

    /// Raw value of the instance's IRQ flag register.
    fn raised_flags(pio: u8) -> u32;

    /// Clear the flags set in `mask` (write-1-to-clear).
    fn clear_flags(pio: u8, mask: u32);

    /// Enable or disable `source` on the given interrupt output.
    fn set_source_enabled(pio: u8, channel: IrqChannel, source: InterruptSource, enabled: bool);

    /// Make `handler` the vector handler for the given interrupt output.
    ///
    /// Called every time a line is enabled; implementations must accept a
    /// repeated install of the same handler. Targets with a flash vector
    /// table bind the entry points at compile time and implement this as a
    /// no-op.
    fn install_handler(pio: u8, channel: IrqChannel, handler: fn());

    /// Enable or disable the NVIC vector of the given interrupt output.
    fn set_vector_enabled(pio: u8, channel: IrqChannel, enabled: bool);

    /// Write a word to the TX FIFO, dropping it if the FIFO is full.
    fn sm_put(pio: u8, sm: u8, word: u32);

    /// Write a word to the TX FIFO, waiting for space.
    fn sm_put_blocking(pio: u8, sm: u8, word: u32);

    /// Execute one instruction immediately on the state machine.
    fn sm_exec(pio: u8, sm: u8, instruction: u16);

    /// Start or stop the state machine.
    fn sm_set_enabled(pio: u8, sm: u8, enabled: bool);
}
