//! Stepper controller with completion notification.

use core::cell::Cell;
use core::fmt;
use core::marker::PhantomData;
use core::sync::atomic::{AtomicU32, Ordering};

use critical_section::{CriticalSection, Mutex};
use static_cell::StaticCell;

use crate::error::{ControllerError, Result};
use crate::hardware::PioHardware;
use crate::irq::{IrqChannel, Slot};

use super::command::Command;
use super::state::ControllerState;

/// `pull noblock`
const PULL_NOBLOCK: u16 = 0x8080;
/// `out isr, 32`
const OUT_ISR_32: u16 = 0x60c0;

/// Completion callback. Runs in interrupt context.
pub type Notifier<H> = fn(&NotifiedController<H>);

/// Controller for one PIO state machine running the stepper program.
///
/// Counts completed commands and calls an optional [`Notifier`] each time the
/// program signals completion. Controllers live in `'static` storage (a
/// `static`, a [`StaticCell`], or a leaked box) because the router keeps a
/// reference to them for as long as they are registered.
///
/// # Example
///
/// ```rust,ignore
/// use pio_stepper::{Command, IrqChannel, NotifiedController, Slot};
/// use static_cell::StaticCell;
///
/// static X_AXIS: StaticCell<NotifiedController<Board>> = StaticCell::new();
///
/// let (x, _) = NotifiedController::install(&X_AXIS, Slot::new(0, 2)?);
/// x.on_complete_callback(|c| defmt::info!("done: {}", c.commands()));
/// x.register_pio_interrupt(IrqChannel::Irq0, true)?;
/// x.take_steps(Command::new(3200, false)?);
/// ```
pub struct NotifiedController<H: PioHardware> {
    slot: Slot,
    /// Written by the interrupt handler only.
    commands: AtomicU32,
    callback: Mutex<Cell<Option<Notifier<H>>>>,
    state: Mutex<Cell<ControllerState>>,
    _hardware: PhantomData<fn() -> H>,
}

impl<H: PioHardware> NotifiedController<H> {
    /// Create an unregistered controller for `slot`.
    ///
    /// The controller receives nothing until [`claim`](Self::claim)ed.
    pub const fn new(slot: Slot) -> Self {
        Self {
            slot,
            commands: AtomicU32::new(0),
            callback: Mutex::new(Cell::new(None)),
            state: Mutex::new(Cell::new(ControllerState::Unregistered)),
            _hardware: PhantomData,
        }
    }

    /// Create a controller in `cell` and register it for `slot`.
    ///
    /// The flag is the result of [`claim`](Self::claim): `false` if a
    /// previous controller was evicted from the slot.
    ///
    /// # Panics
    ///
    /// Panics if `cell` was already initialised.
    pub fn install(cell: &'static StaticCell<Self>, slot: Slot) -> (&'static Self, bool) {
        let controller: &'static Self = cell.init(Self::new(slot));
        let was_empty = controller.claim();
        (controller, was_empty)
    }

    /// Register this controller as the owner of its slot.
    ///
    /// Returns `false` if another controller owned the slot. That controller
    /// is evicted: its interrupt is disabled and it stops receiving
    /// completions. Claiming a controller that is already registered does
    /// nothing and returns `true`.
    pub fn claim(&'static self) -> bool {
        let was_empty = H::router().claim(self);
        if was_empty {
            debug!("PIO{} SM{} claimed", self.slot.pio(), self.slot.sm());
        } else {
            warn!(
                "PIO{} SM{} claimed over a previous controller",
                self.slot.pio(),
                self.slot.sm()
            );
        }
        was_empty
    }

    /// Unregister this controller, disabling its interrupt first if active.
    ///
    /// The controller may be claimed again later.
    pub fn release(&'static self) {
        H::router().release(self);
        debug!("PIO{} SM{} released", self.slot.pio(), self.slot.sm());
    }

    /// Enable or disable the completion interrupt on `channel`.
    ///
    /// Enabling installs the dispatch entry point for this PIO instance,
    /// enables this state machine's interrupt source on the channel and the
    /// channel's vector. Disabling removes the source; the vector stays
    /// enabled while other state machines use it.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::NotRegistered`] if the controller does not own its slot
    /// - [`ControllerError::ChannelMismatch`] if the interrupt is active on the other channel
    /// - [`ControllerError::SourceUnavailable`] if the program's flag has no interrupt source
    pub fn register_pio_interrupt(&self, channel: IrqChannel, enable: bool) -> Result<()> {
        let router = H::router();
        critical_section::with(|cs| {
            match (self.state_in(cs), enable) {
                (ControllerState::Unregistered, _) => Err(ControllerError::NotRegistered),
                (ControllerState::Armed, true) => {
                    router.enable_line(cs, self.slot, channel)?;
                    self.set_state_in(cs, ControllerState::Active(channel));
                    Ok(())
                }
                (ControllerState::Armed, false) => Ok(()),
                (ControllerState::Active(active), _) if active != channel => {
                    Err(ControllerError::ChannelMismatch {
                        active,
                        requested: channel,
                    })
                }
                (ControllerState::Active(_), true) => Ok(()),
                (ControllerState::Active(_), false) => {
                    router.disable_line(cs, self.slot, channel);
                    self.set_state_in(cs, ControllerState::Armed);
                    Ok(())
                }
            }
        })?;
        Ok(())
    }

    /// Number of commands completed since creation or the last reset.
    #[inline]
    pub fn commands(&self) -> u32 {
        self.commands.load(Ordering::Acquire)
    }

    /// Zero the completed-command counter.
    ///
    /// Races with a completion interrupt arriving at the same time. Disable
    /// the interrupt first if an exact count matters.
    #[inline]
    pub fn reset_commands(&self) {
        self.commands.store(0, Ordering::Release);
    }

    /// Install or replace the completion callback.
    ///
    /// Takes effect from the next completion interrupt.
    pub fn on_complete_callback(&self, callback: Notifier<H>) {
        critical_section::with(|cs| self.callback.borrow(cs).set(Some(callback)));
    }

    /// Remove the completion callback.
    pub fn clear_callback(&self) {
        critical_section::with(|cs| self.callback.borrow(cs).set(None));
    }

    /// Slot this controller is bound to.
    #[inline]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ControllerState {
        critical_section::with(|cs| self.state_in(cs))
    }

    /// Whether completion interrupts are enabled.
    pub fn is_active(&self) -> bool {
        matches!(self.state(), ControllerState::Active(_))
    }

    /// Queue a command, waiting for FIFO space.
    pub fn take_steps(&self, command: Command) {
        H::sm_put_blocking(self.slot.pio(), self.slot.sm(), command.word());
    }

    /// Load a new step delay into the program's ISR.
    ///
    /// Briefly stops the state machine. Call it only while no command is
    /// running.
    pub fn set_delay(&self, delay: u32) {
        let (pio, sm) = (self.slot.pio(), self.slot.sm());
        H::sm_set_enabled(pio, sm, false);
        H::sm_put(pio, sm, delay);
        H::sm_exec(pio, sm, PULL_NOBLOCK);
        H::sm_exec(pio, sm, OUT_ISR_32);
        H::sm_set_enabled(pio, sm, true);
    }

    /// Start or stop the state machine.
    pub fn enable(&self, enabled: bool) {
        H::sm_set_enabled(self.slot.pio(), self.slot.sm(), enabled);
    }

    /// Completion handler, called by the router in interrupt context.
    pub(crate) fn on_interrupt(&self) {
        let pio = self.slot.pio();
        let flag = H::router().flag_mask(self.slot);

        debug_assert!(
            H::raised_flags(pio) & flag != 0,
            "{} handler entered without its flag raised",
            self.slot
        );

        let count = self.commands.load(Ordering::Relaxed);
        self.commands.store(count.wrapping_add(1), Ordering::Release);
        H::clear_flags(pio, flag);

        let callback = critical_section::with(|cs| self.callback.borrow(cs).get());
        if let Some(callback) = callback {
            callback(self);
        }
    }

    pub(crate) fn state_in(&self, cs: CriticalSection<'_>) -> ControllerState {
        self.state.borrow(cs).get()
    }

    pub(crate) fn set_state_in(&self, cs: CriticalSection<'_>, state: ControllerState) {
        self.state.borrow(cs).set(state);
    }
}

impl<H: PioHardware> fmt::Debug for NotifiedController<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifiedController")
            .field("slot", &self.slot)
            .field("state", &self.state())
            .field("commands", &self.commands())
            .finish()
    }
}
