//! Interrupt router: slot table, line bookkeeping and dispatch.

use core::cell::RefCell;

use critical_section::{CriticalSection, Mutex};

use crate::controller::{ControllerState, NotifiedController};
use crate::error::ControllerError;
use crate::hardware::PioHardware;

use super::glue::entry_point;
use super::registry::SlotRegistry;
use super::relative::{
    flag_window, interrupt_source, relative_index, try_state_machine_from_interrupt,
    InterruptSource,
};
use super::slot::{IrqChannel, Slot, MAX_SLOTS, NUM_PIOS};

struct Routes<H: PioHardware> {
    slots: SlotRegistry<'static, NotifiedController<H>>,
    /// Per (pio, channel): bitmask of state machines with their source enabled.
    lines: [[u8; 2]; NUM_PIOS],
}

/// Routes PIO interrupts to the [`NotifiedController`] owning each state machine.
///
/// One router exists per hardware type, as a `static` returned by
/// [`PioHardware::router`]. It is parameterised by the flag index the stepper
/// program raises with `irq <base> rel` when a command completes.
///
/// The table is mutated only from normal context (claim, release, line
/// changes) and read by [`dispatch`](Self::dispatch) inside a short critical
/// section. Controller handlers run after the critical section is left.
pub struct PioIrqRouter<H: PioHardware> {
    base_flag: u32,
    routes: Mutex<RefCell<Routes<H>>>,
}

impl<H: PioHardware> PioIrqRouter<H> {
    /// Create a router for a program raising `base_flag` relative to its state machine.
    pub const fn new(base_flag: u32) -> Self {
        Self {
            base_flag,
            routes: Mutex::new(RefCell::new(Routes {
                slots: SlotRegistry::new(),
                lines: [[0; 2]; NUM_PIOS],
            })),
        }
    }

    /// Base flag index of the routed program.
    #[inline]
    pub fn base_flag(&self) -> u32 {
        self.base_flag
    }

    /// Controller currently occupying `slot`.
    pub fn lookup(&self, slot: Slot) -> Option<&'static NotifiedController<H>> {
        critical_section::with(|cs| self.routes.borrow_ref(cs).slots.lookup(slot))
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        critical_section::with(|cs| self.routes.borrow_ref(cs).slots.occupied())
    }

    /// Whether `slot` has its completion source enabled on `channel`.
    pub fn is_line_enabled(&self, slot: Slot, channel: IrqChannel) -> bool {
        critical_section::with(|cs| {
            let routes = self.routes.borrow_ref(cs);
            routes.lines[slot.pio() as usize][channel.index()] & (1 << slot.sm()) != 0
        })
    }

    /// Handle an interrupt from PIO instance `pio`.
    ///
    /// Every raised flag of the program's window that belongs to a state
    /// machine with an enabled line is handed to its controller, lowest flag
    /// first. Flags of state machines without an enabled line are left for
    /// whoever polls them.
    ///
    /// Both channels of an instance share one entry point, so the vector that
    /// fired is unknown here: a state machine active on either channel is
    /// serviced. Its flag is cleared by the first dispatch, so a second vector
    /// pending for the same completion finds nothing to do.
    ///
    /// A `pio` outside `0..NUM_PIOS` is ignored without touching the hardware.
    pub fn dispatch(&self, pio: u8) {
        if pio as usize >= NUM_PIOS {
            warn!("dispatch for missing PIO{}", pio);
            return;
        }

        let mut pending = H::raised_flags(pio) & flag_window(self.base_flag);

        while pending != 0 {
            let flag = pending & pending.wrapping_neg();
            pending &= !flag;

            let Some(sm) = try_state_machine_from_interrupt(flag, self.base_flag) else {
                debug_assert!(false, "flag {:#x} outside the relative window", flag);
                continue;
            };
            let Ok(slot) = Slot::new(pio, sm) else {
                continue;
            };

            let (target, enabled) = critical_section::with(|cs| {
                let routes = self.routes.borrow_ref(cs);
                let mask = routes.lines[pio as usize];
                (routes.slots.lookup(slot), (mask[0] | mask[1]) & (1 << sm) != 0)
            });

            if !enabled {
                continue;
            }

            match target {
                Some(controller) => controller.on_interrupt(),
                None => {
                    H::clear_flags(pio, flag);
                    warn!("stray interrupt on PIO{} SM{}", pio, sm);
                    debug_assert!(false, "interrupt for unregistered slot {}", slot);
                }
            }
        }
    }

    /// Unregister every controller and disable every line.
    ///
    /// Released controllers return to [`ControllerState::Unregistered`].
    pub fn reset(&self) {
        critical_section::with(|cs| {
            for index in 0..MAX_SLOTS {
                let Some(slot) = Slot::from_index(index) else {
                    continue;
                };
                let evicted = self.routes.borrow_ref_mut(cs).slots.evict(slot);
                if let Some(controller) = evicted {
                    self.retire(cs, controller);
                }
            }
        });
        debug!("router reset");
    }

    /// Put `controller` into its slot, evicting any previous occupant.
    ///
    /// Returns `false` if an occupant was evicted. Already registered
    /// controllers are left as they are.
    pub(crate) fn claim(&self, controller: &'static NotifiedController<H>) -> bool {
        let slot = controller.slot();
        critical_section::with(|cs| {
            if controller.state_in(cs).is_registered() {
                return true;
            }

            let previous = self.routes.borrow_ref(cs).slots.lookup(slot);
            if let Some(previous) = previous {
                self.retire(cs, previous);
            }

            let was_empty = self
                .routes
                .borrow_ref_mut(cs)
                .slots
                .register(slot, controller, true);
            controller.set_state_in(cs, ControllerState::Armed);
            was_empty
        })
    }

    /// Disable the controller's line if needed and remove it from its slot.
    pub(crate) fn release(&self, controller: &'static NotifiedController<H>) {
        critical_section::with(|cs| {
            if let ControllerState::Active(channel) = controller.state_in(cs) {
                self.disable_line(cs, controller.slot(), channel);
            }
            self.routes
                .borrow_ref_mut(cs)
                .slots
                .register(controller.slot(), controller, false);
            controller.set_state_in(cs, ControllerState::Unregistered);
        });
    }

    /// Enable the completion source of `slot` on `channel` and its vector.
    pub(crate) fn enable_line(
        &self,
        cs: CriticalSection<'_>,
        slot: Slot,
        channel: IrqChannel,
    ) -> Result<(), ControllerError> {
        let source = self.source_for(slot)?;
        let (pio, sm) = (slot.pio(), slot.sm());

        self.routes.borrow_ref_mut(cs).lines[pio as usize][channel.index()] |= 1 << sm;

        H::set_source_enabled(pio, channel, source, true);
        if let Some(handler) = entry_point::<H>(pio) {
            H::install_handler(pio, channel, handler);
        }
        H::set_vector_enabled(pio, channel, true);

        debug!("PIO{} SM{} enabled on IRQ{}", pio, sm, channel.index());
        Ok(())
    }

    /// Disable the completion source of `slot` on `channel`.
    ///
    /// The vector is disabled once no state machine uses the line any more.
    pub(crate) fn disable_line(&self, cs: CriticalSection<'_>, slot: Slot, channel: IrqChannel) {
        let (pio, sm) = (slot.pio(), slot.sm());

        if let Ok(source) = self.source_for(slot) {
            H::set_source_enabled(pio, channel, source, false);
        }

        let mut routes = self.routes.borrow_ref_mut(cs);
        let line = &mut routes.lines[pio as usize][channel.index()];
        *line &= !(1 << sm);
        if *line == 0 {
            H::set_vector_enabled(pio, channel, false);
        }

        debug!("PIO{} SM{} disabled on IRQ{}", pio, sm, channel.index());
    }

    /// One-hot flag mask `slot` raises on completion.
    pub(crate) fn flag_mask(&self, slot: Slot) -> u32 {
        1u32.checked_shl(relative_index(self.base_flag, slot.sm()))
            .unwrap_or(0)
    }

    fn source_for(&self, slot: Slot) -> Result<InterruptSource, ControllerError> {
        let index = relative_index(self.base_flag, slot.sm());
        interrupt_source(InterruptSource::Interrupt0, index)
            .ok_or(ControllerError::SourceUnavailable(index))
    }

    fn retire(&self, cs: CriticalSection<'_>, controller: &'static NotifiedController<H>) {
        if let ControllerState::Active(channel) = controller.state_in(cs) {
            self.disable_line(cs, controller.slot(), channel);
        }
        controller.set_state_in(cs, ControllerState::Unregistered);
    }
}
