//! Interrupt routing for PIO state machines.
//!
//! Maps the flag a state machine raises back to the state machine, and the
//! state machine to the controller registered for it.

mod glue;
mod registry;
pub mod relative;
mod router;
mod slot;

pub use glue::{entry_point, pio0_irq, pio1_irq};
#[cfg(feature = "rp235x")]
pub use glue::pio2_irq;
pub use registry::SlotRegistry;
pub use relative::{
    flag_window, interrupt_source, relative_index, state_machine_from_interrupt,
    try_state_machine_from_interrupt, InterruptSource,
};
pub use router::PioIrqRouter;
pub use slot::{IrqChannel, Slot, MAX_SLOTS, NUM_PIOS, SMS_PER_PIO};
