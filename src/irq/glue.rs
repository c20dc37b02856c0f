//! Parameter-less interrupt entry points.
//!
//! The vector table passes no context to a handler, so each PIO instance gets
//! its own function with the instance index compiled in. Bind them to the
//! `PIOx_IRQ_0`/`PIOx_IRQ_1` vectors, e.g. with `cortex-m-rt`:
//!
//! ```rust,ignore
//! #[interrupt]
//! fn PIO0_IRQ_0() {
//!     pio_stepper::irq::pio0_irq::<Board>();
//! }
//! ```

use crate::hardware::PioHardware;

/// Entry point for PIO0.
pub fn pio0_irq<H: PioHardware>() {
    H::router().dispatch(0);
}

/// Entry point for PIO1.
pub fn pio1_irq<H: PioHardware>() {
    H::router().dispatch(1);
}

/// Entry point for PIO2.
#[cfg(feature = "rp235x")]
pub fn pio2_irq<H: PioHardware>() {
    H::router().dispatch(2);
}

/// Entry point serving PIO instance `pio`.
pub fn entry_point<H: PioHardware>(pio: u8) -> Option<fn()> {
    match pio {
        0 => Some(pio0_irq::<H> as fn()),
        1 => Some(pio1_irq::<H> as fn()),
        #[cfg(feature = "rp235x")]
        2 => Some(pio2_irq::<H> as fn()),
        _ => None,
    }
}
