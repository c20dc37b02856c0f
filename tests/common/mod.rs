//! Mock PIO hardware shared by the integration tests.
//!
//! The router is a `static`, so every test touching it must hold the guard
//! returned by [`session`].

#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};

use pio_stepper::irq::{entry_point, relative_index, NUM_PIOS};
use pio_stepper::{InterruptSource, IrqChannel, NotifiedController, PioHardware, PioIrqRouter, Slot};

/// Base flag the mock stepper program raises (`irq 3 rel`).
pub const DONE_FLAG: u32 = 3;

/// State machine operations in the order they were issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmOp {
    Enable(bool),
    Put(u32),
    PutBlocking(u32),
    Exec(u16),
}

struct MockState {
    flags: [u32; NUM_PIOS],
    sources: Vec<(u8, IrqChannel, InterruptSource)>,
    vectors: Vec<(u8, IrqChannel)>,
    handlers: Vec<(u8, IrqChannel, fn())>,
    ops: Vec<(u8, u8, SmOp)>,
}

impl MockState {
    const fn new() -> Self {
        Self {
            flags: [0; NUM_PIOS],
            sources: Vec::new(),
            vectors: Vec::new(),
            handlers: Vec::new(),
            ops: Vec::new(),
        }
    }
}

static STATE: Mutex<MockState> = Mutex::new(MockState::new());
static SESSION: Mutex<()> = Mutex::new(());
static ROUTER: PioIrqRouter<MockPio> = PioIrqRouter::new(DONE_FLAG);

fn state() -> MutexGuard<'static, MockState> {
    STATE.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct MockPio;

impl PioHardware for MockPio {
    fn router() -> &'static PioIrqRouter<Self> {
        &ROUTER
    }

    fn raised_flags(pio: u8) -> u32 {
        state().flags[pio as usize]
    }

    fn clear_flags(pio: u8, mask: u32) {
        state().flags[pio as usize] &= !mask;
    }

    fn set_source_enabled(pio: u8, channel: IrqChannel, source: InterruptSource, enabled: bool) {
        let mut state = state();
        state.sources.retain(|&s| s != (pio, channel, source));
        if enabled {
            state.sources.push((pio, channel, source));
        }
    }

    fn install_handler(pio: u8, channel: IrqChannel, handler: fn()) {
        let mut state = state();
        state.handlers.retain(|&(p, c, _)| (p, c) != (pio, channel));
        state.handlers.push((pio, channel, handler));
    }

    fn set_vector_enabled(pio: u8, channel: IrqChannel, enabled: bool) {
        let mut state = state();
        state.vectors.retain(|&v| v != (pio, channel));
        if enabled {
            state.vectors.push((pio, channel));
        }
    }

    fn sm_put(pio: u8, sm: u8, word: u32) {
        state().ops.push((pio, sm, SmOp::Put(word)));
    }

    fn sm_put_blocking(pio: u8, sm: u8, word: u32) {
        state().ops.push((pio, sm, SmOp::PutBlocking(word)));
    }

    fn sm_exec(pio: u8, sm: u8, instruction: u16) {
        state().ops.push((pio, sm, SmOp::Exec(instruction)));
    }

    fn sm_set_enabled(pio: u8, sm: u8, enabled: bool) {
        state().ops.push((pio, sm, SmOp::Enable(enabled)));
    }
}

/// Serialise access to the router and start from a clean slate.
pub fn session() -> MutexGuard<'static, ()> {
    let guard = SESSION.lock().unwrap_or_else(|e| e.into_inner());
    ROUTER.reset();
    *state() = MockState::new();
    guard
}

pub fn slot(pio: u8, sm: u8) -> Slot {
    Slot::new(pio, sm).unwrap()
}

/// Fresh unregistered controller in leaked storage.
pub fn controller(pio: u8, sm: u8) -> &'static NotifiedController<MockPio> {
    Box::leak(Box::new(NotifiedController::new(slot(pio, sm))))
}

/// One-hot flag state machine `sm` raises.
pub fn flag_of(sm: u8) -> u32 {
    1 << relative_index(DONE_FLAG, sm)
}

/// Latch the completion flag of (pio, sm) without firing the vector.
pub fn raise(pio: u8, sm: u8) {
    state().flags[pio as usize] |= flag_of(sm);
}

/// Latch arbitrary flags.
pub fn latch(pio: u8, mask: u32) {
    state().flags[pio as usize] |= mask;
}

pub fn flags(pio: u8) -> u32 {
    state().flags[pio as usize]
}

/// Run the vector handler installed for (pio, channel), or the instance's
/// entry point if nothing was installed.
pub fn fire(pio: u8, channel: IrqChannel) {
    let installed = state()
        .handlers
        .iter()
        .find(|&&(p, c, _)| (p, c) == (pio, channel))
        .map(|&(_, _, handler)| handler);
    let handler = installed.or_else(|| entry_point::<MockPio>(pio)).unwrap();
    handler();
}

/// Raise the flag of (pio, sm) and fire the vector.
pub fn complete(pio: u8, sm: u8, channel: IrqChannel) {
    raise(pio, sm);
    fire(pio, channel);
}

pub fn source_enabled(pio: u8, channel: IrqChannel, source: InterruptSource) -> bool {
    state().sources.contains(&(pio, channel, source))
}

pub fn vector_enabled(pio: u8, channel: IrqChannel) -> bool {
    state().vectors.contains(&(pio, channel))
}

pub fn handler_installed(pio: u8, channel: IrqChannel) -> bool {
    state().handlers.iter().any(|&(p, c, _)| (p, c) == (pio, channel))
}

/// Operations issued to (pio, sm), in order.
pub fn sm_ops(pio: u8, sm: u8) -> Vec<SmOp> {
    state()
        .ops
        .iter()
        .filter(|&&(p, s, _)| (p, s) == (pio, sm))
        .map(|&(_, _, op)| op)
        .collect()
}
