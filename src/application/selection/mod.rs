//! Selection module - the UI-driving interaction state machine.

mod controller;
mod event;
mod memory;
mod phase;

pub use controller::SelectionController;
pub use event::InteractionEvent;
pub use memory::override_memory;
pub use phase::{PhaseKind, SelectionPhase, SerendipityMode};
