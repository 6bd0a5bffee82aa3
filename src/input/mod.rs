//! Pointer-event normalization and the per-surface capture state machine.

pub mod events;
pub mod state;

// Re-export commonly used types at module level
pub use events::{InputError, PointerInput, PointerKind, PointerPhase};
pub use state::{CaptureUpdate, InputCapture};
