//! Library exports for the cardscriber canvas engine.
//!
//! Exposes the stroke-capture-and-replay subsystem behind the flashcard
//! templates: configuration resolution, the drawing model, the capture state
//! machine, and the front/back canvas controllers. The card-rendering host
//! (templating, card flips, deck packaging) lives outside this crate and
//! talks to it only through these types.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod input;
pub mod util;

pub use canvas::{BackController, FrontController, Mount, MountError};
pub use config::{CanvasConfig, CanvasOptions};
