//! Normalized pointer event types.
//!
//! The host translates whatever its platform delivers (pointer, mouse, touch
//! events, coalesced or not) into a flat stream of [`PointerInput`] values in
//! arrival order. Coordinates are surface-local logical units.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contact phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Contact began (button down / pen or finger touched)
    Press,
    /// Contact moved while held
    Move,
    /// Contact ended normally
    Release,
    /// Platform-initiated interruption (palm rejection, gesture takeover)
    Cancel,
}

/// Input device class, used to decide how pressure is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Stylus with real pressure reporting
    Pen,
    /// Mouse - no pressure sensing, substitutes the configured constant
    Mouse,
    /// Touch - no usable pressure, substitutes the configured constant
    Touch,
}

/// One host pointer event, normalized to surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Contact phase
    pub phase: PointerPhase,
    /// Device class
    pub kind: PointerKind,
    /// Position in surface-local logical units; platforms occasionally
    /// deliver contact events without one
    #[serde(default)]
    pub position: Option<(f64, f64)>,
    /// Raw pressure in [0, 1] where the device reports it
    #[serde(default)]
    pub pressure: Option<f64>,
    /// Monotonic timestamp in milliseconds
    #[serde(default)]
    pub timestamp_ms: f64,
}

impl PointerInput {
    pub fn press(kind: PointerKind, x: f64, y: f64, pressure: Option<f64>, t: f64) -> Self {
        Self {
            phase: PointerPhase::Press,
            kind,
            position: Some((x, y)),
            pressure,
            timestamp_ms: t,
        }
    }

    pub fn moved(kind: PointerKind, x: f64, y: f64, pressure: Option<f64>, t: f64) -> Self {
        Self {
            phase: PointerPhase::Move,
            kind,
            position: Some((x, y)),
            pressure,
            timestamp_ms: t,
        }
    }

    pub fn release(kind: PointerKind, x: f64, y: f64, pressure: Option<f64>, t: f64) -> Self {
        Self {
            phase: PointerPhase::Release,
            kind,
            position: Some((x, y)),
            pressure,
            timestamp_ms: t,
        }
    }

    pub fn cancel(kind: PointerKind, t: f64) -> Self {
        Self {
            phase: PointerPhase::Cancel,
            kind,
            position: None,
            pressure: None,
            timestamp_ms: t,
        }
    }
}

/// Errors raised while normalizing pointer events.
///
/// Dropped samples are not recoverable and not worth retrying; the capture
/// machine counts them and moves on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("pointer event reported contact without coordinates")]
    MissingCoordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_round_trips_through_json() {
        let script = vec![
            PointerInput::press(PointerKind::Pen, 1.0, 2.0, Some(0.8), 0.0),
            PointerInput::moved(PointerKind::Pen, 3.0, 4.0, Some(0.9), 8.0),
            PointerInput::release(PointerKind::Pen, 5.0, 6.0, Some(0.4), 16.0),
        ];

        let json = serde_json::to_string(&script).unwrap();
        let parsed: Vec<PointerInput> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, script);
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let input: PointerInput =
            serde_json::from_str(r#"{"phase":"press","kind":"mouse"}"#).unwrap();
        assert_eq!(input.phase, PointerPhase::Press);
        assert_eq!(input.kind, PointerKind::Mouse);
        assert_eq!(input.position, None);
        assert_eq!(input.pressure, None);
        assert_eq!(input.timestamp_ms, 0.0);
    }
}
