//! Sample points, strokes, and the drawing container.

use serde::{Deserialize, Serialize};

/// One normalized input sample: surface-local position, pen pressure, and a
/// host-supplied monotonic timestamp.
///
/// Samples are immutable once created; the capture state machine is the only
/// producer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    /// X coordinate in surface-local logical units
    pub x: f64,
    /// Y coordinate in surface-local logical units
    pub y: f64,
    /// Normalized pen pressure in [0, 1]
    pub pressure: f64,
    /// Monotonic timestamp in milliseconds
    pub t: f64,
}

impl SamplePoint {
    /// Returns the sample with its coordinates scaled uniformly by `factor`.
    ///
    /// Pressure and timestamp are untouched; replay at a different surface
    /// size is a pure geometric transform.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            ..*self
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// An ordered run of samples between one press and the matching release.
///
/// Insertion order is temporal order is render order. A stroke is mutated only
/// by the capture state machine while open; once closed and handed to a
/// [`Drawing`] it is never written again.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Samples in arrival order
    pub points: Vec<SamplePoint>,
}

impl Stroke {
    /// Creates a stroke opened by its first sample.
    pub fn begin(first: SamplePoint) -> Self {
        Self {
            points: vec![first],
        }
    }

    pub fn push(&mut self, point: SamplePoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the stroke with every sample's coordinates scaled by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| p.scaled(factor)).collect(),
        }
    }
}

/// Everything captured on the front surface for one card instance.
///
/// Strokes are appended in completion order and never overlap in time. After
/// the card flips, the drawing is handed to the back controller read-only and
/// never written again.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Drawing {
    /// Finished strokes in completion order (first = bottom layer)
    pub strokes: Vec<Stroke>,
}

impl Drawing {
    /// Creates a new empty drawing.
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    /// Appends a finished stroke (drawn on top of existing strokes).
    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Removes all strokes, emptying the canvas model.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Returns a copy with every stroke scaled uniformly by `factor`.
    ///
    /// This is the replay transform: the back surface renders
    /// `drawing.scaled(back_size / front_size)`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            strokes: self.strokes.iter().map(|s| s.scaled(factor)).collect(),
        }
    }
}
