//! Capture state machine: pointer events in, strokes out.

use super::events::{InputError, PointerInput, PointerKind, PointerPhase};
use crate::config::CanvasConfig;
use crate::draw::{SamplePoint, Stroke};
use log::debug;

/// Pressure assumed for a pen sample that arrives without a reading.
const FALLBACK_PEN_PRESSURE: f64 = 0.5;

/// Current capture mode for one surface.
///
/// Only one stroke is ever open at a time; overlapping press events are
/// ignored at the model level so that capture stays deterministic.
#[derive(Debug)]
enum CaptureState {
    /// Not capturing - waiting for a press
    Idle,
    /// A stroke is open and accumulating samples
    Drawing { stroke: Stroke },
}

/// What a handled event did to the model.
#[derive(Debug)]
pub enum CaptureUpdate {
    /// Event had no effect (move while idle, overlapping press, ...)
    Ignored,
    /// A sample was appended to the open stroke
    Sampled,
    /// The open stroke closed; the caller appends it to the drawing
    Finished(Stroke),
    /// The open stroke was discarded without entering the model
    Cancelled,
    /// The sample was invalid and dropped
    Dropped(InputError),
}

/// Normalizes pointer events into timestamped, pressured samples grouped into
/// strokes.
///
/// The machine owns only the in-progress stroke; finished strokes are handed
/// back through [`CaptureUpdate::Finished`] and owned by the caller's drawing.
#[derive(Debug)]
pub struct InputCapture {
    state: CaptureState,
    /// Substitute pressure for mouse events
    mouse_pressure: f64,
    /// Substitute pressure for touch events
    touch_pressure: f64,
    /// Invalid samples dropped since construction
    dropped_samples: u64,
}

impl InputCapture {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            state: CaptureState::Idle,
            mouse_pressure: config.mouse_pressure,
            touch_pressure: config.touch_pressure,
            dropped_samples: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, CaptureState::Idle)
    }

    /// The stroke currently being captured, if any.
    pub fn open_stroke(&self) -> Option<&Stroke> {
        match &self.state {
            CaptureState::Idle => None,
            CaptureState::Drawing { stroke } => Some(stroke),
        }
    }

    /// Count of samples dropped for missing coordinates.
    pub fn dropped_samples(&self) -> u64 {
        self.dropped_samples
    }

    /// Discards any in-progress stroke and returns to idle.
    ///
    /// Returns `true` if a stroke was discarded.
    pub fn reset(&mut self) -> bool {
        let was_drawing = !self.is_idle();
        self.state = CaptureState::Idle;
        was_drawing
    }

    /// Mouse and touch devices report no usable pressure; they substitute the
    /// configured constants so width variation stays plausible. Pens use their
    /// reading, clamped, or the midpoint when the reading is absent.
    fn pressure_for(&self, input: &PointerInput) -> f64 {
        match input.kind {
            PointerKind::Mouse => self.mouse_pressure,
            PointerKind::Touch => self.touch_pressure,
            PointerKind::Pen => input
                .pressure
                .unwrap_or(FALLBACK_PEN_PRESSURE)
                .clamp(0.0, 1.0),
        }
    }

    fn sample_from(&self, input: &PointerInput) -> Result<SamplePoint, InputError> {
        let (x, y) = input.position.ok_or(InputError::MissingCoordinates)?;
        Ok(SamplePoint {
            x,
            y,
            pressure: self.pressure_for(input),
            t: input.timestamp_ms,
        })
    }

    fn drop_sample(&mut self, err: InputError) -> CaptureUpdate {
        self.dropped_samples += 1;
        debug!("dropping pointer sample: {err}");
        CaptureUpdate::Dropped(err)
    }

    /// Feeds one pointer event through the state machine.
    ///
    /// Events are consumed strictly in arrival order; samples within a stroke
    /// are appended in that order and rendered in that order.
    pub fn handle(&mut self, input: &PointerInput) -> CaptureUpdate {
        match input.phase {
            PointerPhase::Press => {
                // Second contact before the first released: unsupported.
                if !self.is_idle() {
                    return CaptureUpdate::Ignored;
                }
                match self.sample_from(input) {
                    Ok(sample) => {
                        self.state = CaptureState::Drawing {
                            stroke: Stroke::begin(sample),
                        };
                        CaptureUpdate::Sampled
                    }
                    Err(err) => self.drop_sample(err),
                }
            }

            PointerPhase::Move => {
                if self.is_idle() {
                    return CaptureUpdate::Ignored;
                }
                match self.sample_from(input) {
                    Ok(sample) => {
                        if let CaptureState::Drawing { stroke } = &mut self.state {
                            stroke.push(sample);
                        }
                        CaptureUpdate::Sampled
                    }
                    Err(err) => self.drop_sample(err),
                }
            }

            PointerPhase::Release => {
                if self.is_idle() {
                    return CaptureUpdate::Ignored;
                }
                // The release sample joins the stroke when it carries
                // coordinates; either way the stroke closes.
                let sample = self.sample_from(input);
                let CaptureState::Drawing { mut stroke } =
                    std::mem::replace(&mut self.state, CaptureState::Idle)
                else {
                    unreachable!("checked above");
                };
                match sample {
                    Ok(sample) => stroke.push(sample),
                    Err(err) => {
                        self.dropped_samples += 1;
                        debug!("dropping release sample: {err}");
                    }
                }
                CaptureUpdate::Finished(stroke)
            }

            PointerPhase::Cancel => {
                if self.is_idle() {
                    CaptureUpdate::Ignored
                } else {
                    self.state = CaptureState::Idle;
                    CaptureUpdate::Cancelled
                }
            }
        }
    }
}
