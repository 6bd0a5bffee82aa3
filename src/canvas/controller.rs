//! Front and back canvas controllers.
//!
//! A controller owns one drawing surface for the card's lifetime. The front
//! controller is interactive: it wires the capture state machine to the
//! renderer and owns the live [`Drawing`]. The back controller is replay-only:
//! it renders the finalized drawing once, scaled for side-by-side comparison
//! against the reference diagram.

use super::{CanvasSurface, Mount};
use crate::config::{CanvasConfig, ColorScheme};
use crate::draw::render::{
    StrokeStyle, prebaked_brush, render_piece, render_stroke, render_tail, replay_drawing,
};
use crate::draw::{Drawing, render_guides};
use crate::input::{CaptureUpdate, InputCapture, PointerInput};
use log::{debug, warn};

/// Interactive controller for the question side.
///
/// Constructed once per card render. Tolerates a missing or zero-sized mount
/// by degrading to an inert controller that logs once and neither captures
/// nor renders.
pub struct FrontController {
    config: CanvasConfig,
    scheme: ColorScheme,
    surface: Option<CanvasSurface>,
    capture: InputCapture,
    drawing: Drawing,
}

impl FrontController {
    pub fn new(config: CanvasConfig, scheme: ColorScheme, mount: Option<Mount>) -> Self {
        let surface = match CanvasSurface::allocate(mount, config.hdpi_factor) {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn!("front canvas disabled: {err}");
                None
            }
        };

        let capture = InputCapture::new(&config);
        let controller = Self {
            config,
            scheme,
            surface,
            capture,
            drawing: Drawing::new(),
        };
        controller.render_background();
        controller
    }

    /// Whether the controller degraded to a no-op at mount time.
    pub fn is_disabled(&self) -> bool {
        self.surface.is_none()
    }

    /// Read-only view of everything captured so far.
    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    /// Count of input samples dropped for missing coordinates.
    pub fn dropped_samples(&self) -> u64 {
        self.capture.dropped_samples()
    }

    fn style(&self) -> StrokeStyle<'_> {
        StrokeStyle {
            scheme: &self.scheme,
            colorizer: self.scheme.front_colorizer,
            curve: &self.config.curve,
            policy: self.config.front_width_policy(),
            prebaked_brush: prebaked_brush(&self.drawing),
        }
    }

    fn render_background(&self) {
        if let Some(surface) = &self.surface {
            let (width, height) = surface.logical_size();
            render_guides(surface.ctx(), width, height, &self.config.guides, &self.scheme);
        }
    }

    /// Routes one pointer event through capture and incremental rendering.
    ///
    /// Only the newest segment is drawn per event; nothing already on the
    /// surface is repainted. Events on a disabled controller are ignored.
    pub fn handle_input(&mut self, input: &PointerInput) {
        if self.surface.is_none() {
            return;
        }

        match self.capture.handle(input) {
            CaptureUpdate::Sampled => {
                if let (Some(surface), Some(stroke)) = (&self.surface, self.capture.open_stroke()) {
                    render_piece(surface.ctx(), stroke, stroke.len() - 1, &self.style());
                }
            }
            CaptureUpdate::Finished(stroke) => {
                if let Some(surface) = &self.surface {
                    let style = self.style();
                    render_piece(surface.ctx(), &stroke, stroke.len() - 1, &style);
                    render_tail(surface.ctx(), &stroke, &style);
                }
                self.drawing.add_stroke(stroke);
            }
            // Cancelled pixels stay on the surface until the next clear; the
            // model is already clean.
            CaptureUpdate::Cancelled => debug!("stroke cancelled by the platform"),
            CaptureUpdate::Ignored | CaptureUpdate::Dropped(_) => {}
        }
    }

    /// Empties the drawing, wipes the surface, and re-renders the guides.
    /// Any in-progress stroke is discarded with the rest.
    pub fn clear(&mut self) {
        if self.capture.reset() {
            debug!("clear discarded an unfinished stroke");
        }
        self.drawing.clear();
        self.render_background();
    }

    /// Reattaches the controller to a new mount and redraws everything:
    /// guides first, then the full drawing, then the open stroke so far.
    pub fn resize(&mut self, mount: Option<Mount>) {
        self.surface = match CanvasSurface::allocate(mount, self.config.hdpi_factor) {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn!("front canvas disabled on resize: {err}");
                None
            }
        };

        self.render_background();
        if let Some(surface) = &self.surface {
            let style = self.style();
            for stroke in &self.drawing.strokes {
                render_stroke(surface.ctx(), stroke, &style);
            }
            if let Some(open) = self.capture.open_stroke() {
                for i in 0..open.len() {
                    render_piece(surface.ctx(), open, i, &style);
                }
            }
        }
    }

    /// Finalizes capture and hands the drawing over for the answer side.
    ///
    /// A stroke still open at flip time never saw its release event; it is
    /// discarded exactly like a platform cancel.
    pub fn finish(mut self) -> Drawing {
        if self.capture.reset() {
            debug!("card flipped mid-stroke; discarding the unfinished stroke");
        }
        self.drawing
    }

    /// Writes the surface as PNG. A disabled controller writes nothing.
    pub fn write_png<W: std::io::Write>(&self, out: &mut W) -> Result<(), cairo::IoError> {
        match &self.surface {
            Some(surface) => surface.write_png(out),
            None => {
                debug!("front canvas disabled; skipping PNG export");
                Ok(())
            }
        }
    }

    /// Raw surface bytes for inspection; `None` when disabled.
    pub fn pixels(&self) -> Option<Vec<u8>> {
        self.surface.as_ref().and_then(CanvasSurface::pixels)
    }
}

/// Replay-only controller for the answer side.
///
/// On construction it renders guides and replays the borrowed drawing scaled
/// to the back size, colorized by the scheme's back colorizer (prebaked by
/// default). It exposes no mutation operations.
pub struct BackController {
    surface: Option<CanvasSurface>,
}

impl BackController {
    pub fn new(
        config: &CanvasConfig,
        scheme: &ColorScheme,
        drawing: &Drawing,
        mount: Option<Mount>,
    ) -> Self {
        let surface = match CanvasSurface::allocate(mount, config.hdpi_factor) {
            Ok(surface) => Some(surface),
            Err(err) => {
                warn!("back canvas disabled: {err}");
                None
            }
        };

        if let Some(surface) = &surface {
            replay_drawing(surface.ctx(), drawing, config, scheme);
        }

        Self { surface }
    }

    /// Whether the controller degraded to a no-op at mount time.
    pub fn is_disabled(&self) -> bool {
        self.surface.is_none()
    }

    /// Writes the surface as PNG. A disabled controller writes nothing.
    pub fn write_png<W: std::io::Write>(&self, out: &mut W) -> Result<(), cairo::IoError> {
        match &self.surface {
            Some(surface) => surface.write_png(out),
            None => {
                debug!("back canvas disabled; skipping PNG export");
                Ok(())
            }
        }
    }

    /// Raw surface bytes for inspection; `None` when disabled.
    pub fn pixels(&self) -> Option<Vec<u8>> {
        self.surface.as_ref().and_then(CanvasSurface::pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasOptions;
    use crate::input::PointerKind::Pen;

    fn config() -> CanvasConfig {
        CanvasOptions {
            front_canvas_size: 100,
            back_canvas_size: 50,
            hdpi_factor: 1.0,
            ..Default::default()
        }
        .resolve()
    }

    fn scheme(config: &CanvasConfig) -> ColorScheme {
        crate::config::resolve_or_light(&config.scheme_name, false, &config.schemes)
    }

    fn front(config: &CanvasConfig) -> FrontController {
        FrontController::new(
            config.clone(),
            scheme(config),
            Some(Mount::square(config.front_size)),
        )
    }

    fn draw_stroke(controller: &mut FrontController, offset: f64) {
        controller.handle_input(&PointerInput::press(Pen, 10.0 + offset, 10.0, Some(0.4), 0.0));
        controller.handle_input(&PointerInput::moved(Pen, 40.0 + offset, 30.0, Some(0.7), 8.0));
        controller.handle_input(&PointerInput::release(Pen, 70.0 + offset, 60.0, Some(0.5), 16.0));
    }

    #[test]
    fn captured_strokes_land_in_the_drawing() {
        let config = config();
        let mut controller = front(&config);

        draw_stroke(&mut controller, 0.0);
        draw_stroke(&mut controller, 5.0);
        assert_eq!(controller.drawing().stroke_count(), 2);

        let drawing = controller.finish();
        assert_eq!(drawing.stroke_count(), 2);
        assert_eq!(drawing.strokes[0].len(), 3);
    }

    #[test]
    fn clear_empties_the_drawing_and_restores_the_pristine_surface() {
        let config = config();
        let mut controller = front(&config);
        let pristine = controller.pixels().unwrap();

        draw_stroke(&mut controller, 0.0);
        assert_ne!(controller.pixels().unwrap(), pristine);

        controller.clear();
        assert_eq!(controller.drawing().stroke_count(), 0);
        assert_eq!(controller.pixels().unwrap(), pristine);
    }

    #[test]
    fn cancel_mid_stroke_keeps_the_stroke_count() {
        let config = config();
        let mut controller = front(&config);
        draw_stroke(&mut controller, 0.0);

        controller.handle_input(&PointerInput::press(Pen, 20.0, 20.0, Some(0.5), 24.0));
        controller.handle_input(&PointerInput::moved(Pen, 25.0, 25.0, Some(0.5), 32.0));
        controller.handle_input(&PointerInput::cancel(Pen, 40.0));

        assert_eq!(controller.drawing().stroke_count(), 1);
    }

    #[test]
    fn finish_discards_an_unfinished_stroke() {
        let config = config();
        let mut controller = front(&config);
        draw_stroke(&mut controller, 0.0);
        controller.handle_input(&PointerInput::press(Pen, 20.0, 20.0, Some(0.5), 24.0));

        let drawing = controller.finish();
        assert_eq!(drawing.stroke_count(), 1);
    }

    #[test]
    fn missing_mount_degrades_to_a_noop() {
        let config = config();
        let mut controller = FrontController::new(config.clone(), scheme(&config), None);

        assert!(controller.is_disabled());
        draw_stroke(&mut controller, 0.0);
        controller.clear();
        assert_eq!(controller.drawing().stroke_count(), 0);
        assert_eq!(controller.pixels(), None);

        let mut sink = Vec::new();
        controller.write_png(&mut sink).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn zero_sized_mount_degrades_to_a_noop() {
        let config = config();
        let controller = FrontController::new(
            config.clone(),
            scheme(&config),
            Some(Mount::new(0, 0)),
        );
        assert!(controller.is_disabled());
    }

    #[test]
    fn resize_redraws_the_existing_drawing() {
        let config = config();
        let mut controller = front(&config);
        draw_stroke(&mut controller, 0.0);
        let before = controller.pixels().unwrap();

        controller.resize(Some(Mount::square(config.front_size)));
        // same mount size: the full redraw reproduces the incremental marks
        assert_eq!(controller.pixels().unwrap(), before);
    }

    #[test]
    fn back_controller_replays_without_mutating_the_drawing() {
        let config = config();
        let scheme = scheme(&config);
        let mut controller = front(&config);
        draw_stroke(&mut controller, 0.0);
        let drawing = controller.finish();
        let strokes_before = drawing.stroke_count();

        let back = BackController::new(
            &config,
            &scheme,
            &drawing,
            Some(Mount::square(config.back_size)),
        );
        assert!(!back.is_disabled());
        assert_eq!(drawing.stroke_count(), strokes_before);
        assert!(back.pixels().is_some());
    }

    #[test]
    fn back_controller_accepts_an_empty_drawing() {
        let config = config();
        let scheme = scheme(&config);
        let empty = Drawing::new();

        let back = BackController::new(
            &config,
            &scheme,
            &empty,
            Some(Mount::square(config.back_size)),
        );
        // guides only, but a real render
        assert!(back.pixels().is_some());

        let back_again = BackController::new(
            &config,
            &scheme,
            &empty,
            Some(Mount::square(config.back_size)),
        );
        assert_eq!(back.pixels(), back_again.pixels());
    }

    #[test]
    fn back_controller_tolerates_a_missing_mount() {
        let config = config();
        let scheme = scheme(&config);
        let back = BackController::new(&config, &scheme, &Drawing::new(), None);
        assert!(back.is_disabled());
        assert_eq!(back.pixels(), None);
    }
}
