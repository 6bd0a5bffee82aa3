//! Cairo-based stroke rendering: midpoint smoothing, pressure-driven variable
//! width, and brush colorization.
//!
//! Strokes render as quadratic segments threaded through the midpoints of
//! consecutive samples (the raw sample is the control point), which hides the
//! faceting that straight polylines pick up from input sampling jitter. Each
//! segment is flattened into short slices whose widths interpolate linearly
//! between the segment's endpoint widths; round caps make the slices read as
//! one continuous mark.

use super::color::{BLACK, Color, WHITE};
use super::guide::render_guides;
use super::pressure::effective_width;
use super::stroke::{Drawing, SamplePoint, Stroke};
use crate::config::{CanvasConfig, ColorScheme, Colorizer, PressureCurve, WidthPolicy};
use crate::util::{lerp, midpoint};

/// Saturation for spectrum hues.
const SPECTRUM_S: f64 = 0.95;

/// Value for spectrum hues.
const SPECTRUM_V: f64 = 0.75;

/// Minimum luminance distance between brush and background before the
/// contrast colorizer substitutes a safe color.
const CONTRAST_MIN_DISTANCE: f64 = 0.3;

/// Slice length target when flattening a segment, in logical pixels.
const SLICE_LENGTH: f64 = 2.5;

/// Upper bound on slices per segment.
const MAX_SLICES: usize = 24;

/// Fixed pool of replay colors. The back surface picks one entry per drawing
/// so the comparison view stays visually uniform however the front side was
/// colorized.
pub const PREBAKED_PALETTE: [Color; 32] = [
    hex(0xff0000),
    hex(0xff7f00),
    hex(0xffff00),
    hex(0x54ff00),
    hex(0x00ffd4),
    hex(0x003fff),
    hex(0x9400ff),
    hex(0xff00d4),
    hex(0xb24759),
    hex(0xb26b47),
    hex(0xb2a047),
    hex(0x7cb247),
    hex(0x47b28e),
    hex(0x4774b2),
    hex(0x7447b2),
    hex(0xb247b2),
    hex(0x661000),
    hex(0x664400),
    hex(0x556600),
    hex(0x116600),
    hex(0x006666),
    hex(0x000866),
    hex(0x4c0066),
    hex(0x660044),
    hex(0xe58989),
    hex(0xe5b789),
    hex(0xe5e589),
    hex(0xa8e589),
    hex(0x89e5d6),
    hex(0x89a0e5),
    hex(0xbf89e5),
    hex(0xe589d6),
];

const fn hex(v: u32) -> Color {
    Color::rgb(
        ((v >> 16) & 0xff) as f64 / 255.0,
        ((v >> 8) & 0xff) as f64 / 255.0,
        (v & 0xff) as f64 / 255.0,
    )
}

/// Everything the renderer needs to draw one stroke, resolved once at
/// controller construction.
#[derive(Debug)]
pub struct StrokeStyle<'a> {
    pub scheme: &'a ColorScheme,
    pub colorizer: Colorizer,
    pub curve: &'a PressureCurve,
    pub policy: WidthPolicy,
    /// Single color used by [`Colorizer::Prebaked`], chosen once per drawing
    pub prebaked_brush: Color,
}

/// The replay color for a whole drawing: one palette entry, picked
/// deterministically by stroke count.
pub fn prebaked_brush(drawing: &Drawing) -> Color {
    PREBAKED_PALETTE[drawing.stroke_count() % PREBAKED_PALETTE.len()]
}

/// Brush color guaranteed to sit at least [`CONTRAST_MIN_DISTANCE`] of
/// luminance away from the grid background.
fn contrast_brush(scheme: &ColorScheme) -> Color {
    let distance = (scheme.brush.luminance() - scheme.grid_bg.luminance()).abs();
    if distance >= CONTRAST_MIN_DISTANCE {
        scheme.brush
    } else if scheme.grid_bg.luminance() > 0.5 {
        BLACK
    } else {
        WHITE
    }
}

/// Color for the mark owned by sample `idx` of a stroke `count` samples long.
fn sample_color(style: &StrokeStyle<'_>, idx: usize, count: usize) -> Color {
    match style.colorizer {
        Colorizer::None => style.scheme.brush,
        Colorizer::Spectrum => {
            let hue = idx as f64 / count.max(1) as f64;
            Color::from_hsv(hue, SPECTRUM_S, SPECTRUM_V)
        }
        Colorizer::Contrast => contrast_brush(style.scheme),
        Colorizer::Prebaked => style.prebaked_brush,
    }
}

fn sample_width(style: &StrokeStyle<'_>, point: &SamplePoint) -> f64 {
    effective_width(point.pressure, style.curve, &style.policy)
}

/// A single-sample stroke (a tap) leaves a round dot.
fn draw_dot(ctx: &cairo::Context, point: (f64, f64), width: f64, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.arc(point.0, point.1, width / 2.0, 0.0, 2.0 * std::f64::consts::PI);
    let _ = ctx.fill();
}

/// Flattens the quadratic segment `a -> c` (control `b`) into short slices,
/// stroking each with a width interpolated linearly from `w_start` to `w_end`.
fn draw_variable_slices(
    ctx: &cairo::Context,
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
    w_start: f64,
    w_end: f64,
    color: Color,
) {
    let chord = ((b.0 - a.0).hypot(b.1 - a.1)) + ((c.0 - b.0).hypot(c.1 - b.1));
    let slices = ((chord / SLICE_LENGTH).ceil() as usize).clamp(1, MAX_SLICES);

    let point_at = |t: f64| -> (f64, f64) {
        let u = 1.0 - t;
        (
            u * u * a.0 + 2.0 * u * t * b.0 + t * t * c.0,
            u * u * a.1 + 2.0 * u * t * b.1 + t * t * c.1,
        )
    };

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let mut from = a;
    for i in 0..slices {
        let t0 = i as f64 / slices as f64;
        let t1 = (i + 1) as f64 / slices as f64;
        let to = point_at(t1);

        ctx.set_line_width(lerp(w_start, w_end, (t0 + t1) / 2.0));
        ctx.move_to(from.0, from.1);
        ctx.line_to(to.0, to.1);
        let _ = ctx.stroke();

        from = to;
    }
}

/// Draws the piece of `stroke` that became determinable when sample `i`
/// arrived.
///
/// Incremental capture calls this once per appended sample; a full render is
/// the same calls in order. Both paths therefore leave identical marks.
///
/// - `i == 0`: the press dot.
/// - `i == 1`: straight lead-in from the first sample to the first midpoint.
/// - `i >= 2`: quadratic segment between the midpoints around sample `i - 1`,
///   with the raw sample as control point.
pub fn render_piece(ctx: &cairo::Context, stroke: &Stroke, i: usize, style: &StrokeStyle<'_>) {
    let points = &stroke.points;
    if i >= points.len() {
        return;
    }
    let count = points.len();
    let pos = |j: usize| points[j].position();
    let width = |j: usize| sample_width(style, &points[j]);

    match i {
        0 => draw_dot(ctx, pos(0), width(0), sample_color(style, 0, count)),
        1 => {
            let a = pos(0);
            let c = midpoint(pos(0), pos(1));
            let b = midpoint(a, c);
            let w0 = width(0);
            draw_variable_slices(
                ctx,
                a,
                b,
                c,
                w0,
                (w0 + width(1)) / 2.0,
                sample_color(style, 0, count),
            );
        }
        _ => {
            let a = midpoint(pos(i - 2), pos(i - 1));
            let b = pos(i - 1);
            let c = midpoint(pos(i - 1), pos(i));
            let w_start = (width(i - 2) + width(i - 1)) / 2.0;
            let w_end = (width(i - 1) + width(i)) / 2.0;
            draw_variable_slices(
                ctx,
                a,
                b,
                c,
                w_start,
                w_end,
                sample_color(style, i - 1, count),
            );
        }
    }
}

/// Draws the lead-out from the last midpoint to the final raw sample. Called
/// once when a stroke closes.
pub fn render_tail(ctx: &cairo::Context, stroke: &Stroke, style: &StrokeStyle<'_>) {
    let points = &stroke.points;
    let n = points.len();
    if n < 2 {
        return;
    }
    let a = midpoint(points[n - 2].position(), points[n - 1].position());
    let c = points[n - 1].position();
    let b = midpoint(a, c);
    let w_start = (sample_width(style, &points[n - 2]) + sample_width(style, &points[n - 1])) / 2.0;
    let w_end = sample_width(style, &points[n - 1]);
    draw_variable_slices(
        ctx,
        a,
        b,
        c,
        w_start,
        w_end,
        sample_color(style, n - 1, n),
    );
}

/// Renders a finalized stroke in one pass.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke, style: &StrokeStyle<'_>) {
    for i in 0..stroke.len() {
        render_piece(ctx, stroke, i, style);
    }
    render_tail(ctx, stroke, style);
}

/// Replays a finalized drawing on the back surface in one pass: guides first,
/// then every stroke in completion order, scaled by `back_size / front_size`
/// and colorized with the scheme's back colorizer (prebaked by default,
/// whatever the front side used).
pub fn replay_drawing(
    ctx: &cairo::Context,
    drawing: &Drawing,
    config: &CanvasConfig,
    scheme: &ColorScheme,
) {
    let size = config.back_size as f64;
    render_guides(ctx, size, size, &config.guides, scheme);

    let scaled = drawing.scaled(config.replay_scale());
    let style = StrokeStyle {
        scheme,
        colorizer: scheme.back_colorizer,
        curve: &config.curve,
        policy: config.back_width_policy(),
        prebaked_brush: prebaked_brush(&scaled),
    };

    for stroke in &scaled.strokes {
        render_stroke(ctx, stroke, &style);
    }
}
