//! Background fill and reference guide lines.
//!
//! Guides render once per mount/resize, beneath any strokes; replay renders
//! them again before re-drawing the strokes on top.

use crate::config::{ColorScheme, GuideFlags};

/// Dash pattern divisor: guides dash at 1/80th of the surface extent.
const DASH_DIVISOR: f64 = 80.0;

/// Guide line width in logical pixels.
const GUIDE_LINE_WIDTH: f64 = 1.0;

/// Fills the surface with the scheme background and draws the enabled guide
/// lines over it.
///
/// Everything is computed purely from the logical `width`/`height`, so a
/// resize only needs this call repeated. Draw order: diagonal 1, diagonal 2,
/// vertical centerline, horizontal centerline.
pub fn render_guides(
    ctx: &cairo::Context,
    width: f64,
    height: f64,
    flags: &GuideFlags,
    scheme: &ColorScheme,
) {
    let bg = scheme.grid_bg;
    ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
    ctx.rectangle(0.0, 0.0, width, height);
    let _ = ctx.fill();

    let mw = width / 2.0;
    let mh = height / 2.0;

    let lines: [(bool, f64, f64, f64, f64); 4] = [
        (flags.diagonal_1, 0.0, 0.0, width, height),
        (flags.diagonal_2, width, 0.0, 0.0, height),
        (flags.vertical, mw, 0.0, mw, height),
        (flags.horizontal, 0.0, mh, width, mh),
    ];

    let _ = ctx.save();
    ctx.set_dash(&[width / DASH_DIVISOR, height / DASH_DIVISOR], 0.0);
    ctx.set_line_width(GUIDE_LINE_WIDTH);
    let grid = scheme.grid;
    ctx.set_source_rgba(grid.r, grid.g, grid.b, grid.a);

    for (enabled, x1, y1, x2, y2) in lines {
        if !enabled {
            continue;
        }
        ctx.move_to(x1, y1);
        ctx.line_to(x2, y2);
        let _ = ctx.stroke();
    }

    let _ = ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;

    fn surface_bytes(flags: GuideFlags) -> Vec<u8> {
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 64).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            let scheme = CanvasConfig::default()
                .schemes
                .get("light")
                .unwrap()
                .clone();
            render_guides(&ctx, 64.0, 64.0, &flags, &scheme);
        }
        surface.flush();
        surface.data().unwrap().to_vec()
    }

    const ALL_OFF: GuideFlags = GuideFlags {
        horizontal: false,
        vertical: false,
        diagonal_1: false,
        diagonal_2: false,
    };

    #[test]
    fn each_flag_changes_the_output_independently() {
        let plain = surface_bytes(ALL_OFF);

        for flags in [
            GuideFlags {
                horizontal: true,
                ..ALL_OFF
            },
            GuideFlags {
                vertical: true,
                ..ALL_OFF
            },
            GuideFlags {
                diagonal_1: true,
                ..ALL_OFF
            },
            GuideFlags {
                diagonal_2: true,
                ..ALL_OFF
            },
        ] {
            assert_ne!(surface_bytes(flags), plain, "{flags:?} drew nothing");
        }
    }

    #[test]
    fn disabled_guides_leave_a_plain_background() {
        // identical renders, byte for byte
        assert_eq!(surface_bytes(ALL_OFF), surface_bytes(ALL_OFF));
    }
}
