//! Host-supplied drawing options and their resolution into an immutable
//! engine configuration.
//!
//! The card template hands the engine a [`CanvasOptions`] value (typically
//! deserialized from TOML or JSON). Missing keys fall back to built-in
//! defaults, unknown keys are ignored, and out-of-range values are clamped
//! with a warning. [`CanvasOptions::resolve`] then produces one immutable
//! [`CanvasConfig`] per card render; nothing mutates it afterwards.

pub mod curve;
pub mod scheme;

// Re-export commonly used types at module level
pub use curve::{PressureCurve, WidthPolicy};
pub use scheme::{ColorScheme, ColorSpec, Colorizer, SchemeMap, SchemeOverride};

// Re-export for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use scheme::{resolve, resolve_or_light};

use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while interpreting host-supplied options.
///
/// Every variant is recovered locally by substituting a safe default; a bad
/// option never breaks card rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown color scheme '{0}'")]
    UnknownScheme(String),

    #[error("unknown pressure curve '{0}'")]
    UnknownCurve(String),

    #[error("unknown brush colorizer '{0}'")]
    UnknownColorizer(String),

    #[error("malformed color '{0}'")]
    MalformedColor(String),
}

/// Which reference guides to draw beneath strokes.
///
/// All four flags are independent booleans, not mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuideFlags {
    /// Horizontal centerline
    pub horizontal: bool,
    /// Vertical centerline
    pub vertical: bool,
    /// Top-left to bottom-right diagonal
    pub diagonal_1: bool,
    /// Top-right to bottom-left diagonal
    pub diagonal_2: bool,
}

/// Raw option overrides supplied by the card template.
///
/// This is the serialization-facing type; every field has a built-in default
/// and unknown keys in the source document are ignored.
///
/// # Example TOML
/// ```toml
/// front_canvas_size = 300
/// front_base_line_width = 6.0
/// pressure_curve = "square-root"
/// color_scheme = "auto"
///
/// [color_schemes.dark]
/// brush = "#e8e8e8"
/// back_brush_colorizer = "prebaked"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct CanvasOptions {
    /// Front (question side) surface size in logical pixels, square
    #[serde(default = "default_front_canvas_size")]
    pub front_canvas_size: u32,

    /// Base line width on the front surface at curve-midpoint pressure
    #[serde(default = "default_front_base_line_width")]
    pub front_base_line_width: f64,

    /// Back (answer side) surface size in logical pixels, square
    #[serde(default = "default_back_canvas_size")]
    pub back_canvas_size: u32,

    /// Base line width used when replaying on the back surface
    #[serde(default = "default_back_base_line_width")]
    pub back_base_line_width: f64,

    /// Pressure curve name: identity, square, square-root, constant
    #[serde(default = "default_pressure_curve")]
    pub pressure_curve: String,

    /// Width factor reached at full pressure (valid range: 1.0 - 16.0)
    #[serde(default = "default_grow_multiplier")]
    pub pressure_line_width_grow_multiplier: f64,

    /// Width factor reached at zero pressure (valid range: 0.01 - 1.0)
    #[serde(default = "default_shrink_multiplier")]
    pub pressure_line_width_shrink_multiplier: f64,

    /// Substitute pressure for mouse input, which reports none (0.0 - 1.0)
    #[serde(default = "default_substitute_pressure")]
    pub pressure_used_for_mouse: f64,

    /// Substitute pressure for touch input (0.0 - 1.0)
    #[serde(default = "default_substitute_pressure")]
    pub pressure_used_for_touch: f64,

    /// Draw the horizontal centerline guide
    #[serde(default = "default_guide_on")]
    pub show_horizontal_guide: bool,

    /// Draw the vertical centerline guide
    #[serde(default = "default_guide_on")]
    pub show_vertical_guide: bool,

    /// Draw the top-left to bottom-right diagonal guide
    #[serde(default = "default_guide_off")]
    pub show_diagonal_1_guide: bool,

    /// Draw the top-right to bottom-left diagonal guide
    #[serde(default = "default_guide_off")]
    pub show_diagonal_2_guide: bool,

    /// Scheme name, or "auto" to follow the host's dark-mode flag
    #[serde(default = "default_color_scheme")]
    pub color_scheme: String,

    /// Per-field palette overrides, keyed by scheme name
    #[serde(default)]
    pub color_schemes: BTreeMap<String, SchemeOverride>,

    /// Device-pixel scale applied when allocating surfaces (0.5 - 4.0)
    #[serde(default = "default_hdpi_factor")]
    pub hdpi_factor: f64,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            front_canvas_size: default_front_canvas_size(),
            front_base_line_width: default_front_base_line_width(),
            back_canvas_size: default_back_canvas_size(),
            back_base_line_width: default_back_base_line_width(),
            pressure_curve: default_pressure_curve(),
            pressure_line_width_grow_multiplier: default_grow_multiplier(),
            pressure_line_width_shrink_multiplier: default_shrink_multiplier(),
            pressure_used_for_mouse: default_substitute_pressure(),
            pressure_used_for_touch: default_substitute_pressure(),
            show_horizontal_guide: default_guide_on(),
            show_vertical_guide: default_guide_on(),
            show_diagonal_1_guide: default_guide_off(),
            show_diagonal_2_guide: default_guide_off(),
            color_scheme: default_color_scheme(),
            color_schemes: BTreeMap::new(),
            hdpi_factor: default_hdpi_factor(),
        }
    }
}

impl CanvasOptions {
    /// Validates and clamps all option values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged; authors editing card templates get feedback without breaking
    /// the card.
    fn validate_and_clamp(&mut self) {
        let clamp_u32 = |label: &str, value: &mut u32, range: std::ops::RangeInclusive<u32>| {
            if !range.contains(value) {
                warn!(
                    "Invalid {label} {value}, clamping to {}-{} range",
                    range.start(),
                    range.end()
                );
                *value = (*value).clamp(*range.start(), *range.end());
            }
        };
        clamp_u32("front_canvas_size", &mut self.front_canvas_size, 16..=4096);
        clamp_u32("back_canvas_size", &mut self.back_canvas_size, 16..=4096);

        let clamp_f64 = |label: &str, value: &mut f64, range: std::ops::RangeInclusive<f64>| {
            if !range.contains(value) {
                warn!(
                    "Invalid {label} {value:.2}, clamping to {:.2}-{:.2} range",
                    range.start(),
                    range.end()
                );
                *value = value.clamp(*range.start(), *range.end());
            }
        };
        clamp_f64(
            "front_base_line_width",
            &mut self.front_base_line_width,
            0.5..=64.0,
        );
        clamp_f64(
            "back_base_line_width",
            &mut self.back_base_line_width,
            0.5..=64.0,
        );
        clamp_f64(
            "pressure_line_width_grow_multiplier",
            &mut self.pressure_line_width_grow_multiplier,
            1.0..=16.0,
        );
        clamp_f64(
            "pressure_line_width_shrink_multiplier",
            &mut self.pressure_line_width_shrink_multiplier,
            0.01..=1.0,
        );
        clamp_f64(
            "pressure_used_for_mouse",
            &mut self.pressure_used_for_mouse,
            0.0..=1.0,
        );
        clamp_f64(
            "pressure_used_for_touch",
            &mut self.pressure_used_for_touch,
            0.0..=1.0,
        );
        clamp_f64("hdpi_factor", &mut self.hdpi_factor, 0.5..=4.0);
    }

    /// Resolves the raw options into the immutable engine configuration.
    ///
    /// Values are clamped, the pressure curve name is parsed (an unknown name
    /// falls back to the identity curve), and the scheme map is assembled from
    /// the built-in light/dark palettes with host overrides merged per field.
    pub fn resolve(&self) -> CanvasConfig {
        let mut options = self.clone();
        options.validate_and_clamp();

        let curve = match options.pressure_curve.parse::<PressureCurve>() {
            Ok(curve) => curve,
            Err(err) => {
                warn!("{err}; falling back to the identity curve");
                PressureCurve::Identity
            }
        };

        let mut schemes = SchemeMap::new();
        schemes.insert("light".to_string(), ColorScheme::light());
        schemes.insert("dark".to_string(), ColorScheme::dark());
        for (name, ov) in &options.color_schemes {
            let base = schemes.get(name).cloned().unwrap_or_else(ColorScheme::light);
            schemes.insert(name.clone(), ov.apply(name, &base));
        }

        CanvasConfig {
            front_size: options.front_canvas_size,
            back_size: options.back_canvas_size,
            front_base_line_width: options.front_base_line_width,
            back_base_line_width: options.back_base_line_width,
            curve,
            grow_multiplier: options.pressure_line_width_grow_multiplier,
            shrink_multiplier: options.pressure_line_width_shrink_multiplier,
            mouse_pressure: options.pressure_used_for_mouse,
            touch_pressure: options.pressure_used_for_touch,
            guides: GuideFlags {
                horizontal: options.show_horizontal_guide,
                vertical: options.show_vertical_guide,
                diagonal_1: options.show_diagonal_1_guide,
                diagonal_2: options.show_diagonal_2_guide,
            },
            scheme_name: options.color_scheme.clone(),
            schemes,
            hdpi_factor: options.hdpi_factor,
        }
    }

    /// JSON schema of the options surface, for template-author tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(CanvasOptions)
    }
}

/// Immutable engine configuration, built once per card render and shared
/// read-only by every component.
#[derive(Clone, Debug)]
pub struct CanvasConfig {
    /// Front surface size in logical pixels
    pub front_size: u32,
    /// Back surface size in logical pixels
    pub back_size: u32,
    /// Base line width on the front surface
    pub front_base_line_width: f64,
    /// Base line width on the back surface
    pub back_base_line_width: f64,
    /// Pressure curve selection
    pub curve: PressureCurve,
    /// Width factor at full pressure
    pub grow_multiplier: f64,
    /// Width factor at zero pressure
    pub shrink_multiplier: f64,
    /// Substitute pressure for mouse input
    pub mouse_pressure: f64,
    /// Substitute pressure for touch input
    pub touch_pressure: f64,
    /// Guide visibility flags
    pub guides: GuideFlags,
    /// Configured scheme name ("auto" or a palette name)
    pub scheme_name: String,
    /// Available palettes (built-ins plus host overrides)
    pub schemes: SchemeMap,
    /// Device-pixel scale for surface allocation
    pub hdpi_factor: f64,
}

impl CanvasConfig {
    /// Width policy for capture-time rendering on the front surface.
    pub fn front_width_policy(&self) -> WidthPolicy {
        WidthPolicy {
            base: self.front_base_line_width,
            grow_multiplier: self.grow_multiplier,
            shrink_multiplier: self.shrink_multiplier,
        }
    }

    /// Width policy for replay on the back surface.
    pub fn back_width_policy(&self) -> WidthPolicy {
        WidthPolicy {
            base: self.back_base_line_width,
            grow_multiplier: self.grow_multiplier,
            shrink_multiplier: self.shrink_multiplier,
        }
    }

    /// Coordinate scale applied when replaying the front drawing on the back
    /// surface.
    pub fn replay_scale(&self) -> f64 {
        self.back_size as f64 / self.front_size as f64
    }

    /// Replaces the pressure curve, the escape hatch for a host-supplied
    /// [`PressureCurve::Custom`] function that has no config-file spelling.
    pub fn with_curve(mut self, curve: PressureCurve) -> Self {
        self.curve = curve;
        self
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasOptions::default().resolve()
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_front_canvas_size() -> u32 {
    300
}

fn default_front_base_line_width() -> f64 {
    6.0
}

fn default_back_canvas_size() -> u32 {
    150
}

fn default_back_base_line_width() -> f64 {
    3.0
}

fn default_pressure_curve() -> String {
    "identity".to_string()
}

fn default_grow_multiplier() -> f64 {
    2.0
}

fn default_shrink_multiplier() -> f64 {
    0.5
}

fn default_substitute_pressure() -> f64 {
    0.5
}

fn default_guide_on() -> bool {
    true
}

fn default_guide_off() -> bool {
    false
}

fn default_color_scheme() -> String {
    "auto".to_string()
}

fn default_hdpi_factor() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_resolves_to_defaults() {
        let options: CanvasOptions = toml::from_str("").unwrap();
        let config = options.resolve();

        assert_eq!(config.front_size, 300);
        assert_eq!(config.back_size, 150);
        assert_eq!(config.curve, PressureCurve::Identity);
        assert_eq!(config.scheme_name, "auto");
        assert!(config.guides.horizontal);
        assert!(config.guides.vertical);
        assert!(!config.guides.diagonal_1);
        assert!(!config.guides.diagonal_2);
        assert!(config.schemes.contains_key("light"));
        assert!(config.schemes.contains_key("dark"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let options: CanvasOptions = toml::from_str(
            r#"
            front_canvas_size = 400
            some_future_option = "whatever"
            "#,
        )
        .unwrap();
        assert_eq!(options.front_canvas_size, 400);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let options: CanvasOptions = toml::from_str(
            r#"
            front_canvas_size = 2
            pressure_line_width_grow_multiplier = 900.0
            pressure_used_for_mouse = 7.5
            "#,
        )
        .unwrap();
        let config = options.resolve();

        assert_eq!(config.front_size, 16);
        assert_eq!(config.grow_multiplier, 16.0);
        assert_eq!(config.mouse_pressure, 1.0);
    }

    #[test]
    fn unknown_curve_falls_back_to_identity() {
        let options = CanvasOptions {
            pressure_curve: "cubic".to_string(),
            ..CanvasOptions::default()
        };
        assert_eq!(options.resolve().curve, PressureCurve::Identity);
    }

    #[test]
    fn scheme_overrides_merge_over_builtins() {
        let options: CanvasOptions = toml::from_str(
            r#"
            [color_schemes.dark]
            brush = "yellow"

            [color_schemes.sepia]
            grid_bg = [240, 230, 210]
            front_brush_colorizer = "contrast"
            "#,
        )
        .unwrap();
        let config = options.resolve();

        let dark = config.schemes.get("dark").unwrap();
        assert_eq!(dark.brush, crate::draw::color::YELLOW);
        assert_eq!(dark.grid, ColorScheme::dark().grid);

        // a novel name starts from the light palette
        let sepia = config.schemes.get("sepia").unwrap();
        assert_eq!(sepia.brush, ColorScheme::light().brush);
        assert_eq!(sepia.front_colorizer, Colorizer::Contrast);
    }

    #[test]
    fn replay_scale_is_back_over_front() {
        let options: CanvasOptions = toml::from_str(
            r#"
            front_canvas_size = 300
            back_canvas_size = 150
            "#,
        )
        .unwrap();
        assert_eq!(options.resolve().replay_scale(), 0.5);
    }

    #[test]
    fn custom_curve_escape_hatch() {
        let config = CanvasConfig::default().with_curve(PressureCurve::Custom(|p| p * p));
        assert_eq!(config.curve.apply(0.5), 0.25);
    }

    #[test]
    fn json_schema_lists_the_option_keys() {
        let schema = serde_json::to_string(&CanvasOptions::json_schema()).unwrap();
        assert!(schema.contains("front_canvas_size"));
        assert!(schema.contains("color_schemes"));
    }
}
