//! Color schemes: named palettes, host overrides, and scheme resolution.

use super::ConfigError;
use crate::draw::Color;
use crate::util::name_to_color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Brush colorization strategy, selected once at controller construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colorizer {
    /// Every segment drawn in the scheme's brush color
    None,
    /// Hue cycles with the sample's position inside its stroke
    Spectrum,
    /// Brush color, substituted when it would blend into the grid background
    Contrast,
    /// One fixed palette color for a whole replayed drawing
    Prebaked,
}

impl FromStr for Colorizer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Colorizer::None),
            "spectrum" => Ok(Colorizer::Spectrum),
            "contrast" => Ok(Colorizer::Contrast),
            "prebaked" => Ok(Colorizer::Prebaked),
            other => Err(ConfigError::UnknownColorizer(other.to_string())),
        }
    }
}

/// Concrete color values for one named palette, resolved once per card render.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScheme {
    /// Default stroke color
    pub brush: Color,
    /// Guide line color
    pub grid: Color,
    /// Surface background beneath guides and strokes
    pub grid_bg: Color,
    /// Foreground color for host-rendered action buttons
    pub button_icon: Color,
    /// Background color for host-rendered action buttons
    pub button_bg: Color,
    /// Colorizer used while capturing on the front surface
    pub front_colorizer: Colorizer,
    /// Colorizer used when replaying on the back surface
    pub back_colorizer: Colorizer,
}

impl ColorScheme {
    /// Built-in palette for light host themes.
    pub fn light() -> Self {
        Self {
            brush: Color::rgb(0.13, 0.13, 0.13),
            grid: Color::rgb(0.71, 0.71, 0.71),
            grid_bg: Color::rgb(1.0, 1.0, 1.0),
            button_icon: Color::rgb(0.27, 0.27, 0.27),
            button_bg: Color::rgb(0.94, 0.94, 0.94),
            front_colorizer: Colorizer::None,
            back_colorizer: Colorizer::Prebaked,
        }
    }

    /// Built-in palette for dark host themes.
    pub fn dark() -> Self {
        Self {
            brush: Color::rgb(0.92, 0.92, 0.92),
            grid: Color::rgb(0.31, 0.31, 0.31),
            grid_bg: Color::rgb(0.12, 0.12, 0.12),
            button_icon: Color::rgb(0.78, 0.78, 0.78),
            button_bg: Color::rgb(0.2, 0.2, 0.2),
            front_colorizer: Colorizer::None,
            back_colorizer: Colorizer::Prebaked,
        }
    }
}

/// Named palettes available to a card render.
pub type SchemeMap = BTreeMap<String, ColorScheme>;

/// Resolves a scheme name against the available palettes.
///
/// `"auto"` selects `dark` or `light` by the host's dark-mode flag, which is
/// sampled exactly once at construction time; there is no live theme
/// switching mid-card. Any other name is looked up directly.
///
/// # Errors
/// [`ConfigError::UnknownScheme`] when the name (or the palette `"auto"`
/// points at) is absent from the map.
pub fn resolve<'a>(
    name: &str,
    host_is_dark_mode: bool,
    schemes: &'a SchemeMap,
) -> Result<&'a ColorScheme, ConfigError> {
    let key = if name == "auto" {
        if host_is_dark_mode { "dark" } else { "light" }
    } else {
        name
    };

    schemes
        .get(key)
        .ok_or_else(|| ConfigError::UnknownScheme(name.to_string()))
}

/// Like [`resolve`], but recovers from an unknown name by warning and falling
/// back to the light palette. This is the lookup controllers use; card
/// rendering must never fail over a bad scheme name.
pub fn resolve_or_light(name: &str, host_is_dark_mode: bool, schemes: &SchemeMap) -> ColorScheme {
    match resolve(name, host_is_dark_mode, schemes) {
        Ok(scheme) => scheme.clone(),
        Err(err) => {
            warn!("{err}; falling back to the light scheme");
            schemes
                .get("light")
                .cloned()
                .unwrap_or_else(ColorScheme::light)
        }
    }
}

/// Color specification - either a named/hex color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// brush = "red"
///
/// # CSS-style hex
/// grid = "#b0b0b0"
///
/// # Custom RGB color (0-255 per component)
/// grid_bg = [255, 250, 240]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, white, black) or
    /// `#rgb`/`#rrggbb` hex string
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to a concrete [`Color`].
    ///
    /// # Errors
    /// [`ConfigError::MalformedColor`] when the string is neither a known name
    /// nor a parseable hex value.
    pub fn to_color(&self) -> Result<Color, ConfigError> {
        match self {
            ColorSpec::Name(name) => name_to_color(name)
                .or_else(|| Color::from_hex(name))
                .ok_or_else(|| ConfigError::MalformedColor(name.clone())),
            ColorSpec::Rgb([r, g, b]) => Ok(Color::rgb(
                *r as f64 / 255.0,
                *g as f64 / 255.0,
                *b as f64 / 255.0,
            )),
        }
    }
}

/// Host-supplied per-field overrides for one named palette.
///
/// Every field is optional; unset fields keep the base palette's value. An
/// override for a name without a built-in palette starts from the light one.
#[derive(Debug, Default, Serialize, Deserialize, Clone, JsonSchema)]
pub struct SchemeOverride {
    /// Stroke color override
    pub brush: Option<ColorSpec>,
    /// Guide line color override
    pub grid: Option<ColorSpec>,
    /// Background color override
    pub grid_bg: Option<ColorSpec>,
    /// Button icon color override
    pub button_icon: Option<ColorSpec>,
    /// Button background color override
    pub button_bg: Option<ColorSpec>,
    /// Front-surface colorizer: none, spectrum, contrast
    pub front_brush_colorizer: Option<String>,
    /// Back-surface colorizer: none, spectrum, contrast, prebaked
    pub back_brush_colorizer: Option<String>,
}

impl SchemeOverride {
    /// Applies the override on top of `base`, recovering field-by-field:
    /// a malformed color or unknown colorizer keeps the base value with a
    /// warning instead of poisoning the whole scheme.
    pub fn apply(&self, name: &str, base: &ColorScheme) -> ColorScheme {
        let mut scheme = base.clone();

        let color_field = |field: &mut Color, spec: &Option<ColorSpec>, label: &str| {
            if let Some(spec) = spec {
                match spec.to_color() {
                    Ok(color) => *field = color,
                    Err(err) => warn!("scheme '{name}': {err} for '{label}', keeping default"),
                }
            }
        };

        color_field(&mut scheme.brush, &self.brush, "brush");
        color_field(&mut scheme.grid, &self.grid, "grid");
        color_field(&mut scheme.grid_bg, &self.grid_bg, "grid_bg");
        color_field(&mut scheme.button_icon, &self.button_icon, "button_icon");
        color_field(&mut scheme.button_bg, &self.button_bg, "button_bg");

        let colorizer_field = |field: &mut Colorizer, value: &Option<String>, label: &str| {
            if let Some(value) = value {
                match value.parse() {
                    Ok(colorizer) => *field = colorizer,
                    Err(err) => warn!("scheme '{name}': {err} for '{label}', keeping default"),
                }
            }
        };

        colorizer_field(
            &mut scheme.front_colorizer,
            &self.front_brush_colorizer,
            "front_brush_colorizer",
        );
        colorizer_field(
            &mut scheme.back_colorizer,
            &self.back_brush_colorizer,
            "back_brush_colorizer",
        );

        scheme
    }
}
