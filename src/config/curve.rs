//! Pressure-curve selection and the width policy it feeds.

use super::ConfigError;
use std::str::FromStr;

/// Maps normalized pen pressure to a raw curve value before width scaling.
///
/// The closed set of named curves covers every shape the configuration
/// surface accepts; `Custom` is the API escape hatch for a host-supplied pure
/// function and is never produced by deserialization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PressureCurve {
    /// `p` unchanged
    Identity,
    /// `p * p` - light touches thin out quickly
    Square,
    /// `sqrt(p)` - light touches widen quickly
    SquareRoot,
    /// Pressure has no effect; every sample maps to the curve midpoint
    Constant,
    /// Host-supplied pure function. Must be deterministic: replay renders the
    /// captured samples through the same curve.
    Custom(fn(f64) -> f64),
}

impl PressureCurve {
    /// Evaluates the curve at `p`. Callers clamp `p` to [0, 1] beforehand.
    pub fn apply(&self, p: f64) -> f64 {
        match self {
            PressureCurve::Identity => p,
            PressureCurve::Square => p * p,
            PressureCurve::SquareRoot => p.sqrt(),
            PressureCurve::Constant => 0.5,
            PressureCurve::Custom(f) => f(p),
        }
    }

    /// Config-facing name of the curve, where one exists.
    pub fn name(&self) -> &'static str {
        match self {
            PressureCurve::Identity => "identity",
            PressureCurve::Square => "square",
            PressureCurve::SquareRoot => "square-root",
            PressureCurve::Constant => "constant",
            PressureCurve::Custom(_) => "custom",
        }
    }
}

impl Default for PressureCurve {
    fn default() -> Self {
        PressureCurve::Identity
    }
}

impl FromStr for PressureCurve {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "identity" | "linear" => Ok(PressureCurve::Identity),
            "square" | "quadratic" => Ok(PressureCurve::Square),
            "square-root" | "sqrt" => Ok(PressureCurve::SquareRoot),
            "constant" => Ok(PressureCurve::Constant),
            other => Err(ConfigError::UnknownCurve(other.to_string())),
        }
    }
}

/// Base line width plus the pressure envelope around it.
///
/// `grow_multiplier` is the width factor reached at full pressure,
/// `shrink_multiplier` the factor reached at zero pressure; the curve midpoint
/// always maps to a factor of 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidthPolicy {
    /// Line width at the curve midpoint, in logical pixels
    pub base: f64,
    /// Width factor at full pressure (>= 1.0 widens)
    pub grow_multiplier: f64,
    /// Width factor at zero pressure (<= 1.0 narrows)
    pub shrink_multiplier: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_curves_parse() {
        assert_eq!(
            "identity".parse::<PressureCurve>().unwrap(),
            PressureCurve::Identity
        );
        assert_eq!(
            "Square".parse::<PressureCurve>().unwrap(),
            PressureCurve::Square
        );
        assert_eq!(
            "square-root".parse::<PressureCurve>().unwrap(),
            PressureCurve::SquareRoot
        );
        assert_eq!(
            "constant".parse::<PressureCurve>().unwrap(),
            PressureCurve::Constant
        );
    }

    #[test]
    fn unknown_curve_is_a_config_error() {
        let err = "cubic".parse::<PressureCurve>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownCurve("cubic".to_string()));
    }

    #[test]
    fn curve_shapes() {
        assert_eq!(PressureCurve::Identity.apply(0.3), 0.3);
        assert_eq!(PressureCurve::Square.apply(0.5), 0.25);
        assert_eq!(PressureCurve::SquareRoot.apply(0.25), 0.5);
        assert_eq!(PressureCurve::Constant.apply(0.0), 0.5);
        assert_eq!(PressureCurve::Constant.apply(1.0), 0.5);
    }

    #[test]
    fn custom_curve_is_applied() {
        let curve = PressureCurve::Custom(|p| 1.0 - p);
        assert_eq!(curve.apply(0.25), 0.75);
        assert_eq!(curve.name(), "custom");
    }
}
