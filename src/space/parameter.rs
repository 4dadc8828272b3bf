//! Single design parameter.

use crate::error::ConfigError;

/// Numeric type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParamKind {
    /// Any real value in `[low, high]`.
    Continuous,
    /// Whole numbers in `[low, high]`; produced values are rounded to nearest.
    Integer,
}

/// A named design parameter with an inclusive range.
///
/// Bounds are only checked when the parameter is placed into a
/// [`DesignSpace`](super::DesignSpace), which rejects `low >= high`.
///
/// # Example
///
/// ```
/// use u_moo::space::{ParamKind, Parameter};
///
/// let pc = Parameter::continuous("chamber_pressure_mpa", 3.0, 15.0);
/// let n = Parameter::integer("channel_count", 60, 180);
/// assert_eq!(n.kind, ParamKind::Integer);
/// assert_eq!(pc.scale(0.5), 9.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    /// Unique name within the design space.
    pub name: String,
    /// Numeric type.
    pub kind: ParamKind,
    /// Inclusive lower bound.
    pub low: f64,
    /// Inclusive upper bound.
    pub high: f64,
}

impl Parameter {
    /// A continuous parameter over `[low, high]`.
    pub fn continuous(name: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Continuous,
            low,
            high,
        }
    }

    /// An integer parameter over `[low, high]`.
    pub fn integer(name: impl Into<String>, low: i64, high: i64) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Integer,
            low: low as f64,
            high: high as f64,
        }
    }

    /// Checks the name and bounds.
    ///
    /// Integer parameters must also contain at least one whole number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyParameterName);
        }
        let empty_integer_range =
            self.kind == ParamKind::Integer && self.low.ceil() > self.high.floor();
        if !self.low.is_finite()
            || !self.high.is_finite()
            || self.low >= self.high
            || empty_integer_range
        {
            return Err(ConfigError::InvalidBounds {
                name: self.name.clone(),
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    /// Width of the range, `high - low`.
    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    /// Maps a unit value `u` in `[0, 1]` into the parameter's range.
    ///
    /// Integer parameters are rounded to nearest after scaling.
    pub fn scale(&self, u: f64) -> f64 {
        let v = self.low + self.span() * u;
        match self.kind {
            ParamKind::Continuous => v,
            ParamKind::Integer => v.round(),
        }
    }

    /// Forces `v` into the parameter's range and kind.
    ///
    /// NaN maps to the lowest admissible value.
    pub fn clamp(&self, v: f64) -> f64 {
        let v = if v.is_nan() { self.low } else { v };
        match self.kind {
            ParamKind::Continuous => v.clamp(self.low, self.high),
            ParamKind::Integer => v.round().clamp(self.low.ceil(), self.high.floor()),
        }
    }

    /// Returns `true` if `v` lies in range and matches the kind.
    pub fn contains(&self, v: f64) -> bool {
        let in_range = v >= self.low && v <= self.high;
        match self.kind {
            ParamKind::Continuous => in_range,
            ParamKind::Integer => in_range && v.fract() == 0.0,
        }
    }
}
