//! Design space and design vectors.

use super::parameter::Parameter;
use crate::error::ConfigError;
use std::collections::{BTreeMap, HashSet};

/// An ordered, validated set of parameters.
///
/// Immutable once built: [`pin`](Self::pin) returns a new space.
///
/// # Example
///
/// ```
/// use u_moo::space::{DesignSpace, Parameter};
///
/// let space = DesignSpace::new(vec![
///     Parameter::continuous("mach", 0.0, 2.0),
///     Parameter::continuous("altitude_m", 0.0, 12_000.0),
///     Parameter::integer("stages", 1, 4),
/// ])
/// .unwrap()
/// .pin("mach", 0.8)
/// .unwrap();
///
/// let design = space.design(vec![1.7, 15_000.0, 2.4]).unwrap();
/// assert_eq!(design.as_slice(), &[0.8, 12_000.0, 2.0]);
/// assert_eq!(design.get(&space, "stages"), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawDesignSpace", into = "RawDesignSpace")
)]
pub struct DesignSpace {
    params: Vec<Parameter>,
    pins: Vec<Option<f64>>,
}

impl DesignSpace {
    /// Builds a design space, rejecting invalid bounds and duplicate names.
    pub fn new(params: Vec<Parameter>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::with_capacity(params.len());
        for p in &params {
            p.validate()?;
            if !seen.insert(p.name.as_str()) {
                return Err(ConfigError::DuplicateParameter(p.name.clone()));
            }
        }
        let pins = vec![None; params.len()];
        Ok(Self { params, pins })
    }

    /// Fixes `name` to `value` in every design produced from this space.
    ///
    /// Integer parameters round the pinned value to nearest.
    pub fn pin(mut self, name: &str, value: f64) -> Result<Self, ConfigError> {
        let idx = self
            .index_of(name)
            .ok_or_else(|| ConfigError::UnknownParameter(name.to_string()))?;
        let p = &self.params[idx];
        if !(value >= p.low && value <= p.high) {
            return Err(ConfigError::PinnedOutOfRange {
                name: name.to_string(),
                value,
                low: p.low,
                high: p.high,
            });
        }
        self.pins[idx] = Some(p.clamp(value));
        Ok(self)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if the space declares no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// Position of the parameter called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// The parameter called `name`.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Pinned value of the parameter at `idx`, if any.
    pub fn pinned(&self, idx: usize) -> Option<f64> {
        self.pins.get(idx).copied().flatten()
    }

    /// Builds a design vector from raw values.
    ///
    /// Values are clamped to range, integers rounded, and pins applied.
    /// Fails only if the length does not match the space.
    pub fn design(&self, values: Vec<f64>) -> Result<DesignVector, ConfigError> {
        if values.len() != self.params.len() {
            return Err(ConfigError::DimensionMismatch {
                expected: self.params.len(),
                got: values.len(),
            });
        }
        Ok(self.conform(values))
    }

    /// Clamps, rounds and pins `values`, whose length must match the space.
    pub(crate) fn conform(&self, mut values: Vec<f64>) -> DesignVector {
        debug_assert_eq!(values.len(), self.params.len());
        for ((v, p), pin) in values.iter_mut().zip(&self.params).zip(&self.pins) {
            *v = match pin {
                Some(fixed) => *fixed,
                None => p.clamp(*v),
            };
        }
        DesignVector(values)
    }

    /// Returns `true` if `design` satisfies every parameter's range, kind and pin.
    pub fn contains(&self, design: &DesignVector) -> bool {
        design.0.len() == self.params.len()
            && design
                .0
                .iter()
                .zip(&self.params)
                .zip(&self.pins)
                .all(|((&v, p), pin)| p.contains(v) && pin.is_none_or(|fixed| v == fixed))
    }

    /// Pairs each value of `design` with its parameter name.
    pub fn named<'a>(
        &'a self,
        design: &'a DesignVector,
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.params
            .iter()
            .zip(design.0.iter())
            .map(|(p, &v)| (p.name.as_str(), v))
    }

    /// Name-keyed copy of `design`.
    pub fn to_map(&self, design: &DesignVector) -> BTreeMap<String, f64> {
        self.named(design)
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}

/// Concrete parameter values, in design-space order.
///
/// Only created through a [`DesignSpace`], so every value conforms to
/// its parameter's range and kind. Operators never mutate a vector in
/// place; they produce new ones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DesignVector(Vec<f64>);

impl DesignVector {
    /// Values in parameter order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a vector over an empty space.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of the parameter called `name` in `space`.
    pub fn get(&self, space: &DesignSpace, name: &str) -> Option<f64> {
        space.index_of(name).and_then(|i| self.0.get(i).copied())
    }

    /// Consumes the vector, returning its values.
    pub fn into_values(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for DesignVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Serialized form of a [`DesignSpace`]; deserialization re-validates.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawDesignSpace {
    parameters: Vec<Parameter>,
    #[serde(default)]
    pins: BTreeMap<String, f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDesignSpace> for DesignSpace {
    type Error = ConfigError;

    fn try_from(raw: RawDesignSpace) -> Result<Self, Self::Error> {
        raw.pins
            .into_iter()
            .try_fold(DesignSpace::new(raw.parameters)?, |space, (name, value)| {
                space.pin(&name, value)
            })
    }
}

#[cfg(feature = "serde")]
impl From<DesignSpace> for RawDesignSpace {
    fn from(space: DesignSpace) -> Self {
        let pins = space
            .params
            .iter()
            .zip(&space.pins)
            .filter_map(|(p, pin)| pin.map(|v| (p.name.clone(), v)))
            .collect();
        Self {
            parameters: space.params,
            pins,
        }
    }
}
