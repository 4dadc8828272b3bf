//! Error types.
//!
//! Configuration problems are reported as [`ConfigError`] before any
//! sampling happens. Failures during a run are reported as [`RunError`],
//! which wraps the evaluator's own error type untouched.

/// Invalid design space or optimizer configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A parameter's bounds are not a non-empty finite interval.
    #[error("invalid bounds for '{name}': low ({low}) must be finite and less than high ({high})")]
    InvalidBounds {
        /// Parameter name.
        name: String,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// Two parameters share a name.
    #[error("duplicate parameter name '{0}'")]
    DuplicateParameter(String),

    /// A parameter was declared with an empty name.
    #[error("parameter name must not be empty")]
    EmptyParameterName,

    /// A name lookup did not match any parameter of the design space.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// A pinned value lies outside its parameter's range.
    #[error("pinned value {value} for '{name}' is outside [{low}, {high}]")]
    PinnedOutOfRange {
        /// Parameter name.
        name: String,
        /// Requested value.
        value: f64,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// A count from the inbound request was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeCount {
        /// Request field name.
        field: &'static str,
        /// Offending value.
        value: i64,
    },

    /// No objective directions were configured.
    #[error("at least one objective direction is required")]
    NoObjectives,

    /// A distribution index is negative or not finite.
    #[error("{operator} distribution index must be finite and non-negative, got {value}")]
    InvalidDistributionIndex {
        /// `"crossover"` or `"mutation"`.
        operator: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A probability lies outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidRate {
        /// Configuration field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A design vector's length does not match the design space.
    #[error("design vector has {got} values, design space has {expected} parameters")]
    DimensionMismatch {
        /// Number of parameters in the design space.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
}

/// Failure of an optimizer run.
///
/// `E` is the evaluator's error type; [`RunError::Evaluation`] carries it
/// verbatim and exposes it through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum RunError<E> {
    /// The configuration was rejected before the run started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The evaluator returned an error. The run is aborted.
    #[error("evaluator failed")]
    Evaluation(#[source] E),

    /// The evaluator returned a batch of the wrong length.
    #[error("evaluator returned {got} results for {expected} designs")]
    BatchLength {
        /// Number of designs submitted.
        expected: usize,
        /// Number of results returned.
        got: usize,
    },

    /// A result carried the wrong number of objectives.
    #[error("result {index} has {got} objectives, expected {expected}")]
    ObjectiveCount {
        /// Position of the result within the batch.
        index: usize,
        /// Configured number of objectives.
        expected: usize,
        /// Number returned.
        got: usize,
    },
}

impl<E> RunError<E> {
    /// Returns the evaluator's error if this run failed inside the evaluator.
    pub fn evaluation(&self) -> Option<&E> {
        match self {
            RunError::Evaluation(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[derive(Debug, thiserror::Error)]
    #[error("chamber model diverged")]
    struct ModelError;

    #[test]
    fn test_evaluation_error_is_source() {
        let err: RunError<ModelError> = RunError::Evaluation(ModelError);
        assert_eq!(err.to_string(), "evaluator failed");
        let source = err.source().expect("evaluation error has a source");
        assert_eq!(source.to_string(), "chamber model diverged");
        assert!(err.evaluation().is_some());
    }

    #[test]
    fn test_config_error_converts() {
        let err: RunError<ModelError> = ConfigError::NoObjectives.into();
        assert!(matches!(err, RunError::Config(ConfigError::NoObjectives)));
        assert!(err.evaluation().is_none());
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = ConfigError::NegativeCount {
            field: "samples",
            value: -3,
        };
        assert_eq!(err.to_string(), "samples must be non-negative, got -3");
    }
}
