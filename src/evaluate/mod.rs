//! Evaluator contract.
//!
//! The optimizer knows nothing about the physics of a design domain. A
//! domain plugs in by implementing [`Evaluator`], which maps a
//! [`DesignVector`](crate::space::DesignVector) to an [`EvaluationResult`]:
//! objective values, a non-negative constraint violation, and raw metrics.
//!
//! Evaluators must be pure: no hidden state and no shared mutation between
//! calls. The runner relies on this to evaluate a batch in parallel.

mod types;

pub use types::{infallible, EvaluationResult, Evaluator, FnEvaluator};
