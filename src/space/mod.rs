//! Design space declaration.
//!
//! A [`DesignSpace`] is an ordered list of named, bounded [`Parameter`]s.
//! Parameter order is significant: it fixes the layout of every
//! [`DesignVector`] and the gene order used by crossover and mutation.
//!
//! Construction validates every parameter and fails with
//! [`ConfigError`](crate::ConfigError) before any sampling can happen.

mod design;
mod parameter;

pub use design::{DesignSpace, DesignVector};
pub use parameter::{ParamKind, Parameter};
