//! Initial population sampling.
//!
//! - [`SamplingMethod::Uniform`]: independent uniform draws per parameter
//! - [`SamplingMethod::LatinHypercube`]: stratified draws; every dimension
//!   uses each of its `n` equal-width bins exactly once
//!
//! Both are deterministic for a given generator state.
//!
//! # References
//!
//! - McKay, Beckman & Conover (1979), "A Comparison of Three Methods for
//!   Selecting Values of Input Variables in the Analysis of Output from a
//!   Computer Code", *Technometrics* 21(2), 239-245

mod sampler;

pub use sampler::{lhs_unit, uniform_unit, SamplingMethod};
