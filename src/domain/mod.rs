//! Domain layer: pure value objects, validators, and the scoring engine.
//!
//! Nothing in this module performs I/O. Generation artifacts are
//! request-scoped values that flow through the pipeline by value; only the
//! quiz aggregate in [`quiz`] describes durable state.

pub mod foundation;
pub mod generation;
pub mod quiz;
pub mod scoring;
