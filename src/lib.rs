//! Quizsmith - AI-assisted brand quiz generation and scoring.
//!
//! This crate turns unstructured website text into a fully specified
//! personality/recommendation quiz through a four-stage, schema-validated
//! generation pipeline, and scores respondent answers against the quiz's
//! weighted mapping matrix.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
