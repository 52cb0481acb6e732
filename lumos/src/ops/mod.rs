//! Core operations.
//!
//! This module contains the business logic for lumos commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

pub use check::{CheckReport, check};
pub use generate::{GenerateOptions, GenerateOutcome, generate};
