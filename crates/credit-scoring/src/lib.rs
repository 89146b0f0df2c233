//! Loan approval scoring built on a fixed fuzzy-inference rule base.
//!
//! The [`scoring`] module holds the engine itself; [`config`], [`telemetry`] and [`error`]
//! carry the service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
