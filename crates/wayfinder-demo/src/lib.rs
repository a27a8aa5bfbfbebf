#![forbid(unsafe_code)]

//! Scripted host simulation for Wayfinder.
//!
//! Drives the sample onboarding tour against simulated UI elements on a
//! deterministic clock and streams every snapshot change as JSON lines.

pub mod cli;
pub mod host;
pub mod runner;
pub mod scenario;

pub use runner::{DemoError, Outcome, RunSummary, run};
pub use scenario::Scenario;
