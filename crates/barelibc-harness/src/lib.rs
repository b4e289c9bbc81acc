//! Conformance harness for barelibc.
//!
//! This crate provides:
//! - Fixture loading: JSON case sets describing a call and its expected result
//! - Execution: running each case against `barelibc-core` in device or buffer mode
//! - Verification: comparing outputs and summarizing pass/fail
//! - Reports: markdown + JSON conformance reports, JSONL structured logs

#![forbid(unsafe_code)]

pub mod config;
pub mod diff;
pub mod error;
pub mod execute;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use config::RenderMode;
pub use error::HarnessError;
pub use fixtures::{FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};
