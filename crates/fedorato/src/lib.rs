//! Underwriting triage for broker submissions.
//!
//! The [`workflows::underwriting`] module holds the rule-evaluation engine and the
//! intake, repository, and service layers around it. [`workflows::broker_import`] reads
//! broker CSV exports into submission drafts.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
