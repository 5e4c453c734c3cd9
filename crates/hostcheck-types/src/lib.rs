//! Stable DTOs and IDs used across the hostcheck workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs and codes
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{Explanation, lookup_explanation};
pub use receipt::{
    CheckRecord, CheckStatus, HostReport, HostStatus, HostcheckData, HostcheckReport, Mismatch,
    ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, ToolMeta, Verdict, VerdictCounts, VerdictStatus,
};
