//! Suite parsing and role/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves suites provided as strings.

#![forbid(unsafe_code)]

mod error;
mod model;
mod presets;
mod resolve;

pub use error::SuiteError;
pub use model::{
    CommandConfig, OwnershipConfig, RoleConfig, SCHEMA_SUITE_V1, ServiceConfig, SuiteConfigV1,
    SymlinkConfig, UserConfig,
};
pub use presets::{SUITE_SOURCE_BUILTIN, builtin_suite};
pub use resolve::{Overrides, ResolvedSuite, RoleSummary};

/// Parse `hostcheck.toml` (or equivalent) into a typed model.
pub fn parse_suite_toml(input: &str) -> Result<SuiteConfigV1, SuiteError> {
    let cfg: SuiteConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the expectations to evaluate (role selection + validation).
///
/// `source` names where the suite came from and is carried into reports.
pub fn resolve_suite(
    cfg: SuiteConfigV1,
    source: &str,
    overrides: Overrides,
) -> Result<ResolvedSuite, SuiteError> {
    resolve::resolve_suite(cfg, source, overrides)
}
