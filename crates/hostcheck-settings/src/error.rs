use hostcheck_domain::ExpectationError;
use thiserror::Error;

/// Errors raised while loading a suite. All of them are fatal before any host is queried.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("parse suite toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown suite schema: {0} (expected {expected})", expected = crate::SCHEMA_SUITE_V1)]
    UnknownSchema(String),

    #[error("role `{role}`, {entry}: {source}")]
    Malformed {
        role: String,
        entry: String,
        #[source]
        source: ExpectationError,
    },

    #[error("role `{role}`, {entry}: `paths` must not be empty")]
    EmptyPaths { role: String, entry: String },

    #[error("unknown role `{role}` (available: {available})")]
    UnknownRole { role: String, available: String },

    #[error("no expectations selected")]
    EmptySelection,
}
