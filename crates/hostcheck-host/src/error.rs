use thiserror::Error;

/// Errors raised before any host query is made.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid target `{input}`: {reason}")]
    Invalid { input: String, reason: String },

    #[error("read snapshot {path}")]
    SnapshotRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse snapshot {path}")]
    SnapshotParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown snapshot schema in {path}: {schema}")]
    SnapshotSchema { path: String, schema: String },
}

impl TargetError {
    pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
