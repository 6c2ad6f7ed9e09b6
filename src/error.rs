use std::path::PathBuf;

use crate::validator::TranslateError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node kind `{kind}` has builder keys but no field table")]
    MissingFields { kind: String },

    #[error("builder key `{kind}.{field}` has no field definition")]
    UnknownBuilderKey { kind: String, field: String },

    #[error("node kind `{kind}` has no field `{field}`")]
    UnknownField { kind: String, field: String },

    /// A translator failure other than an unrecognized shape.
    /// These abort generation.
    #[error("failed to resolve type of `{kind}.{field}`: {source}")]
    Translate {
        kind: String,
        field: String,
        #[source]
        source: TranslateError,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
