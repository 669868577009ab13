use thiserror::Error;

/// Crate-wide error type.
///
/// `Parse` and `Auth` are fatal before any remote mutation. `Remote` is fatal
/// while reading the catalog (reconciling against incomplete data is worse
/// than aborting) but is collected per batch during synchronization.
#[derive(Debug, Error)]
pub enum ImporterError {
    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("{operation} returned HTTP {status}: {body}")]
    Remote {
        operation: String,
        status: u16,
        body: String,
    },

    #[error("authentication failed: {reason}\nSet a Codacy API token via --api-token, the CODACY_API_TOKEN environment variable, or a .env file")]
    Auth { reason: String },

    #[error("{operation} failed: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {operation} failed: {source}")]
    Http {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{failed} of {total} pattern updates failed; see the generated report")]
    PartialSync { failed: usize, total: usize },
}

impl ImporterError {
    pub fn parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn auth(reason: impl Into<String>) -> Self {
        Self::Auth {
            reason: reason.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Maps a non-2xx response onto the error taxonomy: 401/403 become
    /// `Auth` so the user is pointed at credentials instead of a generic
    /// network message.
    pub fn from_status(operation: &str, status: u16, body: String) -> Self {
        if status == 401 || status == 403 {
            Self::Auth {
                reason: format!("{operation} rejected with HTTP {status}"),
            }
        } else {
            Self::Remote {
                operation: operation.to_string(),
                status,
                body,
            }
        }
    }
}

impl From<serde_json::Error> for ImporterError {
    fn from(error: serde_json::Error) -> Self {
        ImporterError::Parse {
            path: "<json>".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<quick_xml::Error> for ImporterError {
    fn from(error: quick_xml::Error) -> Self {
        ImporterError::Parse {
            path: "<xml>".to_string(),
            reason: error.to_string(),
        }
    }
}

/// Result type alias for importer operations.
pub type ImporterResult<T> = Result<T, ImporterError>;
