use std::path::PathBuf;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// The wrapped document cannot be served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("no specification document is configured")]
    Missing,

    #[error("specification document must be an object, found {0}")]
    NotAnObject(&'static str),

    #[error("failed to encode response: {0}")]
    Encode(String),
}

impl DocumentError {
    /// Stable identifier used in the `error` field of the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentError::Missing => "document_missing",
            DocumentError::NotAnObject(_) => "document_invalid",
            DocumentError::Encode(_) => "encode_failed",
        }
    }

    /// `{error, message}` body sent to the client.
    pub fn to_body(&self) -> Value {
        json!({
            "error": self.kind(),
            "message": self.to_string(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
