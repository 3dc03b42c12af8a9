//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The provider call could not be completed (DNS, connect, body read).
    #[error("Failed to call generation provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Generation provider error (status {status}): {body}")]
    Provider { status: u16, body: String },

    /// The provider answered successfully but no known response shape held text.
    #[error("No generated text found")]
    Extraction { raw: serde_json::Value },

    #[error("Story request failed: {0}")]
    ClientRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Raw provider payload, only available for extraction failures.
    pub fn raw_response(&self) -> Option<&serde_json::Value> {
        match self {
            Error::Extraction { raw } => Some(raw),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_error_embeds_status() {
        let err = Error::Provider {
            status: 429,
            body: "quota exhausted".to_string(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.raw_response().is_none());
    }

    #[test]
    fn test_extraction_error_keeps_payload() {
        let raw = json!({ "candidates": [] });
        let err = Error::Extraction { raw: raw.clone() };
        assert_eq!(err.to_string(), "No generated text found");
        assert_eq!(err.raw_response(), Some(&raw));
    }
}
