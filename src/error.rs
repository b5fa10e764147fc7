/// Error types shared by the background page and the popup
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("Failed to fetch release catalog: {0}")]
    Fetch(String),

    #[error("Storage access failed: {0}")]
    Storage(String),

    #[error("Failed to decode {what}: {message}")]
    Decode { what: &'static str, message: String },

    #[error("Failed to serialize {what}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid release notes URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Browser API call failed: {0}")]
    Bridge(String),
}

/// Why the classifier dropped a catalog record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("record is not an object with string fields")]
    Malformed,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("version '{0}' has no segments")]
    EmptyVersion(String),

    #[error("version '{0}' does not start with an integer")]
    NonNumericVersion(String),

    #[error("unsupported product '{0}'")]
    UnsupportedProduct(String),

    #[error("key '{0}' contains a banned word")]
    BannedWord(String),
}
