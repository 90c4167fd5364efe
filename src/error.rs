use reqwest::StatusCode;
use std::{io, path::PathBuf};

/// Errors that may be returned while talking to a ChurchTools server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client couldn't be configured, nothing was sent.
    #[error("Invalid configuration")]
    Config(#[from] ConfigError),
    /// The HTTP client encountered an error.
    #[error("Unable to send the request")]
    HttpClient(#[from] reqwest::Error),
    /// The request payload couldn't be serialized.
    #[error("Unable to serialize the request payload")]
    Encode(#[source] serde_json::Error),
    /// The response body didn't have the expected shape.
    #[error("Unable to parse the response from \"{}\"", resource)]
    Decode {
        resource: String,
        /// The raw response body, kept around for diagnostics.
        body: String,
        #[source]
        source: serde_json::Error,
    },
    /// The server rejected our credentials (HTTP 401 or 403).
    #[error("The server rejected the request to \"{}\" with {}", resource, status)]
    Unauthorized {
        resource: String,
        status: StatusCode,
        body: String,
    },
    /// Logging in finished without leaving us a token or a session cookie.
    #[error("The server didn't issue a login token or a session cookie")]
    NoCredential,
    /// An accounting period refers to a finance client we don't know about.
    #[error(
        "Accounting period {} refers to unknown finance client {}",
        period_id,
        client_id
    )]
    UnknownClient { period_id: u64, client_id: u64 },
}

/// Problems detected before any request is sent.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No hostname was provided")]
    MissingHostname,
    #[error("No username was provided")]
    MissingUsername,
    #[error("\"{}\" can't be used as a base URL", url)]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unable to read the trust bundle at \"{}\"", path.display())]
    ReadTrustBundle {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unable to parse the trust bundle at \"{}\"", path.display())]
    InvalidTrustBundle {
        path: PathBuf,
        #[source]
        source: reqwest::Error,
    },
    #[error("The trust bundle at \"{}\" doesn't contain any certificates", path.display())]
    EmptyTrustBundle { path: PathBuf },
    #[error("Unable to initialize the HTTP client")]
    HttpClient(#[source] reqwest::Error),
}
