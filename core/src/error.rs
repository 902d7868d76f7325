//! Error types shared across the crate.
//!
//! Configuration problems are fatal and surface before any request is
//! made. Remote failures are split by where they happen: on the wire
//! ([`SyncError::Transport`]), in the service's answer
//! ([`SyncError::Status`]) or while decoding a successful answer
//! ([`SyncError::Decode`]).

use thiserror::Error;

/// Fatal configuration errors. These abort the run before any network
/// traffic happens.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No API key in the config file, the environment or `.env`.
    #[error("no API key configured; authorize one at {authorize_url} and export FIREDROP_API_KEY")]
    MissingApiKey { authorize_url: String },

    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::AppConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors from talking to the remote knowledge-base service.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The request never produced a response: DNS, connect, TLS or
    /// timeout failures.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("server returned {status} for {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The service answered 2xx but the body did not match the
    /// expected shape.
    #[error("failed to decode response from {url} (status {status}): {detail}")]
    Decode {
        status: u16,
        url: String,
        detail: String,
    },
}

impl SyncError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        SyncError::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Transport { .. } => None,
            SyncError::Status { status, .. } | SyncError::Decode { status, .. } => Some(*status),
        }
    }

    /// True when the service rejected the request with a status error,
    /// as opposed to the request never completing.
    pub fn is_status(&self) -> bool {
        matches!(self, SyncError::Status { .. })
    }
}

pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accessor_covers_all_variants() {
        let status = SyncError::Status {
            status: 404,
            url: "http://localhost/v1/datasets".into(),
            body: "not found".into(),
        };
        assert_eq!(status.status(), Some(404));
        assert!(status.is_status());

        let decode = SyncError::Decode {
            status: 200,
            url: "http://localhost/v1/datasets".into(),
            detail: "missing field `data`".into(),
        };
        assert_eq!(decode.status(), Some(200));
        assert!(!decode.is_status());
    }

    #[test]
    fn missing_api_key_points_at_authorize_url() {
        let err = ConfigError::MissingApiKey {
            authorize_url: "http://kb.local/datasets?category=api".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("http://kb.local/datasets?category=api"));
        assert!(msg.contains("FIREDROP_API_KEY"));
    }
}
