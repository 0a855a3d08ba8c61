use std::fmt;
use thiserror::Error;

/// Longest slice of a failed response body kept inside a transport error
pub const MAX_ERROR_BODY_LEN: usize = 512;

/// What kind of payload the decoder choked on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    InvalidDate,
    InvalidTimestamp,
    InvalidInteger,
    InvalidDecimal,
    MalformedJson,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidDate => "invalid date",
            Self::InvalidTimestamp => "invalid timestamp",
            Self::InvalidInteger => "invalid integer",
            Self::InvalidDecimal => "invalid decimal",
            Self::MalformedJson => "malformed JSON",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Decode error ({kind}): {detail}")]
    Decode {
        kind: DecodeErrorKind,
        detail: String,
    },

    #[error("Transport error{}: {message}", format_status(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Application error: {0}")]
    Application(String),

    #[error("Authentication required for private endpoint")]
    AuthenticationRequired,

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    pub fn decode(kind: DecodeErrorKind, detail: impl Into<String>) -> Self {
        Self::Decode {
            kind,
            detail: detail.into(),
        }
    }

    /// Build a transport error from a non-2xx response, truncating the body
    pub fn http_status(status: u16, body: &str) -> Self {
        Self::Transport {
            status: Some(status),
            message: truncate_body(body),
        }
    }

    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    pub const fn is_application(&self) -> bool {
        matches!(self, Self::Application(_))
    }

    pub fn decode_kind(&self) -> Option<DecodeErrorKind> {
        match self {
            Self::Decode { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(DecodeErrorKind::MalformedJson, err.to_string())
    }
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
