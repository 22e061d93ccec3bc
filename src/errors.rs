/// Error types for the Transeos SDK.
///
/// Every fallible operation returns [`TranseosError`]. Consumers that need the
/// wire-compatible `{name, statusCode, message}` shape exposed by the original
/// JavaScript client can obtain it with [`TranseosError::to_body`].
use serde::Serialize;
use thiserror::Error;

/// The primary error type for the Transeos SDK.
#[derive(Error, Debug)]
pub enum TranseosError {
    /// A caller argument is missing or malformed.
    #[error("invalid argument '{field}': {message}")]
    Validation { field: &'static str, message: String },

    /// A character outside the name character set (digits 1-5, a-z, '.').
    #[error("character '{0}' is not allowed in character set for names")]
    InvalidCharacter(char),

    /// An account name longer than 13 characters.
    #[error("string of {0} characters is too long to be a valid name")]
    NameTooLong(usize),

    /// A 13th name character that does not fit in 4 bits.
    #[error("thirteenth character '{0}' in name cannot be a letter that comes after j")]
    InvalidTrailingChar(char),

    /// A symbol character outside 'A'..'Z'.
    #[error("only uppercase letters allowed in symbol_code string, got '{0}'")]
    InvalidSymbolChar(char),

    /// A symbol longer than 7 characters.
    #[error("string of {0} characters is too long to be a valid symbol_code")]
    SymbolTooLong(usize),

    /// No wallet was supplied on the submit path.
    #[error("no wallet has been passed: please provide an authenticated wallet")]
    MissingWallet,

    /// The wallet carries no signing authorization.
    #[error("no auth information has been passed with wallet: please provide an authenticated wallet")]
    MissingAuth,

    /// A transport or chain-endpoint failure on a read or write.
    #[error("upstream error: {message}")]
    Upstream { message: String },
}

/// The consumer-facing error body, field-for-field compatible with the
/// `{name, statusCode, message}` objects thrown by the JavaScript client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub name: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
}

impl TranseosError {
    /// Convenience constructor for validation failures.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TranseosError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Convenience constructor for upstream failures.
    pub fn upstream(message: impl Into<String>) -> Self {
        TranseosError::Upstream {
            message: message.into(),
        }
    }

    /// The status code of the public error contract.
    /// Upstream failures are 500; everything else is a 400-class caller error.
    pub fn status_code(&self) -> u16 {
        match self {
            TranseosError::Upstream { .. } => 500,
            _ => 400,
        }
    }

    /// The short error name of the public error contract.
    pub fn name(&self) -> &'static str {
        match self {
            TranseosError::Validation { .. } => "ValidationError",
            TranseosError::InvalidCharacter(_)
            | TranseosError::NameTooLong(_)
            | TranseosError::InvalidTrailingChar(_)
            | TranseosError::InvalidSymbolChar(_)
            | TranseosError::SymbolTooLong(_) => "EncodingError",
            TranseosError::MissingWallet | TranseosError::MissingAuth => "AuthError",
            TranseosError::Upstream { .. } => "UpstreamError",
        }
    }

    /// Render the wire-compatible error body.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            name: self.name().to_string(),
            status_code: self.status_code(),
            message: self.to_string(),
        }
    }
}

impl From<reqwest::Error> for TranseosError {
    fn from(err: reqwest::Error) -> Self {
        TranseosError::upstream(err.to_string())
    }
}

impl From<serde_json::Error> for TranseosError {
    fn from(err: serde_json::Error) -> Self {
        TranseosError::upstream(format!("failed to parse response: {err}"))
    }
}

impl From<url::ParseError> for TranseosError {
    fn from(err: url::ParseError) -> Self {
        TranseosError::upstream(format!("URL parse error: {err}"))
    }
}
