//! Error types returned by every SDK operation
//!
//! All failures surface as one [`AssemblyError`]: a machine-readable
//! [`ErrorKind`] and HTTP-style status, a human-readable message, optional
//! structured `details` (usually the parsed response body) and an optional
//! source error. Rate-limit errors may carry a `retry_after` hint and
//! response-parse errors carry the structured [`ValidationError`].

use std::fmt;
use std::time::Duration;

use assembly_common::error::{CommonError, ErrorClassification, ErrorSeverity};
use assembly_common::validation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Boxed error used as the source of an [`AssemblyError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Discriminant of an [`AssemblyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No API key was configured.
    MissingApiKey,
    /// SDK settings are out of range or could not be loaded.
    Config,
    /// An operation needed a token and none was given.
    NoToken,
    /// The token could not be decrypted or its payload is invalid.
    InvalidToken,
    /// The API key was rejected, or a token has the wrong scope.
    Unauthorized,
    /// The API key may not perform the action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The server rejected the request payload.
    Validation,
    /// Too many requests.
    RateLimit,
    /// The server failed.
    Server,
    /// The request never got a usable response.
    Connection,
    /// A response did not match its expected schema.
    ResponseParse,
}

impl ErrorKind {
    /// Status code used when no other status applies.
    pub const fn default_status(self) -> u16 {
        match self {
            Self::MissingApiKey | Self::Config | Self::NoToken => 400,
            Self::InvalidToken | Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Validation => 422,
            Self::RateLimit => 429,
            Self::Server | Self::ResponseParse => 500,
            Self::Connection => 503,
        }
    }

    /// Message used when no override is given.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::MissingApiKey => "Assembly API key is missing or empty",
            Self::Config => "Invalid Assembly SDK configuration",
            Self::NoToken => "A token is required for this operation but was not provided",
            Self::InvalidToken => {
                "The provided token could not be decrypted or has an invalid payload"
            }
            Self::Unauthorized => "Unauthorized: the API key was rejected by Assembly",
            Self::Forbidden => "Forbidden: the API key lacks permission to perform this action",
            Self::NotFound => "The requested resource was not found",
            Self::Validation => "The request payload was rejected by the Assembly API",
            Self::RateLimit => "Rate limit exceeded",
            Self::Server => "An unexpected error occurred on the Assembly server",
            Self::Connection => "A network error occurred while connecting to the Assembly API",
            Self::ResponseParse => "Assembly API response did not match the expected schema",
        }
    }

    /// Stable name, e.g. `AssemblyRateLimitError`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MissingApiKey => "AssemblyMissingApiKeyError",
            Self::Config => "AssemblyConfigError",
            Self::NoToken => "AssemblyNoTokenError",
            Self::InvalidToken => "AssemblyInvalidTokenError",
            Self::Unauthorized => "AssemblyUnauthorizedError",
            Self::Forbidden => "AssemblyForbiddenError",
            Self::NotFound => "AssemblyNotFoundError",
            Self::Validation => "AssemblyValidationError",
            Self::RateLimit => "AssemblyRateLimitError",
            Self::Server => "AssemblyServerError",
            Self::Connection => "AssemblyConnectionError",
            Self::ResponseParse => "AssemblyResponseParseError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single error type of the SDK.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AssemblyError {
    kind: ErrorKind,
    status_code: u16,
    message: String,
    details: Option<Value>,
    retry_after: Option<Duration>,
    validation_errors: Option<ValidationError>,
    #[source]
    source: Option<BoxError>,
}

impl AssemblyError {
    /// Error of `kind` with its default status and message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            status_code: kind.default_status(),
            message: kind.default_message().to_string(),
            details: None,
            retry_after: None,
            validation_errors: None,
            source: None,
        }
    }

    /// Replace the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Replace the status code.
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Attach structured details.
    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach a retry hint.
    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }

    /// `MissingApiKey` with the default message.
    pub fn missing_api_key() -> Self {
        Self::new(ErrorKind::MissingApiKey)
    }

    /// `Config` describing the bad setting.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config).with_message(message)
    }

    /// `NoToken` with the default message.
    pub fn no_token() -> Self {
        Self::new(ErrorKind::NoToken)
    }

    /// `InvalidToken` with a stage-specific message and the upstream cause.
    pub fn invalid_token(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::InvalidToken).with_message(message).with_source(source)
    }

    /// `Unauthorized`, optionally overriding the message.
    pub fn unauthorized(message: Option<String>) -> Self {
        let err = Self::new(ErrorKind::Unauthorized);
        match message {
            Some(message) => err.with_message(message),
            None => err,
        }
    }

    /// `RateLimit` carrying the server's retry hint.
    pub fn rate_limit(retry_after: Option<Duration>) -> Self {
        Self::new(ErrorKind::RateLimit).with_retry_after(retry_after)
    }

    /// `Connection` wrapping the network failure.
    pub fn connection(source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Connection).with_source(source)
    }

    /// `ResponseParse` carrying the structured validation failure.
    ///
    /// `details` holds the individual issues as JSON.
    pub fn response_parse(validation_errors: ValidationError) -> Self {
        let issues: Vec<Value> = validation_errors
            .errors
            .iter()
            .map(|e| {
                serde_json::json!({
                    "path": e.field,
                    "message": e.message,
                    "code": e.code,
                })
            })
            .collect();

        let mut err = Self::new(ErrorKind::ResponseParse);
        err.details = Some(Value::Array(issues));
        err.validation_errors = Some(validation_errors);
        err
    }

    /// Error discriminant
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this error is of `kind`
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// HTTP-style status code
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured details, usually the parsed response body
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Server-provided retry hint (rate-limit errors only)
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }

    /// Structured schema failure (response-parse errors only)
    pub fn validation_errors(&self) -> Option<&ValidationError> {
        self.validation_errors.as_ref()
    }

    /// Multi-line summary of the schema failure
    pub fn pretty_validation_errors(&self) -> Option<String> {
        self.validation_errors.as_ref().map(ValidationError::pretty)
    }
}

impl From<CommonError> for AssemblyError {
    fn from(err: CommonError) -> Self {
        Self::config(err.to_string()).with_source(err)
    }
}

impl ErrorClassification for AssemblyError {
    fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimit | ErrorKind::Server | ErrorKind::Connection)
    }

    fn severity(&self) -> ErrorSeverity {
        match self.kind {
            ErrorKind::NotFound => ErrorSeverity::Info,
            ErrorKind::RateLimit | ErrorKind::Connection => ErrorSeverity::Warning,
            ErrorKind::MissingApiKey
            | ErrorKind::Config
            | ErrorKind::NoToken
            | ErrorKind::InvalidToken
            | ErrorKind::Unauthorized
            | ErrorKind::Forbidden
            | ErrorKind::Validation
            | ErrorKind::Server
            | ErrorKind::ResponseParse => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    fn retry_after(&self) -> Option<Duration> {
        self.retry_after
    }
}
