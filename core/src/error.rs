//! Error types for the push notifications client.
//!
//! # Design
//! Three layers, matching when each failure can happen:
//! - `ConfigError` is raised while constructing a `ClientConfig`. A client is
//!   never produced from invalid options.
//! - `ArgumentError` is raised by the validators before any request is built,
//!   so an invalid call never reaches the network.
//! - `ApiError` is what every client operation returns. It wraps the two
//!   above and adds the failures that only exist once a request is in
//!   flight: transport, malformed response and service errors.

use thiserror::Error;

/// Boxed error produced by a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Invalid client construction options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("PushNotifications options object is required")]
    OptionsRequired,

    #[error("\"instanceId\" is required in PushNotifications options")]
    InstanceIdRequired,

    #[error("\"instanceId\" must be a string")]
    InstanceIdNotString,

    #[error("\"secretKey\" is required in PushNotifications options")]
    SecretKeyRequired,

    #[error("\"secretKey\" must be a string")]
    SecretKeyNotString,

    #[error("endpoint must be a string")]
    EndpointNotString,

    #[error("port must be an integer between 1 and 65535, got {0}")]
    InvalidPort(String),

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// A caller-supplied argument failed validation.
///
/// The `&'static str` fields name the argument or element as it appears in
/// the message (`"interests"`, `"interest"`, `"userId"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("{0} argument is required")]
    Required(&'static str),

    #[error("{0} argument must be an array")]
    NotAList(&'static str),

    #[error("{0} argument must be an object")]
    NotAnObject(&'static str),

    #[error("{subject} {value} is not a string")]
    NotAString { subject: &'static str, value: String },

    #[error("{0} cannot be the empty string")]
    EmptyString(&'static str),

    #[error("Publish requests must target at least one {0} to be delivered")]
    EmptyTargets(&'static str),

    #[error("Number of {noun} ({count}) exceeds maximum of {max}")]
    LimitExceeded {
        noun: &'static str,
        count: usize,
        max: usize,
    },

    #[error("{subject} {value} is longer than the maximum of {max} characters")]
    TooLong {
        subject: &'static str,
        value: String,
        max: usize,
    },

    /// A single id argument is too long. The value is left out of the
    /// message.
    #[error("{subject} is longer than the maximum length of {max}")]
    IdTooLong { subject: &'static str, max: usize },

    #[error(
        "{subject} \"{value}\" contains a forbidden character. Allowed characters are: \
         ASCII upper/lower-case letters, numbers or one of _-=@,.;"
    )]
    ForbiddenCharacter { subject: &'static str, value: String },
}

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The request could not be delivered or the response was cut short.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The body could not be parsed, or an error body lacked the
    /// `error`/`description` envelope.
    #[error("Could not parse response body")]
    MalformedResponse,

    /// The service answered with a well-formed error envelope.
    #[error("{status} {error}: {description}")]
    Service {
        status: u16,
        error: String,
        description: String,
    },

    #[error("failed to sign token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a service error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
