use crate::error_code::ErrorCode;
use crate::transport::TransportError;

use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Server(#[from] ServerError),
}

impl Error {
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server(_))
    }

    /// Error code of a server-reported failure, if the server sent one
    pub fn error_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Server(e) => e.code(),
            Self::Client(_) => None,
        }
    }
}

/// Failures on our side of the wire: the response never made it to a usable JSON object.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("unable to fetch URL: {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("unable to fetch URL: {url}: empty response")]
    EmptyResponse { url: String },
    #[error("cannot decode server response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected server response: expected JSON object, got {0}")]
    UnexpectedShape(JsonKind),
    #[error("no API key configured for the default client")]
    MissingApiKey,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("server reported an error: {message}")]
pub struct ServerError {
    message: String,
    code: Option<ErrorCode>,
}

impl ServerError {
    pub fn new(message: impl Into<String>, code: Option<ErrorCode>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// Human-readable message from the `error` field
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Value of the `errorCode` field, verbatim
    pub fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }
}

/// Kind of a decoded JSON value which is not an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl From<&Value> for JsonKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(s)
    }
}
