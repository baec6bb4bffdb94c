use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

pub const UNKNOWN_ERROR_CODE: i64 = 0;
pub const UNAUTHENTICATED_CODE: i64 = 401;

const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";
const UNAUTHENTICATED_MESSAGE: &str = "You are not logged in, please sign in to continue";
const SERVER_ERROR_MESSAGE: &str = "Server error, please try again later";

/// Uniform error returned by every request function.
///
/// Fields are private so a value cannot change once it has been handed to a
/// caller; build one with [`ApiError::new`] and [`ApiError::with_details`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    code: i64,
    message: String,
    details: Option<Value>,
}

impl ApiError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }

    /// Returned by authenticated calls when no token is available.
    pub fn unauthenticated() -> Self {
        Self::new(UNAUTHENTICATED_CODE, UNAUTHENTICATED_MESSAGE)
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_ERROR_CODE, UNKNOWN_ERROR_MESSAGE)
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    pub fn is_transport(&self) -> bool {
        TransportCode::ALL
            .iter()
            .any(|code| code.error_code() == self.code)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Transport-level failure codes, named after the codes HTTP client
/// libraries conventionally report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportCode {
    /// `ERR_NETWORK`: the server could not be reached.
    Network,
    /// `ECONNABORTED`: the request timed out.
    Timeout,
    /// `ERR_BAD_REQUEST`: the request could not be built or sent.
    BadRequest,
    /// `ERR_BAD_RESPONSE`: the response body could not be read or decoded.
    BadResponse,
    /// `ERR_CANCELED`: the caller cancelled the request.
    Canceled,
}

impl TransportCode {
    pub const ALL: [TransportCode; 5] = [
        TransportCode::Network,
        TransportCode::Timeout,
        TransportCode::BadRequest,
        TransportCode::BadResponse,
        TransportCode::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "ERR_NETWORK",
            Self::Timeout => "ECONNABORTED",
            Self::BadRequest => "ERR_BAD_REQUEST",
            Self::BadResponse => "ERR_BAD_RESPONSE",
            Self::Canceled => "ERR_CANCELED",
        }
    }

    pub fn error_code(&self) -> i64 {
        match self {
            Self::Network => 1001,
            Self::Timeout => 1002,
            Self::BadRequest => 1003,
            Self::BadResponse => 1004,
            Self::Canceled => 1005,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Network => "Network error, please check your connection",
            Self::Timeout => "Request timed out, please try again",
            Self::BadRequest => "The request could not be sent",
            Self::BadResponse => "The server returned an invalid response",
            Self::Canceled => "The request was cancelled",
        }
    }
}

impl fmt::Display for TransportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTransportCode(String);

impl fmt::Display for UnknownTransportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized transport error code '{}'", self.0)
    }
}

impl std::error::Error for UnknownTransportCode {}

impl FromStr for TransportCode {
    type Err = UnknownTransportCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownTransportCode(s.to_string()))
    }
}

/// Anything the transport layer can fail with, before normalization.
#[derive(Debug)]
pub enum Failure {
    /// Already normalized; passes through untouched.
    Api(ApiError),
    Transport { code: TransportCode, detail: String },
    /// The server answered with a non-success status.
    Response { status: u16, body: String },
    Other(String),
}

impl Failure {
    pub fn transport(code: TransportCode, detail: impl Into<String>) -> Self {
        Self::Transport {
            code,
            detail: detail.into(),
        }
    }

    /// Builds a failure from a raw transport code string. Codes that are not
    /// recognized end up as [`Failure::Other`].
    pub fn from_code(code: &str, detail: impl Into<String>) -> Self {
        match code.parse::<TransportCode>() {
            Ok(code) => Self::transport(code, detail),
            Err(_) => Self::Other(format!("{}: {}", code, detail.into())),
        }
    }

    /// HTTP status carried by the failure, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for Failure {
    fn from(error: ApiError) -> Self {
        Self::Api(error)
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        // Timeouts also report as request errors, so check them first.
        let code = if err.is_timeout() {
            Some(TransportCode::Timeout)
        } else if err.is_builder() {
            Some(TransportCode::BadRequest)
        } else if err.is_decode() {
            Some(TransportCode::BadResponse)
        } else if err.is_connect() || err.is_request() || err.is_body() {
            Some(TransportCode::Network)
        } else {
            None
        };

        match code {
            Some(code) => Self::transport(code, err.to_string()),
            None => Self::Other(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Failure {
    fn from(err: serde_json::Error) -> Self {
        Self::transport(TransportCode::BadResponse, err.to_string())
    }
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        normalize(failure)
    }
}

/// Error payload the API server sends for validation and HTTP exceptions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerErrorBody {
    status_code: i64,
    message: ServerMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServerMessage {
    One(String),
    Many(Vec<String>),
}

impl ServerMessage {
    fn joined(self) -> String {
        match self {
            Self::One(message) => message,
            Self::Many(messages) => messages.join(", "),
        }
    }
}

/// Maps any failure onto an [`ApiError`].
///
/// Order matters: normalized errors pass through, then transport codes, then
/// the server's structured payload, then the bare HTTP status, and finally
/// the zero-code unknown error.
pub fn normalize(failure: impl Into<Failure>) -> ApiError {
    match failure.into() {
        Failure::Api(error) => error,
        Failure::Transport { code, detail } => {
            tracing::debug!(code = %code, %detail, "Transport failure");
            ApiError::new(code.error_code(), code.message())
        }
        Failure::Response { status, body } => from_response(status, &body),
        Failure::Other(description) => {
            ApiError::unknown().with_details(json!({ "description": description }))
        }
    }
}

fn from_response(status: u16, body: &str) -> ApiError {
    let payload = serde_json::from_str::<Value>(body).ok();

    if let Some(payload) = payload {
        if let Ok(server) = serde_json::from_value::<ServerErrorBody>(payload.clone()) {
            return ApiError::new(server.status_code, server.message.joined()).with_details(payload);
        }

        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| status_message(status));
        return ApiError::new(i64::from(status), message).with_details(payload);
    }

    ApiError::new(i64::from(status), status_message(status))
}

fn status_message(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or(SERVER_ERROR_MESSAGE)
        .to_string()
}
