use std::fmt;
use std::io;

use http::StatusCode;

pub type DriveResult<T> = Result<T, DriveError>;

#[derive(Debug)]
pub enum DriveError {
    /// The server answered with a non-2xx status.
    Status { status: StatusCode, message: String },
    Http(reqwest::Error),
    Json(serde_json::Error),
    Io(io::Error),
    Config(String),
    InvalidFilename(String),
}

impl DriveError {
    pub fn is_status(&self) -> bool {
        matches!(self, DriveError::Status { .. })
    }
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveError::Status { status, message } if message.is_empty() => {
                write!(f, "server returned {}", status)
            }
            DriveError::Status { status, message } => {
                write!(f, "server returned {}: {}", status, message)
            }
            DriveError::Http(e) => write!(f, "request failed: {}", e),
            DriveError::Json(e) => write!(f, "malformed response: {}", e),
            DriveError::Io(e) => write!(f, "io error: {}", e),
            DriveError::Config(msg) => write!(f, "bad configuration: {}", msg),
            DriveError::InvalidFilename(name) => write!(f, "invalid filename: {:?}", name),
        }
    }
}

impl std::error::Error for DriveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriveError::Http(e) => Some(e),
            DriveError::Json(e) => Some(e),
            DriveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DriveError {
    fn from(e: reqwest::Error) -> Self {
        DriveError::Http(e)
    }
}

impl From<serde_json::Error> for DriveError {
    fn from(e: serde_json::Error) -> Self {
        DriveError::Json(e)
    }
}

impl From<io::Error> for DriveError {
    fn from(e: io::Error) -> Self {
        DriveError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_server_message() {
        let err = DriveError::Status {
            status: StatusCode::NOT_FOUND,
            message: "File not found".to_string(),
        };
        assert_eq!(err.to_string(), "server returned 404 Not Found: File not found");
        assert!(err.is_status());
    }

    #[test]
    fn status_display_without_message() {
        let err = DriveError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "server returned 500 Internal Server Error");
    }
}
