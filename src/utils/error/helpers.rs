//! Helper functions for creating specific error types

use super::types::RelayError;

impl RelayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn signature<S: Into<String>>(message: S) -> Self {
        Self::Signature(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn messaging_unavailable<S: Into<String>>(message: S) -> Self {
        Self::MessagingUnavailable(message.into())
    }

    pub fn messaging<S: Into<String>>(message: S) -> Self {
        Self::Messaging(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable code for logs and error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::HttpClient(_) => "HTTP_CLIENT_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Yaml(_) => "YAML_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Signature(_) => "INVALID_SIGNATURE",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::MessagingUnavailable(_) => "MESSAGING_UNAVAILABLE",
            Self::Messaging(_) => "MESSAGING_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
