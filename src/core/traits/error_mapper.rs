//! Error mapper trait definition
//!
//! Converts HTTP statuses and transport errors into the shared
//! [`FailureKind`] taxonomy. Adapters with vendor quirks override a method;
//! the rest use [`DefaultErrorMapper`].

use crate::core::providers::error::ProviderFailure;
use crate::core::types::FailureKind;

/// Longest slice of an upstream error body kept in a failure detail
const MAX_DETAIL_LEN: usize = 200;

/// Trait for mapping upstream error conditions to a [`ProviderFailure`]
///
/// # Common Mappings
/// * `401`, `403` - Authentication failure
/// * `429` - Rate limit or quota exceeded
/// * `408`, `504` - Upstream timeout
/// * `5xx` - Upstream unavailable
/// * anything else - Invalid response
pub trait ErrorMapper: Send + Sync + 'static {
    /// Map a non-2xx status and its body
    fn map_http_error(&self, status_code: u16, response_body: &str) -> ProviderFailure {
        let kind = match status_code {
            401 | 403 => FailureKind::AuthError,
            429 => FailureKind::RateLimited,
            408 | 504 => FailureKind::Timeout,
            500..=599 => FailureKind::NetworkError,
            _ => FailureKind::InvalidResponse,
        };
        ProviderFailure::new(
            kind,
            format!("HTTP {}: {}", status_code, preview(response_body)),
        )
    }

    /// Map an error raised before a complete response was read
    ///
    /// The request URL is stripped from the message before it is kept.
    fn map_transport_error(&self, error: reqwest::Error) -> ProviderFailure {
        let kind = if error.is_timeout() {
            FailureKind::Timeout
        } else if error.is_decode() {
            FailureKind::InvalidResponse
        } else {
            FailureKind::NetworkError
        };
        ProviderFailure::new(kind, error.without_url().to_string())
    }
}

/// Mapper with the common status mappings and no vendor overrides
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorMapper;

impl ErrorMapper for DefaultErrorMapper {}

/// Collapse whitespace and cut a body down to a log-friendly preview
pub(crate) fn preview(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_DETAIL_LEN {
        collapsed
    } else {
        let cut: String = collapsed.chars().take(MAX_DETAIL_LEN).collect();
        format!("{}...", cut)
    }
}
