//! Shared plumbing for the HTTP adapters

use super::error::ProviderFailure;
use crate::core::traits::ErrorMapper;
use crate::core::types::{FailureKind, GenerationResult};
use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Send a JSON body and decode a JSON reply
///
/// Transport errors and non-2xx statuses go through `mapper`; a 2xx body
/// that does not decode into `T` is an invalid response.
pub(crate) async fn send_json<B, T, M>(
    request: RequestBuilder,
    body: &B,
    mapper: &M,
) -> Result<T, ProviderFailure>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
    M: ErrorMapper + ?Sized,
{
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|e| mapper.map_transport_error(e))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| mapper.map_transport_error(e))?;

    if !status.is_success() {
        return Err(mapper.map_http_error(status.as_u16(), &text));
    }

    Ok(serde_json::from_str(&text)?)
}

/// Reject missing or blank completions
pub(crate) fn non_empty(text: Option<String>) -> Result<String, ProviderFailure> {
    match text.map(|t| t.trim().to_string()) {
        Some(text) if !text.is_empty() => Ok(text),
        Some(_) => Err(ProviderFailure::invalid_response("Empty completion")),
        None => Err(ProviderFailure::invalid_response("Completion field missing")),
    }
}

/// Run one adapter attempt under its time budget
///
/// The attempt future is dropped when the budget runs out, which aborts the
/// in-flight HTTP request.
pub(crate) async fn bounded<F>(timeout: Duration, attempt: F) -> GenerationResult
where
    F: Future<Output = Result<String, ProviderFailure>>,
{
    match tokio::time::timeout(timeout, attempt).await {
        Ok(Ok(text)) => GenerationResult::success(text),
        Ok(Err(failure)) => failure.into(),
        Err(_) => GenerationResult::failure(
            FailureKind::Timeout,
            format!("No response within {}ms", timeout.as_millis()),
        ),
    }
}
