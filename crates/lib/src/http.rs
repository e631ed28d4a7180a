//! Shared utilities for the Coder and Gerrit REST clients.
//!
//! Both clients talk JSON over reqwest against a configured base URL; the
//! URL joining, client construction and error-body handling live here so the
//! two stay consistent.

use std::time::Duration;

use url::Url;

use crate::constants::ERROR_BODY_LIMIT;

/// Build the URL for `segments` below `base`.
///
/// Segments are percent-encoded individually, so ids taken from API payloads
/// cannot escape their path position. A trailing empty segment produces a
/// trailing slash (`accounts/`).
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, String> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| format!("{base} cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Build the shared reqwest client with the configured request timeout.
pub(crate) fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("coder-gerrit-sync/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Read an error response body, keeping at most [`ERROR_BODY_LIMIT`] bytes.
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    truncate(body.trim())
}

fn truncate(body: &str) -> String {
    if body.len() <= ERROR_BODY_LIMIT {
        return body.to_string();
    }
    let mut end = ERROR_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
