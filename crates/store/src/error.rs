//! Error type for remote store calls.

/// Failure of a remote call. Never retried: callers convert these into
/// a single user-visible notification at the component boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying HTTP request failed (network, DNS, timeout) or
    /// the response body could not be decoded.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform returned a non-2xx status. The message is the
    /// server-provided text, verbatim, so login failures can surface it
    /// to the user unchanged.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Unexpected(String),

    /// A required environment variable is not set.
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
}

/// Convert a non-2xx response into [`StoreError::Api`], extracting the
/// server's own message where one exists.
pub(crate) async fn error_from_response(response: reqwest::Response) -> StoreError {
    let status = response.status().as_u16();
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let message = remote_message(&body, status);
    tracing::warn!(status, url = %url, message = %message, "remote call failed");
    StoreError::Api { status, message }
}

/// Pull a human-readable message out of a platform error body.
///
/// The REST, auth, and storage endpoints disagree on the field name,
/// so several are tried before falling back to the raw body.
fn remote_message(body: &str, status: u16) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Request failed with status {status}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_auth_style_message() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        // The descriptive field wins over the bare error code.
        assert_eq!(remote_message(body, 400), "Invalid login credentials");
    }

    #[test]
    fn extracts_rest_style_message() {
        let body = r#"{"message":"permission denied for table projects","code":"42501"}"#;
        assert_eq!(
            remote_message(body, 403),
            "permission denied for table projects"
        );
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(remote_message("gateway timeout", 504), "gateway timeout");
    }

    #[test]
    fn falls_back_to_status_for_empty_body() {
        assert_eq!(remote_message("", 500), "Request failed with status 500");
    }
}
