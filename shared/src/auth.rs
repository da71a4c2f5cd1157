//! Caller identity resolution against the Supabase auth endpoint.

use lambda_http::Request;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::{Config, Error, Result};

/// The caller as resolved by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Extract the `Authorization` header value.
///
/// This check runs before any outbound call: a request without the header
/// must never reach storage or the identity provider.
pub fn authorization_header(event: &Request) -> Result<&str> {
    event
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .ok_or(Error::MissingAuthorization)
}

/// Resolve the caller by forwarding their bearer token to the identity
/// provider's user endpoint. Any failure (network, non-success status,
/// unexpected body) collapses to `Unauthenticated`.
pub async fn resolve_user(
    client: &Client,
    config: &Config,
    authorization: &str,
) -> Result<AuthenticatedUser> {
    let response = client
        .get(format!("{}/auth/v1/user", config.supabase_url))
        .header("Authorization", authorization)
        .header("apikey", &config.supabase_anon_key)
        .send()
        .await
        .map_err(|e| {
            warn!(error = %e, "user lookup request failed");
            Error::Unauthenticated
        })?;

    if !response.status().is_success() {
        warn!(status = %response.status(), "user lookup rejected");
        return Err(Error::Unauthenticated);
    }

    response.json::<AuthenticatedUser>().await.map_err(|e| {
        warn!(error = %e, "user lookup returned an unexpected body");
        Error::Unauthenticated
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::Body;

    fn request_with_headers(headers: &[(&str, &str)]) -> Request {
        let mut builder = lambda_http::http::Request::builder().method("POST").uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::Empty).unwrap()
    }

    #[test]
    fn test_missing_authorization_header() {
        let event = request_with_headers(&[("content-type", "application/json")]);
        let err = authorization_header(&event).unwrap_err();
        assert!(matches!(err, Error::MissingAuthorization));
    }

    #[test]
    fn test_authorization_header_extracted() {
        let event = request_with_headers(&[("Authorization", "Bearer abc123")]);
        assert_eq!(authorization_header(&event).unwrap(), "Bearer abc123");
    }
}
