//! HTTP helpers for the function binaries.
//!
//! Every response, including errors and the OPTIONS preflight, carries the
//! permissive CORS headers the web app relies on. Error responses use the
//! same 200 status as success responses; the body shape is the only
//! discriminator.

use lambda_http::{Body, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::ErrorResponse;

const CORS_HEADERS: [(&str, &str); 4] = [
    ("access-control-allow-origin", "*"),
    (
        "access-control-allow-headers",
        "authorization, x-client-info, apikey, content-type",
    ),
    ("access-control-allow-methods", "POST, OPTIONS"),
    ("access-control-max-age", "86400"),
];

/// CORS preflight response. The body is never processed for OPTIONS.
pub fn preflight_response() -> Result<Response<Body>, lambda_http::Error> {
    let mut builder = Response::builder().status(200);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    Ok(builder
        .body(Body::from("ok"))
        .expect("Failed to build response"))
}

/// Create a JSON response with CORS headers.
pub fn json_response<T: Serialize>(data: &T) -> Result<Response<Body>, lambda_http::Error> {
    let mut builder = Response::builder()
        .status(200)
        .header("content-type", "application/json");
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    Ok(builder
        .body(Body::from(serde_json::to_string(data)?))
        .expect("Failed to build response"))
}

/// Create the flat error response with the given message.
pub fn error_response(message: impl Into<String>) -> Result<Response<Body>, lambda_http::Error> {
    json_response(&ErrorResponse {
        error: message.into(),
    })
}

/// Parse request body as JSON, returning the flat error response on failure.
///
/// Returns `Ok(Ok(T))` on successful parse, `Ok(Err(Response))` on parse
/// error, or `Err(lambda_http::Error)` on serialization failure.
pub fn parse_json_body<T: DeserializeOwned>(
    body: &Body,
) -> Result<Result<T, Response<Body>>, lambda_http::Error> {
    match serde_json::from_slice(body.as_ref()) {
        Ok(parsed) => Ok(Ok(parsed)),
        Err(e) => {
            let response = error_response(format!("Invalid request body: {}", e))?;
            Ok(Err(response))
        }
    }
}

/// Macro to parse request body, returning early with the error response on
/// parse failure.
///
/// Usage:
/// ```ignore
/// let request: MyRequest = parse_body!(event.body());
/// ```
#[macro_export]
macro_rules! parse_body {
    ($body:expr) => {
        match shared::http::parse_json_body($body)? {
            Ok(parsed) => parsed,
            Err(response) => return Ok(response),
        }
    };
}
