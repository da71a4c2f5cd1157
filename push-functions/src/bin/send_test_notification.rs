//! Send-test-notification function - delivers a fixed test payload to a
//! subscription supplied in the request body.
//!
//! Endpoint:
//! - POST /send-test-notification - body `{ subscription, title?, body? }`
//!
//! The caller must present a valid bearer token, but the resolved identity
//! is only verified: delivery always targets the body-supplied subscription
//! and storage is never queried.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::auth::{authorization_header, resolve_user};
use shared::http::{error_response, json_response, preflight_response};
use shared::models::{SuccessResponse, TestNotifyRequest};
use shared::parse_body;
use shared::push::{NotificationPayload, PushSender};
use shared::Config;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct AppState {
    config: Config,
    http_client: reqwest::Client,
    sender: PushSender,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let sender = PushSender::new()?;

        Ok(Self {
            config,
            http_client: reqwest::Client::new(),
            sender,
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    if event.method() == Method::OPTIONS {
        return preflight_response();
    }

    let request: TestNotifyRequest = parse_body!(event.body());

    let authorization = match authorization_header(&event) {
        Ok(header) => header.to_string(),
        Err(e) => return error_response(e.to_string()),
    };

    let user = match resolve_user(&state.http_client, &state.config, &authorization).await {
        Ok(user) => user,
        Err(e) => {
            warn!("test notification rejected: {}", e);
            return error_response(e.to_string());
        }
    };

    let payload = NotificationPayload::test(request.title, request.body);

    info!(
        user_id = %user.id,
        endpoint = %request.subscription.endpoint,
        vapid_public_set = !state.config.vapid_public_key.is_empty(),
        "sending test notification"
    );

    if let Err(e) = state
        .sender
        .send(&state.config, &request.subscription, &payload)
        .await
    {
        warn!(endpoint = %request.subscription.endpoint, error = %e, "test delivery failed");
        return error_response(e.to_string());
    }

    json_response(&SuccessResponse::with_message("Test notification sent"))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
