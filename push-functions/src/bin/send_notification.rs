//! Send-notification function - delivers a push message to a stored
//! subscription.
//!
//! Endpoint:
//! - POST /send-notification - body `{ userId, title?, body?, data? }`
//!
//! Looks up the subscription stored for `userId` and sends a web-push
//! message signed with the configured VAPID keys. Title and body fall back
//! to the app defaults when absent. The caller is not authenticated; the
//! user id is trusted from the body as the deployed system does.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::http::{error_response, json_response, preflight_response};
use shared::models::{NotifyRequest, SuccessResponse};
use shared::parse_body;
use shared::push::{NotificationPayload, PushSender};
use shared::{db, Config, Error as PushError};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct AppState {
    config: Config,
    db_pool: PgPool,
    sender: PushSender,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL not set")?;
        let db_pool = db::create_pool(&database_url).await?;
        let sender = PushSender::new()?;

        Ok(Self {
            config,
            db_pool,
            sender,
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    if event.method() == Method::OPTIONS {
        return preflight_response();
    }

    let request: NotifyRequest = parse_body!(event.body());

    // Without a stored subscription there is nothing to deliver to.
    let subscription = match db::get_subscription(&state.db_pool, request.user_id).await {
        Ok(Some(subscription)) => subscription,
        Ok(None) => {
            warn!(user_id = %request.user_id, "no subscription stored");
            return error_response(PushError::SubscriptionNotFound.to_string());
        }
        Err(e) => {
            warn!(user_id = %request.user_id, error = %e, "subscription lookup failed");
            return error_response(e.to_string());
        }
    };

    let payload = NotificationPayload::notification(request.title, request.body, request.data);

    if let Err(e) = state
        .sender
        .send(&state.config, &subscription.to_web_push(), &payload)
        .await
    {
        warn!(user_id = %request.user_id, error = %e, "push delivery failed");
        return error_response(e.to_string());
    }

    info!(
        user_id = %request.user_id,
        title = %payload.title,
        "push notification sent"
    );

    json_response(&SuccessResponse::ok())
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
