//! Subscribe function - stores a browser push subscription for the caller.
//!
//! Endpoint:
//! - POST /subscribe - body `{ subscription: { endpoint, keys: { p256dh, auth } }, userAgent }`
//!
//! Requires an `Authorization` bearer token; the subscription row is keyed
//! by the user id the identity provider resolves from it, so subscribing
//! again replaces the previous payload.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::auth::{authorization_header, resolve_user};
use shared::http::{error_response, json_response, preflight_response};
use shared::models::{SubscribeRequest, SuccessResponse};
use shared::parse_body;
use shared::{db, Config};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct AppState {
    config: Config,
    db_pool: PgPool,
    http_client: reqwest::Client,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env()?;
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL not set")?;
        let db_pool = db::create_pool(&database_url).await?;

        Ok(Self {
            config,
            db_pool,
            http_client: reqwest::Client::new(),
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    if event.method() == Method::OPTIONS {
        return preflight_response();
    }

    let request: SubscribeRequest = parse_body!(event.body());

    // The header check runs before any outbound call.
    let authorization = match authorization_header(&event) {
        Ok(header) => header.to_string(),
        Err(e) => return error_response(e.to_string()),
    };

    let user = match resolve_user(&state.http_client, &state.config, &authorization).await {
        Ok(user) => user,
        Err(e) => {
            warn!("subscribe rejected: {}", e);
            return error_response(e.to_string());
        }
    };

    if let Err(e) = db::upsert_subscription(
        &state.db_pool,
        user.id,
        &request.subscription,
        request.user_agent.as_deref(),
    )
    .await
    {
        warn!(user_id = %user.id, error = %e, "failed to store subscription");
        return error_response(e.to_string());
    }

    info!(
        user_id = %user.id,
        endpoint = %request.subscription.endpoint,
        "stored push subscription"
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
