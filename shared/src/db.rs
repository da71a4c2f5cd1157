//! Database access for push subscriptions.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use uuid::Uuid;

use crate::models::{StoredSubscription, WebPushSubscription};
use crate::Result;

/// Create a database connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Insert or replace the caller's subscription. The `user_id` primary key
/// keeps at most one row per user: subscribing again overwrites the previous
/// payload.
pub async fn upsert_subscription(
    pool: &PgPool,
    user_id: Uuid,
    subscription: &WebPushSubscription,
    user_agent: Option<&str>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO push_subscriptions (user_id, endpoint, p256dh, auth, user_agent, updated_at)
        VALUES ($1, $2, $3, $4, $5, NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            endpoint = EXCLUDED.endpoint,
            p256dh = EXCLUDED.p256dh,
            auth = EXCLUDED.auth,
            user_agent = EXCLUDED.user_agent,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(&subscription.endpoint)
    .bind(&subscription.keys.p256dh)
    .bind(&subscription.keys.auth)
    .bind(user_agent)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the stored subscription for a user, if any.
pub async fn get_subscription(pool: &PgPool, user_id: Uuid) -> Result<Option<StoredSubscription>> {
    let subscription: Option<StoredSubscription> = sqlx::query_as(
        r#"
        SELECT user_id, endpoint, p256dh, auth, user_agent
        FROM push_subscriptions
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(subscription)
}
