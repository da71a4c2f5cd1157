//! Wire types shared by the push functions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key material from the browser's `PushSubscription.toJSON()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// A browser push subscription as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebPushSubscription {
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

/// Stored subscription row; one per user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredSubscription {
    pub user_id: Uuid,
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
    pub user_agent: Option<String>,
}

impl StoredSubscription {
    /// Reassemble the browser-shaped subscription for delivery.
    pub fn to_web_push(&self) -> WebPushSubscription {
        WebPushSubscription {
            endpoint: self.endpoint.clone(),
            keys: SubscriptionKeys {
                p256dh: self.p256dh.clone(),
                auth: self.auth.clone(),
            },
        }
    }
}

/// Subscribe request payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub subscription: WebPushSubscription,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Send-notification request payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Send-test-notification request payload.
#[derive(Debug, Deserialize)]
pub struct TestNotifyRequest {
    pub subscription: WebPushSubscription,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Success response body: `{ "success": true }`, optionally with a message.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}

/// Error response body: `{ "error": <message> }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_subscribe_request_wire_format() {
        let request: SubscribeRequest = serde_json::from_value(json!({
            "subscription": {
                "endpoint": "https://fcm.googleapis.com/fcm/send/abc",
                "keys": { "p256dh": "pkey", "auth": "asecret" }
            },
            "userAgent": "Mozilla/5.0"
        }))
        .unwrap();

        assert_eq!(
            request.subscription.endpoint,
            "https://fcm.googleapis.com/fcm/send/abc"
        );
        assert_eq!(request.subscription.keys.p256dh, "pkey");
        assert_eq!(request.user_agent.as_deref(), Some("Mozilla/5.0"));
    }

    #[test]
    fn test_subscribe_request_user_agent_optional() {
        let request: SubscribeRequest = serde_json::from_value(json!({
            "subscription": {
                "endpoint": "https://example.com/push",
                "keys": { "p256dh": "p", "auth": "a" }
            }
        }))
        .unwrap();

        assert!(request.user_agent.is_none());
    }

    #[test]
    fn test_notify_request_wire_format() {
        let request: NotifyRequest = serde_json::from_value(json!({
            "userId": "6d7e48f1-3c5b-4a2e-9f10-8a4f2b7c9d01",
            "title": "Scadenza",
            "data": { "practiceId": 7 }
        }))
        .unwrap();

        assert_eq!(
            request.user_id.to_string(),
            "6d7e48f1-3c5b-4a2e-9f10-8a4f2b7c9d01"
        );
        assert_eq!(request.title.as_deref(), Some("Scadenza"));
        assert!(request.body.is_none());
        assert_eq!(request.data, Some(json!({ "practiceId": 7 })));
    }

    #[test]
    fn test_success_response_shape() {
        let body = serde_json::to_value(SuccessResponse::ok()).unwrap();
        assert_eq!(body, json!({ "success": true }));

        let body = serde_json::to_value(SuccessResponse::with_message("Test notification sent"))
            .unwrap();
        assert_eq!(
            body,
            json!({ "success": true, "message": "Test notification sent" })
        );
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse {
            error: "Subscription non trovata".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "error": "Subscription non trovata" }));
    }

    #[test]
    fn test_stored_subscription_round_trip_to_wire_shape() {
        let stored = StoredSubscription {
            user_id: Uuid::new_v4(),
            endpoint: "https://example.com/push/xyz".to_string(),
            p256dh: "p".to_string(),
            auth: "a".to_string(),
            user_agent: None,
        };

        let wire = stored.to_web_push();
        assert_eq!(wire.endpoint, stored.endpoint);
        assert_eq!(wire.keys.p256dh, stored.p256dh);
        assert_eq!(wire.keys.auth, stored.auth);
    }
}
