//! Web-push delivery signed with the configured VAPID key pair.

use serde::{Deserialize, Serialize};
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushMessageBuilder, URL_SAFE_NO_PAD,
};

use crate::models::WebPushSubscription;
use crate::{Config, Result};

/// Title used when the notify request carries none.
pub const DEFAULT_TITLE: &str = "LexAgenda";
/// Body used when the notify request carries none.
pub const DEFAULT_BODY: &str = "Nuova notifica";
/// Title for the test endpoint.
pub const TEST_TITLE: &str = "Test Notifica LexAgenda";
/// Body for the test endpoint.
pub const TEST_BODY: &str =
    "Questa è una notifica di test per verificare che le push notifications funzionino correttamente!";

const ICON_PATH: &str = "/favicon.png";

/// JSON payload delivered to the service worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub data: serde_json::Value,
}

impl NotificationPayload {
    /// Payload for a user notification; missing fields fall back to the app
    /// defaults and `data` to an empty object.
    pub fn notification(
        title: Option<String>,
        body: Option<String>,
        data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: body.unwrap_or_else(|| DEFAULT_BODY.to_string()),
            icon: ICON_PATH.to_string(),
            badge: ICON_PATH.to_string(),
            data: data.unwrap_or_else(|| serde_json::json!({})),
        }
    }

    /// Fixed payload for the test endpoint; `data` carries a marker the
    /// service worker shows verbatim.
    pub fn test(title: Option<String>, body: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| TEST_TITLE.to_string()),
            body: body.unwrap_or_else(|| TEST_BODY.to_string()),
            icon: ICON_PATH.to_string(),
            badge: ICON_PATH.to_string(),
            data: serde_json::json!({
                "type": "test",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "message": "Test successful",
            }),
        }
    }
}

/// Sends web-push messages. One instance per function binary, created at
/// startup and reused across invocations.
pub struct PushSender {
    client: IsahcWebPushClient,
}

impl PushSender {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: IsahcWebPushClient::new()?,
        })
    }

    /// Encrypt and deliver one payload to one subscription. No retries: a
    /// delivery failure surfaces once at the handler boundary.
    pub async fn send(
        &self,
        config: &Config,
        subscription: &WebPushSubscription,
        payload: &NotificationPayload,
    ) -> Result<()> {
        let subscription_info = SubscriptionInfo::new(
            &subscription.endpoint,
            &subscription.keys.p256dh,
            &subscription.keys.auth,
        );

        let mut sig_builder = VapidSignatureBuilder::from_base64(
            &config.vapid_private_key,
            URL_SAFE_NO_PAD,
            &subscription_info,
        )?;
        sig_builder.add_claim("sub", config.vapid_subject.as_str());
        let signature = sig_builder.build()?;

        let payload_json = serde_json::to_string(payload)?;

        let mut builder = WebPushMessageBuilder::new(&subscription_info);
        builder.set_payload(ContentEncoding::Aes128Gcm, payload_json.as_bytes());
        builder.set_vapid_signature(signature);
        let message = builder.build()?;

        self.client.send(message).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults() {
        let payload = NotificationPayload::notification(None, None, None);
        assert_eq!(payload.title, "LexAgenda");
        assert_eq!(payload.body, "Nuova notifica");
        assert_eq!(payload.data, serde_json::json!({}));
        assert_eq!(payload.icon, "/favicon.png");
        assert_eq!(payload.badge, "/favicon.png");
    }

    #[test]
    fn test_notification_overrides() {
        let payload = NotificationPayload::notification(
            Some("Udienza domani".to_string()),
            Some("Tribunale di Milano, ore 9:30".to_string()),
            Some(serde_json::json!({ "practiceId": 42 })),
        );
        assert_eq!(payload.title, "Udienza domani");
        assert_eq!(payload.body, "Tribunale di Milano, ore 9:30");
        assert_eq!(payload.data["practiceId"], 42);
    }

    #[test]
    fn test_test_payload_defaults() {
        let payload = NotificationPayload::test(None, None);
        assert_eq!(payload.title, "Test Notifica LexAgenda");
        assert!(payload.body.contains("notifica di test"));
        assert_eq!(payload.data["type"], "test");
        assert_eq!(payload.data["message"], "Test successful");
        assert!(payload.data["timestamp"].is_string());
    }

    #[test]
    fn test_payload_serializes_flat() {
        let payload = NotificationPayload::notification(None, None, None);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["title"], "LexAgenda");
        assert_eq!(json["body"], "Nuova notifica");
        assert_eq!(json["data"], serde_json::json!({}));
    }
}
