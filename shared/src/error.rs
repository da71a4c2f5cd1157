//! Error types for the LexAgenda push functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the push functions.
///
/// Every variant is collapsed into the flat `{ "error": <message> }` body at
/// the handler boundary; the message text is the only discriminator the
/// client sees. The first three variants carry the exact texts the web app
/// matches on.
#[derive(Error, Debug)]
pub enum Error {
    /// No `Authorization` header on a request that requires one
    #[error("Token di autorizzazione mancante")]
    MissingAuthorization,

    /// The identity provider rejected or could not resolve the caller
    #[error("Utente non autenticato")]
    Unauthenticated,

    /// No stored subscription for the requested user
    #[error("Subscription non trovata")]
    SubscriptionNotFound,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Web-push delivery error
    #[error("Push delivery failed: {0}")]
    Push(#[from] web_push::WebPushError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_facing_messages() {
        // The web app matches on these exact strings.
        assert_eq!(
            Error::MissingAuthorization.to_string(),
            "Token di autorizzazione mancante"
        );
        assert_eq!(Error::Unauthenticated.to_string(), "Utente non autenticato");
        assert_eq!(
            Error::SubscriptionNotFound.to_string(),
            "Subscription non trovata"
        );
    }
}
