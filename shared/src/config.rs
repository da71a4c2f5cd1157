//! Configuration management for the push functions.

use std::env;

use crate::{Error, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity-provider base URL (Supabase project URL)
    pub supabase_url: String,
    /// Project api key forwarded on the user lookup
    pub supabase_anon_key: String,
    /// VAPID public key, base64url without padding
    pub vapid_public_key: String,
    /// VAPID private key, base64url without padding
    pub vapid_private_key: String,
    /// VAPID subject claim (mailto: or https: URI)
    pub vapid_subject: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            vapid_public_key: required("VAPID_PUBLIC_KEY")?,
            vapid_private_key: required("VAPID_PRIVATE_KEY")?,
            vapid_subject: env::var("VAPID_SUBJECT")
                .unwrap_or_else(|_| "mailto:your-email@example.com".to_string()),
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("{} not set", name)))
}
