//! Shared library for the LexAgenda push-notification functions.
//!
//! This crate provides the configuration, auth lookup, database access,
//! web-push delivery and HTTP helpers used by every function binary.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod push;

pub use auth::{authorization_header, resolve_user, AuthenticatedUser};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{
    ErrorResponse, NotifyRequest, StoredSubscription, SubscribeRequest, SubscriptionKeys,
    SuccessResponse, TestNotifyRequest, WebPushSubscription,
};
pub use push::{NotificationPayload, PushSender};
