//! Server-side client for the push notifications service.
//!
//! # Overview
//! Publishes notifications to interests or authenticated users, deletes a
//! user's device registrations, and mints the tokens client apps use to
//! authenticate their users.
//!
//! ```no_run
//! use push_notifications::{ClientConfig, PublishRequest, PushNotifications};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), push_notifications::ApiError> {
//! let client = PushNotifications::new(ClientConfig::new("INSTANCE_ID", "SECRET_KEY"));
//! let request = PublishRequest::new().with("apns", json!({"aps": {"alert": "Hi!"}}));
//! let response = client.publish_to_interests(&["donuts"], &request).await?;
//! if let Some(ack) = response {
//!     println!("published {}", ack["publishId"]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! Request building, validation and response classification live in
//! `push-notifications-core`; this crate only adds the async `Transport`
//! boundary and the `PushNotifications` facade over it.

pub mod client;
pub mod transport;

pub use client::PushNotifications;
pub use push_notifications_core::{
    ApiError, ArgumentError, ClientConfig, ConfigError, PublishRequest, Scheme, TargetKind, Token,
};
pub use transport::{ReqwestTransport, Transport};
