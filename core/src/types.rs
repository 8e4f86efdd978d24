//! Payload and result types exchanged with the push notifications service.
//!
//! # Design
//! The notification payload is deliberately opaque: the service accepts
//! platform blocks (`apns`, `fcm`, `web`) whose schemas evolve independently
//! of this crate, so `PublishRequest` wraps a JSON object and only the
//! top-level shape is checked. The target list is merged into a copy at
//! request-build time; the caller's request is never modified.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ArgumentError;

/// Which audience a publish is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Interests,
    Users,
}

impl TargetKind {
    /// Body field and path segment naming the target list.
    pub fn field(self) -> &'static str {
        match self {
            TargetKind::Interests => "interests",
            TargetKind::Users => "users",
        }
    }

    /// Maximum number of targets a single publish may address.
    pub fn max_targets(self) -> usize {
        match self {
            TargetKind::Interests => crate::validate::INTERESTS_MAX_COUNT,
            TargetKind::Users => crate::validate::USERS_MAX_COUNT,
        }
    }

    pub(crate) fn element(self) -> &'static str {
        match self {
            TargetKind::Interests => "interest",
            TargetKind::Users => "user id",
        }
    }

    pub(crate) fn count_noun(self) -> &'static str {
        match self {
            TargetKind::Interests => "interests",
            TargetKind::Users => "user ids",
        }
    }
}

/// Notification payload for a publish: platform blocks plus an optional
/// webhook URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublishRequest(Map<String, Value>);

impl PublishRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a dynamically typed payload. `null` counts as absent.
    pub fn from_value(value: Value) -> Result<Self, ArgumentError> {
        match value {
            Value::Null => Err(ArgumentError::Required("publishRequest")),
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ArgumentError::NotAnObject("publishRequest")),
        }
    }

    /// Set a top-level platform block such as `apns` or `fcm`.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// URL the service calls back at key points of the publish lifecycle.
    pub fn webhook_url(self, url: impl Into<String>) -> Self {
        self.with("webhookUrl", Value::String(url.into()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Copy of the payload with the target list set under `kind.field()`.
    /// A target list already present in the payload is replaced.
    pub(crate) fn with_targets<S: AsRef<str>>(
        &self,
        kind: TargetKind,
        targets: &[S],
    ) -> Map<String, Value> {
        let mut body = self.0.clone();
        let targets = targets
            .iter()
            .map(|t| Value::String(t.as_ref().to_owned()))
            .collect();
        body.insert(kind.field().to_owned(), Value::Array(targets));
        body
    }
}

impl TryFrom<Value> for PublishRequest {
    type Error = ArgumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Map<String, Value>> for PublishRequest {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A signed token proving a user's identity to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn with_targets_leaves_caller_payload_untouched() {
        let request = PublishRequest::new().with("apns", json!({"aps": {"alert": "Hi!"}}));
        let body = request.with_targets(TargetKind::Interests, &["donuts"]);
        assert_eq!(body["interests"], json!(["donuts"]));
        assert!(request.as_map().get("interests").is_none());
    }

    #[test]
    fn with_targets_replaces_existing_target_field() {
        let request = PublishRequest::new().with("users", json!(["stale"]));
        let body = request.with_targets(TargetKind::Users, &["fresh"]);
        assert_eq!(body["users"], json!(["fresh"]));
    }

    #[test]
    fn from_value_rejects_null_and_non_objects() {
        assert_eq!(
            PublishRequest::from_value(Value::Null).unwrap_err(),
            ArgumentError::Required("publishRequest")
        );
        assert_eq!(
            PublishRequest::from_value(json!(["apns"])).unwrap_err(),
            ArgumentError::NotAnObject("publishRequest")
        );
        assert!(PublishRequest::try_from(json!({})).is_ok());
    }

    #[test]
    fn webhook_url_is_camel_cased() {
        let request = PublishRequest::new().webhook_url("https://example.com/hook");
        assert_eq!(request.as_map()["webhookUrl"], "https://example.com/hook");
    }
}
