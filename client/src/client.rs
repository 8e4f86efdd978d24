//! Asynchronous client for publishing notifications and managing users.
//!
//! Every network operation is one linear pipeline:
//! validate, build, send, normalize. Arguments are validated by
//! `PushClient::build_*` before the transport is touched, and nothing is
//! retried. The client holds no mutable state, so concurrent calls on one
//! instance are independent.

use push_notifications_core::{
    ApiError, ClientConfig, HttpRequest, HttpResponse, PublishRequest, PushClient, TargetKind, Token,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::transport::{ReqwestTransport, Transport};

#[derive(Debug, Clone)]
pub struct PushNotifications<T = ReqwestTransport> {
    core: PushClient,
    transport: T,
}

impl PushNotifications<ReqwestTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T: Transport> PushNotifications<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            core: PushClient::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.core.config()
    }

    /// Publish to devices subscribed to any of 1 to 100 `interests`.
    ///
    /// Resolves to the service's acknowledgement, normally
    /// `{"publishId": ..}`, or `None` if the reply had no body.
    pub async fn publish_to_interests<S: AsRef<str>>(
        &self,
        interests: &[S],
        request: &PublishRequest,
    ) -> Result<Option<Value>, ApiError> {
        let req = self.core.build_publish_to_interests(interests, request)?;
        let response = self.execute(req).await?;
        self.core.parse_publish(response)
    }

    /// Former name of `publish_to_interests`.
    #[deprecated(note = "use `publish_to_interests` instead")]
    pub async fn publish<S: AsRef<str>>(
        &self,
        interests: &[S],
        request: &PublishRequest,
    ) -> Result<Option<Value>, ApiError> {
        warn!("`publish` is deprecated, use `publish_to_interests` instead");
        self.publish_to_interests(interests, request).await
    }

    /// Publish to the devices of 1 to 1000 authenticated `users`.
    pub async fn publish_to_users<S: AsRef<str>>(
        &self,
        users: &[S],
        request: &PublishRequest,
    ) -> Result<Option<Value>, ApiError> {
        let req = self.core.build_publish_to_users(users, request)?;
        let response = self.execute(req).await?;
        self.core.parse_publish(response)
    }

    /// Publish with dynamically typed targets and payload, for callers that
    /// forward decoded JSON.
    pub async fn publish_from_value(
        &self,
        kind: TargetKind,
        targets: Option<&Value>,
        request: Option<Value>,
    ) -> Result<Option<Value>, ApiError> {
        let req = self.core.build_publish_from_value(kind, targets, request)?;
        let response = self.execute(req).await?;
        self.core.parse_publish(response)
    }

    /// Remove every device registered to `user_id`.
    ///
    /// Resolves to `None` when the service answers with an empty body.
    pub async fn delete_user(&self, user_id: &str) -> Result<Option<Value>, ApiError> {
        let req = self.core.build_delete_user(user_id)?;
        let response = self.execute(req).await?;
        self.core.parse_delete_user(response)
    }

    pub async fn delete_user_from_value(
        &self,
        user_id: Option<&Value>,
    ) -> Result<Option<Value>, ApiError> {
        let req = self.core.build_delete_user_from_value(user_id)?;
        let response = self.execute(req).await?;
        self.core.parse_delete_user(response)
    }

    pub fn generate_token_from_value(&self, user_id: Option<&Value>) -> Result<Token, ApiError> {
        self.core.generate_token_from_value(user_id)
    }

    /// Mint a 24 hour token for `user_id`. Local and synchronous.
    pub fn generate_token(&self, user_id: &str) -> Result<Token, ApiError> {
        self.core.generate_token(user_id)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self
            .transport
            .send(self.core.config(), request)
            .await
            .map_err(|e| {
                debug!(error = %e, "transport failed");
                ApiError::Transport(e)
            })?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
