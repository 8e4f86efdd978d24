//! Stateless HTTP request builder and response parser for the push
//! notifications API.
//!
//! # Design
//! `PushClient` holds only an immutable `ClientConfig` and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that validates arguments and produces an `HttpRequest`, and a
//! `parse_*` method that consumes an `HttpResponse`. Validation happens
//! entirely inside `build_*`, so a rejected call never yields a request.
//!
//! The `*_from_value` builders accept dynamically typed arguments (for
//! example a decoded JSON job) and run the required/type checks that the
//! typed builders get from the compiler.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::response;
use crate::token;
use crate::types::{PublishRequest, TargetKind, Token};
use crate::validate;

/// Value of the library identifier header sent with every request.
pub const LIBRARY_ID: &str = concat!("pusher-push-notifications-rust ", env!("CARGO_PKG_VERSION"));

pub const LIBRARY_HEADER: &str = "x-pusher-library";

// Same unreserved set as JavaScript's `encodeURIComponent`.
const USER_ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone)]
pub struct PushClient {
    config: ClientConfig,
}

impl PushClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_publish_to_interests<S: AsRef<str>>(
        &self,
        interests: &[S],
        request: &PublishRequest,
    ) -> Result<HttpRequest, ApiError> {
        validate::interests(interests)?;
        self.build_publish(TargetKind::Interests, interests, request)
    }

    pub fn build_publish_to_users<S: AsRef<str>>(
        &self,
        users: &[S],
        request: &PublishRequest,
    ) -> Result<HttpRequest, ApiError> {
        validate::users(users)?;
        self.build_publish(TargetKind::Users, users, request)
    }

    pub fn build_delete_user(&self, user_id: &str) -> Result<HttpRequest, ApiError> {
        validate::user_id(user_id, true)?;
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: format!(
                "/user_api/v1/instances/{}/users/{}",
                self.config.instance_id(),
                utf8_percent_encode(user_id, USER_ID_SEGMENT)
            ),
            headers: self.common_headers(),
            body: None,
        })
    }

    /// Publish builder for dynamically typed targets and payload. A missing
    /// payload is rejected after the target list has been validated.
    pub fn build_publish_from_value(
        &self,
        kind: TargetKind,
        targets: Option<&Value>,
        request: Option<Value>,
    ) -> Result<HttpRequest, ApiError> {
        let targets = match kind {
            TargetKind::Interests => validate::interests_value(targets)?,
            TargetKind::Users => validate::users_value(targets)?,
        };
        let request = PublishRequest::from_value(request.unwrap_or(Value::Null))?;
        self.build_publish(kind, &targets, &request)
    }

    pub fn build_delete_user_from_value(
        &self,
        user_id: Option<&Value>,
    ) -> Result<HttpRequest, ApiError> {
        let user_id = validate::user_id_value(user_id, true)?;
        self.build_delete_user(&user_id)
    }

    /// Parse a publish acknowledgement, normally `{"publishId": ..}`.
    /// An empty 2xx body gives `None`.
    pub fn parse_publish(&self, response: HttpResponse) -> Result<Option<Value>, ApiError> {
        response::normalize(response)
    }

    /// Parse a delete acknowledgement. The service normally replies with an
    /// empty body, giving `None`.
    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<Option<Value>, ApiError> {
        response::normalize(response)
    }

    pub fn generate_token(&self, user_id: &str) -> Result<Token, ApiError> {
        token::issue_token(&self.config, user_id)
    }

    pub fn generate_token_from_value(&self, user_id: Option<&Value>) -> Result<Token, ApiError> {
        let user_id = validate::user_id_value(user_id, false)?;
        self.generate_token(&user_id)
    }

    fn build_publish<S: AsRef<str>>(
        &self,
        kind: TargetKind,
        targets: &[S],
        request: &PublishRequest,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&request.with_targets(kind, targets))?;

        let mut headers = self.common_headers();
        headers.push(("content-type".to_string(), "application/json".to_string()));
        headers.push(("content-length".to_string(), body.len().to_string()));

        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!(
                "/publish_api/v1/instances/{}/publishes/{}",
                self.config.instance_id(),
                kind.field()
            ),
            headers,
            body: Some(body),
        })
    }

    fn common_headers(&self) -> Vec<(String, String)> {
        vec![
            ("accept".to_string(), "application/json".to_string()),
            (
                "authorization".to_string(),
                format!("Bearer {}", self.config.secret_key()),
            ),
            (LIBRARY_HEADER.to_string(), LIBRARY_ID.to_string()),
        ]
    }
}
