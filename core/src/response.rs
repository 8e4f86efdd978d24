//! Response normalization shared by every operation.
//!
//! Classifies a raw `HttpResponse` the same way regardless of which host
//! executed the request:
//! - empty body: `Ok(None)` on 2xx, otherwise `MalformedResponse`
//! - body that is not JSON: `MalformedResponse` at any status
//! - JSON on 2xx: `Ok(Some(value))`
//! - JSON otherwise: `Service` if it carries string `error` and
//!   `description` fields, else `MalformedResponse`

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

pub fn normalize(response: HttpResponse) -> Result<Option<Value>, ApiError> {
    if response.body.is_empty() {
        if response.is_success() {
            return Ok(None);
        }
        return Err(ApiError::MalformedResponse);
    }

    let value: Value =
        serde_json::from_str(&response.body).map_err(|_| ApiError::MalformedResponse)?;
    if response.is_success() {
        return Ok(Some(value));
    }

    let envelope = value.as_object().ok_or(ApiError::MalformedResponse)?;
    let field = |name: &str| {
        envelope
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(ApiError::MalformedResponse)
    };
    Err(ApiError::Service {
        status: response.status,
        error: field("error")?,
        description: field("description")?,
    })
}
