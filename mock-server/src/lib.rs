//! In-process stand-in for the push notifications service.
//!
//! Serves the publish and user-deletion endpoints with the same bearer-key
//! check and target limits as the real service, and records what it
//! received so tests can inspect the wire format.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const MAX_INTERESTS: usize = 100;
const MAX_USERS: usize = 1000;

/// A publish as received on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedPublish {
    pub instance_id: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    pub publish_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub description: String,
}

#[derive(Clone, Default)]
pub struct Recorder {
    pub publishes: Arc<RwLock<Vec<RecordedPublish>>>,
    pub deleted_users: Arc<RwLock<Vec<String>>>,
}

#[derive(Clone)]
struct AppState {
    secret_key: Arc<str>,
    recorder: Recorder,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

pub fn app(secret_key: &str) -> Router {
    app_with_recorder(secret_key, Recorder::default())
}

pub fn app_with_recorder(secret_key: &str, recorder: Recorder) -> Router {
    let state = AppState {
        secret_key: Arc::from(secret_key),
        recorder,
    };
    Router::new()
        .route(
            "/publish_api/v1/instances/{instance_id}/publishes/{target}",
            post(publish),
        )
        .route(
            "/user_api/v1/instances/{instance_id}/users/{user_id}",
            delete(delete_user),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, secret_key: &str, recorder: Recorder) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_recorder(secret_key, recorder)).await
}

fn error(status: StatusCode, kind: &str, description: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: kind.to_string(),
            description: description.into(),
        }),
    )
}

fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let expected = format!("Bearer {}", state.secret_key);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Incorrect API Key",
        )),
    }
}

async fn publish(
    State(state): State<AppState>,
    Path((instance_id, target)): Path<(String, String)>,
    headers: HeaderMap,
    body: String,
) -> ApiResult<Json<Value>> {
    authorize(&state, &headers)?;

    let max = match target.as_str() {
        "interests" => MAX_INTERESTS,
        "users" => MAX_USERS,
        _ => return Err(error(StatusCode::NOT_FOUND, "Not Found", "Unknown publish target")),
    };
    let payload: Map<String, Value> = serde_json::from_str(&body).map_err(|e| {
        error(StatusCode::BAD_REQUEST, "Bad Request", format!("Invalid JSON body: {e}"))
    })?;
    let count = payload
        .get(&target)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    if count == 0 || count > max {
        return Err(error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Unprocessable Entity",
            format!("Expected between 1 and {max} {target}, got {count}"),
        ));
    }

    let publish_id = format!("pubid-{}", Uuid::new_v4());
    tracing::info!(%instance_id, %target, count, %publish_id, "publish accepted");
    state.recorder.publishes.write().await.push(RecordedPublish {
        instance_id,
        target,
        headers: headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect(),
        body: Value::Object(payload),
        publish_id: publish_id.clone(),
    });
    Ok(Json(serde_json::json!({ "publishId": publish_id })))
}

async fn delete_user(
    State(state): State<AppState>,
    Path((instance_id, user_id)): Path<(String, String)>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    authorize(&state, &headers)?;
    tracing::info!(%instance_id, %user_id, "user deleted");
    state.recorder.deleted_users.write().await.push(user_id);
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_serializes_envelope() {
        let body = ErrorBody {
            error: "Unauthorized".to_string(),
            description: "Incorrect API Key".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "Unauthorized");
        assert_eq!(json["description"], "Incorrect API Key");
    }

    #[test]
    fn authorize_requires_matching_bearer_key() {
        let state = AppState {
            secret_key: Arc::from("secret"),
            recorder: Recorder::default(),
        };
        let mut headers = HeaderMap::new();
        assert!(authorize(&state, &headers).is_err());
        headers.insert("authorization", "Bearer wrong".parse().unwrap());
        assert!(authorize(&state, &headers).is_err());
        headers.insert("authorization", "Bearer secret".parse().unwrap());
        assert!(authorize(&state, &headers).is_ok());
    }
}
