//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected outcomes. Request bodies are compared byte for byte because
//! the body text and its `content-length` are part of the wire contract.

use push_notifications_core::{
    response, validate, ClientConfig, HttpMethod, HttpResponse, PublishRequest, PushClient,
};
use serde_json::Value;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "POST" => HttpMethod::Post,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &Value) -> HttpResponse {
    HttpResponse {
        status: case["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: case["body"].as_str().unwrap().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

#[test]
fn publish_test_vectors() {
    let raw = include_str!("../../test-vectors/publish.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let client = PushClient::new(ClientConfig::new(
        vectors["instance_id"].as_str().unwrap(),
        vectors["secret_key"].as_str().unwrap(),
    ));
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let payload = PublishRequest::from_value(case["payload"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = match case["target"].as_str().unwrap() {
            "interests" => {
                let targets = validate::interests_value(Some(&case["targets"])).unwrap();
                client.build_publish_to_interests(&targets, &payload).unwrap()
            }
            "users" => {
                let targets = validate::users_value(Some(&case["targets"])).unwrap();
                client.build_publish_to_users(&targets, &payload).unwrap()
            }
            other => panic!("{name}: unknown target {other}"),
        };
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, expected_req["path"].as_str().unwrap(), "{name}: path");
        assert_eq!(
            req.body.as_deref(),
            expected_req["body_text"].as_str(),
            "{name}: body"
        );
        assert_eq!(
            req.header("content-length"),
            expected_req["content_length"].as_str(),
            "{name}: content-length"
        );
        assert_eq!(req.header("authorization"), Some("Bearer SECRET_KEY"), "{name}: auth");

        // Verify the caller's payload was not modified
        assert!(payload.as_map().get(case["target"].as_str().unwrap()).is_none(), "{name}: payload");

        // Verify parse
        let parsed = client.parse_publish(simulated(&case["simulated_response"])).unwrap();
        assert_eq!(parsed.as_ref(), Some(&case["expected_result"]), "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn validation_test_vectors() {
    let raw = include_str!("../../test-vectors/validation.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let targets = Some(&case["targets"]);
        let err = match case["target"].as_str().unwrap() {
            "interests" => validate::interests_value(targets).unwrap_err(),
            "users" => validate::users_value(targets).unwrap_err(),
            other => panic!("{name}: unknown target {other}"),
        };
        assert_eq!(err.to_string(), case["expected_error"].as_str().unwrap(), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let outcome = response::normalize(simulated(case));
        let expected = &case["expected"];
        match (outcome, expected.get("ok"), expected.get("err")) {
            (Ok(value), Some(ok), None) => {
                assert_eq!(value.unwrap_or(Value::Null), *ok, "{name}");
            }
            (Err(err), None, Some(message)) => {
                assert_eq!(err.to_string(), message.as_str().unwrap(), "{name}");
            }
            (outcome, _, _) => panic!("{name}: unexpected outcome {outcome:?}"),
        }
    }
}
