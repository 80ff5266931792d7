//! Integration test: Server API endpoints

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{example_request, fixture_service, hiit_request, test_app};
use fctms_workout::cli::render_prediction;
use fctms_workout::server::{PREDICT_USAGE_TEXT, WELCOME_TEXT};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn post_predict(body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    (status, bytes.to_vec())
}

async fn post_json(value: &Value) -> (StatusCode, Value) {
    let (status, bytes) = post_predict(serde_json::to_vec(value).unwrap()).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_text(uri: &str) -> (StatusCode, String) {
    let response = test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_home_returns_welcome_text() {
    let (status, text) = get_text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, WELCOME_TEXT);
}

#[tokio::test]
async fn test_get_predict_returns_usage_text() {
    let (status, text) = get_text("/predict").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, PREDICT_USAGE_TEXT);

    let (status, text) = get_text("/predict?Age=25&Gender=male").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, PREDICT_USAGE_TEXT);
}

#[tokio::test]
async fn test_predict_example_request() {
    let (status, json) = post_json(&example_request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "prediction": "Cardio Endurance",
            "top_3_predictions": {
                "Cardio Endurance": 0.5,
                "Muscle Building": 0.267,
                "Fat Burn HIIT": 0.133
            }
        })
    );
}

#[tokio::test]
async fn test_top_predictions_keep_descending_order_on_the_wire() {
    let (_, bytes) = post_predict(serde_json::to_vec(&hiit_request()).unwrap()).await;
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(
        text,
        r#"{"prediction":"Fat Burn HIIT","top_3_predictions":{"Fat Burn HIIT":0.4,"Recovery Yoga":0.3,"Muscle Building":0.167}}"#
    );
}

#[tokio::test]
async fn test_repeated_request_is_byte_identical() {
    let body = serde_json::to_vec(&example_request()).unwrap();
    let (_, first) = post_predict(body.clone()).await;
    let (_, second) = post_predict(body).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_field_returns_error_body() {
    let mut request = example_request();
    request.as_object_mut().unwrap().remove("Age");

    let (status, json) = post_json(&request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"error": "missing field Age"}));
}

#[tokio::test]
async fn test_unknown_category_returns_error_body() {
    let mut request = example_request();
    request["Gender"] = json!("nonbinary");

    let (status, json) = post_json(&request).await;
    assert_eq!(status, StatusCode::OK);
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("nonbinary"), "{}", message);
    assert!(message.contains("Gender"), "{}", message);
    assert!(json.get("prediction").is_none());
}

#[tokio::test]
async fn test_malformed_numeric_returns_error_body() {
    let mut request = example_request();
    request["BMI"] = json!("heavy");

    let (status, json) = post_json(&request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["error"].as_str().unwrap().starts_with("malformed value for field BMI"));
}

#[tokio::test]
async fn test_invalid_json_returns_error_body() {
    let (status, bytes) = post_predict("{not json").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("invalid JSON body"));
}

#[tokio::test]
async fn test_non_object_body_returns_error_body() {
    let (status, json) = post_json(&json!(["Age", 25])).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["error"].as_str().unwrap().starts_with("invalid request body"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, text) = get_text("/api/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["error"], "not found");
}

#[tokio::test]
async fn test_cors_headers_present() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_concurrent_requests_share_state() {
    let app = test_app();
    let body = serde_json::to_vec(&example_request()).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let app = app.clone();
            let body = body.clone();
            tokio::spawn(async move {
                let response = app
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/predict")
                            .body(Body::from(body))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                axum::body::to_bytes(response.into_body(), 1024 * 64).await.unwrap()
            })
        })
        .collect();

    let mut bodies = Vec::new();
    for handle in handles {
        bodies.push(handle.await.unwrap());
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_cli_prediction_output_matches_http_body() {
    let service = fixture_service();
    let mut missing = example_request();
    missing.as_object_mut().unwrap().remove("Age");

    let bodies = vec![
        serde_json::to_string(&example_request()).unwrap(),
        serde_json::to_string(&hiit_request()).unwrap(),
        serde_json::to_string(&missing).unwrap(),
        "{not json".to_string(),
        "[1, 2]".to_string(),
    ];

    for raw in bodies {
        let (_, http) = post_predict(raw.clone()).await;
        let cli = render_prediction(&service, &raw).unwrap();
        assert_eq!(cli, String::from_utf8(http).unwrap(), "body: {}", raw);
    }
}
