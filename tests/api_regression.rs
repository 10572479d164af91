//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the form flow and the JSON API using `tower::ServiceExt::oneshot()`.
//! No binary spawn, no network port.

use soil_health::api::handlers::predict_json;
use soil_health::api::{create_app, AppState};
use soil_health::config::ServerConfig;
use soil_health::engine::PredictionService;
use soil_health::model::load_optional;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::path::PathBuf;
use tower::ServiceExt;

const REFERENCE_JSON: &str = r#"{"N": 50, "P": 20, "K": 30, "pH": 6.5, "EC": 0.5, "OC": 1,
    "S": 5, "Zn": 1, "Fe": 5, "Cu": 0.5, "Mn": 2, "B": 0.5}"#;

const REFERENCE_FORM: &str = "N=50&P=20&K=30&pH=6.5&EC=0.5&OC=1&S=5&Zn=1&Fe=5&Cu=0.5&Mn=2&B=0.5";

fn fallback_app() -> Router {
    create_app(
        AppState::new(PredictionService::from_forest(None)),
        &ServerConfig::default(),
    )
}

fn model_app() -> Router {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reference_forest.json");
    let forest = load_optional(&path, true).expect("reference forest loads");
    create_app(
        AppState::new(PredictionService::from_forest(forest)),
        &ServerConfig::default(),
    )
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).expect("response is JSON")
}

#[tokio::test]
async fn test_health_reports_model_state() {
    let (status, body) = send(fallback_app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    let v = json(&body);
    assert_eq!(v["status"], "online");
    assert_eq!(v["message"], "Soil API is reachable");
    assert_eq!(v["model_loaded"], false);

    let (_, body) = send(model_app(), get("/api/health")).await;
    assert_eq!(json(&body)["model_loaded"], true);
}

#[tokio::test]
async fn test_api_predict_success_shape() {
    let (status, body) = send(model_app(), post_json("/api/predict", REFERENCE_JSON)).await;
    assert_eq!(status, StatusCode::OK);

    let v = json(&body);
    assert_eq!(v["success"], true);
    assert_eq!(v["prediction"], 1);
    assert_eq!(v["fertility_class"], "Fertile");
    assert_eq!(v["confidence_score"], 0.85);
    assert_eq!(v["recommendation"]["title"], "Soil Maintenance Plan for Fertile Soil");
    assert_eq!(v["recommendation"]["actions"].as_array().map(Vec::len), Some(8));
    assert_eq!(v["input_data"]["pH"], 6.5);
    assert_eq!(v["input_data"]["K"], 30.0);

    let ts = v["timestamp"].as_str().expect("timestamp string");
    assert_eq!(ts.len(), "2024-01-01 00:00:00".len());
}

#[tokio::test]
async fn test_api_predict_fallback_confidence() {
    let (_, body) = send(fallback_app(), post_json("/api/predict", REFERENCE_JSON)).await;
    let v = json(&body);
    assert_eq!(v["success"], true);
    assert_eq!(v["prediction"], 1);
    assert_eq!(v["confidence_score"], 0.7);
}

#[tokio::test]
async fn test_api_predict_accepts_string_values() {
    let body = REFERENCE_JSON.replace("\"pH\": 6.5", "\"pH\": \" 6.5 \"");
    let (_, body) = send(fallback_app(), post_json("/api/predict", &body)).await;
    assert_eq!(json(&body)["success"], true);
}

#[tokio::test]
async fn test_api_predict_out_of_range() {
    let body = REFERENCE_JSON.replace("\"pH\": 6.5", "\"pH\": 20");
    let (status, body) = send(model_app(), post_json("/api/predict", &body)).await;
    assert_eq!(status, StatusCode::OK);

    let v = json(&body);
    assert_eq!(v["success"], false);
    assert_eq!(v["code"], "OUT_OF_RANGE");
    let msg = v["error"].as_str().unwrap();
    assert!(msg.contains("between 0.5 and 14"), "{msg}");
}

#[tokio::test]
async fn test_api_predict_missing_field() {
    let body = REFERENCE_JSON.replace("\"K\": 30, ", "");
    let (_, body) = send(model_app(), post_json("/api/predict", &body)).await;

    let v = json(&body);
    assert_eq!(v["success"], false);
    assert_eq!(v["code"], "MISSING_FIELD");
    assert_eq!(
        v["error"],
        "Missing value for Potassium (K). Please fill in all required fields."
    );
}

#[tokio::test]
async fn test_api_predict_invalid_value() {
    let body = REFERENCE_JSON.replace("\"Zn\": 1", "\"Zn\": \"abc\"");
    let (_, body) = send(model_app(), post_json("/api/predict", &body)).await;

    let v = json(&body);
    assert_eq!(v["code"], "INVALID_VALUE");
    assert_eq!(v["error"], "Invalid value for Zinc (Zn): abc");
}

#[tokio::test]
async fn test_api_predict_without_data() {
    for body in ["", "{}", "[]", "not json"] {
        let (status, bytes) = send(fallback_app(), post_json("/api/predict", body)).await;
        assert_eq!(status, StatusCode::OK, "body {body:?}");
        let v = json(&bytes);
        assert_eq!(v["success"], false);
        assert_eq!(v["error"], "No JSON data provided");
    }
}

#[tokio::test]
async fn test_api_predict_matches_cli_envelope() {
    let service = PredictionService::from_forest(None);
    let bodies = [
        REFERENCE_JSON.to_string(),
        REFERENCE_JSON.replace("\"pH\": 6.5", "\"pH\": 20"),
        REFERENCE_JSON.replace("\"Zn\": 1", "\"Zn\": \"abc\""),
        "not json".to_string(),
    ];

    for body in bodies {
        let (_, bytes) = send(fallback_app(), post_json("/api/predict", &body)).await;
        let mut served = json(&bytes);
        let mut direct = predict_json(&service, body.as_bytes()).expect("envelope");
        for v in [&mut served, &mut direct] {
            if let Some(obj) = v.as_object_mut() {
                obj.remove("timestamp");
            }
        }
        assert_eq!(served, direct, "body {body}");
    }
}

#[tokio::test]
async fn test_api_predict_body_limit() {
    let huge = format!("{{\"pad\": \"{}\"}}", "x".repeat(64 * 1024));
    let (status, _) = send(fallback_app(), post_json("/api/predict", &huge)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_index_page_lists_all_fields() {
    let (status, body) = send(fallback_app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    for id in ["N", "P", "K", "pH", "EC", "OC", "S", "Zn", "Fe", "Cu", "Mn", "B"] {
        assert!(html.contains(&format!("name=\"{id}\"")), "missing field {id}");
    }
}

#[tokio::test]
async fn test_form_predict_renders_result() {
    let (status, body) = send(model_app(), post_form(REFERENCE_FORM)).await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Soil Maintenance Plan for Fertile Soil"));
    assert!(html.contains("Confidence 85%"));
}

#[tokio::test]
async fn test_form_predict_validation_error_page() {
    let form = REFERENCE_FORM.replace("pH=6.5", "pH=20");
    let (status, body) = send(model_app(), post_form(&form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("between 0.5 and 14"));
}

#[tokio::test]
async fn test_form_predict_missing_field_page() {
    let form = REFERENCE_FORM.replace("K=30&", "");
    let (status, body) = send(fallback_app(), post_form(&form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(String::from_utf8(body).unwrap().contains("Potassium (K)"));
}

#[tokio::test]
async fn test_form_predict_non_form_body_renders_error_page() {
    let (status, body) = send(fallback_app(), post_json("/predict", REFERENCE_JSON)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let html = String::from_utf8(body).unwrap();
    assert!(
        html.contains("Missing value for Nitrogen (N). Please fill in all required fields."),
        "{html}"
    );
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let resp = fallback_app().oneshot(get("/static/main.js")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
    assert!(ct.contains("javascript"), "{ct}");

    let resp = fallback_app().oneshot(get("/static/style.css")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, _) = send(fallback_app(), get("/static/missing.js")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_html_404() {
    let (status, body) = send(fallback_app(), get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(String::from_utf8(body).unwrap().contains("Page not found"));
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let req = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://192.168.1.20:8081")
        .body(Body::empty())
        .unwrap();
    let resp = fallback_app().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
