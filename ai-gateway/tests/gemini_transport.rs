use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_gateway::{
    config::{gateway_config::GatewayConfig, model_profile::ModelProfile},
    error_handler::TransportError,
    gateway::StudyGateway,
    health_service::HealthService,
    request::{ContentPart, InlineImage, ModelRequest},
    services::gemini_service::GeminiTransport,
    transport::ModelTransport,
    types::{EvaluationRequest, NotesRequest},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};

#[derive(Clone, Copy)]
enum Mode {
    Answer(&'static str),
    Fail(StatusCode),
    NotJson,
    Blocked,
    Slow,
}

#[derive(Default)]
struct Seen {
    call: Option<String>,
    lookups: Vec<String>,
    api_key: Option<String>,
    body: Option<Value>,
}

#[derive(Clone)]
struct FakeState {
    mode: Mode,
    seen: Arc<Mutex<Seen>>,
}

async fn generate(
    State(state): State<FakeState>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    {
        let mut seen = state.seen.lock().unwrap();
        seen.call = Some(call);
        seen.api_key = headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        seen.body = Some(body);
    }

    match state.mode {
        Mode::Answer(text) => Json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4}
        }))
        .into_response(),
        Mode::Fail(status) => (
            status,
            Json(json!({"error": {"code": status.as_u16(), "message": "quota exhausted"}})),
        )
            .into_response(),
        Mode::NotJson => "<html>gateway</html>".into_response(),
        Mode::Blocked => Json(json!({"promptFeedback": {"blockReason": "SAFETY"}})).into_response(),
        Mode::Slow => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({})).into_response()
        }
    }
}

/// `GET /v1beta/models/{model}`: model metadata lookup used by the health check.
async fn model_info(
    State(state): State<FakeState>,
    Path(model): Path<String>,
    headers: HeaderMap,
) -> Response {
    {
        let mut seen = state.seen.lock().unwrap();
        seen.lookups.push(model.clone());
        seen.api_key = headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
    }
    match state.mode {
        Mode::Fail(status) => (
            status,
            Json(json!({"error": {"code": status.as_u16(), "message": "model not found"}})),
        )
            .into_response(),
        _ => Json(json!({"name": format!("models/{model}")})).into_response(),
    }
}

async fn spawn_fake(mode: Mode) -> (SocketAddr, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let app = Router::new()
        .route("/v1beta/models/{call}", post(generate).get(model_info))
        .with_state(FakeState {
            mode,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, seen)
}

fn config(addr: SocketAddr, timeout_secs: u64) -> GatewayConfig {
    GatewayConfig {
        endpoint: format!("http://{addr}/v1beta"),
        api_key: "test-key".into(),
        deep: ModelProfile::deep("deep-model", 1024),
        fast: ModelProfile::fast("fast-model"),
        timeout_secs,
    }
}

fn text_request(model: &str) -> ModelRequest {
    ModelRequest {
        model: model.into(),
        parts: vec![ContentPart::Text("hello".into())],
        response_schema: None,
        reasoning: None,
        temperature: None,
    }
}

#[tokio::test]
async fn sends_key_header_and_returns_candidate_text() {
    let (addr, seen) = spawn_fake(Mode::Answer("hi there")).await;
    let transport = GeminiTransport::new(&config(addr, 5)).unwrap();

    let out = transport.send(&text_request("fast-model")).await.unwrap();
    assert_eq!(out.text.as_deref(), Some("hi there"));
    assert_eq!(out.finish_reason.as_deref(), Some("STOP"));
    let usage = out.usage.unwrap();
    assert_eq!(usage.prompt_tokens, Some(12));
    assert_eq!(usage.output_tokens, Some(4));
    assert_eq!(usage.thinking_tokens, None);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.call.as_deref(), Some("fast-model:generateContent"));
    assert_eq!(seen.api_key.as_deref(), Some("test-key"));
    let body = seen.body.as_ref().unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    assert!(body.get("generationConfig").is_none());
}

#[tokio::test]
async fn non_success_status_carries_provider_message() {
    let (addr, _) = spawn_fake(Mode::Fail(StatusCode::TOO_MANY_REQUESTS)).await;
    let transport = GeminiTransport::new(&config(addr, 5)).unwrap();

    let err = transport.send(&text_request("m")).await.unwrap_err();
    match err {
        TransportError::HttpStatus(http) => {
            assert_eq!(http.status, StatusCode::TOO_MANY_REQUESTS);
            assert_eq!(http.snippet, "quota exhausted");
            assert!(!http.url.contains("test-key"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn unreadable_envelope_is_a_transport_error() {
    let (addr, _) = spawn_fake(Mode::NotJson).await;
    let transport = GeminiTransport::new(&config(addr, 5)).unwrap();

    let err = transport.send(&text_request("m")).await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidEnvelope(_)));
}

#[tokio::test]
async fn blocked_prompt_is_a_transport_error() {
    let (addr, _) = spawn_fake(Mode::Blocked).await;
    let transport = GeminiTransport::new(&config(addr, 5)).unwrap();

    let err = transport.send(&text_request("m")).await.unwrap_err();
    assert!(matches!(err, TransportError::Blocked(reason) if reason == "SAFETY"));
}

#[tokio::test]
async fn slow_model_times_out() {
    let (addr, _) = spawn_fake(Mode::Slow).await;
    let transport = GeminiTransport::new(&config(addr, 1)).unwrap();

    let err = transport.send(&text_request("m")).await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout(d) if d == Duration::from_secs(1)));
}

#[tokio::test]
async fn unreachable_endpoint_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = GeminiTransport::new(&config(addr, 2)).unwrap();
    let err = transport.send(&text_request("m")).await.unwrap_err();
    assert!(matches!(
        err,
        TransportError::Http(_) | TransportError::Timeout(_)
    ));
}

#[tokio::test]
async fn evaluation_goes_over_the_wire_with_schema_and_image() {
    let (addr, seen) = spawn_fake(Mode::Answer(
        r#"{"score":8.5,"transcription":"t","gapAnalysis":"g","keyPoints":["A"],"tips":"x"}"#,
    ))
    .await;
    let cfg = config(addr, 5);
    let transport = Arc::new(GeminiTransport::new(&cfg).unwrap());
    let gw = StudyGateway::new(transport, cfg.deep.clone(), cfg.fast.clone());

    let result = gw
        .evaluate_answer(&EvaluationRequest {
            image: InlineImage::jpeg(vec![1, 2, 3]),
            vault_context: "DBMS_Notes.pdf".into(),
        })
        .await
        .unwrap();
    assert_eq!(result.score, 8.5);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.call.as_deref(), Some("deep-model:generateContent"));
    let body = seen.body.as_ref().unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["inlineData"]["data"], "AQID");
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(
        body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
        1024
    );
    assert_eq!(
        body["generationConfig"]["responseSchema"]["required"],
        json!(["score", "transcription", "gapAnalysis", "keyPoints", "tips"])
    );
}

#[tokio::test]
async fn profile_temperature_is_sent_in_generation_config() {
    let (addr, seen) = spawn_fake(Mode::Answer("## Notes")).await;
    let mut cfg = config(addr, 5);
    cfg.fast = cfg.fast.with_temperature(Some(0.5));
    let transport = Arc::new(GeminiTransport::new(&cfg).unwrap());
    let gw = StudyGateway::new(transport, cfg.deep.clone(), cfg.fast.clone());

    gw.generate_notes(&NotesRequest {
        source_url: "https://youtu.be/abc".into(),
        topic: None,
    })
    .await
    .unwrap();

    let seen = seen.lock().unwrap();
    let body = seen.body.as_ref().unwrap();
    assert_eq!(body["generationConfig"]["temperature"], 0.5);
    assert!(body["generationConfig"].get("responseSchema").is_none());
}

#[tokio::test]
async fn health_check_reports_reachable_models() {
    let (addr, seen) = spawn_fake(Mode::Answer("unused")).await;
    let cfg = config(addr, 5);
    let health = HealthService::new(Some(5)).unwrap();

    let statuses = health.check_profiles(&cfg).await;

    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|s| s.ok));
    assert_eq!(statuses[0].model, "deep-model");
    assert_eq!(statuses[1].model, "fast-model");
    assert_eq!(statuses[0].endpoint, format!("http://{addr}/v1beta"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.lookups, vec!["deep-model", "fast-model"]);
    assert_eq!(seen.api_key.as_deref(), Some("test-key"));
}

#[tokio::test]
async fn health_check_looks_up_a_shared_model_once() {
    let (addr, seen) = spawn_fake(Mode::Answer("unused")).await;
    let mut cfg = config(addr, 5);
    cfg.fast = ModelProfile::fast("deep-model");
    let health = HealthService::new(Some(5)).unwrap();

    let statuses = health.check_profiles(&cfg).await;

    assert_eq!(statuses.len(), 1);
    assert!(statuses[0].ok);
    assert_eq!(seen.lock().unwrap().lookups, vec!["deep-model"]);
}

#[tokio::test]
async fn health_check_turns_error_status_into_not_ok() {
    let (addr, _) = spawn_fake(Mode::Fail(StatusCode::NOT_FOUND)).await;
    let cfg = config(addr, 5);
    let health = HealthService::new(Some(5)).unwrap();

    let status = health.check(&cfg, &cfg.deep).await;
    assert!(!status.ok);
    assert!(status.message.contains("model not found"));

    let err = health.try_check(&cfg, &cfg.deep).await.unwrap_err();
    match err {
        TransportError::HttpStatus(http) => {
            assert_eq!(http.status, StatusCode::NOT_FOUND);
            assert!(http.url.ends_with("/v1beta/models/deep-model"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}
