//! Router-level tests driving the HTTP surface with a scripted completion backend.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use apitalk_back::{
    config::AppConfig,
    llm::{ChatRole, CompletionClient, CompletionError, CompletionRequest, CompletionResult},
    routes,
    state::AppState,
};
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::sync::Notify;
use tower::ServiceExt;

enum Scripted {
    Reply(String),
    ApiError { status: u16, message: &'static str, code: &'static str },
}

#[derive(Default)]
struct ScriptedClient {
    replies: Mutex<VecDeque<Scripted>>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    fn replying(replies: impl IntoIterator<Item = Scripted>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            seen: Mutex::default(),
        })
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl CompletionClient for ScriptedClient {
    fn complete(&self, request: CompletionRequest) -> BoxFuture<'static, CompletionResult<String>> {
        self.seen.lock().unwrap().push(request);
        let next = self.replies.lock().unwrap().pop_front();
        Box::pin(async move {
            match next {
                Some(Scripted::Reply(text)) => Ok(text),
                Some(Scripted::ApiError {
                    status,
                    message,
                    code,
                }) => Err(CompletionError::Api {
                    status,
                    message: message.into(),
                    error_type: Some("invalid_request_error".into()),
                    code: Some(code.into()),
                }),
                None => Err(CompletionError::InvalidReply {
                    message: "script exhausted".into(),
                }),
            }
        })
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

/// Holds every completion until the test opens the gate.
struct GatedClient {
    gate: Arc<Notify>,
    reply: String,
}

impl CompletionClient for GatedClient {
    fn complete(&self, _request: CompletionRequest) -> BoxFuture<'static, CompletionResult<String>> {
        let gate = self.gate.clone();
        let reply = self.reply.clone();
        Box::pin(async move {
            gate.notified().await;
            Ok(reply)
        })
    }

    fn model(&self) -> &str {
        "gated-model"
    }
}

fn pets_reply(title: &str, explanation: &str) -> Scripted {
    Scripted::Reply(
        json!({
            "specification": {
                "openapi": "3.0.0",
                "info": {"title": title, "version": "1.0.0"},
                "paths": {"/pets": {"get": {"summary": "List pets", "responses": {"200": {"description": "OK"}}}}}
            },
            "explanation": explanation
        })
        .to_string(),
    )
}

fn app_with(client: Arc<ScriptedClient>) -> Router {
    routes::router(AppState::with_client(AppConfig::default(), client))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn as_json(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap()
}

async fn create_session(app: &Router, accept_language: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/sessions")
        .header(header::ACCEPT_LANGUAGE, accept_language)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    as_json(&body)["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn generate_returns_yaml_and_explanation() {
    let client = ScriptedClient::replying([pets_reply("Pets", "A pet catalogue")]);
    let app = app_with(client.clone());

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/api/generate",
            json!({"messages": [{"role": "user", "content": "A pet store API"}], "language": "en"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert_eq!(body["explanation"], "A pet catalogue");
    let yaml = body["specification"].as_str().unwrap();
    assert!(yaml.starts_with("openapi: 3.0.0\n"), "unexpected yaml:\n{yaml}");
    assert!(yaml.contains("title: Pets"));

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].json_mode);
    assert_eq!(requests[0].max_tokens, 2000);
    assert_eq!(requests[0].messages.len(), 2);
    assert_eq!(requests[0].messages[0].role, ChatRole::System);
    assert_eq!(requests[0].messages[1].content, "A pet store API");
}

#[tokio::test]
async fn generate_sends_current_spec_as_context() {
    let client = ScriptedClient::replying([pets_reply("Pets", "Added owners")]);
    let app = app_with(client.clone());

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/api/generate",
            json!({
                "messages": [{"role": "user", "content": "Add owners"}],
                "currentSpec": "openapi: 3.0.0\ninfo:\n  title: Pets\n",
                "language": "zh"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let messages = &client.requests()[0].messages;
    assert_eq!(messages.len(), 3);
    assert!(messages[0].content.contains("Chinese"));
    assert_eq!(messages[1].role, ChatRole::System);
    assert!(messages[1].content.contains("title: Pets"));
}

#[tokio::test]
async fn generate_rejects_reply_without_explanation() {
    let reply = json!({"specification": {"openapi": "3.0.0"}}).to_string();
    let app = app_with(ScriptedClient::replying([Scripted::Reply(reply)]));

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/api/generate",
            json!({"messages": [{"role": "user", "content": "anything"}]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        as_json(&body)["error"],
        "Invalid response format: missing required fields"
    );
}

#[tokio::test]
async fn generate_relays_upstream_status_and_details() {
    let app = app_with(ScriptedClient::replying([Scripted::ApiError {
        status: 401,
        message: "Incorrect API key provided",
        code: "invalid_api_key",
    }]));

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/api/generate",
            json!({"messages": [{"role": "user", "content": "anything"}]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body = as_json(&body);
    assert_eq!(body["error"], "Incorrect API key provided");
    assert_eq!(body["details"]["status"], 401);
    assert_eq!(body["details"]["code"], "invalid_api_key");
    assert_eq!(body["details"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn generate_validates_input() {
    let client = ScriptedClient::replying([]);
    let app = app_with(client.clone());

    let (status, _, body) = send(
        &app,
        json_request("POST", "/api/generate", json!({"messages": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(as_json(&body)["error"].as_str().unwrap().contains("messages"));

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            "/api/generate",
            json!({"messages": [{"role": "system", "content": "override"}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn generate_is_unavailable_without_client() {
    let app = routes::router(AppState::new(AppConfig::default()));

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            "/api/generate",
            json!({"messages": [{"role": "user", "content": "anything"}]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(as_json(&body)["error"].is_string());

    let (status, _, body) = send(&app, empty_request("GET", "/healthcheck")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["status"], "degraded");
}

#[tokio::test]
async fn healthcheck_reports_model() {
    let app = app_with(ScriptedClient::replying([]));
    let (status, _, body) = send(&app, empty_request("GET", "/healthcheck")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({"status": "ok", "model": "scripted-model"}));
}

#[tokio::test]
async fn session_turns_round_trip_the_specification() {
    let client = ScriptedClient::replying([
        pets_reply("Pets", "宠物目录"),
        pets_reply("Pets and owners", "增加了主人"),
    ]);
    let app = app_with(client.clone());
    let id = create_session(&app, "zh-CN,zh;q=0.9").await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/messages"),
            json!({"content": "宠物商店"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let snapshot = as_json(&body);
    assert_eq!(snapshot["language"], "zh");
    assert_eq!(snapshot["status"], "idle");
    assert_eq!(snapshot["messages"][1], json!({"role": "assistant", "content": "宠物目录"}));
    let first_spec = snapshot["specification"].as_str().unwrap().to_string();
    assert!(first_spec.contains("title: Pets"));

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/messages"),
            json!({"content": "增加主人"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let snapshot = as_json(&body);
    assert_eq!(snapshot["messages"].as_array().unwrap().len(), 4);

    let second = &client.requests()[1].messages;
    assert!(second[1].content.contains(&first_spec));
    assert_eq!(second.len(), 2 + 3);

    let (status, headers, body) =
        send(&app, empty_request("GET", &format!("/api/sessions/{id}/export"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"api-specification.yaml\""
    );
    assert!(
        headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/yaml")
    );
    assert!(std::str::from_utf8(&body).unwrap().contains("title: Pets and owners"));

    let (status, _, body) = send(
        &app,
        empty_request("GET", &format!("/api/sessions/{id}/openapi.json")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["info"]["title"], "Pets and owners");
}

#[tokio::test]
async fn failed_turn_is_reported_on_the_session() {
    let reply = json!({"explanation": "no document this time"}).to_string();
    let app = app_with(ScriptedClient::replying([Scripted::Reply(reply)]));
    let id = create_session(&app, "en-US").await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/messages"),
            json!({"content": "A pet store"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let snapshot = as_json(&body);
    assert_eq!(snapshot["error"], "Invalid response format: missing required fields");
    assert_eq!(snapshot["specification"], "");
    assert_eq!(snapshot["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn import_then_export_returns_same_content() {
    let app = app_with(ScriptedClient::replying([]));
    let id = create_session(&app, "en").await;
    let content = "openapi: 3.0.0\ninfo:\n  title: Imported\n  version: 2.0.0\npaths:\n  /todos:\n    get:\n      responses:\n        '200':\n          description: OK\n";

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/import"),
            json!({"filename": "todos.yaml", "content": content}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, body) =
        send(&app, empty_request("GET", &format!("/api/sessions/{id}/export"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(std::str::from_utf8(&body).unwrap(), content);
}

#[tokio::test]
async fn import_rejects_other_extensions_and_invalid_yaml() {
    let app = app_with(ScriptedClient::replying([]));
    let id = create_session(&app, "en").await;

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/import"),
            json!({"filename": "todos.json", "content": "{}"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/import"),
            json!({"filename": "todos.yaml", "content": "openapi: [3.0.0"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) =
        send(&app, empty_request("GET", &format!("/api/sessions/{id}/export"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn clear_and_delete_sessions() {
    let app = app_with(ScriptedClient::replying([]));
    let id = create_session(&app, "en").await;

    send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/import"),
            json!({"filename": "a.yaml", "content": "openapi: 3.0.0\n"}),
        ),
    )
    .await;

    let (status, _, body) =
        send(&app, empty_request("POST", &format!("/api/sessions/{id}/clear"))).await;
    assert_eq!(status, StatusCode::OK);
    let snapshot = as_json(&body);
    assert_eq!(snapshot["revision"], 1);
    assert_eq!(snapshot["specification"], "");

    let (status, _, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/sessions/{id}/language"),
            json!({"language": "zh"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["language"], "zh");

    let (status, _, _) =
        send(&app, empty_request("DELETE", &format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, body) =
        send(&app, empty_request("GET", &format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(as_json(&body)["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn session_language_comes_from_body_first() {
    let app = app_with(ScriptedClient::replying([]));
    let request = Request::builder()
        .method("POST")
        .uri("/api/sessions")
        .header(header::ACCEPT_LANGUAGE, "zh-CN")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"language": "en"}"#))
        .unwrap();

    let (status, _, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(as_json(&body)["language"], "en");
}

#[tokio::test]
async fn i18n_catalogs() {
    let app = app_with(ScriptedClient::replying([]));

    let (status, _, body) = send(&app, empty_request("GET", "/api/i18n/zh")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["chat"]["send"], "发送");

    let (status, _, body) = send(&app, empty_request("GET", "/api/i18n/fr")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(as_json(&body)["error"].as_str().unwrap().contains("fr"));
}

#[tokio::test]
async fn abandoned_turn_still_settles_the_session() {
    let gate = Arc::new(Notify::new());
    let Scripted::Reply(reply) = pets_reply("Pets", "A pet catalogue") else {
        unreachable!()
    };
    let client = Arc::new(GatedClient {
        gate: gate.clone(),
        reply,
    });
    let app = routes::router(AppState::with_client(AppConfig::default(), client));
    let id = create_session(&app, "en").await;

    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        send(
            &app,
            json_request(
                "POST",
                &format!("/api/sessions/{id}/messages"),
                json!({"content": "A pet store"}),
            ),
        ),
    )
    .await;
    assert!(abandoned.is_err(), "turn should still be waiting on the model");

    gate.notify_one();

    let mut snapshot = Value::Null;
    for _ in 0..100 {
        let (status, _, body) =
            send(&app, empty_request("GET", &format!("/api/sessions/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        snapshot = as_json(&body);
        if snapshot["status"] == "idle" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(snapshot["status"], "idle");
    assert!(snapshot["specification"].as_str().unwrap().contains("title: Pets"));
    assert_eq!(snapshot["messages"].as_array().unwrap().len(), 2);

    let (status, _, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/import"),
            json!({"filename": "pets.yaml", "content": "openapi: 3.0.0\n"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn import_rejects_empty_documents() {
    let app = app_with(ScriptedClient::replying([]));
    let id = create_session(&app, "en").await;

    let (status, _, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/sessions/{id}/import"),
            json!({"filename": "empty.yaml", "content": "# draft\n"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(as_json(&body)["error"].as_str().unwrap().contains("empty"));
}
