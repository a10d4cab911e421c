//! Integration tests for the REST API.
//!
//! Each test drives the full router (middleware included) against a
//! document in a scratch directory.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chipi_core::{JsonFileStore, MemoryStore, TrainingData, TrainingStore};
use chipi_server::{create_server, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    data_file: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_document(None).await
    }

    /// Start from `document` on disk instead of the default seed.
    async fn with_document(document: Option<Value>) -> Self {
        let dir = TempDir::new().unwrap();
        let data_file = dir.path().join("training_data.json");
        if let Some(document) = document {
            std::fs::write(&data_file, document.to_string()).unwrap();
        }
        let store = Arc::new(JsonFileStore::new(&data_file));
        let state = AppState::load(store).await.unwrap();

        Self {
            app: create_server(state),
            data_file,
            _dir: dir,
        }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        send(&self.app, request).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    fn stored(&self) -> Option<String> {
        std::fs::read_to_string(&self.data_file).ok()
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_list_all_data() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["totalCategories"], 4);
    assert_eq!(
        body["categories"],
        json!(["greetings", "aboutMe", "help", "goodbye"])
    );
    assert_eq!(body["data"]["greetings"]["patterns"][0], "hello");
    assert!(body["timestamp"].is_string());
    // Reads never create the document.
    assert!(app.stored().is_none());
}

#[tokio::test]
async fn test_get_category_is_idempotent() {
    let app = TestApp::new().await;

    let (status, first) = app.get("/api/data/aboutMe").await;
    let (_, second) = app.get("/api/data/aboutMe").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["category"], "aboutMe");
    assert_eq!(first["data"]["responses"].as_array().unwrap().len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_unknown_category() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/data/weather").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Category weather not found");
}

#[tokio::test]
async fn test_add_response_appends_and_persists() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/data/add-response/greetings", json!({"response": "Howdy!"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Response added to greetings");
    assert_eq!(body["totalResponses"], 4);

    let (_, category) = app.get("/api/data/greetings").await;
    assert_eq!(category["data"]["responses"][3], "Howdy!");

    let stored: Value = serde_json::from_str(&app.stored().unwrap()).unwrap();
    assert_eq!(stored["greetings"]["responses"][3], "Howdy!");
}

#[tokio::test]
async fn test_add_response_errors() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/data/add-response/weather", json!({"response": "x"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category weather not found");

    let (status, body) = app.post("/api/data/add-response/greetings", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Response text is required");

    let (status, _) = app
        .post("/api/data/add-response/greetings", json!({"response": ""}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown category wins over a missing body.
    let (status, _) = app
        .request(Method::POST, "/api/data/add-response/weather", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(app.stored().is_none());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/data/add-response/greetings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_add_pattern_and_duplicate() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/data/add-pattern/goodbye", json!({"pattern": "later"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPatterns"], 5);

    let (_, before) = app.get("/api/data/goodbye").await;
    let (status, body) = app
        .post("/api/data/add-pattern/goodbye", json!({"pattern": "later"}))
        .await;
    let (_, after) = app.get("/api/data/goodbye").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Pattern already exists");
    assert_eq!(before, after);

    let (status, body) = app.post("/api/data/add-pattern/goodbye", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Pattern is required");

    let (status, _) = app
        .post("/api/data/add-pattern/nope", json!({"pattern": "x"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_category_updates_stats() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/data/create-category",
            json!({
                "name": "weather",
                "patterns": ["is it raining"],
                "responses": ["I cannot check the weather."]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category weather created");
    assert_eq!(body["category"], "weather");

    let (status, stats) = app.get("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["status"], "success");
    assert_eq!(stats["totalCategories"], 5);
    assert_eq!(stats["totalPatterns"], 17);
    assert_eq!(stats["totalResponses"], 10);
    assert_eq!(stats["categories"][4], "weather");
}

#[tokio::test]
async fn test_create_category_defaults_and_errors() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/data/create-category", json!({"name": "empty"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get("/api/data/empty").await;
    assert_eq!(body["data"], json!({"patterns": [], "responses": []}));

    let (status, body) = app
        .post("/api/data/create-category", json!({"name": "empty"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Category already exists");

    let (status, body) = app
        .post("/api/data/create-category", json!({"patterns": ["x"]}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Category name is required");
}

#[tokio::test]
async fn test_update_response_only_changes_index() {
    let app = TestApp::new().await;
    let (_, before) = app.get("/api/data/greetings").await;

    let (status, body) = app
        .put("/api/data/update-response/greetings/0", json!({"response": "Hey!"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["index"], 0);
    assert_eq!(body["message"], "Response updated in greetings");

    let (_, after) = app.get("/api/data/greetings").await;
    assert_eq!(after["data"]["responses"][0], "Hey!");
    assert_eq!(after["data"]["responses"][1], before["data"]["responses"][1]);
    assert_eq!(after["data"]["responses"][2], before["data"]["responses"][2]);
}

#[tokio::test]
async fn test_update_response_errors() {
    let app = TestApp::new().await;

    let (status, body) = app
        .put("/api/data/update-response/greetings/3", json!({"response": "x"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Response index out of range");

    let (status, _) = app
        .put("/api/data/update-response/greetings/0", json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put("/api/data/update-response/nope/0", json!({"response": "x"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .put("/api/data/update-response/greetings/first", json!({"response": "x"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_delete_response() {
    let app = TestApp::new().await;
    let (_, before) = app.get("/api/data/goodbye").await;

    let (status, body) = app.delete("/api/data/delete-response/goodbye/0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Response deleted");
    assert_eq!(body["deletedResponse"], before["data"]["responses"][0]);

    let (_, after) = app.get("/api/data/goodbye").await;
    assert_eq!(after["data"]["responses"], json!([before["data"]["responses"][1]]));
}

#[tokio::test]
async fn test_delete_response_out_of_range_leaves_file_untouched() {
    let app = TestApp::new().await;
    app.post("/api/data/add-response/help", json!({"response": "Ask away."}))
        .await;
    let stored_before = app.stored().unwrap();

    let (status, body) = app.delete("/api/data/delete-response/greetings/99").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Response index out of range");
    assert_eq!(app.stored().unwrap(), stored_before);

    let (status, _) = app.delete("/api/data/delete-response/greetings/-1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_category() {
    let app = TestApp::new().await;

    let (status, body) = app.delete("/api/data/delete-category/aboutMe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category aboutMe deleted");

    let (status, _) = app.get("/api/data/aboutMe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/data/delete-category/aboutMe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_protected_categories_cannot_be_deleted() {
    let app = TestApp::new().await;

    for name in ["greetings", "help", "goodbye"] {
        let (status, body) = app
            .delete(&format!("/api/data/delete-category/{}", name))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Cannot delete core categories");
    }

    let (_, stats) = app.get("/api/stats").await;
    assert_eq!(stats["totalCategories"], 4);
}

#[tokio::test]
async fn test_reset_restores_seed_and_is_idempotent() {
    let app = TestApp::new().await;
    app.post("/api/data/create-category", json!({"name": "weather"}))
        .await;
    app.delete("/api/data/delete-category/aboutMe").await;
    app.put("/api/data/update-response/greetings/0", json!({"response": "Hey!"}))
        .await;

    let (status, body) = app.request(Method::POST, "/api/data/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Training data reset to default");
    let (_, once) = app.get("/api/data").await;
    let stored_once = app.stored().unwrap();

    app.request(Method::POST, "/api/data/reset", None).await;
    let (_, twice) = app.get("/api/data").await;

    assert_eq!(once["data"], twice["data"]);
    assert_eq!(app.stored().unwrap(), stored_once);
    assert_eq!(
        serde_json::to_value(TrainingData::default_seed()).unwrap(),
        once["data"]
    );
}

#[tokio::test]
async fn test_state_survives_restart() {
    let app = TestApp::new().await;
    app.post(
        "/api/data/create-category",
        json!({"name": "weather", "patterns": ["sunny?"], "responses": ["No idea."]}),
    )
    .await;
    app.delete("/api/data/delete-response/help/1").await;
    let (_, before) = app.get("/api/data").await;

    let reloaded = JsonFileStore::new(&app.data_file).load().await.unwrap();
    let store = Arc::new(JsonFileStore::new(&app.data_file));
    let restarted = create_server(AppState::new(reloaded, store));
    let request = Request::builder()
        .uri("/api/data")
        .body(Body::empty())
        .unwrap();
    let (_, after) = send(&restarted, request).await;

    assert_eq!(before["data"], after["data"]);
    assert_eq!(before["categories"], after["categories"]);
}

#[tokio::test]
async fn test_persistence_failure_is_server_error() {
    let store = Arc::new(MemoryStore::new());
    let app = create_server(AppState::load(store.clone()).await.unwrap());
    store.set_fail_saves(true);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/data/add-pattern/greetings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"pattern": "yo"}).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Failed to persist training data");

    // The in-memory mapping did not move ahead of storage.
    let request = Request::builder()
        .uri("/api/data/greetings")
        .body(Body::empty())
        .unwrap();
    let (_, category) = send(&app, request).await;
    assert_eq!(category["data"]["patterns"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_health_and_docs() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Chipi AI Server");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());

    let (status, body) = app.get("/api/docs").await;
    assert_eq!(status, StatusCode::OK);
    let endpoints = body["endpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 12);
    assert!(endpoints
        .iter()
        .any(|e| e["path"] == "/api/data/reset" && e["method"] == "POST"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/nothing-here").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_category_named_like_static_route_is_readable() {
    let app = TestApp::new().await;

    for name in ["reset", "create-category"] {
        let (status, _) = app
            .post(
                "/api/data/create-category",
                json!({"name": name, "responses": ["ok"]}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app.get(&format!("/api/data/{}", name)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], name);
        assert_eq!(body["data"]["responses"][0], "ok");
    }

    // POST still resets.
    let (status, _) = app.request(Method::POST, "/api/data/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.get("/api/data/reset").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category reset not found");
}

#[tokio::test]
async fn test_unsupported_method_is_json_405() {
    let app = TestApp::new().await;

    let (status, body) = app.delete("/api/data/reset").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], "error");

    let (status, body) = app.get("/api/data/delete-category/aboutMe").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], "error");

    let (status, body) = app.post("/api/stats", json!({})).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_protected_names_refused_when_absent() {
    let app = TestApp::with_document(Some(json!({
        "jokes": {"patterns": ["tell me a joke"], "responses": ["No."]}
    })))
    .await;
    let before = app.stored();

    let (status, body) = app.delete("/api/data/delete-category/help").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot delete core categories");
    assert_eq!(app.stored(), before);
}

#[tokio::test]
async fn test_malformed_body_to_unknown_target_is_not_found() {
    let app = TestApp::new().await;
    let malformed = |method: Method, uri: &str| {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{bad"))
            .unwrap()
    };

    let (status, body) = send(
        &app.app,
        malformed(Method::POST, "/api/data/add-response/nope"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category nope not found");

    let (status, _) = send(&app.app, malformed(Method::POST, "/api/data/add-pattern/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app.app,
        malformed(Method::PUT, "/api/data/update-response/greetings/99"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Response index out of range");

    // Known target: the body error is reported.
    let (status, _) = send(
        &app.app,
        malformed(Method::PUT, "/api/data/update-response/greetings/0"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.stored().is_none());
}
