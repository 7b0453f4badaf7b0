//! End-to-end tests of the JSON API, driving the router in-process.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use workbench::config::Config;
use workbench::{router, AppState};

// ============================================================================
// Helpers
// ============================================================================

fn app() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let state = AppState::open(Config::local(dir.path())).unwrap();
    (dir, router(Arc::new(state)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };
    (status, value)
}

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Notes
// ============================================================================

#[tokio::test]
async fn test_note_crud_cycle() {
    let (dir, app) = app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/notes",
        Some(json!({"title": "Groceries", "content": "eggs\nmilk"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["filename"], format!("{}.txt", id));
    assert!(dir.path().join("notes").join(format!("{}.txt", id)).exists());

    let (status, note) = send(&app, "GET", &format!("/api/notes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(note["content"], "eggs\nmilk");
    assert_eq!(note["title"], "Groceries");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/notes/{}", id),
        Some(json!({"title": "Shopping", "content": "bread"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Shopping");

    let (_, list) = send(&app, "GET", "/api/notes", None).await;
    assert_eq!(ids(&list), vec![id.clone()]);

    let (status, body) = send(&app, "DELETE", &format!("/api/notes/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    assert!(!dir.path().join("notes").join(format!("{}.txt", id)).exists());

    let (status, body) = send(&app, "GET", &format!("/api/notes/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (_, list) = send(&app, "GET", "/api/notes", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_note_missing_fields_is_400() {
    let (_dir, app) = app();

    let (status, body) = send(&app, "POST", "/api/notes", Some(json!({"title": "only"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "POST", "/api/notes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_notes_listed_newest_first() {
    let (_dir, app) = app();
    let mut created = Vec::new();
    for title in ["a", "b", "c"] {
        let (_, note) = send(&app, "POST", "/api/notes", Some(json!({"title": title, "content": ""}))).await;
        created.push(note["id"].as_str().unwrap().to_string());
    }
    created.reverse();

    let (_, list) = send(&app, "GET", "/api/notes", None).await;
    assert_eq!(ids(&list), created);
}

#[tokio::test]
async fn test_unknown_note_is_404() {
    let (_dir, app) = app();
    let body = json!({"title": "t", "content": "c"});
    let (status, _) = send(&app, "PUT", "/api/notes/nope", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/api/notes/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Todos
// ============================================================================

#[tokio::test]
async fn test_todo_completion_toggles_completed_at() {
    let (_dir, app) = app();

    let (status, todo) = send(&app, "POST", "/api/todos", Some(json!({"title": "Call mom"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(todo["completed"], false);
    assert!(todo.get("completed_at").is_none());
    let url = format!("/api/todos/{}", todo["id"].as_str().unwrap());

    let (status, done) = send(&app, "PUT", &url, Some(json!({"completed": true}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["completed"], true);
    assert!(done["completed_at"].is_string());
    assert!(done["updated_at"].is_string());

    let (_, undone) = send(&app, "PUT", &url, Some(json!({"completed": false}))).await;
    assert_eq!(undone["completed"], false);
    assert!(undone.get("completed_at").is_none());

    let (status, _) = send(&app, "PUT", &url, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, fetched) = send(&app, "GET", &url, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Call mom");

    let (status, _) = send(&app, "DELETE", &url, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &url, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &url, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_todo_requires_title() {
    let (_dir, app) = app();
    let (status, body) = send(&app, "POST", "/api/todos", Some(json!({"completed": true}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_seeded_todos_when_enabled() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::local(dir.path());
    config.seed_default_todos = true;
    let app = router(Arc::new(AppState::open(config).unwrap()));

    let (_, list) = send(&app, "GET", "/api/todos", None).await;
    assert_eq!(list.as_array().unwrap().len(), 5);
}

// ============================================================================
// Projects and Tasks
// ============================================================================

#[tokio::test]
async fn test_project_progress_tracks_tasks() {
    let (dir, app) = app();

    let (status, project) = send(
        &app,
        "POST",
        "/api/projects",
        Some(json!({"name": "Website", "description": "relaunch"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["status"], "active");
    assert_eq!(project["progress"], 0);
    let pid = project["id"].as_str().unwrap().to_string();
    let tasks_url = format!("/api/projects/{}/tasks", pid);

    let mut task_ids = Vec::new();
    for title in ["Design", "Build", "Ship", "Celebrate"] {
        let (status, task) = send(&app, "POST", &tasks_url, Some(json!({"title": title}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(task["status"], "pending");
        assert_eq!(task["priority"], "medium");
        assert!(task["due_date"].is_null());
        task_ids.push(task["id"].as_str().unwrap().to_string());
    }

    let (status, task) = send(
        &app,
        "PUT",
        &format!("{}/{}", tasks_url, task_ids[0]),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(task["completed_at"].is_string());

    let (_, project) = send(&app, "GET", &format!("/api/projects/{}", pid), None).await;
    assert_eq!(project["progress"], 25);

    let (status, _) = send(&app, "DELETE", &format!("{}/{}", tasks_url, task_ids[1]), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, project) = send(&app, "GET", &format!("/api/projects/{}", pid), None).await;
    assert_eq!(project["progress"], 33);

    let (_, tasks) = send(&app, "GET", &tasks_url, None).await;
    assert_eq!(tasks.as_array().unwrap().len(), 3);

    let (status, fetched) = send(&app, "GET", &format!("{}/{}", tasks_url, task_ids[0]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["status"], "completed");

    let (status, _) = send(&app, "DELETE", &format!("/api/projects/{}", pid), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!dir
        .path()
        .join("projects")
        .join("tasks")
        .join(format!("{}.json", pid))
        .exists());

    let (status, _) = send(&app, "GET", &tasks_url, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_validation_and_404s() {
    let (_dir, app) = app();

    let (status, _) = send(&app, "POST", "/api/projects", Some(json!({"name": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/api/projects/ghost/tasks", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");

    let (_, project) = send(&app, "POST", "/api/projects", Some(json!({"name": "Real"}))).await;
    let pid = project["id"].as_str().unwrap();

    let (status, _) = send(&app, "POST", &format!("/api/projects/{}/tasks", pid), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/projects/{}/tasks/ghost", pid),
        Some(json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Task not found");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/projects/{}", pid),
        Some(json!({"status": "archived"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "archived");
    assert_eq!(updated["name"], "Real");
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_fallback_and_history() {
    let (_dir, app) = app();

    let (status, reply) = send(
        &app,
        "POST",
        "/api/chat",
        Some(json!({"message": "please add a todo", "history": []})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(reply["reply"].as_str().unwrap().contains("todo list"));
    assert!(reply["timestamp"].is_string());

    let (_, history) = send(&app, "GET", "/api/chat/history", None).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["role"], "user");
    assert_eq!(history[0]["content"], "please add a todo");
    assert_eq!(history[1]["role"], "assistant");

    let (status, _) = send(&app, "DELETE", "/api/chat/clear", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, history) = send(&app, "GET", "/api/chat/history", None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_rejects_blank_message() {
    let (_dir, app) = app();
    let (status, body) = send(&app, "POST", "/api/chat", Some(json!({"message": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, history) = send(&app, "GET", "/api/chat/history", None).await;
    assert!(history.as_array().unwrap().is_empty());
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_index_and_debug_pages() {
    let (_dir, app) = app();

    let (status, page) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.as_str().unwrap().contains("notesTabBtn"));

    let (status, page) = send(&app, "GET", "/debug", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.as_str().unwrap().contains("Debug Page"));
}

#[tokio::test]
async fn test_static_index_overrides_builtin_page() {
    let (dir, app) = app();
    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<p>custom front end</p>").unwrap();
    std::fs::write(static_dir.join("app.js"), "console.log(1);").unwrap();

    let (_, page) = send(&app, "GET", "/", None).await;
    assert_eq!(page, Value::String("<p>custom front end</p>".to_string()));

    let (status, script) = send(&app, "GET", "/static/app.js", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(script, Value::String("console.log(1);".to_string()));
}

#[tokio::test]
async fn test_corrupt_index_starts_empty_and_is_preserved() {
    let dir = TempDir::new().unwrap();
    let notes_dir = dir.path().join("notes");
    std::fs::create_dir_all(&notes_dir).unwrap();
    std::fs::write(notes_dir.join("index.json"), "[{broken").unwrap();

    let app = router(Arc::new(AppState::open(Config::local(dir.path())).unwrap()));
    let (status, list) = send(&app, "GET", "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());

    let preserved = std::fs::read_dir(&notes_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().starts_with("index.json.corrupt-"));
    assert!(preserved);
}
