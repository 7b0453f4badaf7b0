//! HTTP route handlers.
//!
//! JSON handlers for notes, todos, projects, tasks and chat, plus the front
//! end and debug pages. Errors are returned as `{"error": "..."}`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fs;
use std::sync::Arc;

use crate::models::{
    now, ChatMessage, ChatReply, ChatRequest, ChatRole, CreateProjectRequest, CreateTaskRequest,
    CreateTodoRequest, MessageResponse, NewTask, Note, NoteRequest, NoteWithContent, Project,
    ProjectPatch, Task, TaskPatch, Todo, TodoPatch, DEFAULT_PROJECT_STATUS, DEFAULT_TASK_PRIORITY,
    DEFAULT_TASK_STATUS,
};
use crate::store::StoreError;
use crate::templates::{debug_html, index_html};
use crate::{lock, AppState};

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn bad_request(msg: &str) -> Self {
        ApiError::BadRequest(msg.to_string())
    }

    fn not_found(msg: &str) -> Self {
        ApiError::NotFound(msg.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        log::error!("[API] Storage failure: {}", e);
        ApiError::Internal("Internal server error".to_string())
    }
}

/// Unwrap a JSON body, turning decode failures into a 400.
fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

// ============================================================================
// Pages
// ============================================================================

/// The single-page front end. A `static/index.html` overrides the built-in
/// page.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let custom = state.config.static_dir.join("index.html");
    match fs::read_to_string(&custom) {
        Ok(page) => Html(page),
        Err(_) => Html(index_html()),
    }
}

pub async fn debug_page() -> Html<String> {
    Html(debug_html())
}

// ============================================================================
// Notes
// ============================================================================

pub async fn list_notes(State(state): State<Arc<AppState>>) -> Json<Vec<Note>> {
    let notes = lock(&state.notes);
    Json(notes.list())
}

pub async fn create_note(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NoteRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let req = parse_body(body)?;
    let (Some(title), Some(content)) = (req.title, req.content) else {
        return Err(ApiError::bad_request("Title and content are required"));
    };

    let note = lock(&state.notes).create(&title, &content)?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn get_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<NoteWithContent>> {
    let notes = lock(&state.notes);
    notes
        .get(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Note not found"))
}

pub async fn update_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Result<Json<NoteRequest>, JsonRejection>,
) -> ApiResult<Json<Note>> {
    let req = parse_body(body)?;
    let (Some(title), Some(content)) = (req.title, req.content) else {
        return Err(ApiError::bad_request("Title and content are required"));
    };

    let mut notes = lock(&state.notes);
    notes
        .update(&id, &title, &content)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Note not found"))
}

pub async fn delete_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    let mut notes = lock(&state.notes);
    match notes.delete(&id)? {
        Some(_) => Ok(Json(MessageResponse::new("Note deleted"))),
        None => Err(ApiError::not_found("Note not found")),
    }
}

// ============================================================================
// Todos
// ============================================================================

pub async fn list_todos(State(state): State<Arc<AppState>>) -> Json<Vec<Todo>> {
    let todos = lock(&state.todos);
    Json(todos.list())
}

pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    let req = parse_body(body)?;
    let Some(title) = req.title else {
        return Err(ApiError::bad_request("Todo title is required"));
    };

    let todo = lock(&state.todos).create(&title, req.completed)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Todo>> {
    let todos = lock(&state.todos);
    todos
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Todo not found"))
}

pub async fn update_todo(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Result<Json<TodoPatch>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let patch = parse_body(body)?;
    if patch.is_empty() {
        return Err(ApiError::bad_request("No update data provided"));
    }

    let mut todos = lock(&state.todos);
    todos
        .update(&id, patch)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Todo not found"))
}

pub async fn delete_todo(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    let mut todos = lock(&state.todos);
    match todos.delete(&id)? {
        Some(_) => Ok(Json(MessageResponse::new("Todo deleted"))),
        None => Err(ApiError::not_found("Todo not found")),
    }
}

// ============================================================================
// Projects
// ============================================================================

pub async fn list_projects(State(state): State<Arc<AppState>>) -> Json<Vec<Project>> {
    let projects = lock(&state.projects);
    Json(projects.list())
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    let req = parse_body(body)?;
    if blank(&req.name) {
        return Err(ApiError::bad_request("Project name is required"));
    }

    let status = req.status.as_deref().unwrap_or(DEFAULT_PROJECT_STATUS);
    let project = lock(&state.projects).create(&req.name, &req.description, status)?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Project>> {
    let projects = lock(&state.projects);
    projects
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project not found"))
}

pub async fn update_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProjectPatch>, JsonRejection>,
) -> ApiResult<Json<Project>> {
    let patch = parse_body(body)?;
    let mut projects = lock(&state.projects);
    projects
        .update(&id, patch)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project not found"))
}

pub async fn delete_project(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    let mut projects = lock(&state.projects);
    match projects.delete(&id)? {
        Some(_) => Ok(Json(MessageResponse::new("Project deleted"))),
        None => Err(ApiError::not_found("Project not found")),
    }
}

// ============================================================================
// Project Tasks
// ============================================================================

pub async fn list_tasks(
    Path(project_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Task>>> {
    let projects = lock(&state.projects);
    projects
        .tasks(&project_id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Project not found"))
}

pub async fn create_task(
    Path(project_id): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let mut projects = lock(&state.projects);
    if projects.get(&project_id).is_none() {
        return Err(ApiError::not_found("Project not found"));
    }

    let req = parse_body(body)?;
    if blank(&req.title) {
        return Err(ApiError::bad_request("Task title is required"));
    }

    let new = NewTask {
        title: req.title,
        description: req.description,
        status: req.status.unwrap_or_else(|| DEFAULT_TASK_STATUS.to_string()),
        priority: req
            .priority
            .unwrap_or_else(|| DEFAULT_TASK_PRIORITY.to_string()),
        due_date: req.due_date,
    };

    projects
        .create_task(&project_id, new)?
        .map(|task| (StatusCode::CREATED, Json(task)))
        .ok_or_else(|| ApiError::not_found("Project not found"))
}

pub async fn get_task(
    Path((project_id, task_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Task>> {
    let projects = lock(&state.projects);
    if projects.get(&project_id).is_none() {
        return Err(ApiError::not_found("Project not found"));
    }

    projects
        .get_task(&project_id, &task_id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Task not found"))
}

pub async fn update_task(
    Path((project_id, task_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let mut projects = lock(&state.projects);
    if projects.get(&project_id).is_none() {
        return Err(ApiError::not_found("Project not found"));
    }

    let patch = parse_body(body)?;
    projects
        .update_task(&project_id, &task_id, patch)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Task not found"))
}

pub async fn delete_task(
    Path((project_id, task_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    let mut projects = lock(&state.projects);
    if projects.get(&project_id).is_none() {
        return Err(ApiError::not_found("Project not found"));
    }

    match projects.delete_task(&project_id, &task_id)? {
        Some(_) => Ok(Json(MessageResponse::new("Task deleted"))),
        None => Err(ApiError::not_found("Task not found")),
    }
}

// ============================================================================
// Chat
// ============================================================================

pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let req = parse_body(body)?;
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("Message must not be empty"));
    }

    // The log lock is released before the (possibly slow) completion call.
    {
        let mut log = lock(&state.chat_log);
        log.append(ChatRole::User, message)?;
    }

    let reply = state.assistant.respond(message, &req.history).await;

    {
        let mut log = lock(&state.chat_log);
        log.append(ChatRole::Assistant, &reply)?;
    }

    Ok(Json(ChatReply {
        reply,
        timestamp: now(),
    }))
}

pub async fn chat_history(State(state): State<Arc<AppState>>) -> Json<Vec<ChatMessage>> {
    let log = lock(&state.chat_log);
    Json(log.history())
}

pub async fn clear_chat(State(state): State<Arc<AppState>>) -> ApiResult<Json<MessageResponse>> {
    lock(&state.chat_log).clear()?;
    Ok(Json(MessageResponse::new("Chat history cleared")))
}
