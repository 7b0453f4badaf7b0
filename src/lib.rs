//! Workbench library - stores, chat assistant and HTTP routing.
//!
//! The binary in `main.rs` only loads configuration and serves [`router`];
//! everything else lives here so it can be exercised from tests.

use axum::{routing::get, Router};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::services::ServeDir;

pub mod chat;
pub mod config;
pub mod handlers;
pub mod models;
pub mod notes;
pub mod projects;
pub mod store;
pub mod templates;
pub mod todos;

use chat::{ChatAssistant, ChatLog};
use config::Config;
use notes::NoteStore;
use projects::ProjectStore;
use store::StoreResult;
use todos::TodoStore;

// ============================================================================
// Application State
// ============================================================================

/// Shared state. Each store sits behind its own mutex so requests touching
/// the same index file are serialized.
pub struct AppState {
    pub config: Config,
    pub notes: Mutex<NoteStore>,
    pub todos: Mutex<TodoStore>,
    pub projects: Mutex<ProjectStore>,
    pub chat_log: Mutex<ChatLog>,
    pub assistant: ChatAssistant,
}

impl AppState {
    /// Open every store under `config.data_dir`, creating directories as
    /// needed, and seed example todos into an empty list if enabled.
    pub fn open(config: Config) -> StoreResult<Self> {
        let notes = NoteStore::open(config.notes_dir())?;
        let mut todos = TodoStore::open(config.todos_dir())?;
        let projects = ProjectStore::open(config.projects_dir())?;
        let chat_log = ChatLog::open(config.chats_dir())?;

        if config.seed_default_todos && todos.is_empty() {
            todos.seed_defaults()?;
        }

        let assistant = ChatAssistant::from_config(&config.chat);

        Ok(Self {
            config,
            notes: Mutex::new(notes),
            todos: Mutex::new(todos),
            projects: Mutex::new(projects),
            chat_log: Mutex::new(chat_log),
            assistant,
        })
    }
}

/// Lock a store. A panic in another request does not leave the store
/// unusable; the index on disk is always the last complete write.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Front end
        .route("/", get(handlers::index))
        .route("/debug", get(handlers::debug_page))
        .nest_service("/static", static_files)
        // Notes
        .route("/api/notes", get(handlers::list_notes).post(handlers::create_note))
        .route(
            "/api/notes/{id}",
            get(handlers::get_note)
                .put(handlers::update_note)
                .delete(handlers::delete_note),
        )
        // Todos
        .route("/api/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/api/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        // Projects
        .route(
            "/api/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/api/projects/{id}/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/projects/{id}/tasks/{task_id}",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        // Chat
        .route("/api/chat", axum::routing::post(handlers::chat))
        .route("/api/chat/history", get(handlers::chat_history))
        .route("/api/chat/clear", axum::routing::delete(handlers::clear_chat))
        .with_state(state)
}

// Re-export commonly used types
pub use models::{
    ChatMessage, ChatRole, HistoryEntry, NewTask, Note, NoteWithContent, Project, ProjectPatch,
    Task, TaskPatch, Todo, TodoPatch,
};

pub use store::{JsonIndex, Record, StoreError};
