//! Data models for the workbench.
//!
//! Persisted records (notes, todos, projects, tasks, chat messages) and the
//! JSON request/response bodies used by the HTTP layer.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Record;

// ============================================================================
// Identifiers and Timestamps
// ============================================================================

/// Local wall-clock time, the way every index file records it.
pub type Timestamp = NaiveDateTime;

pub fn now() -> Timestamp {
    Local::now().naive_local()
}

/// Generate a random record id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Serde adapter for [`Timestamp`] fields.
///
/// Writes `2024-05-01T09:30:00.000000`; reads either the `T` or a space
/// separator, with or without fractional seconds.
pub mod local_time {
    use super::Timestamp;
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
    const READ_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(s: &str) -> Option<Timestamp> {
        READ_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
    }

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.format(WRITE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", s)))
    }

    /// Same encoding for `Option<Timestamp>`.
    pub mod option {
        use super::{parse, Timestamp, WRITE_FORMAT};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<Timestamp>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => serializer.serialize_str(&ts.format(WRITE_FORMAT).to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(s) => parse(&s)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", s))),
                None => Ok(None),
            }
        }
    }
}

// ============================================================================
// Notes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Name of the sibling content file, `<id>.txt`.
    pub filename: String,
    #[serde(with = "local_time")]
    pub created_at: Timestamp,
    #[serde(with = "local_time")]
    pub updated_at: Timestamp,
}

/// A note index record together with its file content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteWithContent {
    #[serde(flatten)]
    pub note: Note,
    pub content: String,
}

// ============================================================================
// Todos
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(with = "local_time")]
    pub created_at: Timestamp,
    #[serde(
        default,
        with = "local_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<Timestamp>,
    #[serde(
        default,
        with = "local_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

// ============================================================================
// Projects and Tasks
// ============================================================================

pub const DEFAULT_PROJECT_STATUS: &str = "active";
pub const DEFAULT_TASK_STATUS: &str = "pending";
pub const DEFAULT_TASK_PRIORITY: &str = "medium";
pub const COMPLETED: &str = "completed";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    /// Percentage of completed tasks, maintained by the store.
    #[serde(default)]
    pub progress: u8,
    #[serde(with = "local_time")]
    pub created_at: Timestamp,
    #[serde(with = "local_time")]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(with = "local_time")]
    pub created_at: Timestamp,
    #[serde(with = "local_time")]
    pub updated_at: Timestamp,
    #[serde(
        default,
        with = "local_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<Timestamp>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == COMPLETED
    }
}

/// Fields for a new task; defaults match what the front end assumes.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: DEFAULT_TASK_STATUS.to_string(),
            priority: DEFAULT_TASK_PRIORITY.to_string(),
            due_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

// ============================================================================
// Chat
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    #[serde(with = "local_time")]
    pub timestamp: Timestamp,
}

/// A prior turn supplied by the client as conversation context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    #[serde(default = "default_history_role")]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

fn default_history_role() -> String {
    "user".to_string()
}

// ============================================================================
// Record impls
// ============================================================================

impl Record for Note {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Record for Todo {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Record for Project {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Record for ChatMessage {
    fn id(&self) -> &str {
        &self.id
    }
    fn created_at(&self) -> Timestamp {
        self.timestamp
    }
}

// ============================================================================
// HTTP Bodies
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(with = "local_time")]
    pub timestamp: Timestamp,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
