//! Chat assistant and chat log.
//!
//! Replies come from an OpenAI-compatible chat completion API when
//! `OPENAI_API_KEY` is configured, and from keyword-matched canned responses
//! otherwise (or when the API call fails).

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ChatConfig;
use crate::models::{new_id, now, ChatMessage, ChatRole, HistoryEntry};
use crate::store::{JsonIndex, StoreResult};

pub const LOG_FILE: &str = "chat_history.json";

/// Prior turns forwarded to the completion API.
pub const HISTORY_WINDOW: usize = 5;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.7;

// ============================================================================
// Fallback Responses
// ============================================================================

/// What a message is about, as far as keyword matching can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Thanks,
    Farewell,
    Notes,
    Todos,
    Time,
    Question,
    Other,
}

struct KeywordRule {
    intent: Intent,
    /// Short or ambiguous keywords, matched against whole lowercase words.
    words: &'static [&'static str],
    /// Matched anywhere in the lowercase message.
    phrases: &'static [&'static str],
}

const RULES: &[KeywordRule] = &[
    KeywordRule {
        intent: Intent::Greeting,
        words: &["hi", "hey"],
        phrases: &["hello", "你好", "您好"],
    },
    KeywordRule {
        intent: Intent::Thanks,
        words: &["thx"],
        phrases: &["thank", "谢谢", "感谢"],
    },
    KeywordRule {
        intent: Intent::Farewell,
        words: &["bye"],
        phrases: &["goodbye", "再见", "拜拜"],
    },
    KeywordRule {
        intent: Intent::Notes,
        words: &[],
        phrases: &["note", "笔记", "记录"],
    },
    KeywordRule {
        intent: Intent::Todos,
        words: &[],
        phrases: &["todo", "task", "待办", "任务"],
    },
    KeywordRule {
        // "update" and "sometimes" must not read as time queries.
        intent: Intent::Time,
        words: &["time", "date"],
        phrases: &["时间", "日期"],
    },
];

pub fn classify(message: &str) -> Intent {
    let lower = message.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    for rule in RULES {
        let word_hit = rule.words.iter().any(|k| words.contains(k));
        let phrase_hit = rule.phrases.iter().any(|p| lower.contains(p));
        if word_hit || phrase_hit {
            return rule.intent;
        }
    }

    if message.contains('?') || message.contains('？') {
        Intent::Question
    } else {
        Intent::Other
    }
}

/// Canned reply for `message`; `at` is used for time queries.
pub fn fallback_response(message: &str, at: DateTime<Local>) -> String {
    match classify(message) {
        Intent::Greeting => {
            "Hello! I'm your assistant and happy to help. What can I do for you?".to_string()
        }
        Intent::Thanks => {
            "You're welcome! Ask me anytime if anything else comes up.".to_string()
        }
        Intent::Farewell => "Goodbye! Have a great day, I'm here whenever you need me.".to_string(),
        Intent::Notes => "I can help with your notes! Create, edit and delete them on the notes page. \
             Anything specific you'd like to write down?"
            .to_string(),
        Intent::Todos => "Sounds like you're thinking about your todos. You can add, complete and \
             delete items in the todo list. Want help planning something?"
            .to_string(),
        Intent::Time => format!("The current time is {}", at.format("%Y-%m-%d %H:%M:%S")),
        Intent::Question => "Good question! My abilities are still limited: mostly I help you \
             manage notes and todos. Try asking me about those."
            .to_string(),
        Intent::Other => "I see. As your personal assistant I mainly help with notes and todos. \
             Tell me what you need and I'll do my best!"
            .to_string(),
    }
}

// ============================================================================
// Completion API
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion API returned no message")]
    EmptyReply,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ApiMessage,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct CompletionClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl CompletionClient {
    pub fn new(api_key: String, api_base: &str, model: String) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            model,
        })
    }

    pub async fn complete(
        &self,
        message: &str,
        history: &[HistoryEntry],
    ) -> Result<String, ChatError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: build_messages(message, history),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let parsed: CompletionResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|reply| !reply.is_empty())
            .ok_or(ChatError::EmptyReply)
    }
}

/// The last [`HISTORY_WINDOW`] history turns followed by the new message.
fn build_messages(message: &str, history: &[HistoryEntry]) -> Vec<ApiMessage> {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|h| ApiMessage {
            role: h.role.clone(),
            content: h.content.clone(),
        })
        .chain(std::iter::once(ApiMessage {
            role: ChatRole::User.as_str().to_string(),
            content: message.to_string(),
        }))
        .collect()
}

// ============================================================================
// Assistant
// ============================================================================

pub struct ChatAssistant {
    client: Option<CompletionClient>,
}

impl ChatAssistant {
    /// Canned replies only.
    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        let Some(api_key) = config.api_key.clone() else {
            return Self::offline();
        };

        match CompletionClient::new(api_key, &config.api_base, config.model.clone()) {
            Ok(client) => Self {
                client: Some(client),
            },
            Err(e) => {
                log::error!("[CHAT] Could not build completion client: {}", e);
                Self::offline()
            }
        }
    }

    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    pub async fn respond(&self, message: &str, history: &[HistoryEntry]) -> String {
        if let Some(ref client) = self.client {
            match client.complete(message, history).await {
                Ok(reply) => return reply,
                Err(e) => log::error!("[CHAT] Completion API call failed: {}", e),
            }
        }
        fallback_response(message, Local::now())
    }
}

// ============================================================================
// Chat Log
// ============================================================================

/// Every exchanged message, oldest first, in `chats/chat_history.json`.
pub struct ChatLog {
    index: JsonIndex<ChatMessage>,
}

impl ChatLog {
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            index: JsonIndex::open(dir.join(LOG_FILE))?,
        })
    }

    pub fn append(&mut self, role: ChatRole, content: &str) -> StoreResult<ChatMessage> {
        self.index.insert(ChatMessage {
            id: new_id(),
            role,
            content: content.to_string(),
            timestamp: now(),
        })
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.index.records().to_vec()
    }

    pub fn clear(&mut self) -> StoreResult<()> {
        self.index.clear()
    }
}
