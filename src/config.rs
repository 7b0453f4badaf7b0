//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file first, so every variable below can also be set
//! there.

use std::env;
use std::path::PathBuf;

/// Environment variable names
pub mod env_vars {
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const DATA_DIR: &str = "DATA_DIR";
    pub const STATIC_DIR: &str = "STATIC_DIR";
    /// Presence of this key switches the chat assistant to the completion API.
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const OPENAI_API_BASE: &str = "OPENAI_API_BASE";
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    /// Set to "false" or "0" to start with an empty todo list.
    pub const SEED_DEFAULT_TODOS: &str = "SEED_DEFAULT_TODOS";
}

/// Default values
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8082;
    pub const DATA_DIR: &str = ".";
    pub const STATIC_DIR: &str = "static";
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const OPENAI_MODEL: &str = "gpt-3.5-turbo";
}

// ============================================================================
// Config
// ============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub chat: ChatConfig,
    pub seed_default_todos: bool,
}

/// Settings for the external chat completion service.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var(env_vars::PORT)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults::PORT);

        let api_key = env::var(env_vars::OPENAI_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty());

        Self {
            host: env::var(env_vars::HOST).unwrap_or_else(|_| defaults::HOST.to_string()),
            port,
            data_dir: PathBuf::from(
                env::var(env_vars::DATA_DIR).unwrap_or_else(|_| defaults::DATA_DIR.to_string()),
            ),
            static_dir: PathBuf::from(
                env::var(env_vars::STATIC_DIR)
                    .unwrap_or_else(|_| defaults::STATIC_DIR.to_string()),
            ),
            chat: ChatConfig {
                api_key,
                api_base: env::var(env_vars::OPENAI_API_BASE)
                    .unwrap_or_else(|_| defaults::OPENAI_API_BASE.to_string()),
                model: env::var(env_vars::OPENAI_MODEL)
                    .unwrap_or_else(|_| defaults::OPENAI_MODEL.to_string()),
            },
            seed_default_todos: env::var(env_vars::SEED_DEFAULT_TODOS)
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
        }
    }

    /// Configuration rooted at `data_dir` with no chat credential and no
    /// seeding. Used by tests and the console notebook.
    pub fn local(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            host: "127.0.0.1".to_string(),
            port: defaults::PORT,
            static_dir: data_dir.join(defaults::STATIC_DIR),
            data_dir,
            chat: ChatConfig {
                api_key: None,
                api_base: defaults::OPENAI_API_BASE.to_string(),
                model: defaults::OPENAI_MODEL.to_string(),
            },
            seed_default_todos: false,
        }
    }

    /// `host:port`; the host may be a name or an address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.data_dir.join("notes")
    }

    pub fn todos_dir(&self) -> PathBuf {
        self.data_dir.join("todos")
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.data_dir.join("projects")
    }

    pub fn chats_dir(&self) -> PathBuf {
        self.data_dir.join("chats")
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
