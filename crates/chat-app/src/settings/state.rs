use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/ask";
pub const DEFAULT_TITLE: &str = "Test Chatbot";
pub const DEFAULT_HEADER: &str = "Welcome to the test Chatbot";
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hello! I am a test Chatbot. How can I help you?";
pub const SETTINGS_DIRECTORY_NAME: &str = "askbot";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const ENV_PREFIX: &str = "ASKBOT_";

/// Immutable configuration value, constructed once at startup and passed
/// explicitly into the components. Every option falls back to its default
/// when unset or blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSettings {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_header")]
    pub header: String,
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            title: default_title(),
            header: default_header(),
            welcome_message: default_welcome_message(),
        }
    }
}

impl WidgetSettings {
    /// Loads settings from the default config path plus the environment.
    pub fn load() -> Self {
        Self::load_from(&Self::default_config_path())
    }

    /// Layered load: serialized defaults, then the optional JSON settings
    /// file, then `ASKBOT_*` environment variables. A file that fails to
    /// parse falls back to defaults with a diagnostic instead of aborting.
    pub fn load_from(path: &Path) -> Self {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if path.exists() {
            figment = figment.merge(Json::file(path));
        } else {
            tracing::info!("settings file not found at {:?}, using defaults", path);
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        match figment.extract::<Self>() {
            Ok(settings) => settings.normalized(),
            Err(error) => {
                tracing::warn!(
                    "failed to load settings from {:?}: {}. using defaults",
                    path,
                    error
                );
                Self::default()
            }
        }
    }

    /// Trims every option; a value that is blank after trimming falls back
    /// to its default, mirroring per-option `value ?? default` resolution.
    pub fn normalized(mut self) -> Self {
        self.backend_url = trimmed_or(self.backend_url, default_backend_url);
        self.title = trimmed_or(self.title, default_title);
        self.header = trimmed_or(self.header, default_header);
        self.welcome_message = trimmed_or(self.welcome_message, default_welcome_message);
        self
    }

    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|path| path.join(SETTINGS_DIRECTORY_NAME))
            .unwrap_or_else(|| PathBuf::from(".askbot"))
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join(SETTINGS_FILE_NAME)
    }
}

fn trimmed_or(value: String, fallback: fn() -> String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback()
    } else {
        trimmed.to_string()
    }
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

fn default_welcome_message() -> String {
    DEFAULT_WELCOME_MESSAGE.to_string()
}
