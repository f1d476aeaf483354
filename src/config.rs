use crate::cli::OutputFormat;
use crate::credentials::Credentials;
use crate::error::CliError;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// Build-time default injected via build.rs
const DEFAULT_API_URL: &str = env!("API_URL");
const DEFAULT_IMAGES_DIR: &str = "images";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    pub email: Option<String>,
    pub password: Option<String>,

    /// Directory holding the photo fixtures (bulldog.jpg, cat.jpg, lapa.jpg).
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Request timeout. Unset means the transport default.
    pub timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_images_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGES_DIR)
}

impl Config {
    pub fn load() -> Result<Self, CliError> {
        Self::load_from_path(&Self::path()?)
    }

    pub fn save(&self) -> Result<(), CliError> {
        self.save_to_path(&Self::path()?)
    }

    pub fn path() -> Result<PathBuf, CliError> {
        let dirs = ProjectDirs::from("ru", "skillfactory", "petfriends")
            .ok_or_else(|| CliError::other("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A copy of this config with the given account stored in it.
    pub fn with_credentials(&self, credentials: &Credentials) -> Self {
        Self {
            email: Some(credentials.email.clone()),
            password: Some(credentials.password.clone()),
            ..self.clone()
        }
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(CliError::ConfigRead)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CliError::ConfigWrite)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(CliError::ConfigWrite)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            email: None,
            password: None,
            images_dir: default_images_dir(),
            timeout_secs: None,
        }
    }
}

/// Runtime context that combines config, environment and CLI overrides
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    api_url_override: Option<String>,
    images_dir_override: Option<PathBuf>,
    email_override: Option<String>,
    password_override: Option<String>,
    format_override: Option<OutputFormat>,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config))
    }

    /// Create context with a specific config (for testing)
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            api_url_override: None,
            images_dir_override: None,
            email_override: None,
            password_override: None,
            format_override: None,
        }
    }

    pub fn override_api_url(&mut self, url: String) {
        self.api_url_override = Some(url);
    }

    pub fn override_images_dir(&mut self, dir: PathBuf) {
        self.images_dir_override = Some(dir);
    }

    pub fn override_email(&mut self, email: String) {
        self.email_override = Some(email);
    }

    pub fn override_password(&mut self, password: String) {
        self.password_override = Some(password);
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format_override = Some(format);
    }

    pub fn api_url(&self) -> String {
        if let Some(url) = &self.api_url_override {
            return url.clone();
        }
        std::env::var("API_URL").unwrap_or_else(|_| self.config.api_url.clone())
    }

    pub fn images_dir(&self) -> PathBuf {
        if let Some(dir) = &self.images_dir_override {
            return dir.clone();
        }
        std::env::var("PETFRIENDS_IMAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.config.images_dir.clone())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout_secs.map(Duration::from_secs)
    }

    pub fn email(&self) -> Option<String> {
        self.email_override
            .clone()
            .or_else(|| std::env::var("PETFRIENDS_EMAIL").ok())
            .or_else(|| self.config.email.clone())
    }

    pub fn password(&self) -> Option<String> {
        self.password_override
            .clone()
            .or_else(|| std::env::var("PETFRIENDS_PASSWORD").ok())
            .or_else(|| self.config.password.clone())
    }

    /// Resolve credentials; both email and password must be present and non-empty.
    pub fn credentials(&self) -> Result<Credentials, CliError> {
        Credentials::require(self.email(), self.password())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format_override.unwrap_or_default()
    }
}
