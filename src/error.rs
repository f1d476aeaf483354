use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(
        "No credentials configured. Set PETFRIENDS_EMAIL and PETFRIENDS_PASSWORD or add them to the config file"
    )]
    MissingCredentials,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to read photo '{}': {source}", .path.display())]
    PhotoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown scenario '{0}'. Run: petfriends scenarios")]
    UnknownScenario(String),

    #[error("Failed to read config: {0}")]
    ConfigRead(std::io::Error),

    #[error("Failed to write config: {0}")]
    ConfigWrite(std::io::Error),

    #[error("Invalid config format: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
