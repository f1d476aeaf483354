//! Photo payloads for multipart uploads.

use crate::error::CliError;
use std::path::{Path, PathBuf};

/// A photo read into memory, ready to attach as the `pet_photo` part.
#[derive(Debug, Clone)]
pub struct Photo {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Photo {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(Path::new(&file_name));
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    pub async fn load(path: &Path) -> Result<Self, CliError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| CliError::PhotoRead {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo.jpg".to_string());
        Ok(Self::from_bytes(file_name, bytes))
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        _ => "image/jpeg",
    }
}

/// The photo fixtures the scenarios upload, resolved against an images directory.
#[derive(Debug, Clone)]
pub struct PhotoFixtures {
    dir: PathBuf,
}

impl PhotoFixtures {
    pub const BULLDOG: &'static str = "bulldog.jpg";
    pub const CAT: &'static str = "cat.jpg";
    pub const LAPA: &'static str = "lapa.jpg";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub async fn load(&self, name: &str) -> Result<Photo, CliError> {
        Photo::load(&self.path(name)).await
    }
}
