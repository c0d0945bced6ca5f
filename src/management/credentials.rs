use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{types::Credentials, warning};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cannot access credential cache: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed credential cache: {0}")]
    Serde(#[from] serde_json::Error),
}

/// File-backed store for the access and refresh token.
///
/// The file is a single JSON object and is rewritten as a whole on every
/// save. There is no locking, the last writer wins.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached credentials, treating any failure as an empty cache.
    pub async fn load(&self) -> Credentials {
        match self.try_load().await {
            Ok(credentials) => credentials,
            Err(e) => {
                warning!(
                    "No usable credential cache at {}, starting empty. Err: {}",
                    self.path.display(),
                    e
                );
                Credentials::default()
            }
        }
    }

    pub async fn try_load(&self) -> Result<Credentials, CacheError> {
        let content = async_fs::read_to_string(&self.path).await?;
        let credentials: Credentials = serde_json::from_str(&content)?;
        Ok(credentials)
    }

    pub async fn save(&self, credentials: &Credentials) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(credentials)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}
