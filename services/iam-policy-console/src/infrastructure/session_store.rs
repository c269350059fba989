//! 基于文件的会话令牌存储

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cuba_errors::{AppError, AppResult};
use cuba_ports::SessionStore;
use secrecy::{ExposeSecret, Secret};
use tracing::debug;

/// 令牌以纯文本保存在单个文件中
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &str, err: std::io::Error) -> AppError {
        AppError::internal(format!(
            "Failed to {} session file {}: {}",
            action,
            self.path.display(),
            err
        ))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> AppResult<Option<Secret<String>>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Secret::new(token.to_string())))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error("read", e)),
        }
    }

    async fn save(&self, token: &Secret<String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("create directory for", e))?;
        }

        tokio::fs::write(&self.path, token.expose_secret().trim())
            .await
            .map_err(|e| self.io_error("write", e))?;

        debug!(path = %self.path.display(), "Session token saved");
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session token cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error("remove", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("token"));

        assert!(store.load().await.unwrap().is_none());

        store.save(&Secret::new("abc123\n".to_string())).await.unwrap();
        let token = store.load().await.unwrap().unwrap();
        assert_eq!(token.expose_secret(), "abc123");

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // 重复清除不报错
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_file_is_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();

        let store = FileSessionStore::new(path);
        assert!(store.load().await.unwrap().is_none());
    }
}
