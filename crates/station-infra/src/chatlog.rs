//! Append-only JSONL chat log.
//!
//! One JSON object per line, appended under a mutex. Unlike the agent
//! registry, history is never rewritten -- the file only grows, and reads
//! degrade to an empty history if it is missing or a line is damaged.

use std::path::{Path, PathBuf};

use station_core::repository::chat::ChatLogStore;
use station_types::chat::ChatMessage;
use station_types::error::ChatLogError;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// File-backed implementation of `ChatLogStore`.
pub struct JsonlChatLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlChatLog {
    /// Open the log at `path`, creating parent directories.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, ChatLogError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChatLogStore for JsonlChatLog {
    async fn append(&self, message: &ChatMessage) -> Result<(), ChatLogError> {
        let mut line =
            serde_json::to_vec(message).map_err(|e| ChatLogError::Encode(e.to_string()))?;
        line.push(b'\n');

        let _guard = self.lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    async fn recent(&self, sid: &str, limit: usize) -> Result<Vec<ChatMessage>, ChatLogError> {
        let _guard = self.lock.lock().await;
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "chat log unreadable, returning empty history");
                return Ok(Vec::new());
            }
        };

        let matching: Vec<ChatMessage> = content
            .lines()
            .filter_map(|line| match serde_json::from_str::<ChatMessage>(line) {
                Ok(message) => Some(message),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping damaged chat log line");
                    None
                }
            })
            .filter(|message| message.sid == sid)
            .collect();

        let skip = matching.len().saturating_sub(limit);
        Ok(matching.into_iter().skip(skip).collect())
    }
}
