//! Persistent history of fired notifications

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use super::json_store::{JsonFile, StoreResult};
use crate::engine::TimerKind;

/// Oldest records are dropped beyond this many
pub const MAX_RECORDS: usize = 1_000;

/// A logged notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TimerKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

/// Best-effort record of every notification the engine fires
#[async_trait]
pub trait NotificationLog: Send + Sync {
    async fn record(&self, kind: TimerKind, title: &str, message: &str)
        -> StoreResult<NotificationRecord>;

    /// Newest records first
    async fn list(&self, limit: usize) -> Vec<NotificationRecord>;

    /// Returns false when no record has this id
    async fn mark_read(&self, id: &str) -> StoreResult<bool>;

    /// Drop records older than `days`; returns how many were removed
    async fn clear_older_than(&self, days: u32) -> StoreResult<usize>;
}

/// Notification history kept in `notifications.json`
#[derive(Debug)]
pub struct FileNotificationLog {
    file: JsonFile<Vec<NotificationRecord>>,
    /// Oldest first. Held across saves so writes land in order.
    records: Mutex<Vec<NotificationRecord>>,
}

impl FileNotificationLog {
    pub async fn open(data_dir: &Path) -> StoreResult<Self> {
        let file: JsonFile<Vec<NotificationRecord>> = JsonFile::new(data_dir.join("notifications.json"));
        let records = file.load().await?.unwrap_or_default();
        info!("Loaded {} notification records", records.len());
        Ok(Self {
            file,
            records: Mutex::new(records),
        })
    }
}

#[async_trait]
impl NotificationLog for FileNotificationLog {
    async fn record(
        &self,
        kind: TimerKind,
        title: &str,
        message: &str,
    ) -> StoreResult<NotificationRecord> {
        let record = NotificationRecord {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            is_read: false,
        };

        let mut records = self.records.lock().await;
        records.push(record.clone());
        if records.len() > MAX_RECORDS {
            let excess = records.len() - MAX_RECORDS;
            records.drain(..excess);
        }
        self.file.save(&records).await?;
        Ok(record)
    }

    async fn list(&self, limit: usize) -> Vec<NotificationRecord> {
        let records = self.records.lock().await;
        records.iter().rev().take(limit).cloned().collect()
    }

    async fn mark_read(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.records.lock().await;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(false);
        };
        record.is_read = true;
        self.file.save(&records).await?;
        Ok(true)
    }

    async fn clear_older_than(&self, days: u32) -> StoreResult<usize> {
        let cutoff = Utc::now() - Duration::days(i64::from(days));
        let mut records = self.records.lock().await;
        let initial_count = records.len();
        records.retain(|record| record.timestamp >= cutoff);
        let removed = initial_count - records.len();
        if removed > 0 {
            self.file.save(&records).await?;
            info!("Cleared {} notifications older than {} days", removed, days);
        }
        Ok(removed)
    }
}
