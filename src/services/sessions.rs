//! Daily work sessions and activity logging

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use super::{
    json_store::{JsonFile, StoreError, StoreResult},
    stats::{self, DashboardStats},
};
use crate::engine::ActivityType;

/// One calendar day of work and the reminders acted on during it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes
    pub work_time: u32,
    pub breaks_taken: u32,
    pub posture_reminders: u32,
    pub eye_exercises_completed: u32,
    pub stretches_completed: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            date,
            start_time: now,
            end_time: None,
            work_time: 0,
            breaks_taken: 0,
            posture_reminders: 0,
            eye_exercises_completed: 0,
            stretches_completed: 0,
            is_active: true,
            created_at: now,
        }
    }

    fn counter_mut(&mut self, activity: ActivityType) -> &mut u32 {
        match activity {
            ActivityType::PostureReminder => &mut self.posture_reminders,
            ActivityType::EyeExercise => &mut self.eye_exercises_completed,
            ActivityType::Stretch => &mut self.stretches_completed,
            ActivityType::Break => &mut self.breaks_taken,
        }
    }

    /// Bump the counter for an activity
    pub fn record(&mut self, activity: ActivityType) {
        let counter = self.counter_mut(activity);
        *counter = counter.saturating_add(1);
    }

    /// Apply a manual update. Closing a session stamps its end time.
    pub fn apply(&mut self, patch: &SessionPatch) {
        if let Some(value) = patch.work_time {
            self.work_time = value;
        }
        if let Some(value) = patch.breaks_taken {
            self.breaks_taken = value;
        }
        if let Some(value) = patch.posture_reminders {
            self.posture_reminders = value;
        }
        if let Some(value) = patch.eye_exercises_completed {
            self.eye_exercises_completed = value;
        }
        if let Some(value) = patch.stretches_completed {
            self.stretches_completed = value;
        }
        if patch.end_time.is_some() {
            self.end_time = patch.end_time;
        }
        if let Some(active) = patch.is_active {
            self.is_active = active;
            if !active {
                self.end_time = Some(Utc::now());
            }
        }
    }
}

/// Manual session update; absent fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPatch {
    pub work_time: Option<u32>,
    pub breaks_taken: Option<u32>,
    pub posture_reminders: Option<u32>,
    pub eye_exercises_completed: Option<u32>,
    pub stretches_completed: Option<u32>,
    pub end_time: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// Persists completion events against the day's work session
#[async_trait]
pub trait ActivityLogger: Send + Sync {
    /// Id of today's active session, if one can be resolved
    async fn current_session_id(&self) -> StoreResult<Option<String>>;

    async fn log_activity(&self, session_id: &str, activity: ActivityType) -> StoreResult<Session>;

    async fn dashboard_stats(&self) -> DashboardStats;

    /// Today's active session, created on first use
    async fn today_session(&self) -> StoreResult<Session>;

    /// Newest sessions first
    async fn history(&self, limit: usize) -> Vec<Session>;

    async fn update_session(&self, session_id: &str, patch: &SessionPatch) -> StoreResult<Session>;

    /// Sessions dated within `from..=to`
    async fn sessions_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<Session>;
}

/// Sessions kept in `sessions.json` under the data directory
#[derive(Debug)]
pub struct FileSessionLog {
    file: JsonFile<Vec<Session>>,
    sessions: Mutex<Vec<Session>>,
}

impl FileSessionLog {
    pub async fn open(data_dir: &Path) -> StoreResult<Self> {
        let file: JsonFile<Vec<Session>> = JsonFile::new(data_dir.join("sessions.json"));
        let sessions = file.load().await?.unwrap_or_default();
        info!("Loaded {} sessions", sessions.len());
        Ok(Self {
            file,
            sessions: Mutex::new(sessions),
        })
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Find or create the active session for `date`; the returned flag says
    /// whether the list changed and needs saving.
    fn ensure_session(sessions: &mut Vec<Session>, date: NaiveDate) -> (Session, bool) {
        if let Some(session) = sessions.iter().find(|s| s.date == date && s.is_active) {
            return (session.clone(), false);
        }
        let session = Session::new(date);
        debug!("Created session {} for {}", session.id, date);
        sessions.push(session.clone());
        (session, true)
    }
}

#[async_trait]
impl ActivityLogger for FileSessionLog {
    async fn current_session_id(&self) -> StoreResult<Option<String>> {
        self.today_session().await.map(|session| Some(session.id))
    }

    async fn log_activity(&self, session_id: &str, activity: ActivityType) -> StoreResult<Session> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| StoreError::NotFound(format!("Session {}", session_id)))?;
        session.record(activity);
        let updated = session.clone();
        self.file.save(&sessions).await?;

        info!("{} logged for session {}", activity.label(), session_id);
        Ok(updated)
    }

    async fn dashboard_stats(&self) -> DashboardStats {
        let sessions = self.sessions.lock().await;
        stats::dashboard(&sessions, Self::today())
    }

    async fn today_session(&self) -> StoreResult<Session> {
        let mut sessions = self.sessions.lock().await;
        let (session, created) = Self::ensure_session(&mut sessions, Self::today());
        if created {
            self.file.save(&sessions).await?;
        }
        Ok(session)
    }

    async fn history(&self, limit: usize) -> Vec<Session> {
        let sessions = self.sessions.lock().await;
        let mut history: Vec<Session> = sessions.clone();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        history.truncate(limit);
        history
    }

    async fn update_session(&self, session_id: &str, patch: &SessionPatch) -> StoreResult<Session> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .iter_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| StoreError::NotFound(format!("Session {}", session_id)))?;
        session.apply(patch);
        let updated = session.clone();
        self.file.save(&sessions).await?;
        Ok(updated)
    }

    async fn sessions_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<Session> {
        let sessions = self.sessions.lock().await;
        sessions
            .iter()
            .filter(|s| s.date >= from && s.date <= to)
            .cloned()
            .collect()
    }
}
