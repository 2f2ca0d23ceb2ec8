//! In-memory collaborators for engine tests

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::{ActivityType, CompletionDispatcher, TimerKind};
use crate::{
    services::{
        ActivityLogger, DashboardStats, DeliveryPreferences, NotificationEntry,
        NotificationGateway, NotificationLog, NotificationRecord, PermissionState, Session,
        SessionPatch, StoreError, StoreResult,
    },
    state::Diagnostics,
};

fn io_failure() -> StoreError {
    StoreError::Invalid("simulated failure".to_string())
}

#[derive(Default)]
pub struct RecordingGateway {
    delivered: Mutex<Vec<(String, TimerKind)>>,
    preferences: Mutex<Option<DeliveryPreferences>>,
}

impl RecordingGateway {
    pub fn delivered(&self) -> Vec<(String, TimerKind)> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn count(&self, kind: TimerKind) -> usize {
        self.delivered().iter().filter(|(_, k)| *k == kind).count()
    }

    pub fn preferences(&self) -> Option<DeliveryPreferences> {
        *self.preferences.lock().unwrap()
    }
}

impl NotificationGateway for RecordingGateway {
    fn permission_state(&self) -> PermissionState {
        PermissionState::Granted
    }

    fn request_permission(&self) -> PermissionState {
        PermissionState::Granted
    }

    fn deliver(&self, title: &str, _message: &str, kind: TimerKind) {
        self.delivered.lock().unwrap().push((title.to_string(), kind));
    }

    fn recent(&self) -> Vec<NotificationEntry> {
        Vec::new()
    }

    fn mark_read(&self, _id: &str) -> bool {
        false
    }

    fn clear(&self) {
        self.delivered.lock().unwrap().clear();
    }

    fn set_preferences(&self, preferences: DeliveryPreferences) {
        *self.preferences.lock().unwrap() = Some(preferences);
    }
}

#[derive(Default)]
pub struct RecordingLog {
    recorded: Mutex<Vec<TimerKind>>,
    failing: AtomicBool,
}

impl RecordingLog {
    pub fn recorded(&self) -> Vec<TimerKind> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotificationLog for RecordingLog {
    async fn record(
        &self,
        kind: TimerKind,
        title: &str,
        message: &str,
    ) -> StoreResult<NotificationRecord> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io_failure());
        }
        self.recorded.lock().unwrap().push(kind);
        Ok(NotificationRecord {
            id: "fake".to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            is_read: false,
        })
    }

    async fn list(&self, _limit: usize) -> Vec<NotificationRecord> {
        Vec::new()
    }

    async fn mark_read(&self, _id: &str) -> StoreResult<bool> {
        Ok(false)
    }

    async fn clear_older_than(&self, _days: u32) -> StoreResult<usize> {
        Ok(0)
    }
}

#[derive(Default)]
pub struct RecordingActivity {
    session_id: Option<String>,
    logged: Mutex<Vec<(String, ActivityType)>>,
    failing: AtomicBool,
}

impl RecordingActivity {
    pub fn logged(&self) -> Vec<(String, ActivityType)> {
        self.logged.lock().unwrap().clone()
    }

    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ActivityLogger for RecordingActivity {
    async fn current_session_id(&self) -> StoreResult<Option<String>> {
        Ok(self.session_id.clone())
    }

    async fn log_activity(&self, session_id: &str, activity: ActivityType) -> StoreResult<Session> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io_failure());
        }
        self.logged
            .lock()
            .unwrap()
            .push((session_id.to_string(), activity));
        Ok(Session::new(Utc::now().date_naive()))
    }

    async fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::default()
    }

    async fn today_session(&self) -> StoreResult<Session> {
        Ok(Session::new(Utc::now().date_naive()))
    }

    async fn history(&self, _limit: usize) -> Vec<Session> {
        Vec::new()
    }

    async fn update_session(&self, _session_id: &str, _patch: &SessionPatch) -> StoreResult<Session> {
        Err(io_failure())
    }

    async fn sessions_between(&self, _from: NaiveDate, _to: NaiveDate) -> Vec<Session> {
        Vec::new()
    }
}

/// A full set of fakes wired into one dispatcher
pub struct Fakes {
    pub gateway: Arc<RecordingGateway>,
    pub log: Arc<RecordingLog>,
    pub activity: Arc<RecordingActivity>,
    pub diagnostics: Arc<Diagnostics>,
}

impl Fakes {
    pub fn with_session(session_id: &str) -> Self {
        Self::build(Some(session_id.to_string()))
    }

    pub fn without_session() -> Self {
        Self::build(None)
    }

    fn build(session_id: Option<String>) -> Self {
        Self {
            gateway: Arc::new(RecordingGateway::default()),
            log: Arc::new(RecordingLog::default()),
            activity: Arc::new(RecordingActivity {
                session_id,
                ..Default::default()
            }),
            diagnostics: Arc::new(Diagnostics::new()),
        }
    }

    pub fn dispatcher(&self) -> CompletionDispatcher {
        CompletionDispatcher::new(
            self.gateway.clone(),
            self.log.clone(),
            self.activity.clone(),
            self.diagnostics.clone(),
        )
    }
}
