//! Notification delivery and permission management

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use chrono::{DateTime, Utc};
use notify_rust::{Notification, Timeout};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::TimerKind;

/// Default size of the recent-notification list
pub const DEFAULT_HISTORY: usize = 10;

/// How long a desktop popup stays up
const POPUP_TIMEOUT_MS: u32 = 5_000;

/// Whether the user allowed desktop alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Unset,
    Granted,
    Denied,
}

/// A notification as shown in the in-app list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub id: String,
    pub kind: TimerKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Settings flags that shape how alerts are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPreferences {
    pub notifications_enabled: bool,
    pub sound_enabled: bool,
}

impl Default for DeliveryPreferences {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            sound_enabled: true,
        }
    }
}

/// Delivers user-visible alerts.
///
/// `deliver` is called from inside a clock tick, so implementations must
/// return promptly and must not panic; slow work belongs on a spawned task.
pub trait NotificationGateway: Send + Sync {
    fn permission_state(&self) -> PermissionState;

    /// Ask for permission to show desktop alerts
    fn request_permission(&self) -> PermissionState;

    fn deliver(&self, title: &str, message: &str, kind: TimerKind);

    /// Most recent deliveries, newest first
    fn recent(&self) -> Vec<NotificationEntry>;

    /// Mark an entry of the recent list as read; false if unknown
    fn mark_read(&self, id: &str) -> bool;

    fn clear(&self);

    fn set_preferences(&self, preferences: DeliveryPreferences);
}

/// Gateway that shows desktop notifications through the platform
/// notification server and keeps the latest deliveries in memory.
#[derive(Debug)]
pub struct DesktopGateway {
    /// Detected once at startup and never retried
    desktop_available: bool,
    permission: Mutex<PermissionState>,
    preferences: Mutex<DeliveryPreferences>,
    recent: Mutex<VecDeque<NotificationEntry>>,
    capacity: usize,
    warned_no_runtime: AtomicBool,
}

impl DesktopGateway {
    /// Probe the platform for a notification server
    pub fn detect(capacity: usize) -> Self {
        let available = desktop_available();
        if available {
            info!("Desktop notifications available");
        } else {
            warn!("No desktop notification server found, alerts will only be listed in-app");
        }
        Self::with_capability(available, capacity)
    }

    /// Gateway that never shows desktop popups
    pub fn headless(capacity: usize) -> Self {
        info!("Desktop notifications disabled");
        Self::with_capability(false, capacity)
    }

    fn with_capability(desktop_available: bool, capacity: usize) -> Self {
        Self {
            desktop_available,
            permission: Mutex::new(PermissionState::Unset),
            preferences: Mutex::new(DeliveryPreferences::default()),
            recent: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
            warned_no_runtime: AtomicBool::new(false),
        }
    }

    pub fn desktop_available(&self) -> bool {
        self.desktop_available
    }

    fn push_recent(&self, entry: NotificationEntry) {
        if let Ok(mut recent) = self.recent.lock() {
            recent.push_front(entry);
            recent.truncate(self.capacity);
        }
    }

    fn should_popup(&self) -> Option<DeliveryPreferences> {
        if !self.desktop_available || self.permission_state() != PermissionState::Granted {
            return None;
        }
        let preferences = self.preferences.lock().map(|p| *p).ok()?;
        preferences.notifications_enabled.then_some(preferences)
    }

    fn show_popup(&self, title: &str, message: &str, kind: TimerKind, sound: bool) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                if !self.warned_no_runtime.swap(true, Ordering::Relaxed) {
                    warn!("No async runtime, desktop notifications are skipped");
                }
                return;
            }
        };

        let title = title.to_string();
        let message = message.to_string();
        handle.spawn_blocking(move || {
            let mut notification = Notification::new();
            notification
                .summary(&title)
                .body(&message)
                .appname("healthguard")
                .timeout(Timeout::Milliseconds(POPUP_TIMEOUT_MS));
            if sound {
                notification.sound_name("message-new-instant");
            }
            if let Err(e) = notification.show() {
                warn!("Failed to show {} notification: {}", kind, e);
            }
        });
    }
}

impl NotificationGateway for DesktopGateway {
    fn permission_state(&self) -> PermissionState {
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(PermissionState::Unset)
    }

    fn request_permission(&self) -> PermissionState {
        let granted = if self.desktop_available {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        if let Ok(mut permission) = self.permission.lock() {
            *permission = granted;
        }
        info!("Notification permission: {:?}", granted);
        granted
    }

    fn deliver(&self, title: &str, message: &str, kind: TimerKind) {
        self.push_recent(NotificationEntry {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            read: false,
        });

        match self.should_popup() {
            Some(preferences) => self.show_popup(title, message, kind, preferences.sound_enabled),
            None => debug!("Listed {} notification without desktop popup", kind),
        }
    }

    fn recent(&self) -> Vec<NotificationEntry> {
        self.recent
            .lock()
            .map(|recent| recent.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn mark_read(&self, id: &str) -> bool {
        let Ok(mut recent) = self.recent.lock() else {
            return false;
        };
        match recent.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.read = true;
                true
            }
            None => false,
        }
    }

    fn clear(&self) {
        if let Ok(mut recent) = self.recent.lock() {
            recent.clear();
        }
    }

    fn set_preferences(&self, preferences: DeliveryPreferences) {
        if let Ok(mut current) = self.preferences.lock() {
            *current = preferences;
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn desktop_available() -> bool {
    notify_rust::get_server_information().is_ok()
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn desktop_available() -> bool {
    true
}
