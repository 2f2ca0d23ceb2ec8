//! External collaborators of the reminder engine
//!
//! Each collaborator is a trait the engine talks to, paired with the local
//! implementation the daemon ships: JSON files under the data directory for
//! persistence and desktop notifications for delivery.

pub mod exercises;
pub mod json_store;
pub mod notification_log;
pub mod notifications;
pub mod sessions;
pub mod settings_store;
pub mod stats;

// Re-export main types
pub use json_store::{StoreError, StoreResult};
pub use notification_log::{FileNotificationLog, NotificationLog, NotificationRecord};
pub use notifications::{
    DeliveryPreferences, DesktopGateway, NotificationEntry, NotificationGateway, PermissionState,
};
pub use sessions::{ActivityLogger, FileSessionLog, Session, SessionPatch};
pub use settings_store::{FileSettingsStore, SettingsStore};
pub use stats::DashboardStats;
