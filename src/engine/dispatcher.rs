//! Side effects fired when a reminder timer expires

use std::sync::Arc;

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, error, info, warn};

use super::TimerKind;
use crate::{
    services::{ActivityLogger, DeliveryPreferences, NotificationGateway, NotificationLog},
    state::{Diagnostics, Settings},
};

/// Fires the notification and logging side effects for an expired timer.
///
/// Delivery goes straight to the gateway, which only queues work. Logging
/// runs on a spawned task with its own error boundary: failures are logged
/// and recorded in diagnostics, never returned to the caller.
#[derive(Clone)]
pub struct CompletionDispatcher {
    gateway: Arc<dyn NotificationGateway>,
    notification_log: Arc<dyn NotificationLog>,
    activity: Arc<dyn ActivityLogger>,
    diagnostics: Arc<Diagnostics>,
}

impl CompletionDispatcher {
    pub fn new(
        gateway: Arc<dyn NotificationGateway>,
        notification_log: Arc<dyn NotificationLog>,
        activity: Arc<dyn ActivityLogger>,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        Self {
            gateway,
            notification_log,
            activity,
            diagnostics,
        }
    }

    pub fn gateway(&self) -> &Arc<dyn NotificationGateway> {
        &self.gateway
    }

    /// Push the delivery-related settings flags down to the gateway
    pub fn sync_preferences(&self, settings: &Settings) {
        self.gateway.set_preferences(DeliveryPreferences {
            notifications_enabled: settings.notifications_enabled,
            sound_enabled: settings.sound_enabled,
        });
    }

    /// Fire the side effects for one expiry.
    ///
    /// Returns the logging task so callers that care (tests, mostly) can
    /// await it; dropping the handle leaves the task running. Without an
    /// async runtime the logging is skipped, delivery still happens.
    pub fn dispatch(&self, kind: TimerKind) -> Option<JoinHandle<()>> {
        let descriptor = kind.descriptor();
        info!("{} timer expired, sending reminder", kind);

        self.gateway
            .deliver(descriptor.title, descriptor.message, kind);

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!("No async runtime, skipping {} completion logging", kind);
                return None;
            }
        };

        let notification_log = Arc::clone(&self.notification_log);
        let activity = Arc::clone(&self.activity);
        let diagnostics = Arc::clone(&self.diagnostics);

        Some(runtime.spawn(async move {
            if let Err(e) = notification_log
                .record(kind, descriptor.title, descriptor.message)
                .await
            {
                error!("Failed to log {} notification: {}", kind, e);
                diagnostics.record("notifications", format!("Failed to log {} notification: {}", kind, e));
            }

            match activity.current_session_id().await {
                Ok(Some(session_id)) => {
                    if let Err(e) = activity.log_activity(&session_id, descriptor.activity).await {
                        error!("Failed to log {}: {}", descriptor.activity, e);
                        diagnostics.record("activity", format!("Failed to log {}: {}", descriptor.activity, e));
                    }
                }
                Ok(None) => debug!("No active session, {} not logged", descriptor.activity),
                Err(e) => {
                    error!("Failed to resolve current session: {}", e);
                    diagnostics.record("activity", format!("Failed to resolve current session: {}", e));
                }
            }
        }))
    }
}
