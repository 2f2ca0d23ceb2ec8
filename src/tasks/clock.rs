//! Shared one-second clock driving the reminder engine

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Period of one engine tick
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to the running clock task
pub struct Clock {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Clock {
    /// Start ticking `state` once per period.
    ///
    /// The first tick happens one full period after the call. Ticks run one
    /// at a time and periods missed while a tick was running are skipped.
    pub fn spawn(state: Arc<AppState>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(clock_task(state, shutdown_rx));
        Self { shutdown_tx, task }
    }

    /// Stop the clock and wait for the task to finish. No tick runs after
    /// this returns; the last published board is left as it was.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!("Clock task ended abnormally: {}", e);
        }
        info!("Clock stopped");
    }
}

async fn clock_task(state: Arc<AppState>, mut shutdown_rx: watch::Receiver<bool>) {
    info!("Starting reminder clock");

    let mut ticker = interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;

            _ = shutdown_rx.changed() => break,
            _ = ticker.tick() => {
                match state.tick() {
                    Ok(completions) => {
                        for completion in completions {
                            debug!("{} completed", completion.kind);
                        }
                    }
                    Err(e) => error!("Clock tick failed: {}", e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::TimerKind,
        services::{DesktopGateway, FileNotificationLog, FileSessionLog, FileSettingsStore},
        state::{Diagnostics, Services, Settings},
    };
    use tempfile::TempDir;

    async fn app_state(dir: &TempDir) -> Arc<AppState> {
        let services = Services {
            settings_store: Arc::new(FileSettingsStore::new(dir.path())),
            notification_log: Arc::new(FileNotificationLog::open(dir.path()).await.unwrap()),
            sessions: Arc::new(FileSessionLog::open(dir.path()).await.unwrap()),
            gateway: Arc::new(DesktopGateway::headless(10)),
            diagnostics: Arc::new(Diagnostics::new()),
        };
        Arc::new(AppState::new(Settings::default(), services, 8001, "127.0.0.1".into()))
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second() {
        let dir = TempDir::new().unwrap();
        let state = app_state(&dir).await;
        state.start_timer(TimerKind::Eye).unwrap();

        let clock = Clock::spawn(Arc::clone(&state));
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        clock.shutdown().await;

        assert_eq!(
            state.get_timers().unwrap().get(TimerKind::Eye).remaining_seconds,
            1190
        );
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_after_shutdown() {
        let dir = TempDir::new().unwrap();
        let state = app_state(&dir).await;
        state.start_all().unwrap();

        let clock = Clock::spawn(Arc::clone(&state));
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        clock.shutdown().await;
        let board = state.get_timers().unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(Arc::ptr_eq(&board, &state.get_timers().unwrap()));
        assert_eq!(board.get(TimerKind::Posture).remaining_seconds, 177);
        assert!(board.all_active());
    }
}
