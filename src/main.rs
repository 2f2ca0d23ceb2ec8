//! HealthGuard - reminder daemon entry point

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use healthguard::{
    api::create_router,
    config::Config,
    services::{
        DesktopGateway, FileNotificationLog, FileSessionLog, FileSettingsStore,
        NotificationGateway,
    },
    state::{AppState, Diagnostics, Services, Settings},
    tasks::Clock,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "healthguard={},tower_http=info",
            config.log_level()
        ))
        .init();

    let data_dir = config.data_dir();
    info!("Starting healthguard v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, data_dir={}, headless={}",
        config.host,
        config.port,
        data_dir.display(),
        config.headless
    );

    let gateway = if config.headless {
        DesktopGateway::headless(config.history)
    } else {
        let gateway = DesktopGateway::detect(config.history);
        gateway.request_permission();
        gateway
    };

    let services = Services {
        settings_store: Arc::new(FileSettingsStore::new(&data_dir)),
        notification_log: Arc::new(FileNotificationLog::open(&data_dir).await?),
        sessions: Arc::new(FileSessionLog::open(&data_dir).await?),
        gateway: Arc::new(gateway),
        diagnostics: Arc::new(Diagnostics::new()),
    };

    // Create application state and load saved settings into it
    let state = Arc::new(AppState::new(
        Settings::default(),
        services,
        config.port,
        config.host.clone(),
    ));
    let settings = state.restore_settings().await;
    info!("Settings: {:?}", settings);

    if config.start_all {
        if let Err(e) = state.start_all() {
            error!("Failed to start timers: {}", e);
        }
    }

    let clock = Clock::spawn(Arc::clone(&state));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /api/timers                  - Current timers");
    info!("  POST /api/timers/:kind/start      - Start posture|eye|stretch|workSession");
    info!("  POST /api/timers/start-all        - Start every timer");
    info!("  PUT  /api/user/settings           - Update intervals and flags");
    info!("  GET  /api/stats/dashboard         - Today's activity");
    info!("  GET  /api/status                  - Status and diagnostics");
    info!("  GET  /health                      - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    clock.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}
