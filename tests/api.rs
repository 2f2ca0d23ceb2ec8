use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use healthguard::{
    api::create_router,
    services::{DesktopGateway, FileNotificationLog, FileSessionLog, FileSettingsStore},
    state::{AppState, Diagnostics, Services, Settings},
    TimerKind,
};

struct TestApp {
    _dir: TempDir,
    state: Arc<AppState>,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let services = Services {
            settings_store: Arc::new(FileSettingsStore::new(dir.path())),
            notification_log: Arc::new(FileNotificationLog::open(dir.path()).await.unwrap()),
            sessions: Arc::new(FileSessionLog::open(dir.path()).await.unwrap()),
            gateway: Arc::new(DesktopGateway::headless(10)),
            diagnostics: Arc::new(Diagnostics::new()),
        };
        let state = Arc::new(AppState::new(
            Settings::default(),
            services,
            8001,
            "127.0.0.1".to_string(),
        ));
        let router = create_router(Arc::clone(&state));
        Self {
            _dir: dir,
            state,
            router,
        }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, None).await
    }
}

#[tokio::test]
async fn health_check() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn timers_start_paused_with_default_intervals() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/timers").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let timers = &body["data"]["timers"];
    assert_eq!(timers["posture"]["remaining_seconds"], 180);
    assert_eq!(timers["eye"]["remaining_seconds"], 1200);
    assert_eq!(timers["stretch"]["remaining_seconds"], 3600);
    assert_eq!(timers["workSession"]["remaining_seconds"], 1500);
    assert_eq!(body["data"]["any_active"], false);
}

#[tokio::test]
async fn timer_control_round_trip() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/timers/eye/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["timers"]["eye"]["is_active"], true);
    assert_eq!(body["data"]["timers"]["posture"]["is_active"], false);

    app.state.tick().unwrap();
    app.state.tick().unwrap();

    let (_, body) = app.post("/api/timers/eye/pause").await;
    assert_eq!(body["data"]["timers"]["eye"]["remaining_seconds"], 1198);
    assert_eq!(body["data"]["timers"]["eye"]["is_active"], false);

    let (_, body) = app.post("/api/timers/eye/reset").await;
    assert_eq!(body["data"]["timers"]["eye"]["remaining_seconds"], 1200);

    let (_, body) = app.post("/api/timers/start-all").await;
    assert_eq!(body["data"]["all_active"], true);
    let (_, body) = app.post("/api/timers/pause-all").await;
    assert_eq!(body["data"]["any_active"], false);
}

#[tokio::test]
async fn unknown_timer_kind_is_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app.post("/api/timers/nap/start").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "TIMER_NOT_FOUND");
}

#[tokio::test]
async fn settings_update_snaps_running_timer() {
    let app = TestApp::new().await;
    app.post("/api/timers/posture/start").await;
    for _ in 0..60 {
        app.state.tick().unwrap();
    }

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/user/settings",
            Some(json!({ "posture_reminder_interval": 5 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["posture_reminder_interval"], 5);
    assert_eq!(body["data"]["eye_exercise_interval"], 20);

    let posture = app.state.get_timers().unwrap().get(TimerKind::Posture);
    assert_eq!(posture.remaining_seconds, 300);
    assert!(posture.is_active);

    let (_, body) = app.get("/api/user/settings").await;
    assert_eq!(body["data"]["posture_reminder_interval"], 5);
}

#[tokio::test]
async fn settings_read_can_be_sent_back_as_an_update() {
    let app = TestApp::new().await;
    let (_, body) = app.get("/api/user/settings").await;
    let mut settings = body["data"].clone();
    assert_eq!(settings["work_hours_start"], "09:00");
    assert_eq!(settings["work_hours_end"], "17:00");

    settings["work_hours_start"] = json!("08:00");
    settings["work_hours_end"] = json!("16:00");
    let (status, body) = app
        .request(Method::PUT, "/api/user/settings", Some(settings))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["work_hours_start"], "08:00");
    assert_eq!(body["data"]["work_hours_end"], "16:00");

    let stored = app.state.get_settings().unwrap();
    assert_eq!(stored.work_hours.start, "08:00");
    assert_eq!(stored.work_hours.end, "16:00");
}

#[tokio::test]
async fn unknown_settings_fields_are_rejected() {
    let app = TestApp::new().await;
    let (status, _) = app
        .request(
            Method::PUT,
            "/api/user/settings",
            Some(json!({ "work_hours": { "start": "08:00", "end": "16:00" } })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.state.get_settings().unwrap(), Settings::default());
}

#[tokio::test]
async fn invalid_settings_are_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app
        .request(
            Method::PUT,
            "/api/user/settings",
            Some(json!({ "eye_exercise_interval": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "SETTINGS_UPDATE_ERROR");

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/user/settings",
            Some(json!({ "work_hours_start": "9am" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expiry_lands_in_recent_list_history_and_session() {
    let app = TestApp::new().await;
    app.request(
        Method::PUT,
        "/api/user/settings",
        Some(json!({ "posture_reminder_interval": 1 })),
    )
    .await;
    app.post("/api/timers/posture/start").await;

    let mut side_effects = Vec::new();
    for _ in 0..60 {
        for completion in app.state.tick().unwrap() {
            side_effects.extend(completion.side_effects);
        }
    }
    assert_eq!(side_effects.len(), 1);
    for task in side_effects {
        task.await.unwrap();
    }

    let (_, body) = app.get("/api/notifications/recent").await;
    let recent = body["data"]["notifications"].as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["title"], "Posture Check! 🚨");
    assert_eq!(recent[0]["kind"], "posture");

    let (_, body) = app.get("/api/notifications").await;
    let history = body["data"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["type"], "posture");
    let id = history[0]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .request(Method::PUT, &format!("/api/notifications/{}/read", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get("/api/stats/dashboard").await;
    assert_eq!(body["data"]["today_posture_reminders"], 1);

    let (_, body) = app.get("/api/timers").await;
    assert_eq!(body["data"]["timers"]["posture"]["remaining_seconds"], 60);
    assert_eq!(body["data"]["timers"]["posture"]["is_active"], true);
}

#[tokio::test]
async fn sessions_and_activity_logging() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/sessions/today").await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(&format!("/api/sessions/{}/activity?activity_type=eye_exercise", id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["eye_exercises_completed"], 1);

    let (status, body) = app
        .post(&format!("/api/sessions/{}/activity?activity_type=nap", id))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ACTIVITY_LOG_ERROR");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/sessions/{}", id),
            Some(json!({ "work_time": 90 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["work_time"], 90);

    let (status, body) = app
        .request(Method::PUT, "/api/sessions/missing", Some(json!({ "work_time": 1 })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SESSION_UPDATE_ERROR");

    let (_, body) = app.get("/api/stats/weekly").await;
    assert_eq!(body["data"]["total_work_time"], 90);
    assert_eq!(body["data"]["active_days"], 1);

    let (_, body) = app.get("/api/stats/dashboard").await;
    assert_eq!(body["data"]["current_streak"], 1);
    assert_eq!(body["data"]["active_session_id"], id.as_str());

    let (_, body) = app.get("/api/stats/trends").await;
    assert_eq!(body["data"]["daily_trends"].as_array().unwrap().len(), 15);
}

#[tokio::test]
async fn headless_permission_is_denied() {
    let app = TestApp::new().await;
    let (_, body) = app.get("/api/notifications/permission").await;
    assert_eq!(body["data"]["permission"], "unset");

    let (_, body) = app.post("/api/notifications/permission").await;
    assert_eq!(body["data"]["permission"], "denied");
}

#[tokio::test]
async fn exercise_catalog() {
    let app = TestApp::new().await;
    let (_, body) = app.get("/api/exercises").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 6);

    let (status, body) = app.get("/api/exercises/eye").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = app.get("/api/exercises/nap").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_reports_last_action() {
    let app = TestApp::new().await;
    app.post("/api/timers/stretch/start").await;

    let (status, body) = app.get("/api/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["last_action"], "stretch-start");
    assert_eq!(body["data"]["timers"]["stretch"]["is_active"], true);
    assert!(body["data"]["diagnostics"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn weekly_stats_survive_huge_work_times() {
    let app = TestApp::new().await;
    let (_, body) = app.get("/api/sessions/today").await;
    let first = body["data"]["id"].as_str().unwrap().to_string();
    app.request(
        Method::PUT,
        &format!("/api/sessions/{}", first),
        Some(json!({ "work_time": u32::MAX, "is_active": false })),
    )
    .await;

    let (_, body) = app.get("/api/sessions/today").await;
    let second = body["data"]["id"].as_str().unwrap().to_string();
    assert_ne!(first, second);
    app.request(
        Method::PUT,
        &format!("/api/sessions/{}", second),
        Some(json!({ "work_time": 10 })),
    )
    .await;

    let (status, body) = app.get("/api/stats/weekly").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_work_time"], u32::MAX);
    assert_eq!(body["data"]["active_days"], 2);
}

#[tokio::test]
async fn profile_carries_current_settings() {
    let app = TestApp::new().await;
    app.request(
        Method::PUT,
        "/api/user/settings",
        Some(json!({ "eye_exercise_interval": 25 })),
    )
    .await;

    let (status, body) = app.get("/api/user/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user_id"], "demo-user");
    assert_eq!(body["data"]["email"], "demo@healthguard.app");
    assert_eq!(body["data"]["settings"]["eye_exercise_interval"], 25);
    assert!(body["data"]["last_active"].is_string());
}

#[tokio::test]
async fn api_root_reports_running() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["message"], "HealthGuard API is running!");
}
