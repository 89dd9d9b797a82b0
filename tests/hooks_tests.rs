mod common;

use axum::{routing::get, Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_test::assert_ok;
use uuid::Uuid;

use common::{candidate_session, hooks_for, session_with_role, spawn_backend};
use placement_client::hooks::QueryStatus;
use placement_client::models::{CandidateProfile, NewTask, NotificationSettings, TaskStatus};
use placement_client::session::Role;

fn counting_tasks_backend(hits: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/applications/:id/tasks",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({
                        "status_code": 200,
                        "data": [{"title": "Upload documents", "status": "todo"}]
                    }))
                }
            })
            .post(|Json(body): Json<serde_json::Value>| async move {
                Json(json!({
                    "status_code": 201,
                    "data": {"title": body["title"], "status": "todo"}
                }))
            }),
        )
        .route(
            "/tasks/:id",
            axum::routing::patch(|| async { Json(json!({"status_code": 500, "message": "Task is locked"})) }),
        )
}

#[tokio::test]
async fn test_query_is_cached_until_mutation_invalidates() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_backend(counting_tasks_backend(hits.clone())).await;
    let hooks = hooks_for(addr, Some(candidate_session()));
    let application = Uuid::new_v4();

    let first = hooks.candidate_tasks(Some(application)).await;
    assert_eq!(first.status, QueryStatus::Success);
    assert_eq!(first.data.unwrap().len(), 1);

    let _ = hooks.candidate_tasks(Some(application)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let task = NewTask {
        title: "Sign contract".to_string(),
        description: None,
        due_date: None,
    };
    let created = assert_ok!(hooks.create_task(application, &task).await);
    assert_eq!(created.title, "Sign contract");

    let _ = hooks.candidate_tasks(Some(application)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache_fresh() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_backend(counting_tasks_backend(hits.clone())).await;
    let hooks = hooks_for(addr, Some(candidate_session()));
    let application = Uuid::new_v4();

    let _ = hooks.candidate_tasks(Some(application)).await;

    let err = hooks
        .update_task_status(application, Uuid::new_v4(), TaskStatus::Done)
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Task is locked");

    let _ = hooks.candidate_tasks(Some(application)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disabled_query_makes_no_call() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_backend(counting_tasks_backend(hits.clone())).await;
    let hooks = hooks_for(addr, None);

    let state = hooks.candidate_tasks(None).await;
    assert_eq!(state.status, QueryStatus::Idle);
    assert!(state.data.is_none());

    let selected = hooks.selected_candidate_tasks().await;
    assert_eq!(selected.status, QueryStatus::Idle);

    // Signed out: notifications need a user
    let notifications = hooks.notifications().await;
    assert_eq!(notifications.status, QueryStatus::Idle);

    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_error_is_reported_in_state() {
    let app = Router::new().route(
        "/notifications",
        get(|| async { Json(json!({"status_code": 503, "message": "Maintenance"})) }),
    );
    let addr = spawn_backend(app).await;
    let hooks = hooks_for(addr, Some(candidate_session()));

    let state = hooks.notifications().await;
    assert_eq!(state.status, QueryStatus::Error);
    assert_eq!(state.error.as_deref(), Some("Maintenance"));

    let count = hooks.unread_notification_count().await;
    assert_eq!(count.status, QueryStatus::Error);
}

#[tokio::test]
async fn test_mark_read_refreshes_unread_count() {
    let read = Arc::new(AtomicUsize::new(0));
    let listing = read.clone();
    let app = Router::new()
        .route(
            "/notifications",
            get(move || {
                let read = listing.clone();
                async move {
                    let is_read = read.load(Ordering::SeqCst) > 0;
                    Json(json!({
                        "status_code": 200,
                        "data": [{"title": "Offer received", "read": is_read}]
                    }))
                }
            }),
        )
        .route(
            "/notifications/:id/read",
            axum::routing::patch(move || {
                let read = read.clone();
                async move {
                    read.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"status_code": 200}))
                }
            }),
        );
    let addr = spawn_backend(app).await;
    let hooks = hooks_for(addr, Some(candidate_session()));

    assert_eq!(hooks.unread_notification_count().await.data, Some(1));
    assert_ok!(hooks.mark_notification_read(Uuid::new_v4()).await);
    assert_eq!(hooks.unread_notification_count().await.data, Some(0));
}

#[tokio::test]
async fn test_selection_drives_scoped_queries() {
    let app = Router::new().route(
        "/internships/:id",
        get(|| async { Json(json!({"status_code": 200, "data": {"title": "Data intern"}})) }),
    );
    let addr = spawn_backend(app).await;
    let hooks = hooks_for(addr, None);

    assert_eq!(hooks.selected_internship().await.status, QueryStatus::Idle);

    hooks.selection().select_internship(Some(Uuid::new_v4()));
    let state = hooks.selected_internship().await;
    assert_eq!(state.status, QueryStatus::Success);
    assert_eq!(state.data.unwrap().title, "Data intern");
}

#[tokio::test]
async fn test_updates_fall_back_to_submitted_value_without_data() {
    let app = Router::new()
        .route(
            "/settings/notifications",
            axum::routing::patch(|| async { Json(json!({"status_code": 200, "data": null})) }),
        )
        .route(
            "/candidates/:id",
            axum::routing::put(|| async { Json(json!({"status_code": 200, "message": "Saved"})) }),
        );
    let addr = spawn_backend(app).await;
    let hooks = hooks_for(addr, Some(candidate_session()));

    let settings = NotificationSettings {
        push_enabled: false,
        marketing: true,
        ..NotificationSettings::default()
    };
    let saved = assert_ok!(hooks.update_notification_settings(&settings).await);
    assert_eq!(saved, settings);

    let candidate = Uuid::new_v4();
    let profile = CandidateProfile {
        id: candidate,
        full_name: "Ana Candidate".to_string(),
        skills: vec!["rust".to_string()],
        ..CandidateProfile::default()
    };
    let updated = assert_ok!(hooks.update_profile(candidate, &profile).await);
    assert_eq!(updated, profile);
}

fn dashboards_backend(hits: Arc<AtomicUsize>) -> Router {
    let unit_hits = hits.clone();
    Router::new()
        .route(
            "/dashboard/candidate/:id",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"status_code": 200, "data": {"total_applications": 3, "offers": 1}}))
                }
            }),
        )
        .route(
            "/dashboard/unit/:id",
            get(move || {
                let hits = unit_hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"status_code": 200, "data": {"open_internships": 2, "hired": 4}}))
                }
            }),
        )
}

#[tokio::test]
async fn test_dashboards_are_gated_by_role() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_backend(dashboards_backend(hits.clone())).await;

    let unit = hooks_for(addr, Some(session_with_role(Role::Unit)));
    assert_eq!(unit.candidate_dashboard().await.status, QueryStatus::Idle);
    let dashboard = unit.unit_dashboard().await;
    assert_eq!(dashboard.status, QueryStatus::Success);
    assert_eq!(dashboard.data.unwrap().hired, 4);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let candidate = hooks_for(addr, Some(candidate_session()));
    assert_eq!(candidate.unit_dashboard().await.status, QueryStatus::Idle);
    let dashboard = candidate.candidate_dashboard().await;
    assert_eq!(dashboard.data.unwrap().total_applications, 3);
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    let admin = hooks_for(addr, Some(session_with_role(Role::Admin)));
    assert_eq!(admin.candidate_dashboard().await.status, QueryStatus::Idle);
    assert_eq!(admin.unit_dashboard().await.status, QueryStatus::Idle);

    let signed_out = hooks_for(addr, None);
    assert_eq!(signed_out.candidate_dashboard().await.status, QueryStatus::Idle);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_sign_out_drops_cache_and_selection() {
    let hits = Arc::new(AtomicUsize::new(0));
    let addr = spawn_backend(counting_tasks_backend(hits.clone())).await;
    let hooks = hooks_for(addr, Some(candidate_session()));
    let application = Uuid::new_v4();

    hooks.selection().select_internship(Some(Uuid::new_v4()));
    hooks.selection().select_application(Some(application));
    let _ = hooks.selected_candidate_tasks().await;
    assert!(!hooks.cache().is_empty().await);

    hooks.sign_out().await;

    assert!(hooks.session().current().is_none());
    assert_eq!(hooks.selection().current(), Default::default());
    assert!(hooks.cache().is_empty().await);

    // Same user again: nothing is served from before the sign-out
    let _ = hooks.candidate_tasks(Some(application)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_watched_notifications_settle_after_loading() {
    let app = Router::new().route(
        "/notifications",
        get(|| async {
            Json(json!({"status_code": 200, "data": {"notifications": [{"title": "Interview", "read": false}]}}))
        }),
    );
    let addr = spawn_backend(app).await;
    let hooks = hooks_for(addr, Some(candidate_session()));

    let mut receiver = hooks.watch_notifications();
    let settled = receiver
        .wait_for(|state| !state.is_loading())
        .await
        .unwrap()
        .clone();
    assert_eq!(settled.status, QueryStatus::Success);
    assert_eq!(settled.data.unwrap()[0].title, "Interview");

    // The background fetch filled the cache for the plain query too
    assert_eq!(hooks.unread_notification_count().await.data, Some(1));

    let signed_out = hooks_for(addr, None);
    let receiver = signed_out.watch_notifications();
    assert_eq!(receiver.borrow().status, QueryStatus::Idle);
}
