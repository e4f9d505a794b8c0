use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use timetable_client::api::router;
use timetable_client::models::{PeriodLabel, ScheduledSession, SectionLink};
use timetable_client::scheduler::dto::SectionTimetableResponse;
use timetable_client::session::SessionContext;
use timetable_client::state::AppState;

mod support;

use support::{Failure, MockScheduler};

fn timetable() -> SectionTimetableResponse {
    SectionTimetableResponse {
        section: Some("A".to_string()),
        days: Some(vec!["Mon".to_string(), "Tue".to_string()]),
        periods: Some(vec![PeriodLabel::from(1), PeriodLabel::from(2)]),
        timetable: Some(vec![ScheduledSession {
            day: "Tue".to_string(),
            period: PeriodLabel::from(2),
            subject: "Math".to_string(),
            faculty: "Dr. X".to_string(),
            room: "R1".to_string(),
            is_lab: false,
        }]),
    }
}

fn state(mock: MockScheduler) -> (AppState, Arc<SessionContext>) {
    let session = Arc::new(SessionContext::with_token("secret"));
    let state = AppState {
        scheduler: Arc::new(mock),
        session: session.clone(),
    };
    (state, session)
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (state, _) = state(MockScheduler::new());

    let (status, body) = get(state, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["authenticated"], true);
}

#[tokio::test]
async fn test_view_returns_grid_and_summary() {
    let (state, _) = state(MockScheduler::new().with_timetable(timetable()));

    let (status, body) = get(state, "/timetables/7").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["summary"]["total_sessions"], 1);
    assert_eq!(json["summary"]["working_days"], 2);
    assert_eq!(json["summary"]["periods_per_day"], 2);
    assert!(json["grid"]["rows"][0][0].is_null());
    assert_eq!(json["grid"]["rows"][1][1]["subject"], "Math");
}

#[tokio::test]
async fn test_sections_listing() {
    let mut mock = MockScheduler::new();
    mock.sections = vec![SectionLink {
        id: 7,
        display_name: "Semester 1 - A".to_string(),
    }];
    let (state, _) = state(mock);

    let (status, body) = get(state, "/timetables/7/sections").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json[0]["display_name"], "Semester 1 - A");
}

#[tokio::test]
async fn test_export_renders_document() {
    let mock = MockScheduler::new()
        .with_timetable(timetable())
        .with_status(support::completed_status(&["Dr. X"]));
    let (state, _) = state(mock);

    let (status, body) = get(state, "/timetables/7/export?generated_on=2024-06-01").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("Sample Institute"));
    assert!(body.contains("MCA - 2024-25"));
    assert!(body.contains("Section: A | Generated on: 2024-06-01"));
    assert!(body.contains("<div class=\"subject-name\">Math</div>"));
}

#[tokio::test]
async fn test_export_without_base_setup_uses_placeholders() {
    let (state, _) = state(MockScheduler::new().with_timetable(timetable()));

    let (status, body) = get(state, "/timetables/7/export?generated_on=2024-06-01").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">Institution Name</div>"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_401_and_logs_out() {
    let (state, session) = state(MockScheduler::new().failing(Failure::Unauthorized));

    let (status, body) = get(state, "/timetables").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["message"], "Authentication required. Please login again.");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_remote_failure_maps_to_bad_gateway() {
    let (state, session) = state(MockScheduler::new().failing(Failure::Remote(500, "database locked")));

    let (status, body) = get(state, "/timetables/7").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("database locked"));
    assert!(session.is_authenticated());
}
