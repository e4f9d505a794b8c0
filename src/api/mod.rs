use axum::Json;
use axum::extract::{Path, Query};
use axum::response::Html;
use axum::{Router, extract::State, routing::get};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;
use crate::export::{ExportMetadata, render};
use crate::grid::{GridSummary, TimetableGrid, TimetableView};
use crate::models::{SectionLink, TimetableSummary};
use crate::state::AppState;

#[derive(Deserialize)]
struct ExportQueryParams {
    #[serde(default)]
    generated_on: Option<NaiveDate>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    authenticated: bool,
}

#[derive(Serialize)]
pub struct TimetableResponse {
    pub view: TimetableView,
    pub grid: TimetableGrid,
    pub summary: GridSummary,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/timetables", get(list_timetables))
        .route("/timetables/{id}", get(view_timetable))
        .route("/timetables/{id}/sections", get(sibling_sections))
        .route("/timetables/{id}/export", get(export_timetable))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        authenticated: state.session.is_authenticated(),
    })
}

async fn list_timetables(State(state): State<AppState>) -> Result<Json<Vec<TimetableSummary>>, AppError> {
    let list = state
        .session
        .observe(state.scheduler.list_timetables(&state.session).await)?;
    Ok(Json(list))
}

async fn view_timetable(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TimetableResponse>, AppError> {
    let view = fetch_view(&state, id).await?;
    Ok(Json(TimetableResponse {
        grid: view.grid(),
        summary: view.summary(),
        view,
    }))
}

async fn sibling_sections(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<SectionLink>>, AppError> {
    let sections = state
        .session
        .observe(state.scheduler.sibling_sections(&state.session, id).await)?;
    Ok(Json(sections))
}

async fn export_timetable(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<ExportQueryParams>,
) -> Result<Html<String>, AppError> {
    let view = fetch_view(&state, id).await?;
    let mut metadata = institute_metadata(&state).await?;
    metadata.section = Some(view.section.clone());

    let generated_on = params
        .generated_on
        .unwrap_or_else(|| Local::now().date_naive());
    Ok(Html(render(&view.grid(), &metadata, generated_on)))
}

async fn fetch_view(state: &AppState, id: u64) -> Result<TimetableView, AppError> {
    let response = state
        .session
        .observe(state.scheduler.section_timetable(&state.session, id).await)?;
    Ok(TimetableView::from_response(response))
}

/// Header details for the export; placeholders when the base setup cannot be read.
async fn institute_metadata(state: &AppState) -> Result<ExportMetadata, AppError> {
    match state
        .session
        .observe(state.scheduler.setup_status(&state.session).await)
    {
        Ok(status) => Ok(status
            .institute
            .map(|i| ExportMetadata {
                institution: Some(i.name),
                course: Some(i.course),
                academic_year: Some(i.academic_year),
                section: None,
            })
            .unwrap_or_default()),
        Err(AppError::Unauthorized) => Err(AppError::Unauthorized),
        Err(err) => {
            warn!("export continues without institute details: {}", err);
            Ok(ExportMetadata::default())
        }
    }
}
