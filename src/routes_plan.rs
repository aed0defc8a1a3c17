// --------------------------------------------------
// Handles API endpoints related to study plans.
//
// Responsibilities:
// - Generate a plan: course lookup -> partition -> Markdown -> store
// - Download a stored plan as a Markdown file
// - Preview a stored plan as HTML
// -------------------------------------------------

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::CourseSource;
use crate::duration;
use crate::error::AppError;
use crate::logic;
use crate::render;
use crate::store::PlanStore;

pub const MIN_WEEKS: i64 = 1;
pub const MAX_WEEKS: i64 = 52;
const DEFAULT_WEEKS: i64 = 2;

// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CourseSource>,
    pub store: PlanStore,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CourseSource>, store: PlanStore) -> Self {
        Self { catalog, store }
    }
}

// Local calendar date; the planner itself never reads the clock
fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Debug, Deserialize)]
pub struct GenerateInput {
    #[serde(default)]
    pub course_url: String,
    pub weeks: Option<i64>,
    pub start_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourseInfoResponse {
    pub title: String,
    pub instructor: String,
    pub total_duration: String,
    pub target_daily_average: String,
    pub actual_daily_average: String,
}

#[derive(Debug, Serialize)]
pub struct PlanSummaryResponse {
    pub total_days: usize,
    pub weeks: i64,
    pub total_lectures: usize,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub file_id: String,
    pub course_info: CourseInfoResponse,
    pub study_plan_summary: PlanSummaryResponse,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub html_content: String,
    pub file_id: String,
}

// -----------------------------
// POST /api/plans
// Builds, renders and stores a study plan
// -----------------------------
pub async fn generate_plan(
    State(state): State<AppState>,
    Json(input): Json<GenerateInput>,
) -> Result<Json<GenerateResponse>, AppError> {
    let course_url = input.course_url.trim();
    if course_url.is_empty() {
        return Err(AppError::BadRequest("course_url is required".to_string()));
    }

    let weeks = input.weeks.unwrap_or(DEFAULT_WEEKS);
    if !(MIN_WEEKS..=MAX_WEEKS).contains(&weeks) {
        return Err(AppError::BadRequest(format!(
            "weeks must be between {MIN_WEEKS} and {MAX_WEEKS}"
        )));
    }

    let start_date = input
        .start_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let course = state.catalog.fetch_course(course_url)?;
    let plan = logic::build_plan(&course, weeks, start_date, today_local())?;
    let markdown = render::render_markdown(&plan);
    let file_id = state.store.save(&markdown)?;

    info!(
        %file_id,
        course = %course.title,
        weeks,
        days = plan.days.len(),
        scheduled = plan.scheduled_minutes(),
        "generated study plan"
    );

    Ok(Json(GenerateResponse {
        success: true,
        message: "Study plan generated successfully!".to_string(),
        file_id,
        course_info: CourseInfoResponse {
            title: course.title.clone(),
            instructor: course.instructor.clone(),
            total_duration: duration::format(plan.total_minutes),
            target_daily_average: duration::format(plan.target_daily_minutes),
            actual_daily_average: duration::format(plan.actual_daily_minutes),
        },
        study_plan_summary: PlanSummaryResponse {
            total_days: plan.days.len(),
            weeks,
            total_lectures: course.lecture_count(),
        },
    }))
}

// -----------------------------
// GET /api/plans/:id/download
// Returns the stored Markdown as an attachment
// -----------------------------
pub async fn download_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let markdown = state.store.load(&id)?;

    let headers = [
        (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
        (header::CONTENT_DISPOSITION, "attachment; filename=\"course_plan.md\""),
        (header::CACHE_CONTROL, "no-cache, must-revalidate"),
        (header::EXPIRES, "Sat, 26 Jul 1997 05:00:00 GMT"),
    ];
    Ok((headers, markdown))
}

// -----------------------------
// GET /api/plans/:id/preview
// Returns the stored plan converted to HTML
// -----------------------------
pub async fn preview_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PreviewResponse>, AppError> {
    let markdown = state.store.load(&id)?;

    Ok(Json(PreviewResponse {
        success: true,
        html_content: render::markdown_to_html(&markdown),
        file_id: id,
    }))
}

// -----------------------------
// GET /api/health
// -----------------------------
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
