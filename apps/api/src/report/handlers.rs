use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::analysis::handlers::UserIdQuery;
use crate::errors::AppError;
use crate::models::ids::ReportId;
use crate::models::report::PitchReport;
use crate::report::assembler::{generate_pitch_report, share_report, GenerateReportRequest};
use crate::report::render::render_report_html;
use crate::repo::reports::ReportRepo;
use crate::state::AppState;

/// POST /api/v1/reports
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(req): Json<GenerateReportRequest>,
) -> Result<Json<PitchReport>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    let report = generate_pitch_report(&state.db, state.llm.as_ref(), req).await?;
    Ok(Json(report))
}

/// GET /api/v1/reports
pub async fn handle_list_reports(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<PitchReport>>, AppError> {
    let reports = ReportRepo::new(state.db.clone())
        .list_for_user(params.user_id)
        .await?;
    Ok(Json(reports))
}

/// GET /api/v1/reports/:id
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
) -> Result<Json<PitchReport>, AppError> {
    let report = ReportRepo::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))?;
    Ok(Json(report))
}

#[derive(Serialize)]
pub struct ShareResponse {
    pub share_token: String,
}

/// POST /api/v1/reports/:id/share
pub async fn handle_share_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
) -> Result<Json<ShareResponse>, AppError> {
    let repo = ReportRepo::new(state.db.clone());
    let share_token = share_report(&repo, id).await?;
    Ok(Json(ShareResponse { share_token }))
}

/// GET /api/v1/reports/shared/:token
pub async fn handle_get_shared_report(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let report = ReportRepo::new(state.db.clone())
        .get_by_share_token(&token)
        .await?
        .ok_or_else(|| AppError::NotFound("Shared report not found".to_string()))?;
    // Shared view omits owner identity.
    Ok(Json(json!({
        "title": report.title,
        "overall_score": report.overall_score,
        "deck_analysis": report.deck_analysis,
        "video_analysis": report.video_analysis,
        "investor_qa": report.investor_qa,
        "created_at": report.created_at,
    })))
}

/// GET /api/v1/reports/:id/export
pub async fn handle_export_report(
    State(state): State<AppState>,
    Path(id): Path<ReportId>,
) -> Result<impl IntoResponse, AppError> {
    let report = ReportRepo::new(state.db.clone())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {id} not found")))?;

    let html = render_report_html(&report);
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    ))
}
