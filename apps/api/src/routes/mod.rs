pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::report::handlers as report_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route(
            "/api/v1/analyses/deck",
            post(analysis_handlers::handle_analyze_deck),
        )
        .route(
            "/api/v1/analyses/video",
            post(analysis_handlers::handle_analyze_video),
        )
        .route("/api/v1/decks", get(analysis_handlers::handle_list_decks))
        .route("/api/v1/videos", get(analysis_handlers::handle_list_videos))
        // Investor Q&A API
        .route(
            "/api/v1/qa",
            post(analysis_handlers::handle_generate_qa).get(analysis_handlers::handle_list_qa),
        )
        // Report API
        .route(
            "/api/v1/reports",
            post(report_handlers::handle_generate_report)
                .get(report_handlers::handle_list_reports),
        )
        .route("/api/v1/reports/:id", get(report_handlers::handle_get_report))
        .route(
            "/api/v1/reports/:id/share",
            post(report_handlers::handle_share_report),
        )
        .route(
            "/api/v1/reports/shared/:token",
            get(report_handlers::handle_get_shared_report),
        )
        .route(
            "/api/v1/reports/:id/export",
            get(report_handlers::handle_export_report),
        )
        .with_state(state)
}
