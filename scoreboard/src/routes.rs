//! HTTP entry points for the scoreboard service.
//!
//! Two RPC-style operations plus the read-only board view:
//! - `POST /api/submissions` → apply a submission to its homework's board
//! - `GET /api/homeworks/{name}` → the homework descriptor
//! - `GET /api/homeworks/{name}/board` → the ranked board rows
//! - `GET /health` → liveness probe

use crate::ranking;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::config;
use util::submission::Submission;

/// Builds the complete application router.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/submissions", post(submit))
        .route("/api/homeworks/{name}", get(query_homework))
        .route("/api/homeworks/{name}/board", get(query_board))
        .with_state(state)
}

/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK", "Scoreboard is running"))
}

/// POST /api/submissions
///
/// Applies the improve-only update policy. A losing submission is still a
/// `200` — the message tells the caller the stored entry was kept. Only an
/// unknown homework fails.
async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> impl IntoResponse {
    let Some(board) = state.board(&submission.homework) else {
        tracing::warn!(
            homework = %submission.homework,
            user = %submission.user,
            "refused submission for unknown homework"
        );
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(format!(
                "no such homework: {:?}",
                submission.homework
            ))),
        )
            .into_response();
    };

    let outcome = board.update(&submission).await;
    tracing::info!(
        homework = %submission.homework,
        user = %submission.user,
        outcome = %outcome,
        "accepted submission"
    );
    Json(ApiResponse::success((), outcome.to_string())).into_response()
}

/// GET /api/homeworks/{name}
async fn query_homework(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.board(&name) {
        Some(board) => {
            Json(ApiResponse::success(board.homework().clone(), "homework found")).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("no such homework")),
        )
            .into_response(),
    }
}

/// GET /api/homeworks/{name}/board
///
/// The same ranked rows the snapshot file carries, computed on demand from a
/// fresh board snapshot.
async fn query_board(State(state): State<AppState>, Path(name): Path<String>) -> impl IntoResponse {
    match state.board(&name) {
        Some(board) => {
            let entries = board.snapshot().await;
            let rows = ranking::board_rows(board.homework(), &entries, &config::ranked_prefix());
            Json(ApiResponse::success(rows, "board rows")).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("no such homework")),
        )
            .into_response(),
    }
}
