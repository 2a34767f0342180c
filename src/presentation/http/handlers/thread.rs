//! Thread Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::CreateThreadRequest;
use crate::application::dto::response::{AddedThreadData, ApiResponse, ThreadData};
use crate::application::services::{ThreadService, ThreadServiceImpl};
use crate::infrastructure::repositories::PgThreadRepository;
use crate::presentation::http::extractors::{AuthUser, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn thread_service(state: &AppState) -> ThreadServiceImpl<PgThreadRepository> {
    ThreadServiceImpl::new(
        Arc::new(PgThreadRepository::new(state.db.clone())),
        state.ids.clone(),
    )
}

/// Create a thread
pub async fn create_thread(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateThreadRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddedThreadData>>), AppError> {
    let added_thread = thread_service(&state)
        .create_thread(&auth_user.user_id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AddedThreadData { added_thread })),
    ))
}

/// Get a thread with its nested comments
pub async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> Result<Json<ApiResponse<ThreadData>>, AppError> {
    let thread = thread_service(&state).get_thread_detail(&thread_id).await?;

    Ok(Json(ApiResponse::success(ThreadData { thread })))
}
