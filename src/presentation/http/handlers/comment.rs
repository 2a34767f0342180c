//! Comment and Reply Handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::CreateCommentRequest;
use crate::application::dto::response::{AddedCommentData, AddedReplyData, ApiResponse};
use crate::application::services::{CommentService, CommentServiceImpl};
use crate::infrastructure::repositories::PgCommentRepository;
use crate::presentation::http::extractors::{AuthUser, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

fn comment_service(state: &AppState) -> CommentServiceImpl<PgCommentRepository> {
    CommentServiceImpl::new(
        Arc::new(PgCommentRepository::new(state.db.clone())),
        state.ids.clone(),
    )
}

/// Add a comment to a thread
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(thread_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddedCommentData>>), AppError> {
    let added_comment = comment_service(&state)
        .create_comment(&thread_id, &auth_user.user_id, body.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AddedCommentData { added_comment })),
    ))
}

/// Soft-delete a comment
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((thread_id, comment_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    comment_service(&state)
        .delete_comment(&thread_id, &comment_id, &auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// Reply to a comment
pub async fn create_reply(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((thread_id, comment_id)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddedReplyData>>), AppError> {
    let added_reply = comment_service(&state)
        .create_reply(&thread_id, &comment_id, &auth_user.user_id, body.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AddedReplyData { added_reply })),
    ))
}

/// Soft-delete a reply
pub async fn delete_reply(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((thread_id, comment_id, reply_id)): Path<(String, String, String)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    comment_service(&state)
        .delete_reply(&thread_id, &comment_id, &reply_id, &auth_user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok()))
}
