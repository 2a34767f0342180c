//! User Handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::RegisterUserRequest;
use crate::application::dto::response::{AddedUserData, ApiResponse};
use crate::application::services::{UserService, UserServiceImpl};
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddedUserData>>), AppError> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let user_service = UserServiceImpl::new(user_repo, state.ids.clone());

    let added_user = user_service.register(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AddedUserData { added_user })),
    ))
}
