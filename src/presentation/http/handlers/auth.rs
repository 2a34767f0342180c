//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::application::dto::request::{LoginRequest, RefreshTokenRequest};
use crate::application::dto::response::{AccessTokenData, ApiResponse, TokenPairData};
use crate::application::services::{AuthError, AuthService, AuthServiceImpl};
use crate::infrastructure::repositories::{PgAuthenticationRepository, PgUserRepository};
use crate::presentation::http::extractors::ValidatedJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn auth_service(state: &AppState) -> AuthServiceImpl<PgUserRepository, PgAuthenticationRepository> {
    AuthServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgAuthenticationRepository::new(state.db.clone())),
        state.tokens.clone(),
    )
}

/// Map service errors onto the HTTP error contract
fn map_auth_error(error: AuthError) -> AppError {
    match error {
        AuthError::InvalidCredentials => {
            AppError::Unauthorized("the credentials you entered are wrong".into())
        }
        AuthError::InvalidToken | AuthError::TokenExpired => {
            AppError::BadRequest("refresh token is invalid".into())
        }
        AuthError::UnknownRefreshToken => {
            AppError::BadRequest("refresh token is not registered".into())
        }
        AuthError::Repository(e) => e,
        AuthError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Login with credentials
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenPairData>>), AppError> {
    let tokens = auth_service(&state)
        .login(&body.username, &body.password)
        .await
        .map_err(map_auth_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TokenPairData {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })),
    ))
}

/// Refresh access token
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<AccessTokenData>>, AppError> {
    let access_token = auth_service(&state)
        .refresh_access_token(&body.refresh_token)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(ApiResponse::success(AccessTokenData { access_token })))
}

/// Logout (revoke refresh token)
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    auth_service(&state)
        .logout(&body.refresh_token)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ErrorKind;
    use test_case::test_case;

    #[test_case(AuthError::InvalidCredentials, ErrorKind::Authentication ; "wrong password")]
    #[test_case(AuthError::InvalidToken, ErrorKind::Invariant ; "bad signature")]
    #[test_case(AuthError::TokenExpired, ErrorKind::Invariant ; "expired")]
    #[test_case(AuthError::UnknownRefreshToken, ErrorKind::Invariant ; "unregistered")]
    #[test_case(AuthError::Internal("boom".into()), ErrorKind::Server ; "internal")]
    fn test_auth_error_mapping(error: AuthError, expected: ErrorKind) {
        assert_eq!(map_auth_error(error).kind(), expected);
    }

    #[test]
    fn test_repository_error_passes_through() {
        let error = map_auth_error(AuthError::Repository(AppError::BadRequest(
            "username not found".into(),
        )));
        assert_eq!(error.client_message(), "username not found");
    }
}
