//! Authentication Service
//!
//! Handles login, JWT access/refresh token management and logout.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::JwtSettings;
use crate::domain::{AuthenticationRepository, UserRepository};
use crate::shared::error::AppError;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate user with credentials and issue a token pair
    async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, AuthError>;

    /// Issue a new access token for a registered refresh token
    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Revoke a refresh token
    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError>;
}

/// Access and refresh token pair
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username at issue time
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID, unique per token
    pub jti: String,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Refresh token is not registered")]
    UnknownRefreshToken,

    #[error(transparent)]
    Repository(#[from] AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Signs and verifies access and refresh tokens.
///
/// Each token kind has its own key; a refresh token does not verify as an
/// access token and vice versa.
pub struct TokenManager {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_token_age: Duration,
    refresh_token_age: Duration,
}

impl TokenManager {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(settings.access_token_key.as_bytes()),
            access_decoding: DecodingKey::from_secret(settings.access_token_key.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(settings.refresh_token_key.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(settings.refresh_token_key.as_bytes()),
            access_token_age: Duration::seconds(settings.access_token_age),
            refresh_token_age: Duration::days(settings.refresh_token_age_days),
        }
    }

    pub fn create_access_token(&self, user_id: &str, username: &str) -> Result<String, AuthError> {
        sign(&self.access_encoding, user_id, username, self.access_token_age)
    }

    pub fn create_refresh_token(&self, user_id: &str, username: &str) -> Result<String, AuthError> {
        sign(&self.refresh_encoding, user_id, username, self.refresh_token_age)
    }

    /// Verify an access token and return its claims.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        verify(&self.access_decoding, token)
    }

    /// Verify a refresh token signature and return its claims.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        verify(&self.refresh_decoding, token)
    }
}

fn sign(key: &EncodingKey, user_id: &str, username: &str, age: Duration) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: (now + age).timestamp(),
        iat: now.timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
    };

    encode(&Header::default(), &claims, key)
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
}

fn verify(key: &DecodingKey, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(token, key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash refresh token for storage
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// AuthService implementation
pub struct AuthServiceImpl<U, A>
where
    U: UserRepository,
    A: AuthenticationRepository,
{
    user_repo: Arc<U>,
    auth_repo: Arc<A>,
    tokens: Arc<TokenManager>,
}

impl<U, A> AuthServiceImpl<U, A>
where
    U: UserRepository,
    A: AuthenticationRepository,
{
    /// Create a new AuthServiceImpl
    pub fn new(user_repo: Arc<U>, auth_repo: Arc<A>, tokens: Arc<TokenManager>) -> Self {
        Self {
            user_repo,
            auth_repo,
            tokens,
        }
    }
}

#[async_trait]
impl<U, A> AuthService for AuthServiceImpl<U, A>
where
    U: UserRepository + 'static,
    A: AuthenticationRepository + 'static,
{
    async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, AuthError> {
        let password_hash = self.user_repo.get_password_by_username(username).await?;

        if !verify_password(password, &password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let user_id = self.user_repo.get_id_by_username(username).await?;

        let tokens = AuthTokens {
            access_token: self.tokens.create_access_token(&user_id, username)?,
            refresh_token: self.tokens.create_refresh_token(&user_id, username)?,
        };

        self.auth_repo
            .add_token(&hash_refresh_token(&tokens.refresh_token))
            .await?;

        tracing::info!(user_id = %user_id, "User logged in");
        Ok(tokens)
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.tokens.verify_refresh_token(refresh_token)?;

        if !self
            .auth_repo
            .token_exists(&hash_refresh_token(refresh_token))
            .await?
        {
            return Err(AuthError::UnknownRefreshToken);
        }

        self.tokens.create_access_token(&claims.sub, &claims.username)
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let token_hash = hash_refresh_token(refresh_token);

        if !self.auth_repo.token_exists(&token_hash).await? {
            return Err(AuthError::UnknownRefreshToken);
        }

        self.auth_repo.delete_token(&token_hash).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockAuthenticationRepository, MockUserRepository};
    use mockall::predicate::eq;

    fn settings(access_token_age: i64) -> JwtSettings {
        JwtSettings {
            access_token_key: "access-secret-access-secret-access-secret".into(),
            refresh_token_key: "refresh-secret-refresh-secret-refresh-secret".into(),
            access_token_age,
            refresh_token_age_days: 30,
        }
    }

    fn token_manager() -> Arc<TokenManager> {
        Arc::new(TokenManager::new(&settings(3000)))
    }

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("secret").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_refresh_token_hash_is_stable_hex() {
        let hash = hash_refresh_token("token");

        assert_eq!(hash, hash_refresh_token("token"));
        assert_eq!(hash.len(), 64);
        assert_ne!(hash, hash_refresh_token("other"));
    }

    #[test]
    fn test_access_token_round_trip() {
        let tokens = token_manager();

        let token = tokens.create_access_token("user-123", "dicoding").unwrap();
        let claims = tokens.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.username, "dicoding");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_kinds_do_not_cross_verify() {
        let tokens = token_manager();

        let access = tokens.create_access_token("user-123", "dicoding").unwrap();
        let refresh = tokens.create_refresh_token("user-123", "dicoding").unwrap();

        assert!(matches!(tokens.verify_refresh_token(&access), Err(AuthError::InvalidToken)));
        assert!(matches!(tokens.verify_access_token(&refresh), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_tampered_refresh_token_is_rejected() {
        let tokens = token_manager();
        let mut refresh = tokens.create_refresh_token("user-123", "dicoding").unwrap();
        refresh.push('x');

        assert!(matches!(tokens.verify_refresh_token(&refresh), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_access_token_is_rejected() {
        // Past the validator's default leeway
        let tokens = TokenManager::new(&settings(-300));
        let token = tokens.create_access_token("user-123", "dicoding").unwrap();

        assert!(matches!(tokens.verify_access_token(&token), Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn test_login_stores_refresh_token_hash() {
        let password_hash = hash_password("secret").unwrap();

        let mut users = MockUserRepository::new();
        users
            .expect_get_password_by_username()
            .with(eq("dicoding"))
            .times(1)
            .returning(move |_| Ok(password_hash.clone()));
        users
            .expect_get_id_by_username()
            .with(eq("dicoding"))
            .times(1)
            .returning(|_| Ok("user-123".into()));

        let mut auth = MockAuthenticationRepository::new();
        auth.expect_add_token()
            .withf(|hash: &str| hash.len() == 64)
            .times(1)
            .returning(|_| Ok(()));

        let tokens = token_manager();
        let service = AuthServiceImpl::new(Arc::new(users), Arc::new(auth), tokens.clone());

        let issued = service.login("dicoding", "secret").await.unwrap();

        let claims = tokens.verify_access_token(&issued.access_token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(tokens.verify_refresh_token(&issued.refresh_token).is_ok());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_stores_nothing() {
        let password_hash = hash_password("secret").unwrap();

        let mut users = MockUserRepository::new();
        users
            .expect_get_password_by_username()
            .returning(move |_| Ok(password_hash.clone()));
        users.expect_get_id_by_username().never();

        let mut auth = MockAuthenticationRepository::new();
        auth.expect_add_token().never();

        let service = AuthServiceImpl::new(Arc::new(users), Arc::new(auth), token_manager());

        let result = service.login("dicoding", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_with_unknown_username_surfaces_repository_error() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_password_by_username()
            .returning(|_| Err(AppError::BadRequest("username not found".into())));

        let service = AuthServiceImpl::new(
            Arc::new(users),
            Arc::new(MockAuthenticationRepository::new()),
            token_manager(),
        );

        let result = service.login("ghost", "secret").await;
        assert!(matches!(result, Err(AuthError::Repository(AppError::BadRequest(_)))));
    }

    #[tokio::test]
    async fn test_refresh_issues_access_token_for_registered_token() {
        let tokens = token_manager();
        let refresh = tokens.create_refresh_token("user-123", "dicoding").unwrap();
        let expected_hash = hash_refresh_token(&refresh);

        let mut auth = MockAuthenticationRepository::new();
        auth.expect_token_exists()
            .with(eq(expected_hash))
            .times(1)
            .returning(|_| Ok(true));

        let service = AuthServiceImpl::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(auth),
            tokens.clone(),
        );

        let access = service.refresh_access_token(&refresh).await.unwrap();
        let claims = tokens.verify_access_token(&access).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.username, "dicoding");
    }

    #[tokio::test]
    async fn test_refresh_with_invalid_signature_skips_registry() {
        let mut auth = MockAuthenticationRepository::new();
        auth.expect_token_exists().never();

        let service = AuthServiceImpl::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(auth),
            token_manager(),
        );

        let result = service.refresh_access_token("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_refresh_with_unregistered_token() {
        let tokens = token_manager();
        let refresh = tokens.create_refresh_token("user-123", "dicoding").unwrap();

        let mut auth = MockAuthenticationRepository::new();
        auth.expect_token_exists().returning(|_| Ok(false));

        let service =
            AuthServiceImpl::new(Arc::new(MockUserRepository::new()), Arc::new(auth), tokens);

        let result = service.refresh_access_token(&refresh).await;
        assert!(matches!(result, Err(AuthError::UnknownRefreshToken)));
    }

    #[tokio::test]
    async fn test_logout_deletes_registered_token() {
        let mut auth = MockAuthenticationRepository::new();
        auth.expect_token_exists().returning(|_| Ok(true));
        auth.expect_delete_token()
            .with(eq(hash_refresh_token("refresh")))
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthServiceImpl::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(auth),
            token_manager(),
        );

        assert!(service.logout("refresh").await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_with_unregistered_token() {
        let mut auth = MockAuthenticationRepository::new();
        auth.expect_token_exists().returning(|_| Ok(false));
        auth.expect_delete_token().never();

        let service = AuthServiceImpl::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(auth),
            token_manager(),
        );

        let result = service.logout("refresh").await;
        assert!(matches!(result, Err(AuthError::UnknownRefreshToken)));
    }
}
