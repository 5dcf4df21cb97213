//! Account and session handlers: signup, login, refresh, logout.
//!
//! Login failures are deliberately indistinguishable (same status, same
//! message) whether the username is unknown or the password wrong, so the
//! endpoint cannot be used to enumerate accounts.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use campusnotes_core::error::CoreError;
use campusnotes_db::models::session::CreateSession;
use campusnotes_db::models::user::{CreateUser, User, UserInfo};
use campusnotes_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{issue_access_token, mint_refresh_token, refresh_token_digest};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair plus user info, returned by signup, login, and refresh alike.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /api/v1/auth/signup
///
/// Creates the account and opens a session in one step, so a fresh signup
/// lands already logged in.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let username = input.username.trim();
    let email = input.email.trim();

    if username.is_empty() {
        return Err(AppError::BadRequest("Username must not be empty".into()));
    }
    if !email.contains('@') {
        return Err(AppError::BadRequest("Enter a valid email address".into()));
    }
    if input.password != input.password_confirm {
        return Err(AppError::BadRequest("Passwords do not match".into()));
    }
    validate_password_strength(&input.password).map_err(AppError::BadRequest)?;

    // Pre-checks give friendlier messages; the uq_users_* constraints stay
    // authoritative under concurrent signups.
    if UserRepo::find_by_username(&state.pool, username).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Username is already taken".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Account created");

    let response = open_session(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(bad_credentials)?;

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !matches {
        return Err(bad_credentials());
    }

    tracing::info!(user_id = user.id, "Login succeeded");

    let response = open_session(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchanges a live refresh token for a new token pair. The presented token
/// is revoked in the same request, so each refresh token works exactly once.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let digest = refresh_token_digest(&input.refresh_token);

    let session = SessionRepo::find_active_by_token_hash(&state.pool, &digest)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = open_session(&state, &user).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revokes every live session the user has. 204 on success.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, "Logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// Issue a token pair for `user` and persist the refresh side as a session
/// row.
async fn open_session(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = issue_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_digest) = mint_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.jwt.refresh_ttl_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_digest,
            expires_at,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_ttl_mins * 60,
        user: UserInfo::from(user),
    })
}
