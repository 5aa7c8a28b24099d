use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AccountResponse, ChangePasswordRequest, LoginRequest, MessageResponse,
            ProfileResponse, RegisterRequest, TokenResponse,
        },
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::{NewUser, User},
    },
    error::{is_unique_violation, ApiError},
    extract::ValidJson,
    state::AppState,
    validate::is_valid_email,
};

use super::jwt::AuthUser;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// Routes that read or mutate account data; every handler here takes
/// `AuthUser`, so an unverified request never reaches the store.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/account", get(account))
        .route("/change-password", post(change_password))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password are required".into(),
        ));
    }

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(ApiError::Validation("User not found".into()))?;

    let ok = verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        warn!(user_id = user.id, "login with incorrect password");
        return Err(ApiError::Validation("Incorrect password".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(ApiError::Validation("All fields are required".into()));
    }

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "register with invalid email");
        return Err(ApiError::Validation("Invalid email format".into()));
    }

    // Fast path only; the UNIQUE constraint below is what actually closes the
    // concurrent-registration race.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        return Err(ApiError::Conflict("Email already exists"));
    }

    let password_hash = hash_password(&payload.password)?;
    let new_user = NewUser {
        first_name: &payload.first_name,
        last_name: &payload.last_name,
        email: &payload.email,
        password_hash: &password_hash,
        phone_number: &payload.phone_number,
        gender: &payload.gender,
        subscribe: payload.subscribe,
    };

    let user = match User::create(&state.db, &new_user).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict("Email already exists"))
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully",
        }),
    ))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(ProfileResponse {
        email: user.email,
        first_name: user.first_name,
    }))
}

#[instrument(skip(state))]
pub async fn account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<AccountResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(AccountResponse {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        phone_number: user.phone_number,
        gender: user.gender,
        subscribe: user.subscribe,
    }))
}

/// Overwrites the stored hash. Tokens issued before the change stay valid until
/// their own expiry; sessions are stateless and cannot be revoked early.
#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ValidJson(payload): ValidJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if payload.current_password.is_empty() || payload.new_password.is_empty() {
        return Err(ApiError::Validation(
            "Current and new passwords are required".into(),
        ));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    let ok = verify_password(&payload.current_password, &user.password_hash)?;
    if !ok {
        warn!(user_id, "password change with incorrect current password");
        return Err(ApiError::Validation("Incorrect current password".into()));
    }

    let password_hash = hash_password(&payload.new_password)?;
    User::update_password_hash(&state.db, user_id, &password_hash).await?;

    info!(user_id, "password changed");
    Ok(Json(MessageResponse {
        message: "Password changed successfully",
    }))
}
