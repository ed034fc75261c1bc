//! Registration and login endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use super::extractor::AppJson;
use crate::{error::AppResult, models::Credentials, AppState};

/// Registration response
#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    /// New user ID
    pub id: i32,
    pub username: String,
}

/// Login response. No token or session is issued.
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// Authenticated user ID
    pub id: i32,
    pub username: String,
    pub message: String,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Missing fields, too short, or malformed body", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(credentials): AppJson<Credentials>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let username = credentials.username.unwrap_or_default();
    let password = credentials.password.unwrap_or_default();

    let id = state.services.accounts.register(&username, &password).await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { id, username })))
}

/// Check a username/password pair
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Missing fields or malformed body", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(credentials): AppJson<Credentials>,
) -> AppResult<Json<LoginResponse>> {
    let username = credentials.username.unwrap_or_default();
    let password = credentials.password.unwrap_or_default();

    let id = state.services.accounts.authenticate(&username, &password).await?;

    Ok(Json(LoginResponse {
        id,
        username,
        message: "Login successful".to_string(),
    }))
}
