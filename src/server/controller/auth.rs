use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        auth::{ChangePasswordDto, LoginDto, LoginResponseDto, PasswordResetDto, RegisterDto, VerifyDto},
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, session::AuthSession},
        model::user::CreateUserParams,
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Logs a user in with a username or email address and a password.
///
/// Cycles the session id before storing the user so a session id handed out before
/// login cannot be reused afterwards.
///
/// # Returns
/// - `200 OK` - Logged in, with the user
/// - `400 Bad Request` - User is inactive
/// - `401 Unauthorized` - Unknown login or wrong password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Successfully logged in", body = LoginResponseDto),
        (status = 400, description = "Inactive user", body = ErrorDto),
        (status = 401, description = "Incorrect username/email or password", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .authenticate(&payload.username, &payload.password)
        .await?;

    let auth_session = AuthSession::new(&session);
    auth_session.cycle_id().await?;
    auth_session.set_user_id(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(LoginResponseDto {
            message: "Successfully logged in".to_string(),
            user: user.into_dto(),
        }),
    ))
}

/// Registers a new account. The caller is not logged in afterwards.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Email or username taken, or unknown role", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::new(&state.db)
        .register(CreateUserParams::from_register_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password updated", body = MessageDto),
        (status = 400, description = "Wrong current password or new password too short", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    AuthService::new(&state.db)
        .change_password(&user, &payload.current_password, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Password updated successfully")),
    ))
}

/// Accepts a password reset request. No email is delivered.
#[utoipa::path(
    post,
    path = "/api/auth/password-reset",
    tag = AUTH_TAG,
    request_body = PasswordResetDto,
    responses(
        (status = 200, description = "Reset requested", body = MessageDto),
        (status = 404, description = "No user with this email", body = ErrorDto),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn password_reset(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db)
        .request_password_reset(&payload.email)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Password reset email sent"))))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "The logged-in user", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Session cleared", body = MessageDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok((StatusCode::OK, Json(MessageDto::new("Successfully logged out"))))
}

/// Confirms the session and reports the user's role and effective permissions.
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Session is valid", body = VerifyDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let access = AuthService::new(&state.db).access(&user).await?;

    Ok((
        StatusCode::OK,
        Json(VerifyDto {
            authenticated: true,
            user: user.into_dto(),
            role: access.role,
            permissions: access.permissions,
        }),
    ))
}
