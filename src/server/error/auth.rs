use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID is stored in the session.
    ///
    /// The request comes from a client that never logged in or whose session expired.
    /// Results in a 401 Unauthorized response.
    #[error("Failed to find user ID in session")]
    UserNotInSession,

    /// The session references a user that no longer exists.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User ID {0} stored in session was not found in the database")]
    UserNotInDatabase(i32),

    /// Username/email and password did not match an account.
    #[error("Login attempt with incorrect credentials")]
    InvalidCredentials,

    /// The account exists but has been deactivated.
    #[error("Inactive user")]
    InactiveUser,

    /// A non-superuser without a role tried to access a protected endpoint.
    #[error("User has no role assigned")]
    InvalidRole,

    /// The user's role does not grant the named permission.
    #[error("Missing required permission: {0}")]
    MissingPermission(String),

    /// The user is authenticated but may not act on the requested resource.
    ///
    /// The reason is logged server-side and never returned to the client.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` → 401 "Not authenticated"
/// - `UserNotInDatabase` → 401 "Could not validate credentials"
/// - `InvalidCredentials` → 401 "Incorrect username/email or password"
/// - `InactiveUser` → 400 "Inactive user"
/// - `InvalidRole` → 403 "Invalid role"
/// - `MissingPermission` → 403 naming the missing permission
/// - `AccessDenied` → 403 with a generic privileges message
///
/// All errors are logged at debug level for diagnostics.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::UserNotInSession => (StatusCode::UNAUTHORIZED, "Not authenticated".to_string()),
            Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".to_string(),
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Incorrect username/email or password".to_string(),
            ),
            Self::InactiveUser => (StatusCode::BAD_REQUEST, "Inactive user".to_string()),
            Self::InvalidRole => (StatusCode::FORBIDDEN, "Invalid role".to_string()),
            Self::MissingPermission(permission) => (
                StatusCode::FORBIDDEN,
                format!("Missing required permission: {}", permission),
            ),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                "The user doesn't have enough privileges".to_string(),
            ),
        };

        (status, Json(ErrorDto { error: message })).into_response()
    }
}
