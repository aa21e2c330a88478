use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        user::{
            CreatePermissionDto, CreateRoleDto, CreateUserDto, PermissionDto, RoleDto,
            UpdatePermissionDto, UpdateRoleDto, UpdateUserDto, UserDto,
        },
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::user::{
            CreatePermissionParams, CreateRoleParams, CreateUserParams, UpdatePermissionParams,
            UpdateRoleParams, UpdateUserParams, User, UserFilter,
        },
        service::{permission::PermissionService, role::RoleService, user::UserService},
        state::AppState,
    },
};

/// Tag for grouping user, role and permission endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

#[derive(Deserialize, IntoParams)]
pub struct UserListParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "super::default_entries")]
    pub entries: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

/// Lists users, optionally filtered by case-insensitive substrings.
///
/// # Access Control
/// - `manage_users`
#[utoipa::path(
    get,
    path = "/api/users",
    tag = USER_TAG,
    params(UserListParams),
    responses(
        (status = 200, description = "Page of users", body = PaginatedDto<UserDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_users(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<UserListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let filter = UserFilter {
        first_name: params.first_name,
        last_name: params.last_name,
        email: params.email,
        username: params.username,
    };

    let users = UserService::new(&state.db)
        .get_paginated(&filter, params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(users.into_dto(User::into_dto))))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = USER_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Email or username taken, or unknown role", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let user = UserService::new(&state.db)
        .create(CreateUserParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(user.into_dto())))
}

/// Gets a user. Users may always read their own record.
///
/// # Access Control
/// - Self, or `manage_users`
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not self and missing permission", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let actor = guard.require(&[]).await?;
    require_self_or_manager(&guard, &actor, user_id).await?;

    let user = UserService::new(&state.db).get_by_id(user_id).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Updates a user. Only a superuser may change `is_superuser` or `role_id`.
///
/// # Access Control
/// - Self, or `manage_users`
#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Email or username taken, or unknown role", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Not enough privileges", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let guard = AuthGuard::new(&state.db, &session);
    let actor = guard.require(&[]).await?;
    require_self_or_manager(&guard, &actor, user_id).await?;

    let user = UserService::new(&state.db)
        .update(user_id, UpdateUserParams::from_dto(payload), &actor)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    tag = USER_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The deleted user", body = UserDto),
        (status = 400, description = "Cannot delete your own account", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let actor = AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let user = UserService::new(&state.db).delete(user_id, &actor).await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/users/roles",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All roles with their permissions", body = Vec<RoleDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_roles(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let roles = RoleService::new(&state.db).get_all().await?;
    let roles: Vec<RoleDto> = roles.into_iter().map(|role| role.into_dto()).collect();

    Ok((StatusCode::OK, Json(roles)))
}

#[utoipa::path(
    post,
    path = "/api/users/roles",
    tag = USER_TAG,
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = RoleDto),
        (status = 400, description = "Duplicate name or unknown permission", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_role(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let role = RoleService::new(&state.db)
        .create(CreateRoleParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(role.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/users/roles/{role_id}",
    tag = USER_TAG,
    params(("role_id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "The role", body = RoleDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_role_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(role_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let role = RoleService::new(&state.db).get_by_id(role_id).await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

/// Updates a role. `permission_ids`, when given, replaces the role's grants.
#[utoipa::path(
    put,
    path = "/api/users/roles/{role_id}",
    tag = USER_TAG,
    params(("role_id" = i32, Path, description = "Role ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = RoleDto),
        (status = 400, description = "Duplicate name or unknown permission", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_role(
    State(state): State<AppState>,
    session: Session,
    Path(role_id): Path<i32>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let role = RoleService::new(&state.db)
        .update(role_id, UpdateRoleParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/users/roles/{role_id}",
    tag = USER_TAG,
    params(("role_id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "The deleted role", body = RoleDto),
        (status = 400, description = "Role still assigned to users", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_role(
    State(state): State<AppState>,
    session: Session,
    Path(role_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let role = RoleService::new(&state.db).delete(role_id).await?;

    Ok((StatusCode::OK, Json(role.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/users/permissions",
    tag = USER_TAG,
    responses(
        (status = 200, description = "All permissions", body = Vec<PermissionDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_permissions(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let permissions = PermissionService::new(&state.db).get_all().await?;
    let permissions: Vec<PermissionDto> = permissions.into_iter().map(|p| p.into_dto()).collect();

    Ok((StatusCode::OK, Json(permissions)))
}

#[utoipa::path(
    post,
    path = "/api/users/permissions",
    tag = USER_TAG,
    request_body = CreatePermissionDto,
    responses(
        (status = 201, description = "Permission created", body = PermissionDto),
        (status = 400, description = "Duplicate name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_permission(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreatePermissionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let permission = PermissionService::new(&state.db)
        .create(CreatePermissionParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(permission.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/users/permissions/{permission_id}",
    tag = USER_TAG,
    params(("permission_id" = i32, Path, description = "Permission ID")),
    responses(
        (status = 200, description = "The permission", body = PermissionDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Permission not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_permission_by_id(
    State(state): State<AppState>,
    session: Session,
    Path(permission_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ViewUsers])
        .await?;

    let permission = PermissionService::new(&state.db)
        .get_by_id(permission_id)
        .await?;

    Ok((StatusCode::OK, Json(permission.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/users/permissions/{permission_id}",
    tag = USER_TAG,
    params(("permission_id" = i32, Path, description = "Permission ID")),
    request_body = UpdatePermissionDto,
    responses(
        (status = 200, description = "Permission updated", body = PermissionDto),
        (status = 400, description = "Duplicate name", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Permission not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_permission(
    State(state): State<AppState>,
    session: Session,
    Path(permission_id): Path<i32>,
    Json(payload): Json<UpdatePermissionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let permission = PermissionService::new(&state.db)
        .update(permission_id, UpdatePermissionParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(permission.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/users/permissions/{permission_id}",
    tag = USER_TAG,
    params(("permission_id" = i32, Path, description = "Permission ID")),
    responses(
        (status = 200, description = "The deleted permission", body = PermissionDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 403, description = "Missing permission", body = ErrorDto),
        (status = 404, description = "Permission not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_permission(
    State(state): State<AppState>,
    session: Session,
    Path(permission_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &session)
        .require(&[Permission::ManageUsers])
        .await?;

    let permission = PermissionService::new(&state.db)
        .delete(permission_id)
        .await?;

    Ok((StatusCode::OK, Json(permission.into_dto())))
}

async fn require_self_or_manager(
    guard: &AuthGuard<'_>,
    actor: &User,
    user_id: i32,
) -> Result<(), AppError> {
    if actor.id == user_id || guard.has_permission(actor, Permission::ManageUsers).await? {
        return Ok(());
    }

    Err(AppError::AuthErr(AuthError::AccessDenied(
        actor.id,
        format!("User {} is not self and lacks manage_users", user_id),
    )))
}
