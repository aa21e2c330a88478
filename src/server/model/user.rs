//! User, role and permission domain models and parameters.

use chrono::{DateTime, Utc};

use crate::model::{
    auth::RegisterDto,
    user::{
        CreatePermissionDto, CreateRoleDto, CreateUserDto, PermissionDto, RoleDto,
        UpdatePermissionDto, UpdateRoleDto, UpdateUserDto, UserDto,
    },
};

/// Application user account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string. Never leaves the server.
    pub hashed_password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
    pub role_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            hashed_password: entity.hashed_password,
            first_name: entity.first_name,
            last_name: entity.last_name,
            is_active: entity.is_active,
            is_superuser: entity.is_superuser,
            role_id: entity.role_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts the user to a DTO, dropping the password hash.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            is_active: self.is_active,
            is_superuser: self.is_superuser,
            role_id: self.role_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// `first last`, falling back to the username when no name is set.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.username.clone(),
        }
    }
}

/// Parameters for creating a user. The password is still plain text here and is
/// hashed by the service before it reaches the repository.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: Option<i32>,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl CreateUserParams {
    pub fn from_dto(dto: CreateUserDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
            first_name: dto.first_name,
            last_name: dto.last_name,
            role_id: dto.role_id,
            is_active: dto.is_active,
            is_superuser: dto.is_superuser,
        }
    }

    /// Self-registration always creates an active, non-superuser account.
    pub fn from_register_dto(dto: RegisterDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
            first_name: dto.first_name,
            last_name: dto.last_name,
            role_id: dto.role_id,
            is_active: true,
            is_superuser: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: Option<i32>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
            first_name: dto.first_name,
            last_name: dto.last_name,
            role_id: dto.role_id,
            is_active: dto.is_active,
            is_superuser: dto.is_superuser,
        }
    }
}

/// Case-insensitive substring filters for the user list.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Permission {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl Permission {
    pub fn from_entity(entity: entity::permission::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
        }
    }

    pub fn into_dto(self) -> PermissionDto {
        PermissionDto {
            id: self.id,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePermissionParams {
    pub name: String,
    pub description: Option<String>,
}

impl CreatePermissionParams {
    pub fn from_dto(dto: CreatePermissionDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePermissionParams {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdatePermissionParams {
    pub fn from_dto(dto: UpdatePermissionDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

/// Role with the permissions it grants.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<Permission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Role {
    pub fn from_entity(
        entity: entity::role::Model,
        permissions: Vec<entity::permission::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            permissions: permissions.into_iter().map(Permission::from_entity).collect(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            description: self.description,
            permissions: self.permissions.into_iter().map(|p| p.into_dto()).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRoleParams {
    pub name: String,
    pub description: Option<String>,
    pub permission_ids: Vec<i32>,
}

impl CreateRoleParams {
    pub fn from_dto(dto: CreateRoleDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            permission_ids: dto.permission_ids,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoleParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permission_ids: Option<Vec<i32>>,
}

impl UpdateRoleParams {
    pub fn from_dto(dto: UpdateRoleDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            permission_ids: dto.permission_ids,
        }
    }
}
