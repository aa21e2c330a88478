use sea_orm::DatabaseConnection;

use crate::server::{
    data::{role::RoleRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::auth::Permission,
    model::user::{CreateUserParams, User},
    service::user::UserService,
    util::password::{ensure_min_length, hash_password, verify_password},
};

/// Role name and granted permission names reported by the verify endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccess {
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Checks credentials for a login attempt.
    ///
    /// `login` matches either the username or the email address. The caller is
    /// responsible for storing the returned user in the session.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials match an active account
    /// - `Err(AuthError::InvalidCredentials)` - Unknown login or wrong password
    /// - `Err(AuthError::InactiveUser)` - Account has been deactivated
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<User, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_login(login).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.hashed_password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::InactiveUser.into());
        }

        tracing::info!("User {} logged in", user.username);

        Ok(user)
    }

    /// Registers a new, active, non-superuser account. Does not log the user in.
    pub async fn register(&self, params: CreateUserParams) -> Result<User, AppError> {
        UserService::new(self.db).create(params).await
    }

    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if !verify_password(current_password, &user.hashed_password) {
            return Err(AppError::BadRequest(
                "Incorrect current password".to_string(),
            ));
        }

        ensure_min_length(new_password)?;

        let hashed = hash_password(new_password)?;
        UserRepository::new(self.db)
            .update_password(user.id, hashed)
            .await?;

        tracing::info!("User {} changed their password", user.username);

        Ok(())
    }

    /// Accepts a password reset request for a known email address.
    ///
    /// No mail is sent; the request is only logged.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            return Err(AppError::NotFound(
                "The user with this email does not exist in the system.".to_string(),
            ));
        };

        tracing::info!("Password reset requested for user {}", user.username);

        Ok(())
    }

    /// Resolves the role name and the permissions the user effectively holds.
    ///
    /// Superusers are reported with every permission.
    pub async fn access(&self, user: &User) -> Result<UserAccess, AppError> {
        let role_repo = RoleRepository::new(self.db);

        let role = match user.role_id {
            Some(role_id) => role_repo.find_by_id(role_id).await?,
            None => None,
        };

        let permissions = if user.is_superuser {
            Permission::ALL
                .iter()
                .map(|permission| permission.as_str().to_string())
                .collect()
        } else {
            match &role {
                Some(role) => role_repo.get_permission_names(role.id).await?,
                None => Vec::new(),
            }
        };

        Ok(UserAccess {
            role: role.map(|role| role.name),
            permissions,
        })
    }
}
