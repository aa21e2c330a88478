use sea_orm::DatabaseConnection;

use crate::server::{
    config::AdminConfig,
    data::{role::RoleRepository, user::UserRepository},
    error::AppError,
    model::{
        user::{CreateUserParams, UpdateUserParams, User, UserFilter},
        Paginated,
    },
    util::password::{ensure_min_length, hash_password},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &UserFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<User>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_all_paginated(filter, page, per_page)
            .await?;

        Ok(Paginated::new(users, total, page, per_page))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Creates a user after checking email, username and role.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::BadRequest)` - Email or username taken, or unknown role
    pub async fn create(&self, params: CreateUserParams) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_email(&params.email).await?.is_some() {
            return Err(AppError::BadRequest(
                "The user with this email already exists in the system.".to_string(),
            ));
        }

        if user_repo.find_by_username(&params.username).await?.is_some() {
            return Err(AppError::BadRequest(
                "The username is already taken.".to_string(),
            ));
        }

        if let Some(role_id) = params.role_id {
            self.ensure_role_exists(role_id).await?;
        }

        let hashed = hash_password(&params.password)?;
        let user = user_repo.create(params, hashed).await?;

        tracing::info!("Created user {}", user.username);

        Ok(user)
    }

    /// Updates a user on behalf of `actor`.
    ///
    /// Only a superuser may change `is_superuser` or `role_id`.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateUserParams,
        actor: &User,
    ) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);
        let existing = self.get_by_id(id).await?;

        if !actor.is_superuser && (params.is_superuser.is_some() || params.role_id.is_some()) {
            return Err(AppError::Forbidden(
                "The user doesn't have enough privileges".to_string(),
            ));
        }

        if let Some(email) = &params.email {
            if *email != existing.email && user_repo.find_by_email(email).await?.is_some() {
                return Err(AppError::BadRequest(
                    "The user with this email already exists in the system.".to_string(),
                ));
            }
        }

        if let Some(username) = &params.username {
            if *username != existing.username
                && user_repo.find_by_username(username).await?.is_some()
            {
                return Err(AppError::BadRequest(
                    "The username is already taken.".to_string(),
                ));
            }
        }

        if let Some(role_id) = params.role_id {
            self.ensure_role_exists(role_id).await?;
        }

        let hashed = match &params.password {
            Some(password) => {
                ensure_min_length(password)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        user_repo
            .update(id, params, hashed)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    pub async fn delete(&self, id: i32, actor: &User) -> Result<User, AppError> {
        if id == actor.id {
            return Err(AppError::BadRequest(
                "Cannot delete your own user account".to_string(),
            ));
        }

        let user = self.get_by_id(id).await?;
        UserRepository::new(self.db).delete(id).await?;

        tracing::info!("Deleted user {}", user.username);

        Ok(user)
    }

    /// Creates the configured superuser when no superuser exists yet.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - A superuser was created
    /// - `Ok(None)` - A superuser already exists
    pub async fn ensure_superuser(&self, admin: &AdminConfig) -> Result<Option<User>, AppError> {
        if UserRepository::new(self.db).superuser_exists().await? {
            return Ok(None);
        }

        let role_id = RoleRepository::new(self.db)
            .find_by_name("admin")
            .await?
            .map(|role| role.id);

        let user = self
            .create(CreateUserParams {
                username: admin.username.clone(),
                email: admin.email.clone(),
                password: admin.password.clone(),
                first_name: None,
                last_name: None,
                role_id,
                is_active: true,
                is_superuser: true,
            })
            .await?;

        Ok(Some(user))
    }

    async fn ensure_role_exists(&self, role_id: i32) -> Result<(), AppError> {
        if RoleRepository::new(self.db)
            .find_by_id(role_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(
                "The specified role does not exist.".to_string(),
            ));
        }

        Ok(())
    }
}
