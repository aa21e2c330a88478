//! User data repository for database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::{CreateUserParams, UpdateUserParams, User, UserFilter};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a user.
    ///
    /// # Arguments
    /// - `params` - User fields; `params.password` is ignored
    /// - `hashed_password` - Argon2 hash of the user's password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique constraint violations
    pub async fn create(
        &self,
        params: CreateUserParams,
        hashed_password: String,
    ) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            hashed_password: ActiveValue::Set(hashed_password),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            is_active: ActiveValue::Set(params.is_active),
            is_superuser: ActiveValue::Set(params.is_superuser),
            role_id: ActiveValue::Set(params.role_id),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds the user whose username or email equals `login`.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Username.eq(login))
                    .add(entity::user::Column::Email.eq(login)),
            )
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Gets a page of users ordered by id.
    ///
    /// Every filter field is a substring match; unset fields are ignored.
    ///
    /// # Returns
    /// - `Ok((users, total_items))` - Users on the page and the number matching the filter
    /// - `Err(DbErr)` - Database error
    pub async fn get_all_paginated(
        &self,
        filter: &UserFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut condition = Condition::all();
        if let Some(first_name) = &filter.first_name {
            condition = condition.add(entity::user::Column::FirstName.contains(first_name));
        }
        if let Some(last_name) = &filter.last_name {
            condition = condition.add(entity::user::Column::LastName.contains(last_name));
        }
        if let Some(email) = &filter.email {
            condition = condition.add(entity::user::Column::Email.contains(email));
        }
        if let Some(username) = &filter.username {
            condition = condition.add(entity::user::Column::Username.contains(username));
        }

        let paginator = entity::prelude::User::find()
            .filter(condition)
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;
        let users = entities.into_iter().map(User::from_entity).collect();

        Ok((users, total))
    }

    /// Applies the set fields of `params` to a user.
    ///
    /// # Arguments
    /// - `id` - User id
    /// - `params` - Fields to change; `params.password` is ignored
    /// - `hashed_password` - New password hash, when the password changes
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with this id
    /// - `Err(DbErr)` - Database error
    pub async fn update(
        &self,
        id: i32,
        params: UpdateUserParams,
        hashed_password: Option<String>,
    ) -> Result<Option<User>, DbErr> {
        let Some(user) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::user::ActiveModel = user.into();
        if let Some(username) = params.username {
            active_model.username = ActiveValue::Set(username);
        }
        if let Some(email) = params.email {
            active_model.email = ActiveValue::Set(email);
        }
        if let Some(first_name) = params.first_name {
            active_model.first_name = ActiveValue::Set(Some(first_name));
        }
        if let Some(last_name) = params.last_name {
            active_model.last_name = ActiveValue::Set(Some(last_name));
        }
        if let Some(role_id) = params.role_id {
            active_model.role_id = ActiveValue::Set(Some(role_id));
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        if let Some(is_superuser) = params.is_superuser {
            active_model.is_superuser = ActiveValue::Set(is_superuser);
        }
        if let Some(hashed_password) = hashed_password {
            active_model.hashed_password = ActiveValue::Set(hashed_password);
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }

    pub async fn update_password(&self, id: i32, hashed_password: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::HashedPassword,
                sea_orm::sea_query::Expr::value(hashed_password),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::IsActive,
                sea_orm::sea_query::Expr::value(is_active),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes a user.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with this id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count_by_role(&self, role_id: i32) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::RoleId.eq(role_id))
            .count(self.db)
            .await
    }

    pub async fn superuser_exists(&self) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::IsSuperuser.eq(true))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
