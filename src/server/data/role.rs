//! Role data repository.
//!
//! Roles are always returned together with the permissions they are granted. Grants
//! live in the `role_permissions` join table and are replaced wholesale on update.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::{CreateRoleParams, Role, UpdateRoleParams};

pub struct RoleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a role and grants it the given permissions.
    ///
    /// Permission ids must already exist; the caller validates them.
    ///
    /// # Returns
    /// - `Ok(Role)` - The created role with its permissions
    /// - `Err(DbErr)` - Database error, including a duplicate role name
    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, DbErr> {
        let role = entity::role::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.set_permissions(role.id, &params.permission_ids).await?;
        let permissions = role
            .find_related(entity::prelude::Permission)
            .all(self.db)
            .await?;

        Ok(Role::from_entity(role, permissions))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Role>, DbErr> {
        let Some(role) = entity::prelude::Role::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let permissions = role
            .find_related(entity::prelude::Permission)
            .order_by_asc(entity::permission::Column::Name)
            .all(self.db)
            .await?;

        Ok(Some(Role::from_entity(role, permissions)))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DbErr> {
        let Some(role) = entity::prelude::Role::find()
            .filter(entity::role::Column::Name.eq(name))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let permissions = role
            .find_related(entity::prelude::Permission)
            .all(self.db)
            .await?;

        Ok(Some(Role::from_entity(role, permissions)))
    }

    /// Gets all roles ordered by name, each with its permissions.
    pub async fn get_all(&self) -> Result<Vec<Role>, DbErr> {
        let roles = entity::prelude::Role::find()
            .order_by_asc(entity::role::Column::Name)
            .find_with_related(entity::prelude::Permission)
            .all(self.db)
            .await?;

        Ok(roles
            .into_iter()
            .map(|(role, permissions)| Role::from_entity(role, permissions))
            .collect())
    }

    /// Updates a role. When `params.permission_ids` is set the grants are replaced.
    ///
    /// # Returns
    /// - `Ok(Some(Role))` - The updated role
    /// - `Ok(None)` - No role with this id
    /// - `Err(DbErr)` - Database error
    pub async fn update(&self, id: i32, params: UpdateRoleParams) -> Result<Option<Role>, DbErr> {
        let Some(role) = entity::prelude::Role::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::role::ActiveModel = role.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));
        active_model.update(self.db).await?;

        if let Some(permission_ids) = params.permission_ids {
            self.set_permissions(id, &permission_ids).await?;
        }

        self.find_by_id(id).await
    }

    /// Replaces the permissions granted to a role.
    pub async fn set_permissions(&self, role_id: i32, permission_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::RolePermission::delete_many()
            .filter(entity::role_permission::Column::RoleId.eq(role_id))
            .exec(self.db)
            .await?;

        if permission_ids.is_empty() {
            return Ok(());
        }

        let mut unique_ids = permission_ids.to_vec();
        unique_ids.sort_unstable();
        unique_ids.dedup();

        let rows = unique_ids
            .into_iter()
            .map(|permission_id| entity::role_permission::ActiveModel {
                role_id: ActiveValue::Set(role_id),
                permission_id: ActiveValue::Set(permission_id),
            });

        entity::prelude::RolePermission::insert_many(rows)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Names of the permissions granted to a role.
    pub async fn get_permission_names(&self, role_id: i32) -> Result<Vec<String>, DbErr> {
        let permissions = entity::prelude::Permission::find()
            .inner_join(entity::prelude::RolePermission)
            .filter(entity::role_permission::Column::RoleId.eq(role_id))
            .all(self.db)
            .await?;

        Ok(permissions.into_iter().map(|p| p.name).collect())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        entity::prelude::RolePermission::delete_many()
            .filter(entity::role_permission::Column::RoleId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Role::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
