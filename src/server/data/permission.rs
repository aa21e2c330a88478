use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::{CreatePermissionParams, Permission, UpdatePermissionParams};

pub struct PermissionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PermissionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreatePermissionParams) -> Result<Permission, DbErr> {
        let entity = entity::permission::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Permission::from_entity(entity))
    }

    pub async fn get_all(&self) -> Result<Vec<Permission>, DbErr> {
        let entities = entity::prelude::Permission::find()
            .order_by_asc(entity::permission::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Permission::from_entity).collect())
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Permission>, DbErr> {
        let entity = entity::prelude::Permission::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Permission::from_entity))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Permission>, DbErr> {
        let entity = entity::prelude::Permission::find()
            .filter(entity::permission::Column::Name.eq(name))
            .one(self.db)
            .await?;

        Ok(entity.map(Permission::from_entity))
    }

    /// Counts how many of `ids` refer to existing permissions.
    pub async fn count_existing(&self, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        entity::prelude::Permission::find()
            .filter(entity::permission::Column::Id.is_in(ids.to_vec()))
            .count(self.db)
            .await
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdatePermissionParams,
    ) -> Result<Option<Permission>, DbErr> {
        let Some(permission) = entity::prelude::Permission::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::permission::ActiveModel = permission.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(Permission::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Permission::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
