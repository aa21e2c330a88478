use sea_orm::DatabaseConnection;

use crate::server::{
    data::permission::PermissionRepository,
    error::AppError,
    model::user::{CreatePermissionParams, Permission, UpdatePermissionParams},
};

pub struct PermissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PermissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<Permission>, AppError> {
        Ok(PermissionRepository::new(self.db).get_all().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Permission, AppError> {
        PermissionRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Permission not found".to_string()))
    }

    pub async fn create(&self, params: CreatePermissionParams) -> Result<Permission, AppError> {
        let repo = PermissionRepository::new(self.db);

        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(duplicate_name());
        }

        Ok(repo.create(params).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdatePermissionParams,
    ) -> Result<Permission, AppError> {
        let repo = PermissionRepository::new(self.db);
        let existing = self.get_by_id(id).await?;

        if let Some(name) = &params.name {
            if *name != existing.name && repo.find_by_name(name).await?.is_some() {
                return Err(duplicate_name());
            }
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Permission not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<Permission, AppError> {
        let permission = self.get_by_id(id).await?;
        PermissionRepository::new(self.db).delete(id).await?;

        Ok(permission)
    }
}

fn duplicate_name() -> AppError {
    AppError::BadRequest("The permission with this name already exists.".to_string())
}
