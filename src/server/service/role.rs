use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{permission::PermissionRepository, role::RoleRepository, user::UserRepository},
    error::AppError,
    middleware::auth::default_role_grants,
    model::user::{CreatePermissionParams, CreateRoleParams, Role, UpdateRoleParams},
};

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<Role>, AppError> {
        Ok(RoleRepository::new(self.db).get_all().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Role, AppError> {
        RoleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Role not found".to_string()))
    }

    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, AppError> {
        if RoleRepository::new(self.db)
            .find_by_name(&params.name)
            .await?
            .is_some()
        {
            return Err(duplicate_name());
        }

        self.ensure_permissions_exist(&params.permission_ids).await?;

        let txn = self.db.begin().await?;
        let role = RoleRepository::new(&txn).create(params).await?;
        txn.commit().await?;

        tracing::info!("Created role {}", role.name);

        Ok(role)
    }

    /// Updates a role; `permission_ids`, when given, replaces all of its grants.
    pub async fn update(&self, id: i32, params: UpdateRoleParams) -> Result<Role, AppError> {
        let existing = self.get_by_id(id).await?;

        if let Some(name) = &params.name {
            if *name != existing.name
                && RoleRepository::new(self.db)
                    .find_by_name(name)
                    .await?
                    .is_some()
            {
                return Err(duplicate_name());
            }
        }

        if let Some(permission_ids) = &params.permission_ids {
            self.ensure_permissions_exist(permission_ids).await?;
        }

        let txn = self.db.begin().await?;
        let role = RoleRepository::new(&txn).update(id, params).await?;
        txn.commit().await?;

        role.ok_or_else(|| AppError::NotFound("Role not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> Result<Role, AppError> {
        let role = self.get_by_id(id).await?;

        let assigned = UserRepository::new(self.db).count_by_role(id).await?;
        if assigned > 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot delete role that is assigned to {} users",
                assigned
            )));
        }

        let txn = self.db.begin().await?;
        RoleRepository::new(&txn).delete(id).await?;
        txn.commit().await?;

        Ok(role)
    }

    /// Creates every known permission and the default roles that are missing.
    ///
    /// Existing roles are left untouched so grants edited by an administrator survive
    /// restarts.
    pub async fn seed_defaults(&self) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let permission_repo = PermissionRepository::new(&txn);
        let role_repo = RoleRepository::new(&txn);

        for (name, description, permissions) in default_role_grants() {
            let mut permission_ids = Vec::with_capacity(permissions.len());
            for permission in permissions {
                let existing = permission_repo.find_by_name(permission.as_str()).await?;
                let id = match existing {
                    Some(existing) => existing.id,
                    None => {
                        permission_repo
                            .create(CreatePermissionParams {
                                name: permission.as_str().to_string(),
                                description: Some(permission.description()),
                            })
                            .await?
                            .id
                    }
                };
                permission_ids.push(id);
            }

            if role_repo.find_by_name(name).await?.is_none() {
                role_repo
                    .create(CreateRoleParams {
                        name: name.to_string(),
                        description: Some(description.to_string()),
                        permission_ids,
                    })
                    .await?;
                tracing::info!("Seeded default role {}", name);
            }
        }

        txn.commit().await?;

        Ok(())
    }

    async fn ensure_permissions_exist(&self, permission_ids: &[i32]) -> Result<(), AppError> {
        let mut unique = permission_ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let found = PermissionRepository::new(self.db)
            .count_existing(&unique)
            .await?;
        if found != unique.len() as u64 {
            return Err(AppError::BadRequest(
                "One or more permissions do not exist.".to_string(),
            ));
        }

        Ok(())
    }
}

fn duplicate_name() -> AppError {
    AppError::BadRequest("The role with this name already exists.".to_string())
}
