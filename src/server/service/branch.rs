use sea_orm::DatabaseConnection;

use crate::server::{
    data::branch::BranchRepository,
    error::AppError,
    model::{
        branch::{Branch, BranchFilter, CreateBranchParams, UpdateBranchParams},
        Paginated,
    },
};

pub struct BranchService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BranchService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &BranchFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Branch>, AppError> {
        let (branches, total) = BranchRepository::new(self.db)
            .get_all_paginated(filter, page, per_page)
            .await?;

        Ok(Paginated::new(branches, total, page, per_page))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Branch, AppError> {
        BranchRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(&self, params: CreateBranchParams) -> Result<Branch, AppError> {
        let branch = BranchRepository::new(self.db).create(params).await?;

        tracing::info!("Created branch {}", branch.name);

        Ok(branch)
    }

    pub async fn update(&self, id: i32, params: UpdateBranchParams) -> Result<Branch, AppError> {
        BranchRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(not_found)
    }

    /// Deletes a branch that no employee, item or transaction refers to.
    ///
    /// # Returns
    /// - `Ok(())` - Branch deleted
    /// - `Err(AppError::NotFound)` - No such branch
    /// - `Err(AppError::BadRequest)` - Branch still has dependent rows
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let repo = BranchRepository::new(self.db);
        self.get_by_id(id).await?;

        let dependents = repo.count_dependents(id).await?;
        for (count, label) in [
            (dependents.employees, "employees"),
            (dependents.items, "items"),
            (dependents.transactions, "transactions"),
            (dependents.applications, "applications"),
        ] {
            if count > 0 {
                return Err(AppError::BadRequest(format!(
                    "Cannot delete branch with {} {}",
                    count, label
                )));
            }
        }

        repo.delete(id).await?;

        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Branch not found".to_string())
}
