use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::branch::{Branch, BranchFilter, CreateBranchParams, UpdateBranchParams};

/// Rows that keep a branch from being deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchDependents {
    pub employees: u64,
    pub items: u64,
    pub transactions: u64,
    pub applications: u64,
}

pub struct BranchRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BranchRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateBranchParams) -> Result<Branch, DbErr> {
        let entity = entity::branch::ActiveModel {
            name: ActiveValue::Set(params.name),
            address: ActiveValue::Set(params.address),
            city: ActiveValue::Set(params.city),
            state: ActiveValue::Set(params.state),
            phone: ActiveValue::Set(params.phone),
            email: ActiveValue::Set(params.email),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Branch::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Branch>, DbErr> {
        let entity = entity::prelude::Branch::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Branch::from_entity))
    }

    pub async fn get_all(&self) -> Result<Vec<Branch>, DbErr> {
        let entities = entity::prelude::Branch::find()
            .order_by_asc(entity::branch::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Branch::from_entity).collect())
    }

    /// Gets a page of branches ordered by name.
    ///
    /// # Returns
    /// - `Ok((branches, total_items))` - Branches on the page and the number matching the filter
    /// - `Err(DbErr)` - Database error
    pub async fn get_all_paginated(
        &self,
        filter: &BranchFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Branch>, u64), DbErr> {
        let mut condition = Condition::all();
        if let Some(is_active) = filter.is_active {
            condition = condition.add(entity::branch::Column::IsActive.eq(is_active));
        }
        if let Some(search) = &filter.search {
            condition = condition.add(
                Condition::any()
                    .add(entity::branch::Column::Name.contains(search))
                    .add(entity::branch::Column::City.contains(search)),
            );
        }

        let paginator = entity::prelude::Branch::find()
            .filter(condition)
            .order_by_asc(entity::branch::Column::Name)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(Branch::from_entity).collect(), total))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateBranchParams,
    ) -> Result<Option<Branch>, DbErr> {
        let Some(branch) = entity::prelude::Branch::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::branch::ActiveModel = branch.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(address) = params.address {
            active_model.address = ActiveValue::Set(Some(address));
        }
        if let Some(city) = params.city {
            active_model.city = ActiveValue::Set(Some(city));
        }
        if let Some(state) = params.state {
            active_model.state = ActiveValue::Set(Some(state));
        }
        if let Some(phone) = params.phone {
            active_model.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(email) = params.email {
            active_model.email = ActiveValue::Set(Some(email));
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(Branch::from_entity(entity)))
    }

    /// Counts the employees, items, transactions and loan applications that reference
    /// a branch.
    pub async fn count_dependents(&self, id: i32) -> Result<BranchDependents, DbErr> {
        let employees = entity::prelude::Employee::find()
            .filter(entity::employee::Column::BranchId.eq(id))
            .count(self.db)
            .await?;
        let items = entity::prelude::Item::find()
            .filter(entity::item::Column::BranchId.eq(id))
            .count(self.db)
            .await?;
        let transactions = entity::prelude::Transaction::find()
            .filter(entity::transaction::Column::BranchId.eq(id))
            .count(self.db)
            .await?;
        let applications = entity::prelude::Application::find()
            .filter(entity::application::Column::BranchId.eq(id))
            .count(self.db)
            .await?;

        Ok(BranchDependents {
            employees,
            items,
            transactions,
            applications,
        })
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Branch::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
