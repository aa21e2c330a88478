use chrono::Utc;
use entity::{item::ItemStatus, loan::LoanStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::item::{CreateItemParams, Item, ItemFilter, UpdateItemParams};

pub struct ItemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ItemRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an item under the given item code.
    pub async fn create(&self, params: CreateItemParams, item_code: String) -> Result<Item, DbErr> {
        let entity = entity::item::ActiveModel {
            item_code: ActiveValue::Set(item_code),
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            category: ActiveValue::Set(params.category),
            status: ActiveValue::Set(params.status),
            serial_number: ActiveValue::Set(params.serial_number),
            appraisal_value: ActiveValue::Set(params.appraisal_value),
            selling_price: ActiveValue::Set(params.selling_price),
            condition: ActiveValue::Set(params.condition),
            notes: ActiveValue::Set(params.notes),
            customer_id: ActiveValue::Set(params.customer_id),
            branch_id: ActiveValue::Set(params.branch_id),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Item::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Item>, DbErr> {
        let entity = entity::prelude::Item::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Item::from_entity))
    }

    pub async fn code_exists(&self, item_code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Item::find()
            .filter(entity::item::Column::ItemCode.eq(item_code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of items matching the filter, newest first.
    ///
    /// # Returns
    /// - `Ok((items, total_items))` - Items on the page and the number matching
    /// - `Err(DbErr)` - Database error
    pub async fn get_all_paginated(
        &self,
        filter: &ItemFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Item>, u64), DbErr> {
        let paginator = entity::prelude::Item::find()
            .filter(Self::condition(filter))
            .order_by_desc(entity::item::Column::CreatedAt)
            .order_by_desc(entity::item::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(Item::from_entity).collect(), total))
    }

    /// Gets every item matching the filter, used for statistics and reports.
    pub async fn get_all(&self, filter: &ItemFilter) -> Result<Vec<Item>, DbErr> {
        let entities = entity::prelude::Item::find()
            .filter(Self::condition(filter))
            .order_by_desc(entity::item::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Item::from_entity).collect())
    }

    pub async fn find_by_ids(&self, ids: Vec<i32>) -> Result<Vec<Item>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Item::find()
            .filter(entity::item::Column::Id.is_in(ids))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Item::from_entity).collect())
    }

    pub async fn update(&self, id: i32, params: UpdateItemParams) -> Result<Option<Item>, DbErr> {
        let Some(item) = entity::prelude::Item::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::item::ActiveModel = item.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        if let Some(category) = params.category {
            active_model.category = ActiveValue::Set(category);
        }
        if let Some(status) = params.status {
            active_model.status = ActiveValue::Set(status);
        }
        if let Some(serial_number) = params.serial_number {
            active_model.serial_number = ActiveValue::Set(Some(serial_number));
        }
        if let Some(appraisal_value) = params.appraisal_value {
            active_model.appraisal_value = ActiveValue::Set(appraisal_value);
        }
        if let Some(selling_price) = params.selling_price {
            active_model.selling_price = ActiveValue::Set(Some(selling_price));
        }
        if let Some(condition) = params.condition {
            active_model.condition = ActiveValue::Set(Some(condition));
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(Some(notes));
        }
        if let Some(customer_id) = params.customer_id {
            active_model.customer_id = ActiveValue::Set(Some(customer_id));
        }
        if let Some(branch_id) = params.branch_id {
            active_model.branch_id = ActiveValue::Set(branch_id);
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(Item::from_entity(entity)))
    }

    /// Sets an item's status, replacing its notes when `notes` is given.
    pub async fn set_status(
        &self,
        id: i32,
        status: ItemStatus,
        notes: Option<String>,
    ) -> Result<Option<Item>, DbErr> {
        let Some(item) = entity::prelude::Item::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::item::ActiveModel = item.into();
        active_model.status = ActiveValue::Set(status);
        if let Some(notes) = notes {
            active_model.notes = ActiveValue::Set(Some(notes));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(Item::from_entity(entity)))
    }

    /// Checks whether the item secures a loan in an open status.
    pub async fn has_open_loan(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Loan::find()
            .filter(entity::loan::Column::ItemId.eq(id))
            .filter(entity::loan::Column::Status.is_in(LoanStatus::SECURING))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Counts every loan ever written against the item, whatever its status.
    pub async fn count_loans(&self, id: i32) -> Result<u64, DbErr> {
        entity::prelude::Loan::find()
            .filter(entity::loan::Column::ItemId.eq(id))
            .count(self.db)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Item::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }

    fn condition(filter: &ItemFilter) -> Condition {
        let mut condition = Condition::all();
        if let Some(term) = &filter.search_term {
            condition = condition.add(
                Condition::any()
                    .add(entity::item::Column::Name.contains(term))
                    .add(entity::item::Column::ItemCode.contains(term))
                    .add(entity::item::Column::SerialNumber.contains(term)),
            );
        }
        if let Some(category) = filter.category {
            condition = condition.add(entity::item::Column::Category.eq(category));
        }
        if let Some(status) = filter.status {
            condition = condition.add(entity::item::Column::Status.eq(status));
        }
        if let Some(min_value) = filter.min_value {
            condition = condition.add(entity::item::Column::AppraisalValue.gte(min_value));
        }
        if let Some(max_value) = filter.max_value {
            condition = condition.add(entity::item::Column::AppraisalValue.lte(max_value));
        }
        if let Some(customer_id) = filter.customer_id {
            condition = condition.add(entity::item::Column::CustomerId.eq(customer_id));
        }
        if let Some(branch_id) = filter.branch_id {
            condition = condition.add(entity::item::Column::BranchId.eq(branch_id));
        }
        if let Some(created_after) = filter.created_after {
            condition = condition.add(entity::item::Column::CreatedAt.gte(created_after));
        }
        if let Some(created_before) = filter.created_before {
            condition = condition.add(entity::item::Column::CreatedAt.lte(created_before));
        }
        condition
    }
}
