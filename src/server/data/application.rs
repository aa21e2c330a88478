use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::{
    sea_query::Order, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::model::application::{
    Application, ApplicationFilter, ApplicationSortField, CreateApplicationParams,
    UpdateApplicationParams,
};

pub struct ApplicationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ApplicationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending application under the given application number.
    pub async fn create(
        &self,
        params: CreateApplicationParams,
        application_number: String,
    ) -> Result<Application, DbErr> {
        let entity = entity::application::ActiveModel {
            application_number: ActiveValue::Set(application_number),
            customer_id: ActiveValue::Set(params.customer_id),
            branch_id: ActiveValue::Set(params.branch_id),
            item_category: ActiveValue::Set(params.item_category),
            item_description: ActiveValue::Set(params.item_description),
            estimated_value: ActiveValue::Set(params.estimated_value),
            loan_amount: ActiveValue::Set(params.loan_amount),
            interest_rate: ActiveValue::Set(params.interest_rate),
            term_months: ActiveValue::Set(params.term_months),
            status: ActiveValue::Set(entity::application::ApplicationStatus::Pending),
            notes: ActiveValue::Set(params.notes),
            processed_by_id: ActiveValue::Set(None),
            processed_at: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Application::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Application>, DbErr> {
        let entity = entity::prelude::Application::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Application::from_entity))
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Application>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Application::find()
            .filter(entity::application::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(entity::application::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Application::from_entity).collect())
    }

    pub async fn number_exists(&self, application_number: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Application::find()
            .filter(entity::application::Column::ApplicationNumber.eq(application_number))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of applications matching the filter in the filter's sort order.
    ///
    /// # Returns
    /// - `Ok((applications, total_items))` - Applications on the page and the number matching
    /// - `Err(DbErr)` - Database error
    pub async fn get_all_paginated(
        &self,
        filter: &ApplicationFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Application>, u64), DbErr> {
        let paginator = Self::select(filter).paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((
            entities.into_iter().map(Application::from_entity).collect(),
            total,
        ))
    }

    /// Gets every application matching the filter, used for exports and statistics.
    pub async fn get_all(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, DbErr> {
        let entities = Self::select(filter).all(self.db).await?;

        Ok(entities.into_iter().map(Application::from_entity).collect())
    }

    /// Gets applications created at or after `since`, oldest first.
    pub async fn get_created_since(&self, since: DateTime<Utc>) -> Result<Vec<Application>, DbErr> {
        let entities = entity::prelude::Application::find()
            .filter(entity::application::Column::CreatedAt.gte(since))
            .order_by_asc(entity::application::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Application::from_entity).collect())
    }

    /// Applies the set fields of `params`.
    ///
    /// # Arguments
    /// - `id` - Application id
    /// - `params` - Fields to change
    /// - `processed_by` - User id and time to record when the status changes
    ///
    /// # Returns
    /// - `Ok(Some(Application))` - The updated application
    /// - `Ok(None)` - No application with this id
    /// - `Err(DbErr)` - Database error
    pub async fn update(
        &self,
        id: i32,
        params: UpdateApplicationParams,
        processed_by: Option<(i32, DateTime<Utc>)>,
    ) -> Result<Option<Application>, DbErr> {
        let Some(application) = entity::prelude::Application::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::application::ActiveModel = application.into();
        if let Some(item_category) = params.item_category {
            active_model.item_category = ActiveValue::Set(item_category);
        }
        if let Some(item_description) = params.item_description {
            active_model.item_description = ActiveValue::Set(item_description);
        }
        if let Some(estimated_value) = params.estimated_value {
            active_model.estimated_value = ActiveValue::Set(estimated_value);
        }
        if let Some(loan_amount) = params.loan_amount {
            active_model.loan_amount = ActiveValue::Set(loan_amount);
        }
        if let Some(interest_rate) = params.interest_rate {
            active_model.interest_rate = ActiveValue::Set(interest_rate);
        }
        if let Some(term_months) = params.term_months {
            active_model.term_months = ActiveValue::Set(term_months);
        }
        if let Some(status) = params.status {
            active_model.status = ActiveValue::Set(status);
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(Some(notes));
        }
        if let Some(rejection_reason) = params.rejection_reason {
            active_model.rejection_reason = ActiveValue::Set(Some(rejection_reason));
        }
        if let Some((user_id, processed_at)) = processed_by {
            active_model.processed_by_id = ActiveValue::Set(Some(user_id));
            active_model.processed_at = ActiveValue::Set(Some(processed_at));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(Application::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Application::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Application::delete_many()
            .filter(entity::application::Column::Id.is_in(ids.to_vec()))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    fn select(filter: &ApplicationFilter) -> Select<entity::prelude::Application> {
        use entity::application::Column;

        let mut condition = Condition::all();
        if let Some(status) = filter.status {
            condition = condition.add(Column::Status.eq(status));
        }
        if let Some(customer_id) = filter.customer_id {
            condition = condition.add(Column::CustomerId.eq(customer_id));
        }
        if let Some(branch_id) = filter.branch_id {
            condition = condition.add(Column::BranchId.eq(branch_id));
        }
        if let Some(item_category) = filter.item_category {
            condition = condition.add(Column::ItemCategory.eq(item_category));
        }
        if let Some(min) = filter.min_estimated_value {
            condition = condition.add(Column::EstimatedValue.gte(min));
        }
        if let Some(max) = filter.max_estimated_value {
            condition = condition.add(Column::EstimatedValue.lte(max));
        }
        if let Some(min) = filter.min_loan_amount {
            condition = condition.add(Column::LoanAmount.gte(min));
        }
        if let Some(max) = filter.max_loan_amount {
            condition = condition.add(Column::LoanAmount.lte(max));
        }
        if let Some(date_from) = filter.date_from {
            let start = date_from.and_time(NaiveTime::MIN).and_utc();
            condition = condition.add(Column::CreatedAt.gte(start));
        }
        if let Some(next_day) = filter.date_to.and_then(|date_to| date_to.succ_opt()) {
            let end = next_day.and_time(NaiveTime::MIN).and_utc();
            condition = condition.add(Column::CreatedAt.lt(end));
        }
        if let Some(search) = &filter.search {
            condition = condition.add(
                Condition::any()
                    .add(Column::ApplicationNumber.contains(search))
                    .add(Column::ItemDescription.contains(search))
                    .add(Column::Notes.contains(search)),
            );
        }

        let column = match filter.sort_by {
            ApplicationSortField::CreatedAt => Column::CreatedAt,
            ApplicationSortField::UpdatedAt => Column::UpdatedAt,
            ApplicationSortField::ApplicationNumber => Column::ApplicationNumber,
            ApplicationSortField::EstimatedValue => Column::EstimatedValue,
            ApplicationSortField::LoanAmount => Column::LoanAmount,
        };
        let order = if filter.ascending { Order::Asc } else { Order::Desc };

        entity::prelude::Application::find()
            .filter(condition)
            .order_by(column, order.clone())
            .order_by(Column::Id, order)
    }
}
