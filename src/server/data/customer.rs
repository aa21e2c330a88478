use chrono::Utc;
use entity::loan::LoanStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::customer::{
    CreateCustomerParams, Customer, CustomerFilter, UpdateCustomerParams,
};

pub struct CustomerRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CustomerRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a customer under the given customer code.
    pub async fn create(
        &self,
        params: CreateCustomerParams,
        customer_code: String,
    ) -> Result<Customer, DbErr> {
        let entity = entity::customer::ActiveModel {
            customer_code: ActiveValue::Set(customer_code),
            first_name: ActiveValue::Set(params.first_name),
            last_name: ActiveValue::Set(params.last_name),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            address: ActiveValue::Set(params.address),
            city: ActiveValue::Set(params.city),
            state: ActiveValue::Set(params.state),
            zip_code: ActiveValue::Set(params.zip_code),
            id_type: ActiveValue::Set(params.id_type),
            id_number: ActiveValue::Set(params.id_number),
            date_of_birth: ActiveValue::Set(params.date_of_birth),
            notes: ActiveValue::Set(params.notes),
            is_active: ActiveValue::Set(true),
            credit_score: ActiveValue::Set(params.credit_score),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Customer::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DbErr> {
        let entity = entity::prelude::Customer::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Customer::from_entity))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DbErr> {
        let entity = entity::prelude::Customer::find()
            .filter(entity::customer::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(Customer::from_entity))
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>, DbErr> {
        let entity = entity::prelude::Customer::find()
            .filter(entity::customer::Column::Phone.eq(phone))
            .one(self.db)
            .await?;

        Ok(entity.map(Customer::from_entity))
    }

    pub async fn code_exists(&self, customer_code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Customer::find()
            .filter(entity::customer::Column::CustomerCode.eq(customer_code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of customers matching the filter, newest first.
    ///
    /// # Returns
    /// - `Ok((customers, total_items))` - Customers on the page and the number matching
    /// - `Err(DbErr)` - Database error
    pub async fn get_all_paginated(
        &self,
        filter: &CustomerFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Customer>, u64), DbErr> {
        let mut condition = Condition::all();
        if let Some(term) = &filter.search_term {
            condition = condition.add(
                Condition::any()
                    .add(entity::customer::Column::FirstName.contains(term))
                    .add(entity::customer::Column::LastName.contains(term))
                    .add(entity::customer::Column::Email.contains(term))
                    .add(entity::customer::Column::Phone.contains(term))
                    .add(entity::customer::Column::CustomerCode.contains(term)),
            );
        }
        if let Some(email) = &filter.email {
            condition = condition.add(entity::customer::Column::Email.contains(email));
        }
        if let Some(phone) = &filter.phone {
            condition = condition.add(entity::customer::Column::Phone.contains(phone));
        }
        if let Some(customer_code) = &filter.customer_code {
            condition = condition.add(entity::customer::Column::CustomerCode.eq(customer_code));
        }
        if let Some(is_active) = filter.is_active {
            condition = condition.add(entity::customer::Column::IsActive.eq(is_active));
        }
        if let Some(city) = &filter.city {
            condition = condition.add(entity::customer::Column::City.contains(city));
        }
        if let Some(state) = &filter.state {
            condition = condition.add(entity::customer::Column::State.contains(state));
        }

        let paginator = entity::prelude::Customer::find()
            .filter(condition)
            .order_by_desc(entity::customer::Column::CreatedAt)
            .order_by_desc(entity::customer::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(Customer::from_entity).collect(), total))
    }

    pub async fn get_all(&self) -> Result<Vec<Customer>, DbErr> {
        let entities = entity::prelude::Customer::find()
            .order_by_asc(entity::customer::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Customer::from_entity).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateCustomerParams,
    ) -> Result<Option<Customer>, DbErr> {
        let Some(customer) = entity::prelude::Customer::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::customer::ActiveModel = customer.into();
        if let Some(first_name) = params.first_name {
            active_model.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = params.last_name {
            active_model.last_name = ActiveValue::Set(last_name);
        }
        if let Some(email) = params.email {
            active_model.email = ActiveValue::Set(Some(email));
        }
        if let Some(phone) = params.phone {
            active_model.phone = ActiveValue::Set(phone);
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
        if let Some(zip_code) = params.zip_code {
            active_model.zip_code = ActiveValue::Set(Some(zip_code));
        }
        if let Some(id_type) = params.id_type {
            active_model.id_type = ActiveValue::Set(Some(id_type));
        }
        if let Some(id_number) = params.id_number {
            active_model.id_number = ActiveValue::Set(Some(id_number));
        }
        if let Some(date_of_birth) = params.date_of_birth {
            active_model.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(Some(notes));
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        if let Some(credit_score) = params.credit_score {
            active_model.credit_score = ActiveValue::Set(Some(credit_score));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(Customer::from_entity(entity)))
    }

    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<(), DbErr> {
        entity::prelude::Customer::update_many()
            .filter(entity::customer::Column::Id.eq(id))
            .col_expr(
                entity::customer::Column::IsActive,
                sea_orm::sea_query::Expr::value(is_active),
            )
            .col_expr(
                entity::customer::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Counts the customer's loans that still hold collateral, pending ones included.
    pub async fn count_open_loans(&self, id: i32) -> Result<u64, DbErr> {
        entity::prelude::Loan::find()
            .filter(entity::loan::Column::CustomerId.eq(id))
            .filter(entity::loan::Column::Status.is_in(LoanStatus::SECURING))
            .count(self.db)
            .await
    }
}
