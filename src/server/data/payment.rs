use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::payment::{CreatePaymentParams, Payment, UpdatePaymentParams};

pub struct PaymentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PaymentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreatePaymentParams) -> Result<Payment, DbErr> {
        let entity = entity::payment::ActiveModel {
            loan_id: ActiveValue::Set(params.loan_id),
            amount: ActiveValue::Set(params.amount),
            payment_date: ActiveValue::Set(params.payment_date),
            payment_method: ActiveValue::Set(params.payment_method),
            reference_number: ActiveValue::Set(params.reference_number),
            notes: ActiveValue::Set(params.notes),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Payment::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Payment>, DbErr> {
        let entity = entity::prelude::Payment::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Payment::from_entity))
    }

    /// Payments of a loan, newest first.
    pub async fn get_by_loan(&self, loan_id: i32) -> Result<Vec<Payment>, DbErr> {
        let entities = entity::prelude::Payment::find()
            .filter(entity::payment::Column::LoanId.eq(loan_id))
            .order_by_desc(entity::payment::Column::PaymentDate)
            .order_by_desc(entity::payment::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Payment::from_entity).collect())
    }

    /// Gets a page of payments, newest first, optionally for one loan.
    pub async fn get_all_paginated(
        &self,
        loan_id: Option<i32>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Payment>, u64), DbErr> {
        let mut condition = Condition::all();
        if let Some(loan_id) = loan_id {
            condition = condition.add(entity::payment::Column::LoanId.eq(loan_id));
        }

        let paginator = entity::prelude::Payment::find()
            .filter(condition)
            .order_by_desc(entity::payment::Column::PaymentDate)
            .order_by_desc(entity::payment::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((entities.into_iter().map(Payment::from_entity).collect(), total))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdatePaymentParams,
    ) -> Result<Option<Payment>, DbErr> {
        let Some(payment) = entity::prelude::Payment::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::payment::ActiveModel = payment.into();
        if let Some(amount) = params.amount {
            active_model.amount = ActiveValue::Set(amount);
        }
        if let Some(payment_date) = params.payment_date {
            active_model.payment_date = ActiveValue::Set(payment_date);
        }
        if let Some(payment_method) = params.payment_method {
            active_model.payment_method = ActiveValue::Set(payment_method);
        }
        if let Some(reference_number) = params.reference_number {
            active_model.reference_number = ActiveValue::Set(Some(reference_number));
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(Some(notes));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(Payment::from_entity(entity)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Payment::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
