use chrono::Utc;
use entity::transaction::TransactionStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::transaction::{
    CreateTransactionParams, Transaction, TransactionDetails, TransactionFilter,
    UpdateTransactionParams,
};

pub struct TransactionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TransactionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a ledger row under the given transaction code.
    pub async fn create(
        &self,
        params: CreateTransactionParams,
        transaction_code: String,
    ) -> Result<Transaction, DbErr> {
        let entity = entity::transaction::ActiveModel {
            transaction_code: ActiveValue::Set(transaction_code),
            transaction_type: ActiveValue::Set(params.transaction_type),
            amount: ActiveValue::Set(params.amount),
            payment_method: ActiveValue::Set(params.payment_method),
            status: ActiveValue::Set(params.status),
            reference_number: ActiveValue::Set(params.reference_number),
            customer_id: ActiveValue::Set(params.customer_id),
            employee_id: ActiveValue::Set(params.employee_id),
            loan_id: ActiveValue::Set(params.loan_id),
            item_id: ActiveValue::Set(params.item_id),
            branch_id: ActiveValue::Set(params.branch_id),
            transaction_date: ActiveValue::Set(params.transaction_date),
            notes: ActiveValue::Set(params.notes),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Transaction::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Transaction>, DbErr> {
        let entity = entity::prelude::Transaction::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(Transaction::from_entity))
    }

    /// Finds a transaction with the names of its customer, branch, item and loan.
    pub async fn find_details(&self, id: i32) -> Result<Option<TransactionDetails>, DbErr> {
        let Some(transaction) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let customer_name = match transaction.customer_id {
            Some(customer_id) => entity::prelude::Customer::find_by_id(customer_id)
                .one(self.db)
                .await?
                .map(|c| format!("{} {}", c.first_name, c.last_name)),
            None => None,
        };
        let branch_name = entity::prelude::Branch::find_by_id(transaction.branch_id)
            .one(self.db)
            .await?
            .map(|b| b.name);
        let item_name = match transaction.item_id {
            Some(item_id) => entity::prelude::Item::find_by_id(item_id)
                .one(self.db)
                .await?
                .map(|i| i.name),
            None => None,
        };
        let loan_code = match transaction.loan_id {
            Some(loan_id) => entity::prelude::Loan::find_by_id(loan_id)
                .one(self.db)
                .await?
                .map(|l| l.loan_code),
            None => None,
        };

        Ok(Some(TransactionDetails {
            transaction,
            customer_name,
            branch_name,
            item_name,
            loan_code,
        }))
    }

    pub async fn code_exists(&self, transaction_code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Transaction::find()
            .filter(entity::transaction::Column::TransactionCode.eq(transaction_code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of transactions matching the filter, most recent first.
    ///
    /// # Returns
    /// - `Ok((transactions, total_items))` - Transactions on the page and the number matching
    /// - `Err(DbErr)` - Database error
    pub async fn get_all_paginated(
        &self,
        filter: &TransactionFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Transaction>, u64), DbErr> {
        let paginator = entity::prelude::Transaction::find()
            .filter(Self::condition(filter))
            .order_by_desc(entity::transaction::Column::TransactionDate)
            .order_by_desc(entity::transaction::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((
            entities.into_iter().map(Transaction::from_entity).collect(),
            total,
        ))
    }

    /// Gets every transaction matching the filter, used for statistics and reports.
    pub async fn get_all(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, DbErr> {
        let entities = entity::prelude::Transaction::find()
            .filter(Self::condition(filter))
            .order_by_desc(entity::transaction::Column::TransactionDate)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Transaction::from_entity).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateTransactionParams,
    ) -> Result<Option<Transaction>, DbErr> {
        let Some(transaction) = entity::prelude::Transaction::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::transaction::ActiveModel = transaction.into();
        if let Some(transaction_type) = params.transaction_type {
            active_model.transaction_type = ActiveValue::Set(transaction_type);
        }
        if let Some(amount) = params.amount {
            active_model.amount = ActiveValue::Set(amount);
        }
        if let Some(payment_method) = params.payment_method {
            active_model.payment_method = ActiveValue::Set(payment_method);
        }
        if let Some(status) = params.status {
            active_model.status = ActiveValue::Set(status);
        }
        if let Some(reference_number) = params.reference_number {
            active_model.reference_number = ActiveValue::Set(Some(reference_number));
        }
        if let Some(transaction_date) = params.transaction_date {
            active_model.transaction_date = ActiveValue::Set(transaction_date);
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(Some(notes));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(Transaction::from_entity(entity)))
    }

    /// Sets a transaction's status and notes.
    pub async fn set_status(
        &self,
        id: i32,
        status: TransactionStatus,
        notes: String,
    ) -> Result<Option<Transaction>, DbErr> {
        self.update(
            id,
            UpdateTransactionParams {
                status: Some(status),
                notes: Some(notes),
                ..Default::default()
            },
        )
        .await
    }

    fn condition(filter: &TransactionFilter) -> Condition {
        let mut condition = Condition::all();
        if let Some(term) = &filter.search_term {
            condition = condition.add(
                Condition::any()
                    .add(entity::transaction::Column::TransactionCode.contains(term))
                    .add(entity::transaction::Column::ReferenceNumber.contains(term))
                    .add(entity::transaction::Column::Notes.contains(term)),
            );
        }
        if let Some(transaction_type) = filter.transaction_type {
            condition =
                condition.add(entity::transaction::Column::TransactionType.eq(transaction_type));
        }
        if let Some(status) = filter.status {
            condition = condition.add(entity::transaction::Column::Status.eq(status));
        }
        if let Some(payment_method) = filter.payment_method {
            condition =
                condition.add(entity::transaction::Column::PaymentMethod.eq(payment_method));
        }
        if let Some(customer_id) = filter.customer_id {
            condition = condition.add(entity::transaction::Column::CustomerId.eq(customer_id));
        }
        if let Some(branch_id) = filter.branch_id {
            condition = condition.add(entity::transaction::Column::BranchId.eq(branch_id));
        }
        if let Some(loan_id) = filter.loan_id {
            condition = condition.add(entity::transaction::Column::LoanId.eq(loan_id));
        }
        if let Some(min_amount) = filter.min_amount {
            condition = condition.add(entity::transaction::Column::Amount.gte(min_amount));
        }
        if let Some(max_amount) = filter.max_amount {
            condition = condition.add(entity::transaction::Column::Amount.lte(max_amount));
        }
        if let Some(start_date) = filter.start_date {
            condition = condition.add(entity::transaction::Column::TransactionDate.gte(start_date));
        }
        if let Some(end_date) = filter.end_date {
            condition = condition.add(entity::transaction::Column::TransactionDate.lte(end_date));
        }
        condition
    }
}
