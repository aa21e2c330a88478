//! Loan data repository.
//!
//! Loans are returned with `total_paid` already summed from their payments, so every
//! read yields a `Loan` that can compute its balance without further queries.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use entity::loan::LoanStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::loan::{CreateLoanParams, Loan, LoanFilter, UpdateLoanParams};

pub struct LoanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LoanRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a loan under the given loan code.
    ///
    /// Only the loan row is written; the initial payment and item status are the
    /// caller's responsibility.
    pub async fn create(&self, params: &CreateLoanParams, loan_code: String) -> Result<Loan, DbErr> {
        let entity = entity::loan::ActiveModel {
            loan_code: ActiveValue::Set(loan_code),
            customer_id: ActiveValue::Set(params.customer_id),
            item_id: ActiveValue::Set(params.item_id),
            loan_amount: ActiveValue::Set(params.loan_amount),
            interest_rate: ActiveValue::Set(params.interest_rate),
            term_days: ActiveValue::Set(params.term_days),
            start_date: ActiveValue::Set(params.start_date),
            due_date: ActiveValue::Set(params.due_date),
            status: ActiveValue::Set(params.status),
            collateral_description: ActiveValue::Set(params.collateral_description.clone()),
            notes: ActiveValue::Set(params.notes.clone()),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Loan::from_entity(entity, 0))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Loan>, DbErr> {
        let Some(entity) = entity::prelude::Loan::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let total_paid = self.total_paid(id).await?;

        Ok(Some(Loan::from_entity(entity, total_paid)))
    }

    pub async fn code_exists(&self, loan_code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Loan::find()
            .filter(entity::loan::Column::LoanCode.eq(loan_code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Most recently created loan secured by an item.
    pub async fn find_latest_for_item(&self, item_id: i32) -> Result<Option<Loan>, DbErr> {
        let Some(entity) = entity::prelude::Loan::find()
            .filter(entity::loan::Column::ItemId.eq(item_id))
            .order_by_desc(entity::loan::Column::CreatedAt)
            .order_by_desc(entity::loan::Column::Id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let total_paid = self.total_paid(entity.id).await?;

        Ok(Some(Loan::from_entity(entity, total_paid)))
    }

    /// Gets a page of loans matching the filter, newest first.
    ///
    /// # Arguments
    /// - `filter` - Loan filters
    /// - `today` - Reference date for the `is_overdue` filter
    /// - `page` - Zero-based page index
    /// - `per_page` - Page size
    ///
    /// # Returns
    /// - `Ok((loans, total_items))` - Loans on the page and the number matching
    /// - `Err(DbErr)` - Database error
    pub async fn get_all_paginated(
        &self,
        filter: &LoanFilter,
        today: NaiveDate,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Loan>, u64), DbErr> {
        let paginator = entity::prelude::Loan::find()
            .filter(Self::condition(filter, today))
            .order_by_desc(entity::loan::Column::CreatedAt)
            .order_by_desc(entity::loan::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.with_totals(entities).await?, total))
    }

    /// Gets every loan matching the filter, used for statistics and reports.
    pub async fn get_all(&self, filter: &LoanFilter, today: NaiveDate) -> Result<Vec<Loan>, DbErr> {
        let entities = entity::prelude::Loan::find()
            .filter(Self::condition(filter, today))
            .order_by_desc(entity::loan::Column::CreatedAt)
            .all(self.db)
            .await?;

        self.with_totals(entities).await
    }

    pub async fn update(&self, id: i32, params: UpdateLoanParams) -> Result<Option<Loan>, DbErr> {
        let Some(loan) = entity::prelude::Loan::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active_model: entity::loan::ActiveModel = loan.into();
        if let Some(loan_amount) = params.loan_amount {
            active_model.loan_amount = ActiveValue::Set(loan_amount);
        }
        if let Some(interest_rate) = params.interest_rate {
            active_model.interest_rate = ActiveValue::Set(interest_rate);
        }
        if let Some(term_days) = params.term_days {
            active_model.term_days = ActiveValue::Set(term_days);
        }
        if let Some(due_date) = params.due_date {
            active_model.due_date = ActiveValue::Set(due_date);
        }
        if let Some(status) = params.status {
            active_model.status = ActiveValue::Set(status);
        }
        if let Some(collateral_description) = params.collateral_description {
            active_model.collateral_description = ActiveValue::Set(Some(collateral_description));
        }
        if let Some(notes) = params.notes {
            active_model.notes = ActiveValue::Set(Some(notes));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));
        active_model.update(self.db).await?;

        self.find_by_id(id).await
    }

    /// Sets a loan's status, replacing its notes when `notes` is given.
    pub async fn set_status(
        &self,
        id: i32,
        status: LoanStatus,
        notes: Option<String>,
    ) -> Result<(), DbErr> {
        let mut update = entity::prelude::Loan::update_many()
            .filter(entity::loan::Column::Id.eq(id))
            .col_expr(
                entity::loan::Column::Status,
                sea_orm::sea_query::Expr::value(status),
            )
            .col_expr(
                entity::loan::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            );
        if let Some(notes) = notes {
            update = update.col_expr(
                entity::loan::Column::Notes,
                sea_orm::sea_query::Expr::value(notes),
            );
        }

        update.exec(self.db).await?;
        Ok(())
    }

    /// Moves the due date and term of an extended loan and marks it `extended`,
    /// replacing its notes when `notes` is given.
    pub async fn extend(
        &self,
        id: i32,
        due_date: NaiveDate,
        term_days: i32,
        notes: Option<String>,
    ) -> Result<(), DbErr> {
        let mut update = entity::prelude::Loan::update_many()
            .filter(entity::loan::Column::Id.eq(id))
            .col_expr(
                entity::loan::Column::DueDate,
                sea_orm::sea_query::Expr::value(due_date),
            )
            .col_expr(
                entity::loan::Column::TermDays,
                sea_orm::sea_query::Expr::value(term_days),
            )
            .col_expr(
                entity::loan::Column::Status,
                sea_orm::sea_query::Expr::value(LoanStatus::Extended),
            )
            .col_expr(
                entity::loan::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            );
        if let Some(notes) = notes {
            update = update.col_expr(
                entity::loan::Column::Notes,
                sea_orm::sea_query::Expr::value(notes),
            );
        }

        update.exec(self.db).await?;
        Ok(())
    }

    /// Sum of the payments recorded against a loan.
    pub async fn total_paid(&self, loan_id: i32) -> Result<i64, DbErr> {
        let payments = entity::prelude::Payment::find()
            .filter(entity::payment::Column::LoanId.eq(loan_id))
            .all(self.db)
            .await?;

        Ok(payments.iter().map(|p| p.amount).sum())
    }

    async fn with_totals(&self, loans: Vec<entity::loan::Model>) -> Result<Vec<Loan>, DbErr> {
        if loans.is_empty() {
            return Ok(Vec::new());
        }

        let loan_ids: Vec<i32> = loans.iter().map(|l| l.id).collect();
        let mut totals: HashMap<i32, i64> = HashMap::new();
        for payment in entity::prelude::Payment::find()
            .filter(entity::payment::Column::LoanId.is_in(loan_ids))
            .all(self.db)
            .await?
        {
            *totals.entry(payment.loan_id).or_default() += payment.amount;
        }

        Ok(loans
            .into_iter()
            .map(|loan| {
                let total_paid = totals.get(&loan.id).copied().unwrap_or(0);
                Loan::from_entity(loan, total_paid)
            })
            .collect())
    }

    fn condition(filter: &LoanFilter, today: NaiveDate) -> Condition {
        let mut condition = Condition::all();
        if let Some(term) = &filter.search_term {
            condition = condition.add(
                Condition::any()
                    .add(entity::loan::Column::LoanCode.contains(term))
                    .add(entity::loan::Column::Notes.contains(term)),
            );
        }
        if let Some(status) = filter.status {
            condition = condition.add(entity::loan::Column::Status.eq(status));
        }
        if let Some(customer_id) = filter.customer_id {
            condition = condition.add(entity::loan::Column::CustomerId.eq(customer_id));
        }
        if let Some(item_id) = filter.item_id {
            condition = condition.add(entity::loan::Column::ItemId.eq(item_id));
        }
        if let Some(min_amount) = filter.min_amount {
            condition = condition.add(entity::loan::Column::LoanAmount.gte(min_amount));
        }
        if let Some(max_amount) = filter.max_amount {
            condition = condition.add(entity::loan::Column::LoanAmount.lte(max_amount));
        }
        if let Some(from) = filter.start_date_from {
            condition = condition.add(entity::loan::Column::StartDate.gte(from));
        }
        if let Some(to) = filter.start_date_to {
            condition = condition.add(entity::loan::Column::StartDate.lte(to));
        }
        if let Some(from) = filter.due_date_from {
            condition = condition.add(entity::loan::Column::DueDate.gte(from));
        }
        if let Some(to) = filter.due_date_to {
            condition = condition.add(entity::loan::Column::DueDate.lte(to));
        }
        if let Some(is_overdue) = filter.is_overdue {
            let overdue = Condition::all()
                .add(entity::loan::Column::Status.is_in(LoanStatus::OPEN))
                .add(entity::loan::Column::DueDate.lt(today));
            condition = condition.add(if is_overdue { overdue } else { overdue.not() });
        }
        condition
    }
}
