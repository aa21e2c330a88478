use crate::{
    model::loan::{CreateLoanDto, DefaultLoanDto, ExtendLoanDto, RedeemLoanDto},
    server::{
        error::AppError,
        model::{
            loan::{CreateLoanParams, UpdateLoanParams},
            payment::CreatePaymentParams,
        },
        service::loan::LoanService,
        util::time::today,
    },
};
use chrono::{Duration, Utc};
use entity::{
    item::ItemStatus, loan::LoanStatus, payment::PaymentMethod, transaction::TransactionType,
};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod add_payment;
mod create;
mod default_loan;
mod stats;
mod update;

/// A 10_000 cent loan at 10% over 30 days starting today.
fn loan_params(customer_id: i32, item_id: i32) -> CreateLoanParams {
    let start_date = today();
    CreateLoanParams {
        customer_id,
        item_id,
        loan_amount: 10_000,
        interest_rate: 10.0,
        term_days: 30,
        start_date,
        due_date: start_date + Duration::days(30),
        status: LoanStatus::Active,
        collateral_description: None,
        notes: None,
        initial_payment: None,
        payment_method: PaymentMethod::Cash,
    }
}

fn payment_params(loan_id: i32, amount: i64) -> CreatePaymentParams {
    CreatePaymentParams {
        loan_id,
        amount,
        payment_method: PaymentMethod::Cash,
        payment_date: Utc::now(),
        reference_number: None,
        notes: None,
    }
}

async fn item_status(db: &DatabaseConnection, item_id: i32) -> Result<ItemStatus, DbErr> {
    let item = entity::prelude::Item::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("item".to_string()))?;
    Ok(item.status)
}

async fn ledger(db: &DatabaseConnection) -> Result<Vec<entity::transaction::Model>, DbErr> {
    entity::prelude::Transaction::find().all(db).await
}
