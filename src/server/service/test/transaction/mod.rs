use crate::server::{
    error::AppError,
    model::transaction::{CreateTransactionParams, UpdateTransactionParams},
    service::transaction::TransactionService,
    util::time::today,
};
use chrono::Utc;
use entity::{
    payment::PaymentMethod,
    transaction::{TransactionStatus, TransactionType},
};
use test_utils::{builder::TestBuilder, factory};

mod close;
mod create;

fn sale_params(branch_id: i32, amount: i64) -> CreateTransactionParams {
    CreateTransactionParams {
        transaction_type: TransactionType::Sale,
        amount,
        payment_method: PaymentMethod::Cash,
        status: TransactionStatus::Pending,
        reference_number: None,
        customer_id: None,
        employee_id: None,
        loan_id: None,
        item_id: None,
        branch_id,
        transaction_date: Utc::now(),
        notes: None,
    }
}
