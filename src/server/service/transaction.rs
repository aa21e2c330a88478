use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use entity::{
    payment::PaymentMethod,
    transaction::{TransactionStatus, TransactionType},
};
use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseConnection};

use crate::{
    model::{
        api::CountAmountDto,
        transaction::{PeriodTotalDto, TransactionStatsDto},
    },
    server::{
        data::{
            branch::BranchRepository, customer::CustomerRepository, employee::EmployeeRepository,
            item::ItemRepository, loan::LoanRepository, transaction::TransactionRepository,
        },
        error::AppError,
        model::{
            item::append_note,
            loan::Loan,
            transaction::{
                CreateTransactionParams, Transaction, TransactionDetails, TransactionFilter,
                UpdateTransactionParams,
            },
            Paginated,
        },
        service::MAX_CODE_ATTEMPTS,
        util::{
            code::{generate_code, TRANSACTION_PREFIX},
            time::{last_days, last_months, month_key, today},
        },
    },
};

pub struct TransactionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TransactionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &TransactionFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Transaction>, AppError> {
        let (transactions, total) = TransactionRepository::new(self.db)
            .get_all_paginated(filter, page, per_page)
            .await?;

        Ok(Paginated::new(transactions, total, page, per_page))
    }

    pub async fn get_details(&self, id: i32) -> Result<TransactionDetails, AppError> {
        TransactionRepository::new(self.db)
            .find_details(id)
            .await?
            .ok_or_else(not_found)
    }

    /// Records a manual ledger entry after checking every referenced row exists.
    ///
    /// # Returns
    /// - `Ok(Transaction)` - The recorded transaction
    /// - `Err(AppError::NotFound)` - A referenced customer, employee, loan, item or branch is missing
    /// - `Err(AppError::BadRequest)` - Amount is not positive
    pub async fn create(&self, params: CreateTransactionParams) -> Result<Transaction, AppError> {
        if params.amount <= 0 {
            return Err(AppError::BadRequest(
                "Transaction amount must be greater than zero".to_string(),
            ));
        }

        self.ensure_references(&params).await?;

        let code = unique_transaction_code(self.db).await?;
        let transaction = TransactionRepository::new(self.db)
            .create(params, code)
            .await?;

        tracing::info!(
            "Recorded {} transaction {}",
            transaction.transaction_type.to_value(),
            transaction.transaction_code
        );

        Ok(transaction)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateTransactionParams,
    ) -> Result<Transaction, AppError> {
        if let Some(amount) = params.amount {
            if amount <= 0 {
                return Err(AppError::BadRequest(
                    "Transaction amount must be greater than zero".to_string(),
                ));
            }
        }

        self.get_open(id).await?;

        TransactionRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn cancel(&self, id: i32, reason: Option<String>) -> Result<Transaction, AppError> {
        self.close(id, TransactionStatus::Cancelled, "Cancelled", reason)
            .await
    }

    pub async fn complete(&self, id: i32, notes: Option<String>) -> Result<Transaction, AppError> {
        self.close(id, TransactionStatus::Completed, "Completed", notes)
            .await
    }

    /// Transaction figures. Amounts, daily and monthly series count completed
    /// transactions only.
    pub async fn stats(&self) -> Result<TransactionStatsDto, AppError> {
        let today = today();
        let transactions = TransactionRepository::new(self.db)
            .get_all(&TransactionFilter::default())
            .await?;

        let mut by_type: BTreeMap<String, CountAmountDto> = BTreeMap::new();
        let mut by_status: BTreeMap<String, u64> = BTreeMap::new();
        let mut by_payment_method: BTreeMap<String, CountAmountDto> = BTreeMap::new();

        for transaction in &transactions {
            *by_status.entry(transaction.status.to_value()).or_default() += 1;

            let entry = by_type
                .entry(transaction.transaction_type.to_value())
                .or_default();
            entry.count += 1;
            entry.amount += transaction.amount;

            let entry = by_payment_method
                .entry(transaction.payment_method.to_value())
                .or_default();
            entry.count += 1;
            entry.amount += transaction.amount;
        }

        let completed: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Completed)
            .collect();

        let daily = last_days(today, 30)
            .into_iter()
            .map(|day| {
                let matching = completed
                    .iter()
                    .filter(|t| t.transaction_date.date_naive() == day);
                PeriodTotalDto {
                    period: day.to_string(),
                    count: matching.clone().count() as u64,
                    amount: matching.map(|t| t.amount).sum(),
                }
            })
            .collect();

        let monthly = last_months(today, 12)
            .into_iter()
            .map(|(year, month)| {
                let matching = completed.iter().filter(|t| {
                    t.transaction_date.year() == year && t.transaction_date.month() == month
                });
                PeriodTotalDto {
                    period: month_key(year, month),
                    count: matching.clone().count() as u64,
                    amount: matching.map(|t| t.amount).sum(),
                }
            })
            .collect();

        Ok(TransactionStatsDto {
            total_transactions: transactions.len() as u64,
            total_amount: completed.iter().map(|t| t.amount).sum(),
            by_type,
            by_status,
            by_payment_method,
            daily,
            monthly,
        })
    }

    async fn get_open(&self, id: i32) -> Result<Transaction, AppError> {
        let transaction = TransactionRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        if transaction.is_final() {
            return Err(AppError::BadRequest(format!(
                "Cannot update transaction with status: {}",
                transaction.status.to_value()
            )));
        }

        Ok(transaction)
    }

    async fn close(
        &self,
        id: i32,
        status: TransactionStatus,
        verb: &str,
        text: Option<String>,
    ) -> Result<Transaction, AppError> {
        let transaction = self.get_open(id).await?;

        let line = match text {
            Some(text) => format!("{} on {}: {}", verb, today(), text),
            None => format!("{} on {}", verb, today()),
        };
        let notes = append_note(transaction.notes, &line);

        TransactionRepository::new(self.db)
            .set_status(id, status, notes)
            .await?
            .ok_or_else(not_found)
    }

    async fn ensure_references(&self, params: &CreateTransactionParams) -> Result<(), AppError> {
        if let Some(id) = params.customer_id {
            if CustomerRepository::new(self.db).find_by_id(id).await?.is_none() {
                return Err(AppError::NotFound("Customer not found".to_string()));
            }
        }
        if let Some(id) = params.employee_id {
            if EmployeeRepository::new(self.db).find_by_id(id).await?.is_none() {
                return Err(AppError::NotFound("Employee not found".to_string()));
            }
        }
        if let Some(id) = params.loan_id {
            if LoanRepository::new(self.db).find_by_id(id).await?.is_none() {
                return Err(AppError::NotFound("Loan not found".to_string()));
            }
        }
        if let Some(id) = params.item_id {
            if ItemRepository::new(self.db).find_by_id(id).await?.is_none() {
                return Err(AppError::NotFound("Item not found".to_string()));
            }
        }
        if BranchRepository::new(self.db)
            .find_by_id(params.branch_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Branch not found".to_string()));
        }

        Ok(())
    }
}

/// Generates a transaction code not yet present in the ledger.
///
/// Generic over the connection so loan operations can call it inside their
/// database transaction.
pub(crate) async fn unique_transaction_code<C: ConnectionTrait>(
    db: &C,
) -> Result<String, AppError> {
    let repo = TransactionRepository::new(db);
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_code(TRANSACTION_PREFIX);
        if !repo.code_exists(&code).await? {
            return Ok(code);
        }
    }

    Err(AppError::InternalError(
        "Failed to generate a unique transaction code".to_string(),
    ))
}

/// Ledger entry for an operation on a loan, dated now and already completed.
pub(crate) fn loan_entry(
    transaction_type: TransactionType,
    amount: i64,
    payment_method: PaymentMethod,
    loan: &Loan,
    branch_id: i32,
) -> CreateTransactionParams {
    CreateTransactionParams {
        transaction_type,
        amount,
        payment_method,
        status: TransactionStatus::Completed,
        reference_number: None,
        customer_id: Some(loan.customer_id),
        employee_id: None,
        loan_id: Some(loan.id),
        item_id: Some(loan.item_id),
        branch_id,
        transaction_date: Utc::now(),
        notes: None,
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Transaction not found".to_string())
}
