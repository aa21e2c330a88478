//! Loan lifecycle: origination, payments, extension, redemption and default.
//!
//! Every operation that touches more than the loan row runs inside one database
//! transaction and records its ledger entry in that same transaction.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use entity::{
    item::ItemStatus,
    loan::LoanStatus,
    payment::PaymentMethod,
    transaction::TransactionType,
};
use sea_orm::{ActiveEnum, DatabaseConnection, TransactionTrait};

use crate::{
    model::loan::{
        DefaultLoanDto, ExtendLoanDto, LoanStatsDto, LoansByMonthDto, RedeemLoanDto,
    },
    server::{
        data::{
            customer::CustomerRepository, item::ItemRepository, loan::LoanRepository,
            payment::PaymentRepository, transaction::TransactionRepository,
        },
        error::AppError,
        model::{
            item::append_note,
            loan::{
                can_transition, invalid_transition_message, is_terminal, CreateLoanParams, Loan,
                LoanDetails, LoanFilter, UpdateLoanParams,
            },
            payment::{CreatePaymentParams, Payment},
            Paginated,
        },
        service::{
            transaction::{loan_entry, unique_transaction_code},
            MAX_CODE_ATTEMPTS,
        },
        util::{
            code::{generate_code, LOAN_PREFIX},
            export::format_cents,
            time::{add_days, last_months, month_key, today},
        },
    },
};

pub struct LoanService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LoanService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &LoanFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Loan>, AppError> {
        let (loans, total) = LoanRepository::new(self.db)
            .get_all_paginated(filter, today(), page, per_page)
            .await?;

        Ok(Paginated::new(loans, total, page, per_page))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Loan, AppError> {
        LoanRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn get_details(&self, id: i32) -> Result<LoanDetails, AppError> {
        let loan = self.get_by_id(id).await?;

        let customer = CustomerRepository::new(self.db)
            .find_by_id(loan.customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
        let item = ItemRepository::new(self.db)
            .find_by_id(loan.item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;
        let payments = PaymentRepository::new(self.db)
            .get_by_loan(loan.id)
            .await?;

        Ok(LoanDetails {
            loan,
            customer,
            item,
            payments,
        })
    }

    /// Writes a new loan against an item.
    ///
    /// The loan row, the item's move to `pawned`, the optional initial payment and the
    /// `pawn` ledger entry are committed together or not at all.
    ///
    /// # Returns
    /// - `Ok(Loan)` - The created loan, including any initial payment in `total_paid`
    /// - `Err(AppError::NotFound)` - Customer or item does not exist
    /// - `Err(AppError::BadRequest)` - Invalid terms or the item cannot secure a loan
    pub async fn create(&self, params: CreateLoanParams) -> Result<Loan, AppError> {
        validate_terms(
            Some(params.loan_amount),
            Some(params.term_days),
            Some(params.interest_rate),
        )?;

        if CustomerRepository::new(self.db)
            .find_by_id(params.customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }

        let item_repo = ItemRepository::new(self.db);
        let item = item_repo
            .find_by_id(params.item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

        if !item.is_available_for_loan() {
            return Err(AppError::BadRequest(format!(
                "Item is not available for loan, current status: {}",
                item.status.to_value()
            )));
        }
        if item_repo.has_open_loan(item.id).await? {
            return Err(AppError::BadRequest(
                "Item is already securing an active loan".to_string(),
            ));
        }

        let code = self.unique_code().await?;

        let txn = self.db.begin().await?;

        let mut loan = LoanRepository::new(&txn).create(&params, code).await?;
        ItemRepository::new(&txn)
            .set_status(item.id, ItemStatus::Pawned, None)
            .await?;

        if let Some(amount) = params.initial_payment.filter(|amount| *amount > 0) {
            PaymentRepository::new(&txn)
                .create(CreatePaymentParams {
                    loan_id: loan.id,
                    amount,
                    payment_method: params.payment_method,
                    payment_date: Utc::now(),
                    reference_number: None,
                    notes: Some("Initial payment".to_string()),
                })
                .await?;
            loan.total_paid = amount;
        }

        let entry = loan_entry(
            TransactionType::Pawn,
            loan.loan_amount,
            params.payment_method,
            &loan,
            item.branch_id,
        );
        let transaction_code = unique_transaction_code(&txn).await?;
        TransactionRepository::new(&txn)
            .create(entry, transaction_code)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Created loan {} for {} against item {}",
            loan.loan_code,
            format_cents(loan.loan_amount),
            item.item_code
        );

        Ok(loan)
    }

    /// Edits loan terms or moves the loan along the status transition table.
    ///
    /// Completing a loan marks its item redeemed; defaulting it marks the item
    /// defaulted.
    pub async fn update(&self, id: i32, params: UpdateLoanParams) -> Result<Loan, AppError> {
        let loan = self.get_by_id(id).await?;

        if is_terminal(loan.status) {
            return Err(AppError::BadRequest(format!(
                "Cannot update loan with status: {}",
                loan.status.to_value()
            )));
        }

        validate_terms(params.loan_amount, params.term_days, params.interest_rate)?;

        let new_status = params.status.filter(|status| *status != loan.status);
        if let Some(to) = new_status {
            if !can_transition(loan.status, to) {
                return Err(AppError::BadRequest(invalid_transition_message(
                    loan.status,
                    to,
                )));
            }
        }

        let txn = self.db.begin().await?;

        let updated = LoanRepository::new(&txn)
            .update(id, params)
            .await?
            .ok_or_else(not_found)?;

        let item_status = match new_status {
            Some(LoanStatus::Completed) => Some(ItemStatus::Redeemed),
            Some(LoanStatus::Defaulted) => Some(ItemStatus::Defaulted),
            _ => None,
        };
        if let Some(item_status) = item_status {
            ItemRepository::new(&txn)
                .set_status(updated.item_id, item_status, None)
                .await?;
        }

        txn.commit().await?;

        Ok(updated)
    }

    /// Records a payment, completing the loan and redeeming its item once the full
    /// amount due has been paid.
    pub async fn add_payment(&self, params: CreatePaymentParams) -> Result<Payment, AppError> {
        let loan = self.get_by_id(params.loan_id).await?;

        if is_terminal(loan.status) {
            return Err(AppError::BadRequest(format!(
                "Cannot add payment to loan with status: {}",
                loan.status.to_value()
            )));
        }
        if params.amount <= 0 {
            return Err(AppError::BadRequest(
                "Payment amount must be greater than zero".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let payment = PaymentRepository::new(&txn).create(params).await?;

        let paid_in_full = loan.total_paid + payment.amount >= loan.total_amount_due();
        if paid_in_full {
            LoanRepository::new(&txn)
                .set_status(loan.id, LoanStatus::Completed, None)
                .await?;
            ItemRepository::new(&txn)
                .set_status(loan.item_id, ItemStatus::Redeemed, None)
                .await?;
        }

        let branch_id = item_branch(&txn, loan.item_id).await?;
        let mut entry = loan_entry(
            TransactionType::Payment,
            payment.amount,
            payment.payment_method,
            &loan,
            branch_id,
        );
        entry.reference_number = payment.reference_number.clone();
        let transaction_code = unique_transaction_code(&txn).await?;
        TransactionRepository::new(&txn)
            .create(entry, transaction_code)
            .await?;

        txn.commit().await?;

        if paid_in_full {
            tracing::info!("Loan {} paid in full", loan.loan_code);
        }

        Ok(payment)
    }

    /// Pushes the due date out by `additional_days`, optionally taking a payment.
    pub async fn extend(&self, id: i32, dto: ExtendLoanDto) -> Result<Loan, AppError> {
        let loan = self.get_by_id(id).await?;

        if !matches!(loan.status, LoanStatus::Active | LoanStatus::Overdue) {
            return Err(AppError::BadRequest(format!(
                "Cannot extend loan with status: {}",
                loan.status.to_value()
            )));
        }
        if dto.additional_days <= 0 {
            return Err(AppError::BadRequest(
                "Additional days must be greater than zero".to_string(),
            ));
        }

        let (Some(due_date), Some(term_days)) = (
            add_days(loan.due_date, dto.additional_days),
            loan.term_days.checked_add(dto.additional_days),
        ) else {
            return Err(AppError::BadRequest(format!(
                "Extension of {} days is out of range",
                dto.additional_days
            )));
        };
        let notes = dto.notes.as_ref().map(|notes| {
            append_note(
                loan.notes.clone(),
                &format!("Extended on {}: {}", today(), notes),
            )
        });
        let payment_method = dto.payment_method.unwrap_or(PaymentMethod::Cash);
        let payment = dto.payment.filter(|amount| *amount > 0);

        let txn = self.db.begin().await?;

        if let Some(amount) = payment {
            PaymentRepository::new(&txn)
                .create(CreatePaymentParams {
                    loan_id: loan.id,
                    amount,
                    payment_method,
                    payment_date: Utc::now(),
                    reference_number: None,
                    notes: Some("Extension payment".to_string()),
                })
                .await?;
        }

        LoanRepository::new(&txn)
            .extend(loan.id, due_date, term_days, notes)
            .await?;

        let branch_id = item_branch(&txn, loan.item_id).await?;
        let entry = loan_entry(
            TransactionType::Extension,
            payment.unwrap_or(0),
            payment_method,
            &loan,
            branch_id,
        );
        let transaction_code = unique_transaction_code(&txn).await?;
        TransactionRepository::new(&txn)
            .create(entry, transaction_code)
            .await?;

        let extended = LoanRepository::new(&txn)
            .find_by_id(loan.id)
            .await?
            .ok_or_else(not_found)?;

        txn.commit().await?;

        tracing::info!(
            "Extended loan {} by {} days to {}",
            loan.loan_code,
            dto.additional_days,
            due_date
        );

        Ok(extended)
    }

    /// Settles the loan with a final payment covering the remaining balance.
    pub async fn redeem(&self, id: i32, dto: RedeemLoanDto) -> Result<Loan, AppError> {
        let loan = self.get_by_id(id).await?;

        if !loan.status.is_open() {
            return Err(AppError::BadRequest(format!(
                "Cannot redeem loan with status: {}",
                loan.status.to_value()
            )));
        }

        let balance = loan.remaining_balance();
        if dto.payment < balance {
            return Err(AppError::BadRequest(format!(
                "Redemption payment ({}) is less than the remaining balance ({})",
                format_cents(dto.payment),
                format_cents(balance)
            )));
        }

        let notes = dto.notes.as_ref().map(|notes| {
            append_note(
                loan.notes.clone(),
                &format!("Redeemed on {}: {}", today(), notes),
            )
        });
        let payment_method = dto.payment_method.unwrap_or(PaymentMethod::Cash);

        let txn = self.db.begin().await?;

        if dto.payment > 0 {
            PaymentRepository::new(&txn)
                .create(CreatePaymentParams {
                    loan_id: loan.id,
                    amount: dto.payment,
                    payment_method,
                    payment_date: Utc::now(),
                    reference_number: None,
                    notes: Some("Redemption payment".to_string()),
                })
                .await?;
        }

        LoanRepository::new(&txn)
            .set_status(loan.id, LoanStatus::Completed, notes)
            .await?;
        ItemRepository::new(&txn)
            .set_status(loan.item_id, ItemStatus::Redeemed, None)
            .await?;

        let branch_id = item_branch(&txn, loan.item_id).await?;
        let entry = loan_entry(
            TransactionType::Redemption,
            dto.payment,
            payment_method,
            &loan,
            branch_id,
        );
        let transaction_code = unique_transaction_code(&txn).await?;
        TransactionRepository::new(&txn)
            .create(entry, transaction_code)
            .await?;

        let redeemed = LoanRepository::new(&txn)
            .find_by_id(loan.id)
            .await?
            .ok_or_else(not_found)?;

        txn.commit().await?;

        tracing::info!("Redeemed loan {}", loan.loan_code);

        Ok(redeemed)
    }

    /// Marks the loan defaulted and its item forfeited to the shop.
    pub async fn default_loan(&self, id: i32, dto: DefaultLoanDto) -> Result<Loan, AppError> {
        let loan = self.get_by_id(id).await?;

        if !loan.status.is_open() {
            return Err(AppError::BadRequest(format!(
                "Cannot default loan with status: {}",
                loan.status.to_value()
            )));
        }

        let mut line = format!(
            "Defaulted on {}",
            dto.default_date.unwrap_or_else(today)
        );
        if let Some(reason) = &dto.reason {
            line.push_str(&format!(", Reason: {}", reason));
        }
        if let Some(notes) = &dto.notes {
            line.push_str(&format!(", Notes: {}", notes));
        }
        let notes = append_note(loan.notes.clone(), &line);

        let txn = self.db.begin().await?;

        LoanRepository::new(&txn)
            .set_status(loan.id, LoanStatus::Defaulted, Some(notes))
            .await?;
        ItemRepository::new(&txn)
            .set_status(loan.item_id, ItemStatus::Defaulted, None)
            .await?;

        let defaulted = LoanRepository::new(&txn)
            .find_by_id(loan.id)
            .await?
            .ok_or_else(not_found)?;

        txn.commit().await?;

        tracing::warn!("Loan {} defaulted", loan.loan_code);

        Ok(defaulted)
    }

    /// Portfolio figures across every loan.
    ///
    /// Interest earned is what completed loans collected above their principal.
    pub async fn stats(&self) -> Result<LoanStatsDto, AppError> {
        let today = today();
        let loans = LoanRepository::new(self.db)
            .get_all(&LoanFilter::default(), today)
            .await?;

        let count_status =
            |status: LoanStatus| loans.iter().filter(|l| l.status == status).count() as u64;

        let mut loans_by_status: BTreeMap<String, u64> = BTreeMap::new();
        for loan in &loans {
            *loans_by_status.entry(loan.status.to_value()).or_default() += 1;
        }

        let total_loan_amount: i64 = loans.iter().map(|l| l.loan_amount).sum();
        let (avg_loan_amount, avg_loan_term) = if loans.is_empty() {
            (0.0, 0.0)
        } else {
            let count = loans.len() as f64;
            let total_term: i64 = loans.iter().map(|l| l.term_days as i64).sum();
            (total_loan_amount as f64 / count, total_term as f64 / count)
        };

        let loans_by_month = last_months(today, 12)
            .into_iter()
            .map(|(year, month)| {
                let matching = loans.iter().filter(|l| {
                    l.created_at.year() == year && l.created_at.month() == month
                });
                LoansByMonthDto {
                    month: month_key(year, month),
                    count: matching.clone().count() as u64,
                    amount: matching.map(|l| l.loan_amount).sum(),
                }
            })
            .collect();

        Ok(LoanStatsDto {
            total_loans: loans.len() as u64,
            active_loans: count_status(LoanStatus::Active),
            completed_loans: count_status(LoanStatus::Completed),
            defaulted_loans: count_status(LoanStatus::Defaulted),
            overdue_loans: loans.iter().filter(|l| l.is_overdue(today)).count() as u64,
            total_loan_amount,
            total_interest_earned: interest_earned(&loans),
            avg_loan_amount,
            avg_loan_term,
            loans_by_status,
            loans_by_month,
        })
    }

    async fn unique_code(&self) -> Result<String, AppError> {
        let repo = LoanRepository::new(self.db);
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code(LOAN_PREFIX);
            if !repo.code_exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::InternalError(
            "Failed to generate a unique loan code".to_string(),
        ))
    }
}

/// Sum over completed loans of what was paid beyond the principal.
pub fn interest_earned(loans: &[Loan]) -> i64 {
    loans
        .iter()
        .filter(|loan| loan.status == LoanStatus::Completed)
        .map(|loan| (loan.total_paid - loan.loan_amount).max(0))
        .sum()
}

fn validate_terms(
    loan_amount: Option<i64>,
    term_days: Option<i32>,
    interest_rate: Option<f64>,
) -> Result<(), AppError> {
    if loan_amount.is_some_and(|amount| amount <= 0) {
        return Err(AppError::BadRequest(
            "Loan amount must be greater than zero".to_string(),
        ));
    }
    if term_days.is_some_and(|days| days <= 0) {
        return Err(AppError::BadRequest(
            "Term days must be greater than zero".to_string(),
        ));
    }
    if interest_rate.is_some_and(|rate| rate < 0.0) {
        return Err(AppError::BadRequest(
            "Interest rate cannot be negative".to_string(),
        ));
    }

    Ok(())
}

/// Branch that holds the loan's collateral, used for the loan's ledger entries.
async fn item_branch(txn: &sea_orm::DatabaseTransaction, item_id: i32) -> Result<i32, AppError> {
    ItemRepository::new(txn)
        .find_by_id(item_id)
        .await?
        .map(|item| item.branch_id)
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
}

fn not_found() -> AppError {
    AppError::NotFound("Loan not found".to_string())
}
