use entity::loan::LoanStatus;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{loan::LoanRepository, payment::PaymentRepository},
    error::AppError,
    model::{
        payment::{Payment, UpdatePaymentParams},
        Paginated,
    },
};

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        loan_id: Option<i32>,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Payment>, AppError> {
        let (payments, total) = PaymentRepository::new(self.db)
            .get_all_paginated(loan_id, page, per_page)
            .await?;

        Ok(Paginated::new(payments, total, page, per_page))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Payment, AppError> {
        PaymentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(&self, id: i32, params: UpdatePaymentParams) -> Result<Payment, AppError> {
        let payment = self.get_by_id(id).await?;

        if params.amount.is_some_and(|amount| amount <= 0) {
            return Err(AppError::BadRequest(
                "Payment amount must be greater than zero".to_string(),
            ));
        }
        if self.loan_is_settled(payment.loan_id).await? {
            return Err(AppError::BadRequest(
                "Cannot update payment on a completed or defaulted loan".to_string(),
            ));
        }

        PaymentRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(not_found)
    }

    /// Removes a payment and returns it.
    pub async fn delete(&self, id: i32) -> Result<Payment, AppError> {
        let payment = self.get_by_id(id).await?;

        if self.loan_is_settled(payment.loan_id).await? {
            return Err(AppError::BadRequest(
                "Cannot delete payment from a completed or defaulted loan".to_string(),
            ));
        }

        PaymentRepository::new(self.db).delete(id).await?;

        tracing::info!("Deleted payment {} from loan {}", payment.id, payment.loan_id);

        Ok(payment)
    }

    async fn loan_is_settled(&self, loan_id: i32) -> Result<bool, AppError> {
        let loan = LoanRepository::new(self.db)
            .find_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))?;

        Ok(matches!(
            loan.status,
            LoanStatus::Completed | LoanStatus::Defaulted
        ))
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Payment not found".to_string())
}
