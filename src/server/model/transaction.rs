use chrono::{DateTime, Utc};
use entity::{
    payment::PaymentMethod,
    transaction::{TransactionStatus, TransactionType},
};

use crate::model::transaction::{
    CreateTransactionDto, TransactionDetailDto, TransactionDto, TransactionSearchDto,
    UpdateTransactionDto,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i32,
    pub transaction_code: String,
    pub transaction_type: TransactionType,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub reference_number: Option<String>,
    pub customer_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub loan_id: Option<i32>,
    pub item_id: Option<i32>,
    pub branch_id: i32,
    pub transaction_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn from_entity(entity: entity::transaction::Model) -> Self {
        Self {
            id: entity.id,
            transaction_code: entity.transaction_code,
            transaction_type: entity.transaction_type,
            amount: entity.amount,
            payment_method: entity.payment_method,
            status: entity.status,
            reference_number: entity.reference_number,
            customer_id: entity.customer_id,
            employee_id: entity.employee_id,
            loan_id: entity.loan_id,
            item_id: entity.item_id,
            branch_id: entity.branch_id,
            transaction_date: entity.transaction_date,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Completed and cancelled transactions are final.
    pub fn is_final(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Completed | TransactionStatus::Cancelled
        )
    }

    pub fn into_dto(self) -> TransactionDto {
        TransactionDto {
            id: self.id,
            transaction_code: self.transaction_code,
            transaction_type: self.transaction_type,
            amount: self.amount,
            payment_method: self.payment_method,
            status: self.status,
            reference_number: self.reference_number,
            customer_id: self.customer_id,
            employee_id: self.employee_id,
            loan_id: self.loan_id,
            item_id: self.item_id,
            branch_id: self.branch_id,
            transaction_date: self.transaction_date,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Transaction with display names of the rows it references.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetails {
    pub transaction: Transaction,
    pub customer_name: Option<String>,
    pub branch_name: Option<String>,
    pub item_name: Option<String>,
    pub loan_code: Option<String>,
}

impl TransactionDetails {
    pub fn into_dto(self) -> TransactionDetailDto {
        TransactionDetailDto {
            transaction: self.transaction.into_dto(),
            customer_name: self.customer_name,
            branch_name: self.branch_name,
            item_name: self.item_name,
            loan_code: self.loan_code,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTransactionParams {
    pub transaction_type: TransactionType,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub reference_number: Option<String>,
    pub customer_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub loan_id: Option<i32>,
    pub item_id: Option<i32>,
    pub branch_id: i32,
    pub transaction_date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl CreateTransactionParams {
    pub fn from_dto(dto: CreateTransactionDto) -> Self {
        Self {
            transaction_type: dto.transaction_type,
            amount: dto.amount,
            payment_method: dto.payment_method,
            status: dto.status.unwrap_or(TransactionStatus::Pending),
            reference_number: dto.reference_number,
            customer_id: dto.customer_id,
            employee_id: dto.employee_id,
            loan_id: dto.loan_id,
            item_id: dto.item_id,
            branch_id: dto.branch_id,
            transaction_date: dto.transaction_date.unwrap_or_else(Utc::now),
            notes: dto.notes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionParams {
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<i64>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<TransactionStatus>,
    pub reference_number: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl UpdateTransactionParams {
    pub fn from_dto(dto: UpdateTransactionDto) -> Self {
        Self {
            transaction_type: dto.transaction_type,
            amount: dto.amount,
            payment_method: dto.payment_method,
            status: dto.status,
            reference_number: dto.reference_number,
            transaction_date: dto.transaction_date,
            notes: dto.notes,
        }
    }
}

/// Filters shared by the transaction list and search endpoints.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Matches transaction code, reference number or notes.
    pub search_term: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub loan_id: Option<i32>,
    pub min_amount: Option<i64>,
    pub max_amount: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    pub fn from_search_dto(dto: TransactionSearchDto) -> Self {
        Self {
            search_term: dto.search_term,
            transaction_type: dto.transaction_type,
            status: dto.status,
            payment_method: dto.payment_method,
            customer_id: dto.customer_id,
            branch_id: dto.branch_id,
            loan_id: None,
            min_amount: dto.min_amount,
            max_amount: dto.max_amount,
            start_date: dto.start_date,
            end_date: dto.end_date,
        }
    }
}
