use chrono::{DateTime, Utc};
use entity::payment::PaymentMethod;

use crate::model::{
    loan::CreatePaymentDto,
    payment::{PaymentDto, UpdatePaymentDto},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub loan_id: i32,
    pub amount: i64,
    pub payment_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn from_entity(entity: entity::payment::Model) -> Self {
        Self {
            id: entity.id,
            loan_id: entity.loan_id,
            amount: entity.amount,
            payment_date: entity.payment_date,
            payment_method: entity.payment_method,
            reference_number: entity.reference_number,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            loan_id: self.loan_id,
            amount: self.amount,
            payment_date: self.payment_date,
            payment_method: self.payment_method,
            reference_number: self.reference_number,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePaymentParams {
    pub loan_id: i32,
    pub amount: i64,
    pub payment_method: PaymentMethod,
    pub payment_date: DateTime<Utc>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

impl CreatePaymentParams {
    pub fn from_dto(loan_id: i32, dto: CreatePaymentDto) -> Self {
        Self {
            loan_id,
            amount: dto.amount,
            payment_method: dto.payment_method,
            payment_date: dto.payment_date.unwrap_or_else(Utc::now),
            reference_number: dto.reference_number,
            notes: dto.notes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePaymentParams {
    pub amount: Option<i64>,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

impl UpdatePaymentParams {
    pub fn from_dto(dto: UpdatePaymentDto) -> Self {
        Self {
            amount: dto.amount,
            payment_date: dto.payment_date,
            payment_method: dto.payment_method,
            reference_number: dto.reference_number,
            notes: dto.notes,
        }
    }
}
