use chrono::{DateTime, Utc};
use entity::payment::PaymentMethod;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub loan_id: i32,
    pub amount: i64,
    pub payment_date: DateTime<Utc>,
    #[schema(value_type = String)]
    pub payment_method: PaymentMethod,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct UpdatePaymentDto {
    pub amount: Option<i64>,
    pub payment_date: Option<DateTime<Utc>>,
    #[schema(value_type = Option<String>)]
    pub payment_method: Option<PaymentMethod>,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}
