//! Payment factory.

use chrono::Utc;
use entity::payment::PaymentMethod;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a cash payment of `amount` cents against a loan, dated now.
pub async fn create_payment(
    db: &DatabaseConnection,
    loan_id: i32,
    amount: i64,
) -> Result<entity::payment::Model, DbErr> {
    let now = Utc::now();
    entity::payment::ActiveModel {
        loan_id: ActiveValue::Set(loan_id),
        amount: ActiveValue::Set(amount),
        payment_date: ActiveValue::Set(now),
        payment_method: ActiveValue::Set(PaymentMethod::Cash),
        reference_number: ActiveValue::Set(None),
        notes: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
