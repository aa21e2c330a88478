use chrono::Utc;
use entity::payment::PaymentMethod;

/// Builds an unsaved cash payment of `amount` cents against `loan_id`.
pub fn payment(id: i32, loan_id: i32, amount: i64) -> entity::payment::Model {
    let now = Utc::now();
    entity::payment::Model {
        id,
        loan_id,
        amount,
        payment_date: now,
        payment_method: PaymentMethod::Cash,
        reference_number: None,
        notes: None,
        created_at: now,
        updated_at: None,
    }
}
