use chrono::{Duration, NaiveDate, Utc};
use entity::loan::LoanStatus;

/// Builds an unsaved active loan of 10_000 cents at 10% for 30 days starting on
/// `start_date`.
pub fn loan(start_date: NaiveDate) -> entity::loan::Model {
    entity::loan::Model {
        id: 1,
        loan_code: "L-0000000A".to_string(),
        customer_id: 1,
        item_id: 1,
        loan_amount: 10_000,
        interest_rate: 10.0,
        term_days: 30,
        start_date,
        due_date: start_date + Duration::days(30),
        status: LoanStatus::Active,
        collateral_description: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// Builds an unsaved loan with the given status that fell due `days_ago` days ago.
pub fn loan_due_days_ago(days_ago: i64, status: LoanStatus) -> entity::loan::Model {
    let today = Utc::now().date_naive();
    let mut model = loan(today - Duration::days(30 + days_ago));
    model.due_date = today - Duration::days(days_ago);
    model.status = status;
    model
}
