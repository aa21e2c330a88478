use crate::server::{
    error::AppError,
    service::report::{ReportRange, ReportService},
    util::time::today,
};
use chrono::{Duration, Utc};
use entity::{
    item::ItemStatus,
    loan::LoanStatus,
    payment::PaymentMethod,
    transaction::{TransactionStatus, TransactionType},
};
use test_utils::{builder::TestBuilder, factory};

mod dashboard;
mod export;
mod range;
mod sales;

/// Default window ending today, all branches.
fn default_range() -> ReportRange {
    ReportRange {
        start_date: today() - Duration::days(30),
        end_date: today(),
        branch_id: None,
    }
}
