//! Generation of public reference codes for customers, items, loans and
//! transactions.

use chrono::NaiveDate;
use rand::Rng;

pub const CUSTOMER_PREFIX: &str = "C";
pub const ITEM_PREFIX: &str = "I";
pub const LOAN_PREFIX: &str = "L";
pub const TRANSACTION_PREFIX: &str = "T";

/// Eight random upper-case hexadecimal characters.
fn random_hex() -> String {
    format!("{:08X}", rand::rng().random::<u32>())
}

/// Generates a code in the form `{prefix}-XXXXXXXX`.
pub fn generate_code(prefix: &str) -> String {
    format!("{}-{}", prefix, random_hex())
}

/// Generates an application number in the form `APP-YYYYMMDD-XXXXXXXX`.
pub fn generate_application_number(date: NaiveDate) -> String {
    format!("APP-{}-{}", date.format("%Y%m%d"), random_hex())
}
