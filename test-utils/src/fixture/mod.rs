//! In-memory entity models for tests that never touch the database.
//!
//! Fixtures are useful for exercising pure conversion and calculation code such as
//! the loan balance arithmetic, where inserting rows would only add noise.

pub mod loan;
pub mod payment;
