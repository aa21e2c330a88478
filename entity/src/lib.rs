//! SeaORM entity models for the pawn shop database.
//!
//! One module per table. Status and category columns are string-backed active
//! enums so that membership is enforced when rows are decoded.

pub mod prelude;

pub mod application;
pub mod branch;
pub mod customer;
pub mod employee;
pub mod employee_type;
pub mod item;
pub mod loan;
pub mod payment;
pub mod permission;
pub mod role;
pub mod role_permission;
pub mod transaction;
pub mod user;
