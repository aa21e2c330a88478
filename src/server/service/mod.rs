//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Validation, uniqueness checks and status transition rules
//! - **Orchestration**: Coordinating multiple repository calls
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running multi-row mutations inside one database transaction
//!
//! Statistics endpoints build their DTOs here from full repository listings.

pub mod application;
pub mod auth;
pub mod branch;
pub mod collateral;
pub mod customer;
pub mod employee;
pub mod inventory;
pub mod loan;
pub mod payment;
pub mod permission;
pub mod report;
pub mod role;
pub mod transaction;
pub mod user;

#[cfg(test)]
mod test;

/// Attempts made to find an unused random reference code before giving up.
pub(crate) const MAX_CODE_ATTEMPTS: usize = 10;
