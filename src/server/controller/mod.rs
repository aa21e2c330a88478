//! HTTP request handlers.
//!
//! Each handler checks access through `AuthGuard`, converts request DTOs into
//! server-side parameter types, calls a service and converts the result back into a
//! response DTO.

pub mod application;
pub mod auth;
pub mod branch;
pub mod collateral;
pub mod customer;
pub mod employee;
pub mod inventory;
pub mod loan;
pub mod payment;
pub mod report;
pub mod system;
pub mod transaction;
pub mod user;

use serde::Deserialize;
use utoipa::IntoParams;

/// Zero-indexed page selection shared by every list endpoint.
#[derive(Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page (default: 10)
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}
