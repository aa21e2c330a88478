//! Data transfer objects exchanged with API clients.
//!
//! DTOs are the JSON shapes of requests and responses. Controllers convert them to
//! server-side parameter types and domain models convert back into them.

pub mod api;
pub mod application;
pub mod auth;
pub mod branch;
pub mod customer;
pub mod employee;
pub mod item;
pub mod loan;
pub mod payment;
pub mod report;
pub mod transaction;
pub mod user;
