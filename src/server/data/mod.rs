//! Database repository layer for all domain entities.
//!
//! Repositories wrap SeaORM queries for one table each and return domain models from
//! `server::model`, keeping entity models inside the data layer. Repositories are
//! generic over `ConnectionTrait` so services can run several of them inside one
//! `DatabaseTransaction`.

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
pub mod transaction;
pub mod user;

#[cfg(test)]
mod test;
