//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own module with a `Factory` builder
//! for customization and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let branch = factory::branch::create_branch(&db).await?;
//!     let customer = factory::customer::create_customer(&db).await?;
//!
//!     // Create with all dependencies
//!     let (branch, customer, item, loan) =
//!         factory::helpers::create_loan_with_dependencies(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users, optionally with a hashed password
//! - `role` - Roles, permissions and role grants
//! - `branch`, `employee_type`, `employee`
//! - `customer`, `item`, `loan`, `payment`, `transaction`, `application`
//! - `helpers` - Counters and entities created together with their dependencies

pub mod application;
pub mod branch;
pub mod customer;
pub mod employee;
pub mod employee_type;
pub mod helpers;
pub mod item;
pub mod loan;
pub mod payment;
pub mod role;
pub mod transaction;
pub mod user;

pub use application::create_application;
pub use branch::create_branch;
pub use customer::create_customer;
pub use employee::create_employee;
pub use employee_type::create_employee_type;
pub use item::create_item;
pub use loan::create_loan;
pub use payment::create_payment;
pub use role::{create_permission, create_role, create_role_with_permissions};
pub use transaction::create_transaction;
pub use user::create_user;
