use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Branch, Customer};
///
/// let test = TestBuilder::new()
///     .with_table(Branch)
///     .with_table(Customer)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys must be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables needed for authentication and authorization.
    ///
    /// Adds, in dependency order: Role, Permission, RolePermission, User.
    pub fn with_user_tables(self) -> Self {
        self.with_table(Role)
            .with_table(Permission)
            .with_table(RolePermission)
            .with_table(User)
    }

    /// Adds the user tables plus Branch, EmployeeType and Employee.
    pub fn with_employee_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Branch)
            .with_table(EmployeeType)
            .with_table(Employee)
    }

    /// Adds every table involved in a loan: the employee tables plus Customer,
    /// Item, Loan, Payment and Transaction.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_loan_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_loan_tables(self) -> Self {
        self.with_employee_tables()
            .with_table(Customer)
            .with_table(Item)
            .with_table(Loan)
            .with_table(Payment)
            .with_table(Transaction)
    }

    /// Adds the complete schema, including applications.
    pub fn with_all_tables(self) -> Self {
        self.with_loan_tables().with_table(Application)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// Creates an in-memory SQLite database connection and executes all CREATE TABLE
    /// statements in the order they were added.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}
