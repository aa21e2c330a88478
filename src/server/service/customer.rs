use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use entity::loan::LoanStatus;
use sea_orm::DatabaseConnection;

use crate::{
    model::customer::{CustomerStatsDto, TopCustomerDto},
    server::{
        data::{customer::CustomerRepository, loan::LoanRepository},
        error::AppError,
        model::{
            customer::{Customer, CustomerFilter, CreateCustomerParams, UpdateCustomerParams},
            loan::{Loan, LoanFilter},
            Paginated,
        },
        service::MAX_CODE_ATTEMPTS,
        util::{
            code::{generate_code, CUSTOMER_PREFIX},
            time::{same_month, today},
        },
    },
};

const TOP_CUSTOMERS: usize = 5;

pub struct CustomerService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CustomerService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &CustomerFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Customer>, AppError> {
        let (customers, total) = CustomerRepository::new(self.db)
            .get_all_paginated(filter, page, per_page)
            .await?;

        Ok(Paginated::new(customers, total, page, per_page))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Customer, AppError> {
        CustomerRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    /// Creates a customer with a freshly generated `C-XXXXXXXX` code.
    ///
    /// # Returns
    /// - `Ok(Customer)` - The created customer
    /// - `Err(AppError::BadRequest)` - Email or phone already belongs to a customer
    pub async fn create(&self, params: CreateCustomerParams) -> Result<Customer, AppError> {
        let repo = CustomerRepository::new(self.db);

        let email_taken = match &params.email {
            Some(email) => repo.find_by_email(email).await?.is_some(),
            None => false,
        };
        if email_taken || repo.find_by_phone(&params.phone).await?.is_some() {
            return Err(AppError::BadRequest(
                "A customer with this email or phone number already exists.".to_string(),
            ));
        }

        let code = self.unique_code().await?;
        let customer = repo.create(params, code).await?;

        tracing::info!("Created customer {}", customer.customer_code);

        Ok(customer)
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateCustomerParams,
    ) -> Result<Customer, AppError> {
        let repo = CustomerRepository::new(self.db);
        let existing = self.get_by_id(id).await?;

        if let Some(email) = &params.email {
            if existing.email.as_ref() != Some(email) && repo.find_by_email(email).await?.is_some()
            {
                return Err(AppError::BadRequest(
                    "A customer with this email already exists.".to_string(),
                ));
            }
        }

        if let Some(phone) = &params.phone {
            if *phone != existing.phone && repo.find_by_phone(phone).await?.is_some() {
                return Err(AppError::BadRequest(
                    "A customer with this phone number already exists.".to_string(),
                ));
            }
        }

        repo.update(id, params).await?.ok_or_else(not_found)
    }

    /// Deactivates a customer. Customers with open loans are kept active.
    pub async fn delete(&self, id: i32) -> Result<Customer, AppError> {
        let repo = CustomerRepository::new(self.db);
        let customer = self.get_by_id(id).await?;

        let open_loans = repo.count_open_loans(id).await?;
        if open_loans > 0 {
            return Err(AppError::BadRequest(format!(
                "Cannot delete customer with {} active loans",
                open_loans
            )));
        }

        repo.set_active(id, false).await?;

        Ok(Customer {
            is_active: false,
            ..customer
        })
    }

    pub async fn stats(&self) -> Result<CustomerStatsDto, AppError> {
        let today = today();
        let customers = CustomerRepository::new(self.db).get_all().await?;
        let loans = LoanRepository::new(self.db)
            .get_all(&LoanFilter::default(), today)
            .await?;

        let customers_with = |matches: fn(LoanStatus) -> bool| {
            loans
                .iter()
                .filter(|loan| matches(loan.status))
                .map(|loan| loan.customer_id)
                .collect::<HashSet<_>>()
                .len() as u64
        };

        let active_customers = customers.iter().filter(|c| c.is_active).count() as u64;

        let ranked = rank_customers(&customers, &loans);
        let mut by_count = ranked.clone();
        by_count.sort_by(|a, b| b.loan_count.cmp(&a.loan_count));
        by_count.truncate(TOP_CUSTOMERS);
        let mut by_amount = ranked;
        by_amount.sort_by(|a, b| b.total_loan_amount.cmp(&a.total_loan_amount));
        by_amount.truncate(TOP_CUSTOMERS);

        Ok(CustomerStatsDto {
            total_customers: customers.len() as u64,
            active_customers,
            inactive_customers: customers.len() as u64 - active_customers,
            customers_with_active_loans: customers_with(|s| s.is_open()),
            customers_with_completed_loans: customers_with(|s| s == LoanStatus::Completed),
            customers_with_defaulted_loans: customers_with(|s| s == LoanStatus::Defaulted),
            new_customers_this_month: customers
                .iter()
                .filter(|c| same_month(c.created_at, today))
                .count() as u64,
            new_customers_this_year: customers
                .iter()
                .filter(|c| c.created_at.year() == today.year())
                .count() as u64,
            top_customers_by_loan_count: by_count,
            top_customers_by_loan_amount: by_amount,
        })
    }

    async fn unique_code(&self) -> Result<String, AppError> {
        let repo = CustomerRepository::new(self.db);
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code(CUSTOMER_PREFIX);
            if !repo.code_exists(&code).await? {
                return Ok(code);
            }
        }

        Err(AppError::InternalError(
            "Failed to generate a unique customer code".to_string(),
        ))
    }
}

/// Loan count and principal per customer, for every customer with at least one loan.
///
/// Ordered by customer id; callers sort by the figure they rank on.
pub fn rank_customers(customers: &[Customer], loans: &[Loan]) -> Vec<TopCustomerDto> {
    let mut totals: HashMap<i32, (u64, i64)> = HashMap::new();
    for loan in loans {
        let entry = totals.entry(loan.customer_id).or_default();
        entry.0 += 1;
        entry.1 += loan.loan_amount;
    }

    customers
        .iter()
        .filter_map(|customer| {
            let (loan_count, total_loan_amount) = totals.get(&customer.id)?;
            Some(TopCustomerDto {
                customer_id: customer.id,
                customer_code: customer.customer_code.clone(),
                name: customer.full_name(),
                loan_count: *loan_count,
                total_loan_amount: *total_loan_amount,
            })
        })
        .collect()
}

fn not_found() -> AppError {
    AppError::NotFound("Customer not found".to_string())
}
