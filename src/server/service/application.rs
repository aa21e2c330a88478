//! Loan applications: intake, review and bulk processing.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveTime, Utc};
use entity::application::ApplicationStatus;
use sea_orm::{ActiveEnum, DatabaseConnection, TransactionTrait};

use crate::{
    model::application::{ApplicationStatsDto, ApplicationTrendDto},
    server::{
        data::{
            application::ApplicationRepository, branch::BranchRepository,
            customer::CustomerRepository,
        },
        error::AppError,
        model::{
            application::{
                Application, ApplicationFilter, CreateApplicationParams, UpdateApplicationParams,
                MAX_TERM_MONTHS,
            },
            Paginated,
        },
        service::MAX_CODE_ATTEMPTS,
        util::{
            code::generate_application_number,
            export::{format_cents, write_csv},
            time::today,
        },
    },
};

pub const MAX_TREND_DAYS: i64 = 365;

const EXPORT_HEADERS: [&str; 15] = [
    "Application Number",
    "Customer ID",
    "Branch ID",
    "Item Type",
    "Item Description",
    "Estimated Value",
    "Loan Amount",
    "Interest Rate",
    "Term Months",
    "Status",
    "Notes",
    "Processed By",
    "Processed At",
    "Created At",
    "Updated At",
];

pub struct ApplicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        filter: &ApplicationFilter,
        page: u64,
        per_page: u64,
    ) -> Result<Paginated<Application>, AppError> {
        let (applications, total) = ApplicationRepository::new(self.db)
            .get_all_paginated(filter, page, per_page)
            .await?;

        Ok(Paginated::new(applications, total, page, per_page))
    }

    pub async fn get_all(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, AppError> {
        Ok(ApplicationRepository::new(self.db).get_all(filter).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Application, AppError> {
        ApplicationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(not_found)
    }

    /// Files a pending application under a fresh `APP-YYYYMMDD-XXXXXXXX` number.
    pub async fn create(&self, params: CreateApplicationParams) -> Result<Application, AppError> {
        validate_amounts(
            params.estimated_value,
            params.loan_amount,
            params.interest_rate,
            params.term_months,
        )?;

        if CustomerRepository::new(self.db)
            .find_by_id(params.customer_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Customer not found".to_string()));
        }
        if BranchRepository::new(self.db)
            .find_by_id(params.branch_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Branch not found".to_string()));
        }

        let number = self.unique_number().await?;
        let application = ApplicationRepository::new(self.db)
            .create(params, number)
            .await?;

        tracing::info!(
            "Received application {} for {}",
            application.application_number,
            format_cents(application.loan_amount)
        );

        Ok(application)
    }

    /// Edits an application. A status change is recorded against `processed_by`.
    ///
    /// # Returns
    /// - `Ok(Application)` - The updated application
    /// - `Err(AppError::NotFound)` - No application with this id
    /// - `Err(AppError::BadRequest)` - Already processed, missing rejection reason or invalid amounts
    pub async fn update(
        &self,
        id: i32,
        params: UpdateApplicationParams,
        processed_by: i32,
    ) -> Result<Application, AppError> {
        let application = self.get_by_id(id).await?;

        validate_amounts(
            params.estimated_value.unwrap_or(application.estimated_value),
            params.loan_amount.unwrap_or(application.loan_amount),
            params.interest_rate.unwrap_or(application.interest_rate),
            params.term_months.unwrap_or(application.term_months),
        )?;

        let status_change = params
            .status
            .filter(|status| *status != application.status);
        if let Some(status) = status_change {
            check_status_change(
                &application,
                status,
                params.rejection_reason.as_deref(),
            )?;
        }

        let processed = status_change.map(|_| (processed_by, Utc::now()));

        ApplicationRepository::new(self.db)
            .update(id, params, processed)
            .await?
            .ok_or_else(not_found)
    }

    /// Deletes a pending application.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let application = self.get_by_id(id).await?;

        if !application.is_pending() {
            return Err(AppError::BadRequest(
                "Cannot delete applications that have been processed".to_string(),
            ));
        }

        ApplicationRepository::new(self.db).delete(id).await?;

        Ok(())
    }

    /// Applies one status change to many applications in a single database transaction.
    ///
    /// Applications already in the target status are left untouched and not counted.
    pub async fn bulk_update(
        &self,
        ids: &[i32],
        status: ApplicationStatus,
        rejection_reason: Option<String>,
        notes: Option<String>,
        processed_by: i32,
    ) -> Result<u64, AppError> {
        let applications = ApplicationRepository::new(self.db)
            .find_by_ids(ids)
            .await?;
        if applications.is_empty() {
            return Err(AppError::NotFound("No applications found".to_string()));
        }

        let changing: Vec<&Application> = applications
            .iter()
            .filter(|application| application.status != status)
            .collect();
        for application in &changing {
            check_status_change(application, status, rejection_reason.as_deref())?;
        }

        let processed_at = Utc::now();
        let txn = self.db.begin().await?;
        let repo = ApplicationRepository::new(&txn);

        for application in &changing {
            repo.update(
                application.id,
                UpdateApplicationParams {
                    status: Some(status),
                    rejection_reason: rejection_reason.clone(),
                    notes: notes.clone(),
                    ..Default::default()
                },
                Some((processed_by, processed_at)),
            )
            .await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Bulk updated {} applications to {}",
            changing.len(),
            status.to_value()
        );

        Ok(changing.len() as u64)
    }

    /// Deletes many applications, refusing if any of them has been processed.
    pub async fn bulk_delete(&self, ids: &[i32]) -> Result<u64, AppError> {
        let repo = ApplicationRepository::new(self.db);
        let applications = repo.find_by_ids(ids).await?;
        if applications.is_empty() {
            return Err(AppError::NotFound("No applications found".to_string()));
        }

        let processed: Vec<i32> = applications
            .iter()
            .filter(|application| !application.is_pending())
            .map(|application| application.id)
            .collect();
        if !processed.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Cannot delete processed applications: {:?}",
                processed
            )));
        }

        let found: Vec<i32> = applications.iter().map(|a| a.id).collect();
        let deleted = repo.delete_many(&found).await?;

        Ok(deleted)
    }

    pub async fn stats(&self) -> Result<ApplicationStatsDto, AppError> {
        let applications = ApplicationRepository::new(self.db)
            .get_all(&ApplicationFilter::default())
            .await?;

        let count_status = |status: ApplicationStatus| {
            applications
                .iter()
                .filter(|a| a.status == status)
                .count() as u64
        };

        let total_loan_amount: i64 = applications.iter().map(|a| a.loan_amount).sum();
        let (average_loan_amount, average_interest_rate, average_term_months) =
            if applications.is_empty() {
                (0.0, 0.0, 0.0)
            } else {
                let count = applications.len() as f64;
                (
                    total_loan_amount as f64 / count,
                    applications.iter().map(|a| a.interest_rate).sum::<f64>() / count,
                    applications.iter().map(|a| a.term_months as f64).sum::<f64>() / count,
                )
            };

        Ok(ApplicationStatsDto {
            total_applications: applications.len() as u64,
            pending_count: count_status(ApplicationStatus::Pending),
            approved_count: count_status(ApplicationStatus::Approved),
            rejected_count: count_status(ApplicationStatus::Rejected),
            cancelled_count: count_status(ApplicationStatus::Cancelled),
            total_value: applications.iter().map(|a| a.estimated_value).sum(),
            total_loan_amount,
            average_loan_amount,
            average_interest_rate,
            average_term_months,
        })
    }

    /// Daily application totals over the last `days` days, oldest first.
    ///
    /// Days without applications are omitted.
    pub async fn trends(&self, days: i64) -> Result<Vec<ApplicationTrendDto>, AppError> {
        if !(1..=MAX_TREND_DAYS).contains(&days) {
            return Err(AppError::BadRequest(format!(
                "Days must be between 1 and {}",
                MAX_TREND_DAYS
            )));
        }

        let start = today() - Duration::days(days - 1);
        let since = start.and_time(NaiveTime::MIN).and_utc();
        let applications = ApplicationRepository::new(self.db)
            .get_created_since(since)
            .await?;

        let mut by_day: BTreeMap<_, ApplicationTrendDto> = BTreeMap::new();
        for application in applications {
            let date = application.created_at.date_naive();
            let entry = by_day.entry(date).or_insert_with(|| ApplicationTrendDto {
                date,
                count: 0,
                total_value: 0,
                total_loan_amount: 0,
            });
            entry.count += 1;
            entry.total_value += application.estimated_value;
            entry.total_loan_amount += application.loan_amount;
        }

        Ok(by_day.into_values().collect())
    }

    async fn unique_number(&self) -> Result<String, AppError> {
        let repo = ApplicationRepository::new(self.db);
        for _ in 0..MAX_CODE_ATTEMPTS {
            let number = generate_application_number(today());
            if !repo.number_exists(&number).await? {
                return Ok(number);
            }
        }

        Err(AppError::InternalError(
            "Failed to generate a unique application number".to_string(),
        ))
    }
}

/// Renders applications as the CSV export document.
pub fn applications_csv(applications: &[Application]) -> Result<String, AppError> {
    let optional = |value: Option<String>| value.unwrap_or_default();

    write_csv(
        &EXPORT_HEADERS,
        applications.iter().map(|a| {
            vec![
                a.application_number.clone(),
                a.customer_id.to_string(),
                a.branch_id.to_string(),
                a.item_category.to_value(),
                a.item_description.clone(),
                format_cents(a.estimated_value),
                format_cents(a.loan_amount),
                a.interest_rate.to_string(),
                a.term_months.to_string(),
                a.status.to_value(),
                optional(a.notes.clone()),
                optional(a.processed_by_id.map(|id| id.to_string())),
                optional(a.processed_at.map(|at| at.to_rfc3339())),
                a.created_at.to_rfc3339(),
                optional(a.updated_at.map(|at| at.to_rfc3339())),
            ]
        }),
    )
}

/// `applications_YYYYmmdd_HHMMSS.csv`
pub fn export_filename() -> String {
    format!("applications_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"))
}

fn check_status_change(
    application: &Application,
    status: ApplicationStatus,
    rejection_reason: Option<&str>,
) -> Result<(), AppError> {
    if !application.is_pending() {
        return Err(AppError::BadRequest(
            "Application has already been processed".to_string(),
        ));
    }

    let has_reason = rejection_reason.is_some_and(|reason| !reason.trim().is_empty());
    if status == ApplicationStatus::Rejected && !has_reason {
        return Err(AppError::BadRequest(
            "Rejection reason is required when rejecting an application".to_string(),
        ));
    }

    Ok(())
}

fn validate_amounts(
    estimated_value: i64,
    loan_amount: i64,
    interest_rate: f64,
    term_months: i32,
) -> Result<(), AppError> {
    if estimated_value <= 0 || loan_amount <= 0 {
        return Err(AppError::BadRequest(
            "Estimated value and loan amount must be greater than zero".to_string(),
        ));
    }
    if loan_amount > estimated_value {
        return Err(AppError::BadRequest(
            "Loan amount cannot exceed the estimated value".to_string(),
        ));
    }
    if interest_rate < 0.0 {
        return Err(AppError::BadRequest(
            "Interest rate cannot be negative".to_string(),
        ));
    }
    if !(1..=MAX_TERM_MONTHS).contains(&term_months) {
        return Err(AppError::BadRequest(format!(
            "Term months must be between 1 and {}",
            MAX_TERM_MONTHS
        )));
    }

    Ok(())
}

fn not_found() -> AppError {
    AppError::NotFound("Application not found".to_string())
}
