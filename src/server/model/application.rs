use chrono::{DateTime, NaiveDate, Utc};
use entity::{application::ApplicationStatus, item::ItemCategory};

use crate::model::application::{
    ApplicationDto, ApplicationQueryDto, CreateApplicationDto, UpdateApplicationDto,
};

pub const MAX_TERM_MONTHS: i32 = 60;
pub const MAX_ENTRIES: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: i32,
    pub application_number: String,
    pub customer_id: i32,
    pub branch_id: i32,
    pub item_category: ItemCategory,
    pub item_description: String,
    pub estimated_value: i64,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_months: i32,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub processed_by_id: Option<i32>,
    pub processed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Application {
    pub fn from_entity(entity: entity::application::Model) -> Self {
        Self {
            id: entity.id,
            application_number: entity.application_number,
            customer_id: entity.customer_id,
            branch_id: entity.branch_id,
            item_category: entity.item_category,
            item_description: entity.item_description,
            estimated_value: entity.estimated_value,
            loan_amount: entity.loan_amount,
            interest_rate: entity.interest_rate,
            term_months: entity.term_months,
            status: entity.status,
            notes: entity.notes,
            processed_by_id: entity.processed_by_id,
            processed_at: entity.processed_at,
            rejection_reason: entity.rejection_reason,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    pub fn into_dto(self) -> ApplicationDto {
        ApplicationDto {
            id: self.id,
            application_number: self.application_number,
            customer_id: self.customer_id,
            branch_id: self.branch_id,
            item_category: self.item_category,
            item_description: self.item_description,
            estimated_value: self.estimated_value,
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate,
            term_months: self.term_months,
            status: self.status,
            notes: self.notes,
            processed_by_id: self.processed_by_id,
            processed_at: self.processed_at,
            rejection_reason: self.rejection_reason,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateApplicationParams {
    pub customer_id: i32,
    pub branch_id: i32,
    pub item_category: ItemCategory,
    pub item_description: String,
    pub estimated_value: i64,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_months: i32,
    pub notes: Option<String>,
}

impl CreateApplicationParams {
    pub fn from_dto(dto: CreateApplicationDto) -> Self {
        Self {
            customer_id: dto.customer_id,
            branch_id: dto.branch_id,
            item_category: dto.item_category,
            item_description: dto.item_description,
            estimated_value: dto.estimated_value,
            loan_amount: dto.loan_amount,
            interest_rate: dto.interest_rate,
            term_months: dto.term_months,
            notes: dto.notes,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateApplicationParams {
    pub item_category: Option<ItemCategory>,
    pub item_description: Option<String>,
    pub estimated_value: Option<i64>,
    pub loan_amount: Option<i64>,
    pub interest_rate: Option<f64>,
    pub term_months: Option<i32>,
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}

impl UpdateApplicationParams {
    pub fn from_dto(dto: UpdateApplicationDto) -> Self {
        Self {
            item_category: dto.item_category,
            item_description: dto.item_description,
            estimated_value: dto.estimated_value,
            loan_amount: dto.loan_amount,
            interest_rate: dto.interest_rate,
            term_months: dto.term_months,
            status: dto.status,
            notes: dto.notes,
            rejection_reason: dto.rejection_reason,
        }
    }
}

/// Column an application listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    ApplicationNumber,
    EstimatedValue,
    LoanAmount,
}

impl ApplicationSortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            "application_number" => Some(Self::ApplicationNumber),
            "estimated_value" => Some(Self::EstimatedValue),
            "loan_amount" => Some(Self::LoanAmount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub customer_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub item_category: Option<ItemCategory>,
    pub min_estimated_value: Option<i64>,
    pub max_estimated_value: Option<i64>,
    pub min_loan_amount: Option<i64>,
    pub max_loan_amount: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Matches application number, item description or notes.
    pub search: Option<String>,
    pub sort_by: ApplicationSortField,
    pub ascending: bool,
}

impl ApplicationFilter {
    /// Builds a filter from query parameters.
    ///
    /// # Returns
    /// - `Err(message)` - `sort_by` or `sort_order` names an unsupported value
    pub fn from_query(query: &ApplicationQueryDto) -> Result<Self, String> {
        let sort_by = match query.sort_by.as_deref() {
            None => ApplicationSortField::default(),
            Some(value) => ApplicationSortField::parse(value).ok_or_else(|| {
                format!(
                    "Invalid sort field: {}. Must be one of: created_at, updated_at, application_number, estimated_value, loan_amount",
                    value
                )
            })?,
        };

        let ascending = match query.sort_order.as_deref() {
            None | Some("desc") => false,
            Some("asc") => true,
            Some(other) => {
                return Err(format!(
                    "Invalid sort order: {}. Must be 'asc' or 'desc'",
                    other
                ))
            }
        };

        Ok(Self {
            status: query.status,
            customer_id: query.customer_id,
            branch_id: query.branch_id,
            item_category: query.item_category,
            min_estimated_value: query.min_estimated_value,
            max_estimated_value: query.max_estimated_value,
            min_loan_amount: query.min_loan_amount,
            max_loan_amount: query.max_loan_amount,
            date_from: query.date_from,
            date_to: query.date_to,
            search: query.search.clone(),
            sort_by,
            ascending,
        })
    }
}
