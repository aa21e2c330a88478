use crate::server::{
    error::AppError,
    model::application::{CreateApplicationParams, UpdateApplicationParams},
    service::application::{applications_csv, ApplicationService},
};
use entity::{application::ApplicationStatus, item::ItemCategory};
use test_utils::{builder::TestBuilder, factory};

mod bulk;
mod create;
mod export;
mod stats;

fn application_params(customer_id: i32, branch_id: i32) -> CreateApplicationParams {
    CreateApplicationParams {
        customer_id,
        branch_id,
        item_category: ItemCategory::Watches,
        item_description: "Steel chronograph".to_string(),
        estimated_value: 60_000,
        loan_amount: 40_000,
        interest_rate: 12.5,
        term_months: 3,
        notes: None,
    }
}
