use crate::server::{
    error::AppError,
    model::customer::{CreateCustomerParams, UpdateCustomerParams},
    service::customer::CustomerService,
};
use entity::loan::LoanStatus;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod stats;

fn customer_params(email: Option<&str>, phone: &str) -> CreateCustomerParams {
    CreateCustomerParams {
        first_name: "Avery".to_string(),
        last_name: "Quinn".to_string(),
        email: email.map(str::to_string),
        phone: phone.to_string(),
        address: None,
        city: Some("Springfield".to_string()),
        state: None,
        zip_code: None,
        id_type: None,
        id_number: None,
        date_of_birth: None,
        notes: None,
        credit_score: None,
    }
}
