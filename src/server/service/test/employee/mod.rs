use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::employee::{CreateEmployeeParams, CreateEmployeeTypeParams, UpdateEmployeeParams},
    service::employee::EmployeeService,
    util::time::today,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod types;
mod update;
