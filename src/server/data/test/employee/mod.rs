use crate::server::{
    data::employee::EmployeeRepository,
    model::employee::{CreateEmployeeParams, EmployeeFilter},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_all_paginated;
