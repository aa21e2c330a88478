use crate::server::{data::customer::CustomerRepository, model::customer::CustomerFilter};
use entity::loan::LoanStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_open_loans;
mod get_all_paginated;
