use crate::server::data::payment::PaymentRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_all_paginated;
mod get_by_loan;
