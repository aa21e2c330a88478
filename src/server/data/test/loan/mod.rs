use crate::server::{
    data::loan::LoanRepository, model::loan::LoanFilter, util::time::today,
};
use chrono::Duration;
use entity::loan::LoanStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod extend;
mod find_by_id;
mod get_all_paginated;
