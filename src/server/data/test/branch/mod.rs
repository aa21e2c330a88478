use crate::server::{
    data::branch::{BranchDependents, BranchRepository},
    model::branch::BranchFilter,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_dependents;
mod get_all_paginated;
