use crate::server::{
    data::transaction::TransactionRepository, model::transaction::TransactionFilter,
};
use entity::transaction::{TransactionStatus, TransactionType};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_all_paginated;
