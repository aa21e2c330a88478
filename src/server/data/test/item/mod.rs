use crate::server::{data::item::ItemRepository, model::item::ItemFilter};
use entity::{
    item::{ItemCategory, ItemStatus},
    loan::LoanStatus,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_all_paginated;
mod has_open_loan;
mod set_status;
