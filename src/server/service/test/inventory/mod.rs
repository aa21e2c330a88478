use crate::server::{
    error::AppError,
    model::item::{CreateItemParams, UpdateItemParams},
    service::inventory::InventoryService,
};
use entity::{
    item::{ItemCategory, ItemStatus},
    loan::LoanStatus,
};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod stats;
mod update_status;

const STATUS_LOCKED: &str =
    "Cannot change the status of an item that is associated with an active loan";
