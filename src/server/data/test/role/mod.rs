use crate::server::{
    data::{role::RoleRepository, user::UserRepository},
    model::user::{CreateRoleParams, UpdateRoleParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod get_permission_names;
mod update;
