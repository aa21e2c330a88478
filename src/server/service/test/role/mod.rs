use crate::server::{
    error::AppError,
    middleware::auth::Permission,
    model::user::{CreateRoleParams, UpdateRoleParams},
    service::role::RoleService,
};
use test_utils::{builder::TestBuilder, factory};

mod crud;
mod seed_defaults;
