use crate::server::{
    error::AppError,
    model::user::{CreatePermissionParams, UpdatePermissionParams},
    service::permission::PermissionService,
};
use test_utils::{builder::TestBuilder, factory};

mod crud;
