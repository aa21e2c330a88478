use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::Permission,
    model::user::User,
    service::{auth::AuthService, role::RoleService},
};
use test_utils::{builder::TestBuilder, factory};

mod access;
mod authenticate;
mod change_password;
