use crate::server::{
    error::AppError,
    model::user::{UpdateUserParams, User},
    service::user::UserService,
    util::password::verify_password,
};
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod update;
