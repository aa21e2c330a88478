use crate::server::{error::AppError, service::branch::BranchService};
use test_utils::{builder::TestBuilder, factory};

mod delete;
