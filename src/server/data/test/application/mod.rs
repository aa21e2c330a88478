use crate::server::{
    data::application::ApplicationRepository,
    model::application::{ApplicationFilter, ApplicationSortField},
};
use entity::application::ApplicationStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete_many;
mod get_all_paginated;
