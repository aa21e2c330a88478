use crate::server::{
    error::AppError, model::payment::UpdatePaymentParams, service::payment::PaymentService,
};
use entity::loan::LoanStatus;
use test_utils::{builder::TestBuilder, factory};

mod delete;
