//! Route table, OpenAPI document and router-wide layers.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{
        application::{self, APPLICATION_TAG},
        auth::{self, AUTH_TAG},
        branch::{self, BRANCH_TAG},
        collateral::{self, COLLATERAL_TAG},
        customer::{self, CUSTOMER_TAG},
        employee::{self, EMPLOYEE_TAG},
        inventory::{self, INVENTORY_TAG},
        loan::{self, LOAN_TAG},
        payment::{self, PAYMENT_TAG},
        report::{self, REPORT_TAG},
        system::{self, SYSTEM_TAG},
        transaction::{self, TRANSACTION_TAG},
        user::{self, USER_TAG},
    },
    error::{config::ConfigError, AppError},
    middleware::timing::process_time_middleware,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Pawnshop Management System API"),
    paths(
        system::root,
        system::health,
        auth::login,
        auth::register,
        auth::change_password,
        auth::password_reset,
        auth::me,
        auth::logout,
        auth::verify,
        user::get_users,
        user::create_user,
        user::get_user_by_id,
        user::update_user,
        user::delete_user,
        user::get_roles,
        user::create_role,
        user::get_role_by_id,
        user::update_role,
        user::delete_role,
        user::get_permissions,
        user::create_permission,
        user::get_permission_by_id,
        user::update_permission,
        user::delete_permission,
        branch::get_branches,
        branch::create_branch,
        branch::get_branch_by_id,
        branch::update_branch,
        branch::delete_branch,
        employee::get_employee_types,
        employee::create_employee_type,
        employee::get_employee_type_by_id,
        employee::update_employee_type,
        employee::delete_employee_type,
        employee::get_employees,
        employee::search_employees,
        employee::create_employee,
        employee::get_employee_by_id,
        employee::update_employee,
        employee::delete_employee,
        employee::get_employee_stats,
        customer::get_customers,
        customer::create_customer,
        customer::get_customer_by_id,
        customer::update_customer,
        customer::delete_customer,
        customer::search_customers,
        customer::get_customer_stats,
        inventory::get_items,
        inventory::create_item,
        inventory::get_item_by_id,
        inventory::update_item,
        inventory::delete_item,
        inventory::update_item_status,
        inventory::search_items,
        inventory::get_inventory_stats,
        loan::get_loans,
        loan::create_loan,
        loan::get_loan_by_id,
        loan::update_loan,
        loan::add_payment,
        loan::extend_loan,
        loan::redeem_loan,
        loan::default_loan,
        loan::search_loans,
        loan::get_loan_stats,
        payment::get_payments,
        payment::get_payment_by_id,
        payment::update_payment,
        payment::delete_payment,
        collateral::get_loan_collateral,
        collateral::get_item_collateral,
        transaction::get_transactions,
        transaction::create_transaction,
        transaction::get_transaction_by_id,
        transaction::update_transaction,
        transaction::cancel_transaction,
        transaction::complete_transaction,
        transaction::search_transactions,
        transaction::get_transaction_stats,
        application::get_applications,
        application::create_application,
        application::get_application_by_id,
        application::update_application,
        application::delete_application,
        application::bulk_update_applications,
        application::bulk_delete_applications,
        application::get_application_stats,
        application::get_application_trends,
        application::export_applications,
        report::get_dashboard,
        report::get_sales_report,
        report::get_loan_report,
        report::get_inventory_report,
        report::get_customer_report,
        report::export_sales_report,
        report::export_loan_report,
    ),
    tags(
        (name = SYSTEM_TAG, description = "Service status"),
        (name = AUTH_TAG, description = "Login, registration and session management"),
        (name = USER_TAG, description = "Users, roles and permissions"),
        (name = BRANCH_TAG, description = "Shop locations"),
        (name = EMPLOYEE_TAG, description = "Employees and employee types"),
        (name = CUSTOMER_TAG, description = "Customer records"),
        (name = INVENTORY_TAG, description = "Items held, pawned or for sale"),
        (name = LOAN_TAG, description = "Pawn loans and their lifecycle"),
        (name = PAYMENT_TAG, description = "Loan payments"),
        (name = COLLATERAL_TAG, description = "Loans paired with their items"),
        (name = TRANSACTION_TAG, description = "Cash movements"),
        (name = APPLICATION_TAG, description = "Loan applications"),
        (name = REPORT_TAG, description = "Dashboards, reports and CSV exports"),
    )
)]
pub struct ApiDoc;

/// Builds the full application router.
///
/// The `/api/auth` routes sit behind a per-IP rate limiter, so the server must be
/// started with `into_make_service_with_connect_info::<SocketAddr>()`. Every response
/// carries an `X-Process-Time` header, and cross-origin requests are accepted from
/// `allowed_origins` with credentials.
///
/// # Returns
/// - `Ok(Router)` - Router awaiting its `AppState` and session layer
/// - `Err(AppError::ConfigErr)` - An allowed origin or the rate limit is invalid
pub fn router(config: &Config) -> Result<Router<AppState>, AppError> {
    let router = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .nest("/api/auth", auth_routes(config)?)
        .nest("/api/users", user_routes())
        .nest("/api/branches", branch_routes())
        .nest("/api/employees", employee_routes())
        .nest("/api/customers", customer_routes())
        .nest("/api/inventory", inventory_routes())
        .nest("/api/loans", loan_routes())
        .nest("/api/payments", payment_routes())
        .nest("/api/collaterals", collateral_routes())
        .nest("/api/transactions", transaction_routes())
        .nest("/api/applications", application_routes())
        .nest("/api/reports", report_routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(process_time_middleware))
        .layer(cors_layer(config)?);

    Ok(router)
}

fn auth_routes(config: &Config) -> Result<Router<AppState>, AppError> {
    let replenish_ms = (1000 / config.rate_limit_per_second.max(1)).max(1);
    let governor = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(config.rate_limit_burst)
        .finish()
        .ok_or_else(|| ConfigError::InvalidValue {
            var: "RATE_LIMIT_BURST".to_string(),
            value: config.rate_limit_burst.to_string(),
        })?;

    Ok(Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/change-password", post(auth::change_password))
        .route("/password-reset", post(auth::password_reset))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout))
        .route("/verify", get(auth::verify))
        .layer(GovernorLayer::new(Arc::new(governor))))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(user::get_users).post(user::create_user))
        .route("/roles", get(user::get_roles).post(user::create_role))
        .route(
            "/roles/{role_id}",
            get(user::get_role_by_id)
                .put(user::update_role)
                .delete(user::delete_role),
        )
        .route(
            "/permissions",
            get(user::get_permissions).post(user::create_permission),
        )
        .route(
            "/permissions/{permission_id}",
            get(user::get_permission_by_id)
                .put(user::update_permission)
                .delete(user::delete_permission),
        )
        .route(
            "/{user_id}",
            get(user::get_user_by_id)
                .put(user::update_user)
                .delete(user::delete_user),
        )
}

fn branch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(branch::get_branches).post(branch::create_branch))
        .route(
            "/{branch_id}",
            get(branch::get_branch_by_id)
                .put(branch::update_branch)
                .delete(branch::delete_branch),
        )
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(employee::get_employees).post(employee::create_employee),
        )
        .route("/search", post(employee::search_employees))
        .route("/stats/overview", get(employee::get_employee_stats))
        .route(
            "/types",
            get(employee::get_employee_types).post(employee::create_employee_type),
        )
        .route(
            "/types/{type_id}",
            get(employee::get_employee_type_by_id)
                .put(employee::update_employee_type)
                .delete(employee::delete_employee_type),
        )
        .route(
            "/{employee_id}",
            get(employee::get_employee_by_id)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        )
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(customer::get_customers).post(customer::create_customer),
        )
        .route("/search", post(customer::search_customers))
        .route("/stats/overview", get(customer::get_customer_stats))
        .route(
            "/{customer_id}",
            get(customer::get_customer_by_id)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
}

fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::get_items).post(inventory::create_item))
        .route("/search", post(inventory::search_items))
        .route("/stats/overview", get(inventory::get_inventory_stats))
        .route(
            "/{item_id}",
            get(inventory::get_item_by_id)
                .put(inventory::update_item)
                .delete(inventory::delete_item),
        )
        .route("/{item_id}/status", put(inventory::update_item_status))
}

fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(loan::get_loans).post(loan::create_loan))
        .route("/search", post(loan::search_loans))
        .route("/stats/overview", get(loan::get_loan_stats))
        .route(
            "/{loan_id}",
            get(loan::get_loan_by_id).put(loan::update_loan),
        )
        .route("/{loan_id}/payments", post(loan::add_payment))
        .route("/{loan_id}/extend", put(loan::extend_loan))
        .route("/{loan_id}/redeem", put(loan::redeem_loan))
        .route("/{loan_id}/default", put(loan::default_loan))
}

fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(payment::get_payments))
        .route(
            "/{payment_id}",
            get(payment::get_payment_by_id)
                .put(payment::update_payment)
                .delete(payment::delete_payment),
        )
}

fn collateral_routes() -> Router<AppState> {
    Router::new()
        .route("/{loan_id}/collateral", get(collateral::get_loan_collateral))
        .route("/items/{item_id}", get(collateral::get_item_collateral))
}

fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(transaction::get_transactions).post(transaction::create_transaction),
        )
        .route("/search", post(transaction::search_transactions))
        .route("/stats/overview", get(transaction::get_transaction_stats))
        .route(
            "/{transaction_id}",
            get(transaction::get_transaction_by_id).put(transaction::update_transaction),
        )
        .route(
            "/{transaction_id}/cancel",
            put(transaction::cancel_transaction),
        )
        .route(
            "/{transaction_id}/complete",
            put(transaction::complete_transaction),
        )
}

fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(application::get_applications).post(application::create_application),
        )
        .route("/stats", get(application::get_application_stats))
        .route("/trends", get(application::get_application_trends))
        .route("/export", get(application::export_applications))
        .route(
            "/bulk-update",
            post(application::bulk_update_applications),
        )
        .route(
            "/bulk-delete",
            post(application::bulk_delete_applications),
        )
        .route(
            "/{application_id}",
            get(application::get_application_by_id)
                .put(application::update_application)
                .delete(application::delete_application),
        )
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(report::get_dashboard))
        .route("/sales", get(report::get_sales_report))
        .route("/loans", get(report::get_loan_report))
        .route("/inventory", get(report::get_inventory_report))
        .route("/customers", get(report::get_customer_report))
        .route("/export/sales", get(report::export_sales_report))
        .route("/export/loans", get(report::export_loan_report))
}

fn cors_layer(config: &Config) -> Result<CorsLayer, AppError> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidValue {
                var: "ALLOWED_ORIGINS".to_string(),
                value: origin.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]))
}
