use sea_orm::DatabaseConnection;
use time::Duration;
use tokio::task::JoinHandle;
use tower_sessions::{
    cookie::SameSite, session_store::ExpiredDeletion, Expiry, SessionManagerLayer,
};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::AppError,
    service::{role::RoleService, user::UserService},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// How often expired session rows are purged from the store.
const SESSION_CLEANUP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Builds the session layer backed by the application's Sqlite pool.
///
/// Sessions live in the same database as the application data and expire after
/// `session_expiry_minutes` of inactivity. Cookies are marked `Secure` in production.
/// A background task deletes expired sessions every `SESSION_CLEANUP_INTERVAL`.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer ready to wrap the router
/// - `Err(AppError::SqlxErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;

    spawn_session_cleanup(store.clone(), SESSION_CLEANUP_INTERVAL);

    let layer = SessionManagerLayer::new(store)
        .with_secure(config.is_production())
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            config.session_expiry_minutes,
        )));

    Ok(layer)
}

/// Deletes expired sessions from `store` every `period` until the task is aborted.
pub fn spawn_session_cleanup(store: SqliteStore, period: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = store.continuously_delete_expired(period).await {
            tracing::error!("Expired session cleanup stopped: {}", err);
        }
    })
}

/// Seeds permissions and default roles, then creates the configured superuser if
/// none exists yet.
pub async fn seed_database(db: &DatabaseConnection, config: &Config) -> Result<(), AppError> {
    RoleService::new(db).seed_defaults().await?;

    let Some(admin) = &config.admin else {
        tracing::warn!("ADMIN_USERNAME, ADMIN_EMAIL and ADMIN_PASSWORD not set, skipping superuser creation");
        return Ok(());
    };

    if let Some(user) = UserService::new(db).ensure_superuser(admin).await? {
        tracing::info!("Created superuser {}", user.username);
    }

    Ok(())
}
