//! Role-based access control for API endpoints.
//!
//! Every protected handler builds an `AuthGuard` from the request session and calls
//! `require` with the permissions the operation needs. Permissions are stored in the
//! database and granted to roles, so the check resolves the user's role grants on
//! every request.

use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{role::RoleRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewUsers,
    ManageUsers,
    ViewCustomers,
    ManageCustomers,
    ViewLoans,
    CreateLoans,
    ApproveLoans,
    ManageLoans,
    ViewInventory,
    ManageInventory,
    ViewTransactions,
    ManageTransactions,
    ViewReports,
    ManageReports,
    ViewBranches,
    ManageBranches,
}

impl Permission {
    pub const ALL: [Permission; 16] = [
        Permission::ViewUsers,
        Permission::ManageUsers,
        Permission::ViewCustomers,
        Permission::ManageCustomers,
        Permission::ViewLoans,
        Permission::CreateLoans,
        Permission::ApproveLoans,
        Permission::ManageLoans,
        Permission::ViewInventory,
        Permission::ManageInventory,
        Permission::ViewTransactions,
        Permission::ManageTransactions,
        Permission::ViewReports,
        Permission::ManageReports,
        Permission::ViewBranches,
        Permission::ManageBranches,
    ];

    /// Name of the permission row in the `permissions` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewUsers => "view_users",
            Permission::ManageUsers => "manage_users",
            Permission::ViewCustomers => "view_customers",
            Permission::ManageCustomers => "manage_customers",
            Permission::ViewLoans => "view_loans",
            Permission::CreateLoans => "create_loans",
            Permission::ApproveLoans => "approve_loans",
            Permission::ManageLoans => "manage_loans",
            Permission::ViewInventory => "view_inventory",
            Permission::ManageInventory => "manage_inventory",
            Permission::ViewTransactions => "view_transactions",
            Permission::ManageTransactions => "manage_transactions",
            Permission::ViewReports => "view_reports",
            Permission::ManageReports => "manage_reports",
            Permission::ViewBranches => "view_branches",
            Permission::ManageBranches => "manage_branches",
        }
    }

    pub fn description(&self) -> String {
        let name = self.as_str();
        match name.split_once('_') {
            Some((action, subject)) => format!("Can {} {}", action, subject),
            None => name.to_string(),
        }
    }
}

/// Roles created at startup and the permissions each is granted.
pub fn default_role_grants() -> Vec<(&'static str, &'static str, Vec<Permission>)> {
    use Permission::*;

    vec![
        ("admin", "Administrator with full access", Permission::ALL.to_vec()),
        (
            "manager",
            "Branch manager",
            vec![
                ViewUsers,
                ViewCustomers,
                ManageCustomers,
                ViewLoans,
                CreateLoans,
                ApproveLoans,
                ViewInventory,
                ManageInventory,
                ViewTransactions,
                ManageTransactions,
                ViewReports,
                ViewBranches,
            ],
        ),
        (
            "staff",
            "Counter staff",
            vec![
                ViewCustomers,
                ViewLoans,
                CreateLoans,
                ViewInventory,
                ViewTransactions,
                ManageTransactions,
            ],
        ),
    ]
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the logged-in user and checks it holds every given permission.
    ///
    /// An empty permission list only requires an authenticated, active user.
    /// Superusers pass every permission check.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user
    /// - `Err(AuthError::UserNotInSession)` - No user in session
    /// - `Err(AuthError::UserNotInDatabase)` - Session refers to a deleted user
    /// - `Err(AuthError::InactiveUser)` - User is deactivated
    /// - `Err(AuthError::InvalidRole)` - Permissions required but user has no role
    /// - `Err(AuthError::MissingPermission)` - Role lacks a required permission
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let user = self.current_user().await?;

        if permissions.is_empty() || user.is_superuser {
            return Ok(user);
        }

        let Some(role_id) = user.role_id else {
            return Err(AuthError::InvalidRole.into());
        };

        let granted = RoleRepository::new(self.db)
            .get_permission_names(role_id)
            .await?;

        for permission in permissions {
            if !granted.iter().any(|name| name == permission.as_str()) {
                return Err(AuthError::MissingPermission(permission.as_str().to_string()).into());
            }
        }

        Ok(user)
    }

    /// Returns the active user in the session without any permission check.
    pub async fn current_user(&self) -> Result<User, AppError> {
        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::UserNotInDatabase(user_id).into());
        };

        if !user.is_active {
            return Err(AuthError::InactiveUser.into());
        }

        Ok(user)
    }

    /// Checks a permission without failing the request.
    ///
    /// Used where access depends on who the user is, such as reading one's own profile.
    pub async fn has_permission(&self, user: &User, permission: Permission) -> Result<bool, AppError> {
        if user.is_superuser {
            return Ok(true);
        }

        let Some(role_id) = user.role_id else {
            return Ok(false);
        };

        let granted = RoleRepository::new(self.db)
            .get_permission_names(role_id)
            .await?;

        Ok(granted.iter().any(|name| name == permission.as_str()))
    }
}
