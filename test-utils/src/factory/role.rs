//! Role and permission factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a role with the given name.
pub async fn create_role(
    db: &DatabaseConnection,
    name: impl Into<String>,
) -> Result<entity::role::Model, DbErr> {
    entity::role::ActiveModel {
        name: ActiveValue::Set(name.into()),
        description: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        updated_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a role with a unique generated name.
pub async fn create_unique_role(db: &DatabaseConnection) -> Result<entity::role::Model, DbErr> {
    create_role(db, format!("role{}", next_id())).await
}

/// Creates a permission with the given name.
pub async fn create_permission(
    db: &DatabaseConnection,
    name: impl Into<String>,
) -> Result<entity::permission::Model, DbErr> {
    entity::permission::ActiveModel {
        name: ActiveValue::Set(name.into()),
        description: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        updated_at: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a role that is granted each of the named permissions.
///
/// Permissions are created if they do not exist yet.
///
/// # Arguments
/// - `db` - Database connection
/// - `name` - Role name
/// - `permissions` - Permission names such as `"view_loans"`
///
/// # Returns
/// - `Ok(entity::role::Model)` - Created role
/// - `Err(DbErr)` - Database error during creation
pub async fn create_role_with_permissions(
    db: &DatabaseConnection,
    name: impl Into<String>,
    permissions: &[&str],
) -> Result<entity::role::Model, DbErr> {
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

    let role = create_role(db, name).await?;

    for permission_name in permissions {
        let existing = entity::prelude::Permission::find()
            .filter(entity::permission::Column::Name.eq(*permission_name))
            .one(db)
            .await?;
        let permission = match existing {
            Some(permission) => permission,
            None => create_permission(db, *permission_name).await?,
        };

        entity::role_permission::ActiveModel {
            role_id: ActiveValue::Set(role.id),
            permission_id: ActiveValue::Set(permission.id),
        }
        .insert(db)
        .await?;
    }

    Ok(role)
}
