use super::*;

/// Tests the access summary of a user holding a seeded role.
///
/// Expected: role name plus exactly that role's permissions
#[tokio::test]
async fn reports_role_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role_with_permissions(db, "counter", &["view_loans", "create_loans"])
        .await?;
    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .role_id(Some(role.id))
            .build()
            .await?,
    );

    let access = AuthService::new(db).access(&user).await?;

    assert_eq!(access.role.as_deref(), Some("counter"));
    assert_eq!(access.permissions.len(), 2);
    assert!(access.permissions.contains(&"view_loans".to_string()));
    assert!(access.permissions.contains(&"create_loans".to_string()));

    Ok(())
}

/// Tests that a superuser is reported with every permission.
///
/// Expected: all known permission names
#[tokio::test]
async fn superuser_has_every_permission() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    RoleService::new(db).seed_defaults().await?;
    let user = User::from_entity(factory::user::create_superuser(db).await?);

    let access = AuthService::new(db).access(&user).await?;

    assert_eq!(access.permissions.len(), Permission::ALL.len());

    Ok(())
}
