use super::*;

/// Tests creating a role with permission grants.
///
/// Expected: Ok(Role) listing both granted permissions
#[tokio::test]
async fn creates_role_with_permissions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let view = factory::create_permission(db, "view_loans").await?;
    let create = factory::create_permission(db, "create_loans").await?;

    let role = RoleRepository::new(db)
        .create(CreateRoleParams {
            name: "clerk".to_string(),
            description: None,
            permission_ids: vec![view.id, create.id],
        })
        .await?;

    let mut names: Vec<String> = role.permissions.into_iter().map(|p| p.name).collect();
    names.sort();
    assert_eq!(role.name, "clerk");
    assert_eq!(names, vec!["create_loans", "view_loans"]);

    Ok(())
}

/// Tests that duplicate permission ids are granted once.
///
/// Expected: Ok(Role) with a single permission
#[tokio::test]
async fn ignores_duplicate_permission_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let view = factory::create_permission(db, "view_loans").await?;

    let role = RoleRepository::new(db)
        .create(CreateRoleParams {
            name: "clerk".to_string(),
            description: None,
            permission_ids: vec![view.id, view.id],
        })
        .await?;

    assert_eq!(role.permissions.len(), 1);

    Ok(())
}
