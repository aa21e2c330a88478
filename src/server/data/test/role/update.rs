use super::*;

/// Tests that permission ids replace the existing grants.
///
/// Expected: Ok(Some(Role)) holding only the new permission
#[tokio::test]
async fn replaces_permissions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role_with_permissions(db, "clerk", &["view_loans"]).await?;
    let reports = factory::create_permission(db, "view_reports").await?;

    let updated = RoleRepository::new(db)
        .update(
            role.id,
            UpdateRoleParams {
                permission_ids: Some(vec![reports.id]),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.permissions.len(), 1);
    assert_eq!(updated.permissions[0].name, "view_reports");

    Ok(())
}

/// Tests that omitting permission ids keeps the grants.
///
/// Expected: Ok(Some(Role)) with the new description and unchanged permissions
#[tokio::test]
async fn keeps_permissions_when_not_given() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role_with_permissions(db, "clerk", &["view_loans"]).await?;

    let updated = RoleRepository::new(db)
        .update(
            role.id,
            UpdateRoleParams {
                description: Some("Front desk".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.description.as_deref(), Some("Front desk"));
    assert_eq!(updated.permissions.len(), 1);

    Ok(())
}
