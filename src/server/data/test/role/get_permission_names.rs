use super::*;

/// Tests resolving the permission names granted to a role.
///
/// Expected: Ok with exactly the granted names
#[tokio::test]
async fn returns_granted_names() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role =
        factory::create_role_with_permissions(db, "clerk", &["view_loans", "create_loans"])
            .await?;
    factory::create_role_with_permissions(db, "auditor", &["view_reports"]).await?;

    let mut names = RoleRepository::new(db).get_permission_names(role.id).await?;
    names.sort();

    assert_eq!(names, vec!["create_loans", "view_loans"]);

    Ok(())
}
