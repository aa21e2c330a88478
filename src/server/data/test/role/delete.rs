use super::*;

/// Tests deleting a role with grants.
///
/// Expected: Ok(true), after which the role is gone
#[tokio::test]
async fn deletes_role_and_grants() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role_with_permissions(db, "clerk", &["view_loans"]).await?;

    let repo = RoleRepository::new(db);
    let deleted = repo.delete(role.id).await?;

    assert!(deleted);
    assert!(repo.find_by_id(role.id).await?.is_none());
    assert!(repo.get_permission_names(role.id).await?.is_empty());

    Ok(())
}

/// Tests counting the users assigned to a role.
///
/// Expected: Ok(1)
#[tokio::test]
async fn counts_assigned_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db, "clerk").await?;
    factory::user::UserFactory::new(db)
        .role_id(Some(role.id))
        .build()
        .await?;
    factory::create_user(db).await?;

    let count = UserRepository::new(db).count_by_role(role.id).await?;

    assert_eq!(count, 1);

    Ok(())
}
