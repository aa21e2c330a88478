use super::*;

/// Tests a superuser passes checks without any role.
///
/// Verifies that superusers bypass the role lookup entirely.
///
/// Expected: Ok(User) with is_superuser=true
#[tokio::test]
async fn superuser_passes_every_permission() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_superuser(db).await?;
    AuthSession::new(session).set_user_id(admin.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::ManageUsers, Permission::ManageLoans])
        .await?;

    assert_eq!(user.id, admin.id);
    assert!(user.is_superuser);

    Ok(())
}

/// Tests a role granting every required permission.
///
/// Expected: Ok(User)
#[tokio::test]
async fn grants_access_when_role_has_all_permissions() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let role =
        factory::create_role_with_permissions(db, "staff", &["view_loans", "create_loans"])
            .await?;
    let clerk = factory::user::UserFactory::new(db)
        .role_id(Some(role.id))
        .build()
        .await?;
    AuthSession::new(session).set_user_id(clerk.id).await?;

    let user = AuthGuard::new(db, session)
        .require(&[Permission::ViewLoans, Permission::CreateLoans])
        .await?;

    assert_eq!(user.id, clerk.id);

    Ok(())
}

/// Tests that lacking any one permission fails the whole check.
///
/// Expected: Err(AuthError::MissingPermission("manage_loans"))
#[tokio::test]
async fn denies_access_when_any_permission_missing() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let role = factory::create_role_with_permissions(db, "staff", &["view_loans"]).await?;
    let clerk = factory::user::UserFactory::new(db)
        .role_id(Some(role.id))
        .build()
        .await?;
    AuthSession::new(session).set_user_id(clerk.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::ViewLoans, Permission::ManageLoans])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::MissingPermission(name))) => {
            assert_eq!(name, "manage_loans");
        }
        other => panic!("Expected MissingPermission error, got: {:?}", other),
    }

    Ok(())
}

/// Tests a non-superuser without a role.
///
/// Expected: Err(AuthError::InvalidRole)
#[tokio::test]
async fn denies_access_without_role() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::ViewCustomers])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidRole))
    ));

    Ok(())
}

/// Tests an empty permission list.
///
/// Verifies that any active, authenticated user passes even without a role.
///
/// Expected: Ok(User)
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::create_user(db).await?;
    AuthSession::new(session).set_user_id(user.id).await?;

    let result = AuthGuard::new(db, session).require(&[]).await?;

    assert_eq!(result.id, user.id);

    Ok(())
}

/// Tests the non-failing permission check.
///
/// Expected: Ok(true) for a granted permission, Ok(false) otherwise
#[tokio::test]
async fn has_permission_reports_role_grants() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let role = factory::create_role_with_permissions(db, "manager", &["view_users"]).await?;
    let manager = factory::user::UserFactory::new(db)
        .role_id(Some(role.id))
        .build()
        .await?;
    AuthSession::new(session).set_user_id(manager.id).await?;

    let guard = AuthGuard::new(db, session);
    let user = guard.current_user().await?;

    assert!(guard.has_permission(&user, Permission::ViewUsers).await?);
    assert!(!guard.has_permission(&user, Permission::ManageUsers).await?);

    Ok(())
}
