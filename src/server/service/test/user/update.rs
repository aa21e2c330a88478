use super::*;

/// Tests a regular user trying to grant a role.
///
/// Expected: Err(Forbidden)
#[tokio::test]
async fn regular_user_cannot_assign_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db, "manager").await?;
    let actor = User::from_entity(factory::create_user(db).await?);
    let target = factory::create_user(db).await?;

    let result = UserService::new(db)
        .update(
            target.id,
            UpdateUserParams {
                role_id: Some(role.id),
                ..Default::default()
            },
            &actor,
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden(_))));

    Ok(())
}

/// Tests a superuser assigning a role and renaming a user.
///
/// Expected: Ok(User) with the new role and name
#[tokio::test]
async fn superuser_assigns_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db, "manager").await?;
    let actor = User::from_entity(factory::user::create_superuser(db).await?);
    let target = factory::create_user(db).await?;

    let updated = UserService::new(db)
        .update(
            target.id,
            UpdateUserParams {
                role_id: Some(role.id),
                first_name: Some("Dana".to_string()),
                ..Default::default()
            },
            &actor,
        )
        .await?;

    assert_eq!(updated.role_id, Some(role.id));
    assert_eq!(updated.first_name.as_deref(), Some("Dana"));

    Ok(())
}

/// Tests taking another user's email address.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_taken_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let actor = User::from_entity(factory::user::create_superuser(db).await?);
    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;

    let result = UserService::new(db)
        .update(
            second.id,
            UpdateUserParams {
                email: Some(first.email.clone()),
                ..Default::default()
            },
            &actor,
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg))
            if msg == "The user with this email already exists in the system."
    ));

    Ok(())
}

/// Tests a user setting a password that is too short on their own account.
///
/// Expected: Err(BadRequest), stored hash unchanged
#[tokio::test]
async fn rejects_short_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let actor = User::from_entity(factory::create_user(db).await?);
    let service = UserService::new(db);

    let result = service
        .update(
            actor.id,
            UpdateUserParams {
                password: Some("short".to_string()),
                ..Default::default()
            },
            &actor,
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Password must be at least 8 characters long"
    ));
    let stored = service.get_by_id(actor.id).await?;
    assert_eq!(stored.hashed_password, actor.hashed_password);

    Ok(())
}

/// Tests a user replacing their password with a long enough one.
///
/// Expected: Ok(User) whose hash verifies the new password
#[tokio::test]
async fn rehashes_valid_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let actor = User::from_entity(factory::create_user(db).await?);

    let updated = UserService::new(db)
        .update(
            actor.id,
            UpdateUserParams {
                password: Some("long-enough-password".to_string()),
                ..Default::default()
            },
            &actor,
        )
        .await?;

    assert!(verify_password("long-enough-password", &updated.hashed_password));

    Ok(())
}
