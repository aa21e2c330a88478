use super::*;

/// Tests logging in by username and by email.
///
/// Expected: Ok(User) both ways
#[tokio::test]
async fn accepts_username_or_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .password("correct-horse")
        .build()
        .await?;
    let service = AuthService::new(db);

    let by_username = service.authenticate(&user.username, "correct-horse").await?;
    let by_email = service.authenticate(&user.email, "correct-horse").await?;

    assert_eq!(by_username.id, user.id);
    assert_eq!(by_email.id, user.id);

    Ok(())
}

/// Tests a wrong password.
///
/// Expected: Err(AuthError::InvalidCredentials)
#[tokio::test]
async fn rejects_wrong_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .password("correct-horse")
        .build()
        .await?;

    let result = AuthService::new(db)
        .authenticate(&user.username, "battery-staple")
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests logging in to a deactivated account with the right password.
///
/// Expected: Err(AuthError::InactiveUser)
#[tokio::test]
async fn rejects_inactive_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .password("correct-horse")
        .is_active(false)
        .build()
        .await?;

    let result = AuthService::new(db)
        .authenticate(&user.username, "correct-horse")
        .await;

    assert!(matches!(result, Err(AppError::AuthErr(AuthError::InactiveUser))));

    Ok(())
}
