use super::*;

/// Tests changing a password and logging in with the new one.
///
/// Expected: old password rejected, new password accepted
#[tokio::test]
async fn replaces_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .password("old-password")
            .build()
            .await?,
    );
    let service = AuthService::new(db);

    service
        .change_password(&user, "old-password", "new-password")
        .await?;

    assert!(service.authenticate(&user.username, "old-password").await.is_err());
    assert!(service.authenticate(&user.username, "new-password").await.is_ok());

    Ok(())
}

/// Tests the current-password check and the minimum length.
///
/// Expected: Err(BadRequest) with the matching message for each
#[tokio::test]
async fn validates_current_and_new_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = User::from_entity(
        factory::user::UserFactory::new(db)
            .password("old-password")
            .build()
            .await?,
    );
    let service = AuthService::new(db);

    let wrong_current = service
        .change_password(&user, "not-my-password", "new-password")
        .await;
    assert!(matches!(
        wrong_current,
        Err(AppError::BadRequest(ref msg)) if msg == "Incorrect current password"
    ));

    let too_short = service.change_password(&user, "old-password", "short").await;
    assert!(matches!(
        too_short,
        Err(AppError::BadRequest(ref msg)) if msg == "Password must be at least 8 characters long"
    ));

    Ok(())
}
