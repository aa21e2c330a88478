use super::*;

/// Tests that a user cannot delete their own account.
///
/// Expected: Err(BadRequest), user still present
#[tokio::test]
async fn rejects_deleting_self() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let actor = User::from_entity(factory::user::create_superuser(db).await?);
    let service = UserService::new(db);

    let result = service.delete(actor.id, &actor).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot delete your own user account"
    ));
    assert!(service.get_by_id(actor.id).await.is_ok());

    Ok(())
}

/// Tests deleting another user.
///
/// Expected: Ok(User) returned, then NotFound on lookup
#[tokio::test]
async fn deletes_other_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let actor = User::from_entity(factory::user::create_superuser(db).await?);
    let target = factory::create_user(db).await?;
    let service = UserService::new(db);

    let deleted = service.delete(target.id, &actor).await?;

    assert_eq!(deleted.id, target.id);
    assert!(matches!(
        service.get_by_id(target.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
