use super::*;

/// Tests that only the fields set in the params change.
///
/// Expected: Ok(Some(User)) with the new first name, same email and updated_at set
#[tokio::test]
async fn updates_only_given_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let updated = UserRepository::new(db)
        .update(
            user.id,
            UpdateUserParams {
                first_name: Some("Renamed".to_string()),
                ..Default::default()
            },
            None,
        )
        .await?
        .unwrap();

    assert_eq!(updated.first_name.as_deref(), Some("Renamed"));
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.hashed_password, user.hashed_password);
    assert!(updated.updated_at.is_some());

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update(999, UpdateUserParams::default(), None)
        .await?;

    assert!(result.is_none());

    Ok(())
}
