use super::*;

/// Tests that login lookup matches the username.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn finds_user_by_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .username("clerk")
        .email("clerk@example.com")
        .build()
        .await?;

    let found = UserRepository::new(db).find_by_login("clerk").await?;

    assert_eq!(found.map(|u| u.id), Some(created.id));

    Ok(())
}

/// Tests that login lookup also matches the email.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn finds_user_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .username("clerk")
        .email("clerk@example.com")
        .build()
        .await?;

    let found = UserRepository::new(db)
        .find_by_login("clerk@example.com")
        .await?;

    assert_eq!(found.map(|u| u.id), Some(created.id));

    Ok(())
}

/// Tests lookup of an unknown login.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_login() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;

    let found = UserRepository::new(db).find_by_login("nobody").await?;

    assert!(found.is_none());

    Ok(())
}
