use super::*;

/// Tests pagination of users.
///
/// Verifies that the total counts every user while the page holds at most
/// `per_page` entries.
///
/// Expected: Ok with 2 users on page 0 and total 3
#[tokio::test]
async fn paginates_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..3 {
        factory::create_user(db).await?;
    }

    let (users, total) = UserRepository::new(db)
        .get_all_paginated(&UserFilter::default(), 0, 2)
        .await?;

    assert_eq!(users.len(), 2);
    assert_eq!(total, 3);

    Ok(())
}

/// Tests filtering users by email substring.
///
/// Expected: Ok with only the matching user
#[tokio::test]
async fn filters_by_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("owner@pawn.test")
        .build()
        .await?;
    factory::create_user(db).await?;

    let filter = UserFilter {
        email: Some("pawn.test".to_string()),
        ..Default::default()
    };
    let (users, total) = UserRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].email, "owner@pawn.test");

    Ok(())
}
