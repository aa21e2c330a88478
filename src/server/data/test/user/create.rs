use super::*;

fn params(username: &str, email: &str) -> CreateUserParams {
    CreateUserParams {
        username: username.to_string(),
        email: email.to_string(),
        password: "ignored".to_string(),
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        role_id: None,
        is_active: true,
        is_superuser: false,
    }
}

/// Tests creating a user stores the given hash.
///
/// Verifies that the repository persists the supplied password hash rather than the
/// plain password carried by the params.
///
/// Expected: Ok(User) with the given hashed_password
#[tokio::test]
async fn creates_user_with_hashed_password() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(params("jane", "jane@example.com"), "$argon2id$hash".to_string())
        .await?;

    assert_eq!(user.username, "jane");
    assert_eq!(user.hashed_password, "$argon2id$hash");
    assert!(user.is_active);
    assert!(user.updated_at.is_none());

    Ok(())
}

/// Tests that usernames are unique.
///
/// Expected: Err(DbErr) on the second insert
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create(params("jane", "jane@example.com"), "h".to_string())
        .await?;
    let result = repo
        .create(params("jane", "other@example.com"), "h".to_string())
        .await;

    assert!(result.is_err());

    Ok(())
}
