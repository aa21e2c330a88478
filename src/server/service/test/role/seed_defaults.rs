use super::*;

/// Tests seeding twice.
///
/// Expected: three roles, admin holding every permission, no duplicates
#[tokio::test]
async fn seeding_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RoleService::new(db);
    service.seed_defaults().await?;
    service.seed_defaults().await?;

    let roles = service.get_all().await?;
    assert_eq!(roles.len(), 3);

    let admin = roles
        .iter()
        .find(|role| role.name == "admin")
        .expect("admin role seeded");
    assert_eq!(admin.permissions.len(), Permission::ALL.len());

    Ok(())
}
