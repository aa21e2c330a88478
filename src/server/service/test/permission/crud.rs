use super::*;

const DUPLICATE: &str = "The permission with this name already exists.";

/// Expected: Err(BadRequest) when the name is taken
#[tokio::test]
async fn rejects_duplicate_name_on_create() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_permission(db, "view_loans").await?;

    let result = PermissionService::new(db)
        .create(CreatePermissionParams {
            name: "view_loans".to_string(),
            description: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if msg == DUPLICATE));

    Ok(())
}

/// Tests renaming a permission onto another permission's name.
///
/// Expected: Err(BadRequest) and the name is unchanged
#[tokio::test]
async fn rejects_duplicate_name_on_update() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_permission(db, "view_loans").await?;
    let other = factory::create_permission(db, "create_loans").await?;
    let service = PermissionService::new(db);

    let result = service
        .update(
            other.id,
            UpdatePermissionParams {
                name: Some("view_loans".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if msg == DUPLICATE));
    assert_eq!(service.get_by_id(other.id).await?.name, "create_loans");

    Ok(())
}

/// Expected: Ok with the stored permission, then NotFound once deleted
#[tokio::test]
async fn creates_and_deletes_permission() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = PermissionService::new(db);
    let created = service
        .create(CreatePermissionParams {
            name: "void_transactions".to_string(),
            description: Some("Void a posted transaction".to_string()),
        })
        .await?;

    assert_eq!(service.get_by_id(created.id).await?.name, "void_transactions");

    service.delete(created.id).await?;

    let result = service.get_by_id(created.id).await;
    assert!(matches!(result, Err(AppError::NotFound(ref msg)) if msg == "Permission not found"));

    Ok(())
}
