use super::*;

/// Tests creating a role with permissions and replacing its grants.
///
/// Expected: permissions listed after create, replaced after update
#[tokio::test]
async fn creates_and_regrants_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let view = factory::create_permission(db, "view_loans").await?;
    let create = factory::create_permission(db, "create_loans").await?;
    let service = RoleService::new(db);

    let role = service
        .create(CreateRoleParams {
            name: "counter".to_string(),
            description: None,
            permission_ids: vec![view.id, create.id],
        })
        .await?;
    assert_eq!(role.permissions.len(), 2);

    let role = service
        .update(
            role.id,
            UpdateRoleParams {
                permission_ids: Some(vec![view.id]),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(role.permissions.len(), 1);
    assert_eq!(role.permissions[0].name, "view_loans");

    Ok(())
}

/// Tests creating a role with a name already in use.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_duplicate_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_role(db, "counter").await?;

    let result = RoleService::new(db)
        .create(CreateRoleParams {
            name: "counter".to_string(),
            description: None,
            permission_ids: Vec::new(),
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "The role with this name already exists."
    ));

    Ok(())
}

/// Tests deleting a role that a user still holds.
///
/// Expected: Err(BadRequest) with the assignment count
#[tokio::test]
async fn rejects_deleting_assigned_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db, "counter").await?;
    factory::user::UserFactory::new(db)
        .role_id(Some(role.id))
        .build()
        .await?;

    let result = RoleService::new(db).delete(role.id).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot delete role that is assigned to 1 users"
    ));

    Ok(())
}
