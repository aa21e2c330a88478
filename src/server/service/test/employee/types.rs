use super::*;

/// Tests deleting an employee type that employees still hold.
///
/// Expected: Err(BadRequest) and the type is kept
#[tokio::test]
async fn rejects_deleting_assigned_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, employee_type, _) = factory::helpers::create_employee_with_dependencies(db).await?;
    let service = EmployeeService::new(db);

    let result = service.delete_type(employee_type.id).await;

    assert!(
        matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "Cannot delete employee type that is assigned to 1 employees")
    );
    assert!(service.get_type(employee_type.id).await.is_ok());

    Ok(())
}

/// Expected: Ok returning the removed type, then NotFound on lookup
#[tokio::test]
async fn deletes_unassigned_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let employee_type = factory::create_employee_type(db).await?;
    let service = EmployeeService::new(db);

    let deleted = service.delete_type(employee_type.id).await?;

    assert_eq!(deleted.id, employee_type.id);
    assert!(matches!(
        service.get_type(employee_type.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Expected: Err(BadRequest) for a name already in use
#[tokio::test]
async fn rejects_duplicate_type_name() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::employee_type::create_employee_type_named(db, "Appraiser").await?;

    let result = EmployeeService::new(db)
        .create_type(CreateEmployeeTypeParams {
            name: "Appraiser".to_string(),
            description: None,
        })
        .await;

    assert!(
        matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "Employee type with this name already exists")
    );

    Ok(())
}
