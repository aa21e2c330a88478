use super::*;

/// Tests removing an employee.
///
/// Expected: employee gone, linked user kept but deactivated
#[tokio::test]
async fn deactivates_linked_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, _, employee) = factory::helpers::create_employee_with_dependencies(db).await?;
    let service = EmployeeService::new(db);

    service.delete(employee.id).await?;

    let result = service.get_by_id(employee.id).await;
    assert!(matches!(result, Err(AppError::NotFound(ref msg)) if msg == "Employee not found"));

    let user = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    assert!(!user.is_active);

    Ok(())
}

/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_unknown_employee() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = EmployeeService::new(db).delete(999).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
