use super::*;

/// Tests that `is_active` on an employee update lands on the user account.
///
/// Expected: user inactive after the first update, active again after the second
#[tokio::test]
async fn writes_active_flag_to_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, _, employee) = factory::helpers::create_employee_with_dependencies(db).await?;
    let service = EmployeeService::new(db);

    let updated = service
        .update(
            employee.id,
            UpdateEmployeeParams {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;
    assert!(!updated.is_active);
    let stored = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    assert!(!stored.is_active);

    service
        .update(
            employee.id,
            UpdateEmployeeParams {
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await?;
    let stored = UserRepository::new(db).find_by_id(user.id).await?.unwrap();
    assert!(stored.is_active);

    Ok(())
}

/// Expected: Err(NotFound) and the employee keeps its branch
#[tokio::test]
async fn rejects_unknown_branch() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, branch, _, employee) = factory::helpers::create_employee_with_dependencies(db).await?;
    let service = EmployeeService::new(db);

    let result = service
        .update(
            employee.id,
            UpdateEmployeeParams {
                branch_id: Some(999),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(ref msg)) if msg == "Branch not found"));
    assert_eq!(service.get_by_id(employee.id).await?.branch_id, branch.id);

    Ok(())
}
