use super::*;

fn params(user_id: i32, branch_id: i32, employee_type_id: i32) -> CreateEmployeeParams {
    CreateEmployeeParams {
        user_id,
        branch_id,
        employee_type_id,
        hire_date: Some(today()),
    }
}

/// Expected: Ok with the user, branch and type names joined in
#[tokio::test]
async fn creates_employee_for_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let branch = factory::create_branch(db).await?;
    let employee_type = factory::create_employee_type(db).await?;

    let employee = EmployeeService::new(db)
        .create(params(user.id, branch.id, employee_type.id))
        .await?;

    assert_eq!(employee.user_id, user.id);
    assert_eq!(employee.username, user.username);
    assert_eq!(employee.branch_name, branch.name);
    assert_eq!(employee.employee_type_name, employee_type.name);

    Ok(())
}

/// Tests creating a second employee record for the same user.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_user_with_existing_record() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, branch, employee_type, _) =
        factory::helpers::create_employee_with_dependencies(db).await?;

    let result = EmployeeService::new(db)
        .create(params(user.id, branch.id, employee_type.id))
        .await;

    assert!(
        matches!(result, Err(AppError::BadRequest(ref msg)) if msg == "Employee record already exists for this user")
    );

    Ok(())
}

/// Expected: Err(NotFound) naming the user
#[tokio::test]
async fn rejects_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let employee_type = factory::create_employee_type(db).await?;

    let result = EmployeeService::new(db)
        .create(params(999, branch.id, employee_type.id))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(ref msg)) if msg == "User not found"));

    Ok(())
}

/// Expected: Err(NotFound) naming the branch
#[tokio::test]
async fn rejects_unknown_branch() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let employee_type = factory::create_employee_type(db).await?;

    let result = EmployeeService::new(db)
        .create(params(user.id, 999, employee_type.id))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(ref msg)) if msg == "Branch not found"));

    Ok(())
}

/// Expected: Err(NotFound) naming the employee type
#[tokio::test]
async fn rejects_unknown_employee_type() -> Result<(), AppError> {
    let test = TestBuilder::new().with_employee_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let branch = factory::create_branch(db).await?;

    let result = EmployeeService::new(db)
        .create(params(user.id, branch.id, 999))
        .await;

    assert!(
        matches!(result, Err(AppError::NotFound(ref msg)) if msg == "Employee type not found")
    );

    Ok(())
}
