use super::*;

/// Tests that a created employee is returned with its related names.
///
/// Expected: Ok(EmployeeDetails) carrying the user's username, branch and type names
#[tokio::test]
async fn returns_details_with_related_names() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_employee_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let branch = factory::branch::BranchFactory::new(db)
        .name("Downtown")
        .build()
        .await?;
    let employee_type = factory::employee_type::create_employee_type_named(db, "Appraiser").await?;

    let employee = EmployeeRepository::new(db)
        .create(CreateEmployeeParams {
            user_id: user.id,
            branch_id: branch.id,
            employee_type_id: employee_type.id,
            hire_date: None,
        })
        .await?;

    assert_eq!(employee.username, user.username);
    assert_eq!(employee.branch_name, "Downtown");
    assert_eq!(employee.employee_type_name, "Appraiser");
    assert!(employee.is_active);

    Ok(())
}
