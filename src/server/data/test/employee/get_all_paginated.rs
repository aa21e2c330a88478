use super::*;

/// Tests searching employees by their user's username.
///
/// Expected: Ok with only the matching employee
#[tokio::test]
async fn searches_linked_user_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_employee_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let employee_type = factory::create_employee_type(db).await?;
    let appraiser = factory::user::UserFactory::new(db)
        .username("appraiser_kim")
        .build()
        .await?;
    let cashier = factory::create_user(db).await?;
    factory::create_employee(db, appraiser.id, branch.id, employee_type.id).await?;
    factory::create_employee(db, cashier.id, branch.id, employee_type.id).await?;

    let filter = EmployeeFilter {
        search_term: Some("kim".to_string()),
        ..Default::default()
    };
    let (employees, total) = EmployeeRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(employees[0].user_id, appraiser.id);

    Ok(())
}

/// Tests filtering employees by the activity flag of their user.
///
/// Expected: Ok with only the inactive employee
#[tokio::test]
async fn filters_by_user_active_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_employee_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let employee_type = factory::create_employee_type(db).await?;
    let active = factory::create_user(db).await?;
    let inactive = factory::user::UserFactory::new(db)
        .is_active(false)
        .build()
        .await?;
    factory::create_employee(db, active.id, branch.id, employee_type.id).await?;
    factory::create_employee(db, inactive.id, branch.id, employee_type.id).await?;

    let filter = EmployeeFilter {
        is_active: Some(false),
        ..Default::default()
    };
    let (employees, total) = EmployeeRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(employees[0].user_id, inactive.id);
    assert!(!employees[0].is_active);

    Ok(())
}
