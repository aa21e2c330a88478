use super::*;

/// Tests searching branches by city.
///
/// Expected: Ok with only the branch in the matching city
#[tokio::test]
async fn searches_name_and_city() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_employee_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::branch::BranchFactory::new(db)
        .name("Downtown")
        .city(Some("Springfield".to_string()))
        .build()
        .await?;
    factory::branch::BranchFactory::new(db)
        .name("Harbor")
        .city(Some("Shelbyville".to_string()))
        .build()
        .await?;

    let filter = BranchFilter {
        search: Some("Spring".to_string()),
        ..Default::default()
    };
    let (branches, total) = BranchRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(branches[0].name, "Downtown");

    Ok(())
}

/// Tests filtering out inactive branches.
///
/// Expected: Ok with only the active branch
#[tokio::test]
async fn filters_by_active_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_employee_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::branch::BranchFactory::new(db)
        .name("Open")
        .build()
        .await?;
    factory::branch::BranchFactory::new(db)
        .name("Closed")
        .is_active(false)
        .build()
        .await?;

    let filter = BranchFilter {
        is_active: Some(true),
        ..Default::default()
    };
    let (branches, total) = BranchRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(branches[0].name, "Open");

    Ok(())
}
