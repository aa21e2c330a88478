use super::*;

/// Tests sorting applications by estimated value ascending.
///
/// Expected: Ok with values in ascending order
#[tokio::test]
async fn sorts_by_requested_field() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let branch = factory::create_branch(db).await?;
    for value in [300_000, 100_000, 200_000] {
        factory::application::ApplicationFactory::new(db, customer.id, branch.id)
            .estimated_value(value)
            .loan_amount(value / 2)
            .build()
            .await?;
    }

    let filter = ApplicationFilter {
        sort_by: ApplicationSortField::EstimatedValue,
        ascending: true,
        ..Default::default()
    };
    let (applications, total) = ApplicationRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    let values: Vec<i64> = applications.iter().map(|a| a.estimated_value).collect();
    assert_eq!(total, 3);
    assert_eq!(values, vec![100_000, 200_000, 300_000]);

    Ok(())
}

/// Tests filtering applications by status.
///
/// Expected: Ok with only the approved application
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let branch = factory::create_branch(db).await?;
    factory::create_application(db, customer.id, branch.id).await?;
    let approved = factory::application::ApplicationFactory::new(db, customer.id, branch.id)
        .status(ApplicationStatus::Approved)
        .build()
        .await?;

    let filter = ApplicationFilter {
        status: Some(ApplicationStatus::Approved),
        ..Default::default()
    };
    let (applications, total) = ApplicationRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(applications[0].id, approved.id);

    Ok(())
}
