use super::*;

/// Tests status counts and averages.
///
/// Expected: one count per status, averages over every application
#[tokio::test]
async fn summarises_applications() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    factory::application::ApplicationFactory::new(db, customer.id, branch.id)
        .loan_amount(20_000)
        .build()
        .await?;
    factory::application::ApplicationFactory::new(db, customer.id, branch.id)
        .status(ApplicationStatus::Approved)
        .loan_amount(60_000)
        .build()
        .await?;

    let stats = ApplicationService::new(db).stats().await?;

    assert_eq!(stats.total_applications, 2);
    assert_eq!(stats.pending_count, 1);
    assert_eq!(stats.approved_count, 1);
    assert_eq!(stats.rejected_count, 0);
    assert_eq!(stats.total_value, 200_000);
    assert_eq!(stats.total_loan_amount, 80_000);
    assert_eq!(stats.average_loan_amount, 40_000.0);

    Ok(())
}

/// Tests the daily trend series and its bounds.
///
/// Expected: today's applications in one bucket; 0 and 366 days rejected
#[tokio::test]
async fn trends_group_by_day() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    factory::create_application(db, customer.id, branch.id).await?;
    factory::create_application(db, customer.id, branch.id).await?;
    let service = ApplicationService::new(db);

    let trends = service.trends(7).await?;
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].count, 2);
    assert_eq!(trends[0].total_loan_amount, 160_000);

    for days in [0, 366] {
        let result = service.trends(days).await;
        assert!(matches!(
            result,
            Err(AppError::BadRequest(ref msg)) if msg == "Days must be between 1 and 365"
        ));
    }

    Ok(())
}
