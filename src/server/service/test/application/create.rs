use super::*;

/// Tests filing an application.
///
/// Expected: pending application with an APP- number
#[tokio::test]
async fn files_pending_application() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;

    let application = ApplicationService::new(db)
        .create(application_params(customer.id, branch.id))
        .await?;

    assert!(application.application_number.starts_with("APP-"));
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.processed_by_id, None);

    Ok(())
}

/// Tests the amount and term validation.
///
/// Expected: Err(BadRequest) with the matching message for each case
#[tokio::test]
async fn rejects_invalid_amounts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let service = ApplicationService::new(db);
    let base = application_params(customer.id, branch.id);

    let cases = [
        (
            CreateApplicationParams {
                loan_amount: 0,
                ..base.clone()
            },
            "Estimated value and loan amount must be greater than zero",
        ),
        (
            CreateApplicationParams {
                loan_amount: 70_000,
                ..base.clone()
            },
            "Loan amount cannot exceed the estimated value",
        ),
        (
            CreateApplicationParams {
                interest_rate: -1.0,
                ..base.clone()
            },
            "Interest rate cannot be negative",
        ),
        (
            CreateApplicationParams {
                term_months: 61,
                ..base.clone()
            },
            "Term months must be between 1 and 60",
        ),
    ];

    for (params, expected) in cases {
        let result = service.create(params).await;
        assert!(
            matches!(result, Err(AppError::BadRequest(ref msg)) if msg == expected),
            "expected {expected}"
        );
    }

    Ok(())
}

/// Tests filing for a customer that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_unknown_customer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;

    let result = ApplicationService::new(db)
        .create(application_params(999, branch.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::NotFound(ref msg)) if msg == "Customer not found"
    ));

    Ok(())
}
