use super::*;

/// Tests completing a loan through a status update.
///
/// Expected: loan completed and its item redeemed
#[tokio::test]
async fn completing_loan_redeems_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, loan) = factory::helpers::create_loan_with_dependencies(db).await?;

    let updated = LoanService::new(db)
        .update(
            loan.id,
            UpdateLoanParams {
                status: Some(LoanStatus::Completed),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.status, LoanStatus::Completed);
    assert_eq!(item_status(db, item.id).await?, ItemStatus::Redeemed);

    Ok(())
}

/// Tests a transition missing from the transition table.
///
/// Expected: Err(BadRequest("Invalid loan status transition from active to pending"))
#[tokio::test]
async fn rejects_invalid_transition() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;

    let result = LoanService::new(db)
        .update(
            loan.id,
            UpdateLoanParams {
                status: Some(LoanStatus::Pending),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg))
            if msg == "Invalid loan status transition from active to pending"
    ));

    Ok(())
}

/// Tests editing a cancelled loan.
///
/// Expected: Err(BadRequest("Cannot update loan with status: cancelled"))
#[tokio::test]
async fn rejects_terminal_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    let loan = factory::loan::LoanFactory::new(db, customer.id, item.id)
        .status(LoanStatus::Cancelled)
        .build()
        .await?;

    let result = LoanService::new(db)
        .update(
            loan.id,
            UpdateLoanParams {
                notes: Some("Reopen".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot update loan with status: cancelled"
    ));

    Ok(())
}
