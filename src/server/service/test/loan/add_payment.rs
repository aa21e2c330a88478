use super::*;

/// Tests a partial payment.
///
/// Expected: loan stays active, item stays pawned, payment transaction recorded
#[tokio::test]
async fn partial_payment_keeps_loan_open() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let service = LoanService::new(db);

    let payment = service.add_payment(payment_params(loan.id, 5_000)).await?;
    let loan = service.get_by_id(loan.id).await?;

    assert_eq!(payment.amount, 5_000);
    assert_eq!(loan.status, LoanStatus::Active);
    assert_eq!(loan.remaining_balance(), 6_000);
    assert_eq!(item_status(db, item.id).await?, ItemStatus::Pawned);

    let transactions = ledger(db).await?;
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].transaction_type, TransactionType::Payment);

    Ok(())
}

/// Tests paying the full amount due (principal plus 10% interest).
///
/// Expected: loan completed and item redeemed
#[tokio::test]
async fn full_payment_completes_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let service = LoanService::new(db);

    service.add_payment(payment_params(loan.id, 6_000)).await?;
    service.add_payment(payment_params(loan.id, 5_000)).await?;
    let loan = service.get_by_id(loan.id).await?;

    assert_eq!(loan.status, LoanStatus::Completed);
    assert_eq!(loan.remaining_balance(), 0);
    assert_eq!(item_status(db, item.id).await?, ItemStatus::Redeemed);

    Ok(())
}

/// Tests paying into a closed loan.
///
/// Expected: Err(BadRequest) naming the status
#[tokio::test]
async fn rejects_payment_on_completed_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    let loan = factory::loan::LoanFactory::new(db, customer.id, item.id)
        .status(LoanStatus::Completed)
        .build()
        .await?;

    let result = LoanService::new(db)
        .add_payment(payment_params(loan.id, 1_000))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot add payment to loan with status: completed"
    ));

    Ok(())
}

/// Tests a zero payment.
///
/// Expected: Err(BadRequest), nothing recorded
#[tokio::test]
async fn rejects_zero_payment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;

    let result = LoanService::new(db)
        .add_payment(payment_params(loan.id, 0))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(ledger(db).await?.is_empty());

    Ok(())
}
