use super::*;

/// Tests removing a payment from an open loan.
///
/// Expected: Ok(Payment) returned, then NotFound on lookup
#[tokio::test]
async fn deletes_payment_on_open_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let payment = factory::create_payment(db, loan.id, 1_000).await?;
    let service = PaymentService::new(db);

    let deleted = service.delete(payment.id).await?;

    assert_eq!(deleted.id, payment.id);
    assert_eq!(deleted.amount, 1_000);
    assert!(matches!(
        service.get_by_id(payment.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests removing a payment from a completed loan.
///
/// Expected: Err(BadRequest), payment kept
#[tokio::test]
async fn rejects_completed_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    let loan = factory::loan::LoanFactory::new(db, customer.id, item.id)
        .status(LoanStatus::Completed)
        .build()
        .await?;
    let payment = factory::create_payment(db, loan.id, 11_000).await?;
    let service = PaymentService::new(db);

    let result = service.delete(payment.id).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg))
            if msg == "Cannot delete payment from a completed or defaulted loan"
    ));
    assert!(service.get_by_id(payment.id).await.is_ok());

    Ok(())
}
