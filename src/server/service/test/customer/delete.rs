use super::*;

/// Tests deactivating a customer without open loans.
///
/// Expected: Ok(Customer) inactive, row still present
#[tokio::test]
async fn deactivates_customer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let service = CustomerService::new(db);

    let deleted = service.delete(customer.id).await?;
    assert!(!deleted.is_active);

    let stored = service.get_by_id(customer.id).await?;
    assert!(!stored.is_active);

    Ok(())
}

/// Tests deactivating a customer who still owes on a loan.
///
/// Expected: Err(BadRequest) with the open loan count
#[tokio::test]
async fn rejects_customer_with_open_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, customer, _, _) = factory::helpers::create_loan_with_dependencies(db).await?;

    let result = CustomerService::new(db).delete(customer.id).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot delete customer with 1 active loans"
    ));

    Ok(())
}
