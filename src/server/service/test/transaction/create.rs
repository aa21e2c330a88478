use super::*;

/// Tests recording a sale.
///
/// Expected: Ok(Transaction) with a generated code
#[tokio::test]
async fn records_transaction() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;

    let transaction = TransactionService::new(db)
        .create(sale_params(branch.id, 4_500))
        .await?;

    assert!(transaction.transaction_code.starts_with("T-"));
    assert_eq!(transaction.amount, 4_500);
    assert_eq!(transaction.status, TransactionStatus::Pending);

    Ok(())
}

/// Tests recording a zero amount.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_non_positive_amount() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;

    let result = TransactionService::new(db)
        .create(sale_params(branch.id, 0))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Transaction amount must be greater than zero"
    ));

    Ok(())
}

/// Tests recording against a missing item or branch.
///
/// Expected: Err(NotFound) naming the missing record
#[tokio::test]
async fn rejects_unknown_references() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let service = TransactionService::new(db);

    let unknown_item = service
        .create(CreateTransactionParams {
            item_id: Some(999),
            ..sale_params(branch.id, 100)
        })
        .await;
    assert!(matches!(
        unknown_item,
        Err(AppError::NotFound(ref msg)) if msg == "Item not found"
    ));

    let unknown_branch = service.create(sale_params(999, 100)).await;
    assert!(matches!(
        unknown_branch,
        Err(AppError::NotFound(ref msg)) if msg == "Branch not found"
    ));

    Ok(())
}
