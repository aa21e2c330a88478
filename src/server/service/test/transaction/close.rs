use super::*;

/// Tests cancelling a pending transaction with a reason.
///
/// Expected: cancelled, dated reason appended to the notes
#[tokio::test]
async fn cancel_appends_reason() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let service = TransactionService::new(db);
    let transaction = service.create(sale_params(branch.id, 2_000)).await?;

    let cancelled = service
        .cancel(transaction.id, Some("customer changed mind".to_string()))
        .await?;

    assert_eq!(cancelled.status, TransactionStatus::Cancelled);
    assert_eq!(
        cancelled.notes,
        Some(format!("Cancelled on {}: customer changed mind", today()))
    );

    Ok(())
}

/// Tests completing a pending transaction without notes.
///
/// Expected: completed, dated line without a colon
#[tokio::test]
async fn complete_without_notes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let service = TransactionService::new(db);
    let transaction = service.create(sale_params(branch.id, 2_000)).await?;

    let completed = service.complete(transaction.id, None).await?;

    assert_eq!(completed.status, TransactionStatus::Completed);
    assert_eq!(completed.notes, Some(format!("Completed on {}", today())));

    Ok(())
}

/// Tests changing a transaction that is already completed.
///
/// Expected: Err(BadRequest) for update, cancel and complete
#[tokio::test]
async fn completed_transaction_is_final() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let transaction = factory::create_transaction(db, branch.id).await?;
    let service = TransactionService::new(db);

    let updated = service
        .update(
            transaction.id,
            UpdateTransactionParams {
                amount: Some(500),
                ..Default::default()
            },
        )
        .await;
    let cancelled = service.cancel(transaction.id, None).await;
    let completed = service.complete(transaction.id, None).await;

    for result in [updated, cancelled, completed] {
        assert!(matches!(
            result,
            Err(AppError::BadRequest(ref msg))
                if msg == "Cannot update transaction with status: completed"
        ));
    }

    Ok(())
}
