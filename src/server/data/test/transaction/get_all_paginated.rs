use super::*;

/// Tests filtering transactions by type and status.
///
/// Expected: Ok with only the completed sale
#[tokio::test]
async fn filters_by_type_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let sale = factory::create_transaction(db, branch.id).await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .status(TransactionStatus::Cancelled)
        .build()
        .await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .transaction_type(TransactionType::Payment)
        .build()
        .await?;

    let filter = TransactionFilter {
        transaction_type: Some(TransactionType::Sale),
        status: Some(TransactionStatus::Completed),
        ..Default::default()
    };
    let (transactions, total) = TransactionRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(transactions[0].id, sale.id);

    Ok(())
}

/// Tests the amount range filter.
///
/// Expected: Ok with only the transaction above the minimum
#[tokio::test]
async fn filters_by_amount_range() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(500)
        .build()
        .await?;
    let large = factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(90_000)
        .build()
        .await?;

    let filter = TransactionFilter {
        min_amount: Some(1_000),
        ..Default::default()
    };
    let (transactions, total) = TransactionRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(transactions[0].id, large.id);

    Ok(())
}
