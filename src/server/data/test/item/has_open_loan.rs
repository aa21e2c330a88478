use super::*;

/// Tests an item secured by an active loan.
///
/// Expected: Ok(true)
#[tokio::test]
async fn true_for_active_loan() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, _) = factory::helpers::create_loan_with_dependencies(db).await?;

    assert!(ItemRepository::new(db).has_open_loan(item.id).await?);

    Ok(())
}

/// Tests an item whose only loan is completed.
///
/// Expected: Ok(false)
#[tokio::test]
async fn false_for_completed_loan() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    factory::loan::LoanFactory::new(db, customer.id, item.id)
        .status(LoanStatus::Completed)
        .build()
        .await?;

    assert!(!ItemRepository::new(db).has_open_loan(item.id).await?);

    Ok(())
}
