use super::*;

/// Tests that only open loans are counted.
///
/// Creates one active and one completed loan for the customer.
///
/// Expected: Ok(1)
#[tokio::test]
async fn counts_only_open_loans() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (branch, customer, _, _) = factory::helpers::create_loan_with_dependencies(db).await?;
    let other_item = factory::create_item(db, branch.id).await?;
    factory::loan::LoanFactory::new(db, customer.id, other_item.id)
        .status(LoanStatus::Completed)
        .build()
        .await?;

    let count = CustomerRepository::new(db)
        .count_open_loans(customer.id)
        .await?;

    assert_eq!(count, 1);

    Ok(())
}
