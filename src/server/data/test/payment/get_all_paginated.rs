use super::*;

/// Tests the loan filter on the payment listing.
///
/// Expected: Ok with total 1 when filtered, 2 when not
#[tokio::test]
async fn filters_by_loan() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let (_, _, _, other_loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    factory::create_payment(db, loan.id, 1_000).await?;
    factory::create_payment(db, other_loan.id, 500).await?;

    let repo = PaymentRepository::new(db);
    let (payments, filtered_total) = repo.get_all_paginated(Some(loan.id), 0, 10).await?;
    let (_, total) = repo.get_all_paginated(None, 0, 10).await?;

    assert_eq!(filtered_total, 1);
    assert_eq!(payments[0].loan_id, loan.id);
    assert_eq!(total, 2);

    Ok(())
}
