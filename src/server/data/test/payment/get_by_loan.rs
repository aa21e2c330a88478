use super::*;

/// Tests listing a loan's payments.
///
/// Expected: Ok with the loan's two payments, newest first, and none from other loans
#[tokio::test]
async fn lists_payments_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let (_, _, _, other_loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let first = factory::create_payment(db, loan.id, 1_000).await?;
    let second = factory::create_payment(db, loan.id, 2_000).await?;
    factory::create_payment(db, other_loan.id, 500).await?;

    let payments = PaymentRepository::new(db).get_by_loan(loan.id).await?;

    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0].id, second.id);
    assert_eq!(payments[1].id, first.id);

    Ok(())
}
