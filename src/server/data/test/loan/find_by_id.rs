use super::*;

/// Tests that a loan is returned with the sum of its payments.
///
/// Expected: Ok(Some(Loan)) with total_paid 3_000 and remaining balance 8_000
#[tokio::test]
async fn sums_payments_into_total_paid() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    factory::create_payment(db, loan.id, 1_000).await?;
    factory::create_payment(db, loan.id, 2_000).await?;

    let found = LoanRepository::new(db).find_by_id(loan.id).await?.unwrap();

    assert_eq!(found.total_paid, 3_000);
    assert_eq!(found.remaining_balance(), 8_000);

    Ok(())
}
