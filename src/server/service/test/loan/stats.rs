use super::*;

/// Tests portfolio figures over an active, an overdue and a repaid loan.
///
/// Expected: counts by status, one overdue loan, interest earned only from the
/// completed loan's payments above principal
#[tokio::test]
async fn summarises_portfolio() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let items = [
        factory::create_item(db, branch.id).await?,
        factory::create_item(db, branch.id).await?,
        factory::create_item(db, branch.id).await?,
    ];

    factory::create_loan(db, customer.id, items[0].id).await?;
    factory::loan::LoanFactory::new(db, customer.id, items[1].id)
        .due_date(today() - Duration::days(2))
        .build()
        .await?;
    let repaid = factory::loan::LoanFactory::new(db, customer.id, items[2].id)
        .status(LoanStatus::Completed)
        .build()
        .await?;
    factory::create_payment(db, repaid.id, 11_000).await?;

    let stats = LoanService::new(db).stats().await?;

    assert_eq!(stats.total_loans, 3);
    assert_eq!(stats.active_loans, 2);
    assert_eq!(stats.completed_loans, 1);
    assert_eq!(stats.overdue_loans, 1);
    assert_eq!(stats.total_loan_amount, 30_000);
    assert_eq!(stats.total_interest_earned, 1_000);
    assert_eq!(stats.avg_loan_amount, 10_000.0);
    assert_eq!(stats.loans_by_status.get("active"), Some(&2));
    assert_eq!(stats.loans_by_month.len(), 12);
    assert_eq!(stats.loans_by_month[11].count, 3);

    Ok(())
}
