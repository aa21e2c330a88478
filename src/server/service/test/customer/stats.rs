use super::*;

/// Tests customer counts and the ranking by loan count and amount.
///
/// Expected: counts per loan status, rankings ordered highest first
#[tokio::test]
async fn ranks_customers_by_loans() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let frequent = factory::create_customer(db).await?;
    let big = factory::create_customer(db).await?;
    factory::customer::CustomerFactory::new(db)
        .is_active(false)
        .build()
        .await?;

    for status in [LoanStatus::Active, LoanStatus::Completed] {
        let item = factory::create_item(db, branch.id).await?;
        factory::loan::LoanFactory::new(db, frequent.id, item.id)
            .status(status)
            .loan_amount(5_000)
            .build()
            .await?;
    }
    let item = factory::create_item(db, branch.id).await?;
    factory::loan::LoanFactory::new(db, big.id, item.id)
        .status(LoanStatus::Defaulted)
        .loan_amount(50_000)
        .build()
        .await?;

    let stats = CustomerService::new(db).stats().await?;

    assert_eq!(stats.total_customers, 3);
    assert_eq!(stats.active_customers, 2);
    assert_eq!(stats.inactive_customers, 1);
    assert_eq!(stats.customers_with_active_loans, 1);
    assert_eq!(stats.customers_with_completed_loans, 1);
    assert_eq!(stats.customers_with_defaulted_loans, 1);
    assert_eq!(stats.new_customers_this_month, 3);

    assert_eq!(stats.top_customers_by_loan_count.len(), 2);
    assert_eq!(stats.top_customers_by_loan_count[0].customer_id, frequent.id);
    assert_eq!(stats.top_customers_by_loan_count[0].loan_count, 2);
    assert_eq!(stats.top_customers_by_loan_amount[0].customer_id, big.id);
    assert_eq!(stats.top_customers_by_loan_amount[0].total_loan_amount, 50_000);

    Ok(())
}
