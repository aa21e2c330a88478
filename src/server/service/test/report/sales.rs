use super::*;

/// Tests the sales report over completed sales only.
///
/// Expected: totals, per-method and per-branch breakdowns and top items
#[tokio::test]
async fn totals_completed_sales() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::branch::BranchFactory::new(db)
        .name("Downtown")
        .build()
        .await?;
    let item = factory::item::ItemFactory::new(db, branch.id)
        .name("Guitar")
        .status(ItemStatus::Sold)
        .build()
        .await?;

    factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(30_000)
        .item_id(Some(item.id))
        .build()
        .await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(10_000)
        .payment_method(PaymentMethod::CreditCard)
        .build()
        .await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(70_000)
        .status(TransactionStatus::Pending)
        .build()
        .await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(5_000)
        .transaction_type(TransactionType::Payment)
        .build()
        .await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(8_000)
        .transaction_date(Utc::now() - Duration::days(90))
        .build()
        .await?;

    let report = ReportService::new(db).sales(default_range()).await?;

    assert_eq!(report.total_sales, 40_000);
    assert_eq!(report.transaction_count, 2);
    assert_eq!(report.average_sale, 20_000.0);
    assert_eq!(report.sales_by_date.len(), 1);
    assert_eq!(report.sales_by_payment_method.get("cash").map(|m| m.amount), Some(30_000));
    assert_eq!(
        report.sales_by_payment_method.get("credit_card").map(|m| m.count),
        Some(1)
    );
    assert_eq!(report.sales_by_branch.len(), 1);
    assert_eq!(report.sales_by_branch[0].branch_name, "Downtown");
    assert_eq!(report.top_items.len(), 1);
    assert_eq!(report.top_items[0].item_name, "Guitar");

    Ok(())
}

/// Tests the loan report for a branch.
///
/// Expected: only loans whose item sits at that branch
#[tokio::test]
async fn loans_follow_item_branch() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (branch, customer, _, _) = factory::helpers::create_loan_with_dependencies(db).await?;
    let other_branch = factory::create_branch(db).await?;
    let other_item = factory::create_item(db, other_branch.id).await?;
    factory::loan::LoanFactory::new(db, customer.id, other_item.id)
        .status(LoanStatus::Completed)
        .loan_amount(40_000)
        .build()
        .await?;

    let service = ReportService::new(db);

    let all = service.loans(default_range()).await?;
    assert_eq!(all.total_loans, 2);
    assert_eq!(all.total_amount, 50_000);
    assert_eq!(all.loans_by_branch.len(), 2);

    let scoped = service
        .loans(ReportRange {
            branch_id: Some(branch.id),
            ..default_range()
        })
        .await?;
    assert_eq!(scoped.total_loans, 1);
    assert_eq!(scoped.total_amount, 10_000);
    assert_eq!(scoped.by_status.get("active").map(|s| s.count), Some(1));
    assert_eq!(scoped.average_term_days, 30.0);

    Ok(())
}
