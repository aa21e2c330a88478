use super::*;

/// Tests the headline dashboard figures.
///
/// Expected: loan, sales and stock figures plus one entry per day in the window
#[tokio::test]
async fn summarises_shop() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (branch, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    factory::item::ItemFactory::new(db, branch.id)
        .status(ItemStatus::Sold)
        .build()
        .await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(12_000)
        .build()
        .await?;
    factory::transaction::TransactionFactory::new(db, branch.id)
        .transaction_type(TransactionType::Pawn)
        .loan_id(Some(loan.id))
        .amount(loan.loan_amount)
        .build()
        .await?;

    let dashboard = ReportService::new(db).dashboard(7).await?;

    assert_eq!(dashboard.total_loans, 1);
    assert_eq!(dashboard.active_loans, 1);
    assert_eq!(dashboard.overdue_loans, 0);
    assert_eq!(dashboard.total_loan_amount, 10_000);
    assert_eq!(dashboard.total_sales, 12_000);
    assert_eq!(dashboard.sales_today, 12_000);
    assert_eq!(dashboard.total_inventory_value, 50_000);
    assert_eq!(dashboard.total_customers, 1);

    assert_eq!(dashboard.revenue_by_day.len(), 7);
    assert_eq!(dashboard.revenue_by_day.last().map(|d| d.amount), Some(22_000));
    assert_eq!(
        dashboard.loan_applications_by_day.last().map(|d| d.count),
        Some(1)
    );

    Ok(())
}

/// Tests the dashboard window bounds.
///
/// Expected: Err(BadRequest) outside 1 to 365 days
#[tokio::test]
async fn rejects_window_out_of_bounds() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = ReportService::new(db);

    assert!(matches!(service.dashboard(0).await, Err(AppError::BadRequest(_))));
    assert!(matches!(service.dashboard(366).await, Err(AppError::BadRequest(_))));

    Ok(())
}
