use super::*;

/// Tests the sales CSV export.
///
/// Expected: dated filename, header row and N/A for missing references
#[tokio::test]
async fn exports_sales_csv() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::branch::BranchFactory::new(db)
        .name("Uptown")
        .build()
        .await?;
    let sale = factory::transaction::TransactionFactory::new(db, branch.id)
        .amount(12_345)
        .build()
        .await?;

    let range = default_range();
    let export = ReportService::new(db).export_sales(range).await?;

    assert_eq!(
        export.filename,
        format!("sales_report_{}_{}.csv", range.start_date, range.end_date)
    );

    let mut lines = export.body.lines();
    assert_eq!(
        lines.next(),
        Some("Transaction ID,Transaction Number,Date,Amount,Branch,Customer,Item,Category")
    );
    assert_eq!(
        lines.next(),
        Some(
            format!(
                "{},{},{},123.45,Uptown,N/A,N/A,N/A",
                sale.id,
                sale.transaction_code,
                sale.transaction_date.date_naive()
            )
            .as_str()
        )
    );

    Ok(())
}

/// Tests the loan CSV export.
///
/// Expected: one row per loan with the item's branch and the customer's name
#[tokio::test]
async fn exports_loans_csv() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (branch, customer, item, loan) =
        factory::helpers::create_loan_with_dependencies(db).await?;

    let export = ReportService::new(db).export_loans(default_range()).await?;

    assert!(export.filename.starts_with("loan_report_"));

    let lines: Vec<&str> = export.body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Loan ID,Loan Code,Created Date"));
    assert!(lines[1].starts_with(&format!("{},{},", loan.id, loan.loan_code)));
    assert!(lines[1].contains(",100.00,10,active,"));
    assert!(lines[1].ends_with(&format!(
        "{},{} {},{},jewelry",
        branch.name, customer.first_name, customer.last_name, item.name
    )));

    Ok(())
}
