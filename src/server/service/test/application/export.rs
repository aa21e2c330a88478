use super::*;

/// Tests the CSV rendering of applications.
///
/// Expected: header row, then one row per application with amounts in dollars
#[tokio::test]
async fn renders_csv_rows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let application = ApplicationService::new(db)
        .create(application_params(customer.id, branch.id))
        .await?;

    let csv = applications_csv(&[application.clone()])?;
    let mut lines = csv.lines();

    let header = lines.next().unwrap_or_default();
    assert!(header.starts_with("Application Number,Customer ID,Branch ID"));
    assert_eq!(header.split(',').count(), 15);

    let row = lines.next().unwrap_or_default();
    assert!(row.starts_with(&application.application_number));
    assert!(row.contains(",watches,Steel chronograph,600.00,400.00,12.5,3,pending,"));
    assert!(lines.next().is_none());

    Ok(())
}
