use super::*;

/// Tests defaulting an active loan with a reason and notes.
///
/// Expected: loan defaulted with the composed note, item defaulted
#[tokio::test]
async fn defaults_open_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let default_date = today() - Duration::days(1);

    let defaulted = LoanService::new(db)
        .default_loan(
            loan.id,
            DefaultLoanDto {
                default_date: Some(default_date),
                reason: Some("No contact".to_string()),
                notes: Some("Final notice sent".to_string()),
            },
        )
        .await?;

    assert_eq!(defaulted.status, LoanStatus::Defaulted);
    assert_eq!(
        defaulted.notes,
        Some(format!(
            "Defaulted on {}, Reason: No contact, Notes: Final notice sent",
            default_date
        ))
    );
    assert_eq!(item_status(db, item.id).await?, ItemStatus::Defaulted);

    Ok(())
}

/// Tests defaulting a pending loan.
///
/// Expected: Err(BadRequest("Cannot default loan with status: pending"))
#[tokio::test]
async fn rejects_pending_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    let loan = factory::loan::LoanFactory::new(db, customer.id, item.id)
        .status(LoanStatus::Pending)
        .build()
        .await?;

    let result = LoanService::new(db)
        .default_loan(loan.id, DefaultLoanDto::default())
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot default loan with status: pending"
    ));

    Ok(())
}
