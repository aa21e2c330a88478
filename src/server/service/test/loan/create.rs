use super::*;

/// Tests originating a loan with an initial payment.
///
/// Expected: loan created with the payment counted, item pawned, one pawn
/// transaction at the item's branch
#[tokio::test]
async fn creates_loan_and_pawns_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;

    let params = CreateLoanParams {
        initial_payment: Some(2_000),
        ..loan_params(customer.id, item.id)
    };
    let loan = LoanService::new(db).create(params).await?;

    assert!(loan.loan_code.starts_with("L-"));
    assert_eq!(loan.status, LoanStatus::Active);
    assert_eq!(loan.total_paid, 2_000);
    assert_eq!(loan.remaining_balance(), 9_000);
    assert_eq!(item_status(db, item.id).await?, ItemStatus::Pawned);

    let transactions = ledger(db).await?;
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].transaction_type, TransactionType::Pawn);
    assert_eq!(transactions[0].amount, 10_000);
    assert_eq!(transactions[0].branch_id, branch.id);
    assert_eq!(transactions[0].loan_id, Some(loan.id));

    Ok(())
}

/// Tests that sold items cannot secure a loan.
///
/// Expected: Err(BadRequest) naming the item's status, nothing written
#[tokio::test]
async fn rejects_unavailable_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::item::ItemFactory::new(db, branch.id)
        .status(ItemStatus::Sold)
        .build()
        .await?;

    let result = LoanService::new(db)
        .create(loan_params(customer.id, item.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Item is not available for loan, current status: sold"
    ));
    assert!(ledger(db).await?.is_empty());

    Ok(())
}

/// Tests that an item can secure only one open loan.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_item_under_open_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, customer, item, _) = factory::helpers::create_loan_with_dependencies(db).await?;

    let result = LoanService::new(db)
        .create(loan_params(customer.id, item.id))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));

    Ok(())
}

/// Tests origination against a customer that does not exist.
///
/// Expected: Err(NotFound("Customer not found"))
#[tokio::test]
async fn rejects_unknown_customer() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let item = factory::create_item(db, branch.id).await?;

    let result = LoanService::new(db).create(loan_params(9999, item.id)).await;

    assert!(matches!(
        result,
        Err(AppError::NotFound(ref msg)) if msg == "Customer not found"
    ));

    Ok(())
}

/// Tests validation of loan terms.
///
/// Expected: Err(BadRequest) for a zero principal and for a negative rate
#[tokio::test]
async fn rejects_invalid_terms() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    let service = LoanService::new(db);

    let zero_amount = CreateLoanParams {
        loan_amount: 0,
        ..loan_params(customer.id, item.id)
    };
    assert!(matches!(
        service.create(zero_amount).await,
        Err(AppError::BadRequest(_))
    ));

    let negative_rate = CreateLoanParams {
        interest_rate: -1.0,
        ..loan_params(customer.id, item.id)
    };
    assert!(matches!(
        service.create(negative_rate).await,
        Err(AppError::BadRequest(_))
    ));

    Ok(())
}

/// Tests a request that leaves the status and due date to their defaults.
///
/// Expected: loan created as pending, due 30 days after today, item pawned
#[tokio::test]
async fn defaults_new_loan_to_pending() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;

    let params = CreateLoanParams::from_dto(CreateLoanDto {
        customer_id: customer.id,
        item_id: item.id,
        loan_amount: 10_000,
        interest_rate: 10.0,
        term_days: 30,
        start_date: None,
        due_date: None,
        status: None,
        collateral_description: None,
        notes: None,
        initial_payment: None,
        payment_method: None,
    })
    .map_err(AppError::BadRequest)?;
    let loan = LoanService::new(db).create(params).await?;

    assert_eq!(loan.status, LoanStatus::Pending);
    assert_eq!(loan.due_date, today() + Duration::days(30));
    assert_eq!(item_status(db, item.id).await?, ItemStatus::Pawned);

    Ok(())
}

/// Tests that a pending loan already holds the item.
///
/// Expected: Err(BadRequest("Item is already securing an active loan"))
#[tokio::test]
async fn rejects_item_held_by_pending_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    factory::loan::LoanFactory::new(db, customer.id, item.id)
        .status(LoanStatus::Pending)
        .build()
        .await?;

    let result = LoanService::new(db)
        .create(loan_params(customer.id, item.id))
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Item is already securing an active loan"
    ));

    Ok(())
}
