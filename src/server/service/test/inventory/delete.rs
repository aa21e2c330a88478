use super::*;

/// Tests deleting an item with no loan.
///
/// Expected: Ok(Item), then NotFound on lookup
#[tokio::test]
async fn deletes_free_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    let service = InventoryService::new(db);

    let deleted = service.delete(item.id).await?;

    assert_eq!(deleted.id, item.id);
    assert!(matches!(
        service.get_by_id(item.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests deleting collateral for an open loan.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_item_under_open_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, _) = factory::helpers::create_loan_with_dependencies(db).await?;

    let result = InventoryService::new(db).delete(item.id).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg))
            if msg == "Cannot delete item that is associated with an active loan"
    ));

    Ok(())
}

/// Tests deleting an item whose loan was already redeemed.
///
/// The loan row still references the item, so the delete is refused up front.
///
/// Expected: Err(BadRequest("Cannot delete item with 1 loan records"))
#[tokio::test]
async fn rejects_item_with_closed_loan_history() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    factory::loan::LoanFactory::new(db, customer.id, item.id)
        .status(LoanStatus::Completed)
        .build()
        .await?;
    let service = InventoryService::new(db);

    let result = service.delete(item.id).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot delete item with 1 loan records"
    ));
    assert!(service.get_by_id(item.id).await.is_ok());

    Ok(())
}

/// Tests that a pending loan secures its item against deletion.
///
/// Expected: Err(BadRequest) with the open-loan message
#[tokio::test]
async fn rejects_item_under_pending_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let item = factory::create_item(db, branch.id).await?;
    factory::loan::LoanFactory::new(db, customer.id, item.id)
        .status(LoanStatus::Pending)
        .build()
        .await?;

    let result = InventoryService::new(db).delete(item.id).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg))
            if msg == "Cannot delete item that is associated with an active loan"
    ));

    Ok(())
}
