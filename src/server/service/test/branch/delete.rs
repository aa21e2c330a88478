use super::*;

/// Tests deleting an unused branch.
///
/// Expected: Ok(()), then NotFound on lookup
#[tokio::test]
async fn deletes_unused_branch() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let service = BranchService::new(db);

    service.delete(branch.id).await?;

    assert!(matches!(
        service.get_by_id(branch.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests deleting a branch that still holds inventory.
///
/// Expected: Err(BadRequest) naming the item count
#[tokio::test]
async fn rejects_branch_with_items() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    factory::create_item(db, branch.id).await?;
    factory::create_item(db, branch.id).await?;

    let result = BranchService::new(db).delete(branch.id).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot delete branch with 2 items"
    ));

    Ok(())
}

/// Tests deleting a branch that does not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_unknown_branch() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = BranchService::new(db).delete(999).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests deleting a branch whose only dependents are loan applications.
///
/// Expected: Err(BadRequest) naming the application count
#[tokio::test]
async fn rejects_branch_with_applications() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    factory::create_application(db, customer.id, branch.id).await?;
    let service = BranchService::new(db);

    let result = service.delete(branch.id).await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg)) if msg == "Cannot delete branch with 1 applications"
    ));
    assert!(service.get_by_id(branch.id).await.is_ok());

    Ok(())
}
