use crate::server::{error::AppError, service::collateral::CollateralService};
use test_utils::{builder::TestBuilder, factory};

/// Tests looking up collateral from either side.
///
/// Expected: the same loan and item pair by loan id and by item id
#[tokio::test]
async fn pairs_loan_with_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let service = CollateralService::new(db);

    let (by_loan, by_loan_item) = service.for_loan(loan.id).await?;
    let (by_item, by_item_item) = service.for_item(item.id).await?;

    assert_eq!(by_loan.id, loan.id);
    assert_eq!(by_loan_item.id, item.id);
    assert_eq!(by_item.id, loan.id);
    assert_eq!(by_item_item.id, item.id);

    Ok(())
}

/// Tests looking up collateral for an item never pawned.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn rejects_item_without_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let item = factory::create_item(db, branch.id).await?;

    let result = CollateralService::new(db).for_item(item.id).await;

    assert!(matches!(
        result,
        Err(AppError::NotFound(ref msg)) if msg == "No loan found for this item"
    ));

    Ok(())
}
