use super::*;

fn item_params(branch_id: i32, customer_id: Option<i32>) -> CreateItemParams {
    CreateItemParams {
        name: "Gold ring".to_string(),
        description: None,
        category: ItemCategory::Jewelry,
        status: ItemStatus::ForSale,
        serial_number: None,
        appraisal_value: 25_000,
        selling_price: Some(30_000),
        condition: Some("good".to_string()),
        notes: None,
        customer_id,
        branch_id,
    }
}

/// Tests adding an item to a branch's inventory.
///
/// Expected: Ok(Item) with a generated code
#[tokio::test]
async fn creates_item_with_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;

    let item = InventoryService::new(db)
        .create(item_params(branch.id, None))
        .await?;

    assert!(item.item_code.starts_with("I-"));
    assert_eq!(item.branch_id, branch.id);
    assert_eq!(item.appraisal_value, 25_000);

    Ok(())
}

/// Tests adding an item for a branch or customer that does not exist.
///
/// Expected: Err(NotFound) naming the missing record
#[tokio::test]
async fn rejects_unknown_references() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let service = InventoryService::new(db);

    let unknown_branch = service.create(item_params(999, None)).await;
    assert!(matches!(
        unknown_branch,
        Err(AppError::NotFound(ref msg)) if msg == "Branch not found"
    ));

    let unknown_customer = service.create(item_params(branch.id, Some(999))).await;
    assert!(matches!(
        unknown_customer,
        Err(AppError::NotFound(ref msg)) if msg == "Customer not found"
    ));

    Ok(())
}

/// Tests editing the status of an item that secures an open loan.
///
/// Expected: Err(BadRequest); other fields may still change
#[tokio::test]
async fn update_locks_status_under_open_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, _) = factory::helpers::create_loan_with_dependencies(db).await?;
    let service = InventoryService::new(db);

    let result = service
        .update(
            item.id,
            UpdateItemParams {
                status: Some(ItemStatus::ForSale),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if msg == STATUS_LOCKED));

    let renamed = service
        .update(
            item.id,
            UpdateItemParams {
                name: Some("Engraved ring".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(renamed.name, "Engraved ring");
    assert_eq!(renamed.status, ItemStatus::Pawned);

    Ok(())
}
