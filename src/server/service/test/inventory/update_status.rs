use super::*;

/// Tests a status change with notes.
///
/// Expected: status updated and the change recorded in the notes
#[tokio::test]
async fn records_status_change_in_notes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let item = factory::create_item(db, branch.id).await?;

    let updated = InventoryService::new(db)
        .update_status(item.id, ItemStatus::Damaged, Some("dropped".to_string()))
        .await?;

    assert_eq!(updated.status, ItemStatus::Damaged);
    assert_eq!(
        updated.notes.as_deref(),
        Some("Status changed to damaged: dropped")
    );

    Ok(())
}

/// Tests a status change without notes.
///
/// Expected: status updated, notes untouched
#[tokio::test]
async fn leaves_notes_without_text() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let item = factory::create_item(db, branch.id).await?;

    let updated = InventoryService::new(db)
        .update_status(item.id, ItemStatus::Sold, None)
        .await?;

    assert_eq!(updated.status, ItemStatus::Sold);
    assert_eq!(updated.notes, item.notes);

    Ok(())
}

/// Tests changing the status of a pawned item securing an open loan.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn rejects_change_under_open_loan() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, item, _) = factory::helpers::create_loan_with_dependencies(db).await?;

    let result = InventoryService::new(db)
        .update_status(item.id, ItemStatus::Lost, None)
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if msg == STATUS_LOCKED));

    Ok(())
}
