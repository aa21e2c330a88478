use super::*;

/// Tests setting an item's status with new notes.
///
/// Expected: Ok(Some(Item)) with the new status and notes
#[tokio::test]
async fn sets_status_and_notes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let item = factory::create_item(db, branch.id).await?;

    let updated = ItemRepository::new(db)
        .set_status(item.id, ItemStatus::Sold, Some("Sold at counter".to_string()))
        .await?
        .unwrap();

    assert_eq!(updated.status, ItemStatus::Sold);
    assert_eq!(updated.notes.as_deref(), Some("Sold at counter"));

    Ok(())
}

/// Tests that notes are kept when none are given.
///
/// Expected: Ok(Some(Item)) with the original notes
#[tokio::test]
async fn keeps_notes_when_not_given() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let item = factory::create_item(db, branch.id).await?;

    let updated = ItemRepository::new(db)
        .set_status(item.id, ItemStatus::Damaged, None)
        .await?
        .unwrap();

    assert_eq!(updated.status, ItemStatus::Damaged);
    assert_eq!(updated.notes, item.notes);

    Ok(())
}
