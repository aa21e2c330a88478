use super::*;

/// Tests inventory totals grouped by status and category.
///
/// Expected: counts per wire value, value totals in cents
#[tokio::test]
async fn groups_items() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    factory::item::ItemFactory::new(db, branch.id)
        .category(ItemCategory::Jewelry)
        .appraisal_value(10_000)
        .build()
        .await?;
    factory::item::ItemFactory::new(db, branch.id)
        .category(ItemCategory::Electronics)
        .status(ItemStatus::Sold)
        .appraisal_value(30_000)
        .build()
        .await?;

    let stats = InventoryService::new(db).stats().await?;

    assert_eq!(stats.total_items, 2);
    assert_eq!(stats.total_inventory_value, 40_000);
    assert_eq!(stats.avg_item_value, 20_000.0);
    assert_eq!(stats.items_by_status.get("for_sale"), Some(&1));
    assert_eq!(stats.items_by_status.get("sold"), Some(&1));
    assert_eq!(stats.items_by_category.get("jewelry"), Some(&1));
    assert_eq!(stats.items_added_this_month, 2);
    assert_eq!(stats.items_sold_this_month, 1);

    Ok(())
}
