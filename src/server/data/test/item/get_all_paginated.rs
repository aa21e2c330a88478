use super::*;

/// Tests combining category and value-range filters.
///
/// Expected: Ok with only the jewelry item inside the range
#[tokio::test]
async fn filters_by_category_and_value_range() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    factory::item::ItemFactory::new(db, branch.id)
        .name("Gold ring")
        .category(ItemCategory::Jewelry)
        .appraisal_value(30_000)
        .build()
        .await?;
    factory::item::ItemFactory::new(db, branch.id)
        .name("Diamond necklace")
        .category(ItemCategory::Jewelry)
        .appraisal_value(500_000)
        .build()
        .await?;
    factory::item::ItemFactory::new(db, branch.id)
        .name("Guitar")
        .category(ItemCategory::MusicalInstruments)
        .appraisal_value(30_000)
        .build()
        .await?;

    let filter = ItemFilter {
        category: Some(ItemCategory::Jewelry),
        max_value: Some(100_000),
        ..Default::default()
    };
    let (items, total) = ItemRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Gold ring");

    Ok(())
}
