use super::*;

/// Tests the free-text customer search.
///
/// Verifies that the search term matches across name and phone columns.
///
/// Expected: Ok with the customer whose last name matches
#[tokio::test]
async fn searches_across_name_and_contact_columns() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::customer::CustomerFactory::new(db)
        .first_name("Ada")
        .last_name("Lovelace")
        .build()
        .await?;
    factory::customer::CustomerFactory::new(db)
        .first_name("Alan")
        .last_name("Turing")
        .build()
        .await?;

    let filter = CustomerFilter {
        search_term: Some("Lovel".to_string()),
        ..Default::default()
    };
    let (customers, total) = CustomerRepository::new(db)
        .get_all_paginated(&filter, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(customers[0].first_name, "Ada");

    Ok(())
}

/// Tests that the newest customer is listed first.
///
/// Expected: Ok with the second customer at index 0
#[tokio::test]
async fn orders_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_customer(db).await?;
    let second = factory::create_customer(db).await?;

    let (customers, _) = CustomerRepository::new(db)
        .get_all_paginated(&CustomerFilter::default(), 0, 10)
        .await?;

    assert_eq!(customers[0].id, second.id);
    assert_eq!(customers[1].id, first.id);

    Ok(())
}
