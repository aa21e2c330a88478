use super::*;

/// Tests deleting several applications at once.
///
/// Expected: Ok(2) and only the untouched application remains
#[tokio::test]
async fn deletes_listed_applications() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = factory::create_customer(db).await?;
    let branch = factory::create_branch(db).await?;
    let first = factory::create_application(db, customer.id, branch.id).await?;
    let second = factory::create_application(db, customer.id, branch.id).await?;
    let kept = factory::create_application(db, customer.id, branch.id).await?;

    let repo = ApplicationRepository::new(db);
    let deleted = repo.delete_many(&[first.id, second.id]).await?;
    let (remaining, _) = repo
        .get_all_paginated(&ApplicationFilter::default(), 0, 10)
        .await?;

    assert_eq!(deleted, 2);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);

    Ok(())
}

/// Tests that an empty id list deletes nothing.
///
/// Expected: Ok(0)
#[tokio::test]
async fn ignores_empty_id_list() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = ApplicationRepository::new(db).delete_many(&[]).await?;

    assert_eq!(deleted, 0);

    Ok(())
}
