use super::*;

/// Tests approving several applications where one is already approved.
///
/// Expected: only the pending ones change and are counted
#[tokio::test]
async fn bulk_update_skips_unchanged() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let reviewer = factory::create_user(db).await?;
    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let first = factory::create_application(db, customer.id, branch.id).await?;
    let second = factory::create_application(db, customer.id, branch.id).await?;
    let approved = factory::application::ApplicationFactory::new(db, customer.id, branch.id)
        .status(ApplicationStatus::Approved)
        .build()
        .await?;
    let service = ApplicationService::new(db);

    let updated = service
        .bulk_update(
            &[first.id, second.id, approved.id],
            ApplicationStatus::Approved,
            None,
            None,
            reviewer.id,
        )
        .await?;

    assert_eq!(updated, 2);
    for id in [first.id, second.id] {
        let application = service.get_by_id(id).await?;
        assert_eq!(application.status, ApplicationStatus::Approved);
        assert_eq!(application.processed_by_id, Some(reviewer.id));
    }
    assert_eq!(service.get_by_id(approved.id).await?.processed_by_id, None);

    Ok(())
}

/// Tests bulk rejecting without a reason.
///
/// Expected: Err(BadRequest), nothing changed
#[tokio::test]
async fn bulk_reject_requires_reason() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let reviewer = factory::create_user(db).await?;
    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let application = factory::create_application(db, customer.id, branch.id).await?;
    let service = ApplicationService::new(db);

    let result = service
        .bulk_update(
            &[application.id],
            ApplicationStatus::Rejected,
            None,
            None,
            reviewer.id,
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(
        service.get_by_id(application.id).await?.status,
        ApplicationStatus::Pending
    );

    Ok(())
}

/// Tests bulk deleting a mix of pending and processed applications.
///
/// Expected: Err(BadRequest) listing the processed ids, nothing deleted
#[tokio::test]
async fn bulk_delete_refuses_processed() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let pending = factory::create_application(db, customer.id, branch.id).await?;
    let rejected = factory::application::ApplicationFactory::new(db, customer.id, branch.id)
        .status(ApplicationStatus::Rejected)
        .build()
        .await?;
    let service = ApplicationService::new(db);

    let result = service.bulk_delete(&[pending.id, rejected.id]).await;

    let expected = format!("Cannot delete processed applications: [{}]", rejected.id);
    assert!(matches!(result, Err(AppError::BadRequest(ref msg)) if *msg == expected));
    assert!(service.get_by_id(pending.id).await.is_ok());

    let deleted = service.bulk_delete(&[pending.id]).await?;
    assert_eq!(deleted, 1);

    Ok(())
}

/// Tests bulk operations on ids that do not exist.
///
/// Expected: Err(NotFound)
#[tokio::test]
async fn bulk_rejects_unknown_ids() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ApplicationService::new(db).bulk_delete(&[404, 405]).await;

    assert!(matches!(
        result,
        Err(AppError::NotFound(ref msg)) if msg == "No applications found"
    ));

    Ok(())
}
