use super::*;

/// Tests counting the rows that reference a branch.
///
/// Expected: Ok with one of each dependent kind
#[tokio::test]
async fn counts_each_dependent_kind() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, branch, _, _) = factory::helpers::create_employee_with_dependencies(db).await?;
    factory::create_item(db, branch.id).await?;
    factory::create_transaction(db, branch.id).await?;
    let customer = factory::create_customer(db).await?;
    factory::create_application(db, customer.id, branch.id).await?;

    let dependents = BranchRepository::new(db).count_dependents(branch.id).await?;

    assert_eq!(
        dependents,
        BranchDependents {
            employees: 1,
            items: 1,
            transactions: 1,
            applications: 1,
        }
    );

    Ok(())
}

/// Tests a branch with nothing attached.
///
/// Expected: Ok with all counts zero
#[tokio::test]
async fn reports_zero_for_empty_branch() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;

    let dependents = BranchRepository::new(db).count_dependents(branch.id).await?;

    assert_eq!(dependents, BranchDependents::default());

    Ok(())
}
