use super::*;

/// Tests the derived overdue filter.
///
/// Creates an active loan past its due date, an active loan not yet due, and a
/// completed loan past its due date. Only the first is overdue.
///
/// Expected: Ok with exactly the past-due active loan
#[tokio::test]
async fn filters_overdue_loans() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let branch = factory::create_branch(db).await?;
    let customer = factory::create_customer(db).await?;
    let today = today();

    let mut loan_ids = Vec::new();
    for (status, due_in_days) in [
        (LoanStatus::Active, -5),
        (LoanStatus::Active, 5),
        (LoanStatus::Completed, -5),
    ] {
        let item = factory::create_item(db, branch.id).await?;
        let loan = factory::loan::LoanFactory::new(db, customer.id, item.id)
            .status(status)
            .start_date(today - Duration::days(30))
            .due_date(today + Duration::days(due_in_days))
            .build()
            .await?;
        loan_ids.push(loan.id);
    }

    let filter = LoanFilter {
        is_overdue: Some(true),
        ..Default::default()
    };
    let (loans, total) = LoanRepository::new(db)
        .get_all_paginated(&filter, today, 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(loans[0].id, loan_ids[0]);

    let not_overdue = LoanFilter {
        is_overdue: Some(false),
        ..Default::default()
    };
    let (_, total) = LoanRepository::new(db)
        .get_all_paginated(&not_overdue, today, 0, 10)
        .await?;

    assert_eq!(total, 2);

    Ok(())
}

/// Tests that page results carry payment totals.
///
/// Expected: Ok with total_paid filled in for the listed loan
#[tokio::test]
async fn includes_payment_totals() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    factory::create_payment(db, loan.id, 2_500).await?;

    let (loans, _) = LoanRepository::new(db)
        .get_all_paginated(&LoanFilter::default(), today(), 0, 10)
        .await?;

    assert_eq!(loans[0].total_paid, 2_500);

    Ok(())
}
