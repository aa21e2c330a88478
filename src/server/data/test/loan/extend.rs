use super::*;

/// Tests extending a loan's due date and term.
///
/// Expected: loan is `extended` with the new due date, term and notes
#[tokio::test]
async fn moves_due_date_and_marks_extended() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, _, _, loan) = factory::helpers::create_loan_with_dependencies(db).await?;
    let new_due = loan.due_date + Duration::days(15);

    let repo = LoanRepository::new(db);
    repo.extend(loan.id, new_due, loan.term_days + 15, Some("Extended".to_string()))
        .await?;
    let extended = repo.find_by_id(loan.id).await?.unwrap();

    assert_eq!(extended.status, LoanStatus::Extended);
    assert_eq!(extended.due_date, new_due);
    assert_eq!(extended.term_days, loan.term_days + 15);
    assert_eq!(extended.notes.as_deref(), Some("Extended"));

    Ok(())
}
