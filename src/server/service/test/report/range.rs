use super::*;

/// Tests resolving a range with no bounds given.
///
/// Expected: thirty days ending today
#[test]
fn defaults_to_last_thirty_days() {
    let range = ReportRange::resolve(None, None, Some(3)).unwrap();

    assert_eq!(range, ReportRange {
        branch_id: Some(3),
        ..default_range()
    });
}

/// Tests resolving a range with only an end date.
///
/// Expected: start thirty days before the given end
#[test]
fn start_follows_end_date() {
    let end = today() - Duration::days(100);

    let range = ReportRange::resolve(None, Some(end), None).unwrap();

    assert_eq!(range.start_date, end - Duration::days(30));
    assert_eq!(range.end_date, end);
}

/// Tests a start date after the end date.
///
/// Expected: Err(BadRequest)
#[test]
fn rejects_inverted_range() {
    let result = ReportRange::resolve(Some(today()), Some(today() - Duration::days(1)), None);

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}
