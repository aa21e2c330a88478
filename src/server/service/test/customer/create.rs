use super::*;

/// Tests creating a customer.
///
/// Expected: Ok(Customer) with a generated code, active
#[tokio::test]
async fn creates_customer_with_code() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let customer = CustomerService::new(db)
        .create(customer_params(Some("avery@example.com"), "555-0100"))
        .await?;

    assert!(customer.customer_code.starts_with("C-"));
    assert_eq!(customer.customer_code.len(), 10);
    assert!(customer.is_active);

    Ok(())
}

/// Tests creating customers that reuse an email or a phone number.
///
/// Expected: Err(BadRequest) for both
#[tokio::test]
async fn rejects_duplicate_contact() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = CustomerService::new(db);
    service
        .create(customer_params(Some("avery@example.com"), "555-0100"))
        .await?;

    let same_email = service
        .create(customer_params(Some("avery@example.com"), "555-0199"))
        .await;
    let same_phone = service.create(customer_params(None, "555-0100")).await;

    for result in [same_email, same_phone] {
        assert!(matches!(
            result,
            Err(AppError::BadRequest(ref msg))
                if msg == "A customer with this email or phone number already exists."
        ));
    }

    Ok(())
}

/// Tests changing a customer's phone to one another customer uses.
///
/// Expected: Err(BadRequest)
#[tokio::test]
async fn update_rejects_taken_phone() -> Result<(), AppError> {
    let test = TestBuilder::new().with_loan_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_customer(db).await?;
    let second = factory::create_customer(db).await?;

    let result = CustomerService::new(db)
        .update(
            second.id,
            UpdateCustomerParams {
                phone: Some(first.phone.clone()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::BadRequest(ref msg))
            if msg == "A customer with this phone number already exists."
    ));

    Ok(())
}
