use sea_orm::DatabaseConnection;

use crate::server::{
    data::{item::ItemRepository, loan::LoanRepository},
    error::AppError,
    model::{item::Item, loan::Loan},
};

/// Read-only view of loans paired with the items securing them.
pub struct CollateralService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CollateralService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn for_loan(&self, loan_id: i32) -> Result<(Loan, Item), AppError> {
        let loan = LoanRepository::new(self.db)
            .find_by_id(loan_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Loan not found".to_string()))?;

        let item = self.item(loan.item_id).await?;

        Ok((loan, item))
    }

    /// Most recent loan written against the item.
    pub async fn for_item(&self, item_id: i32) -> Result<(Loan, Item), AppError> {
        let loan = LoanRepository::new(self.db)
            .find_latest_for_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No loan found for this item".to_string()))?;

        let item = self.item(item_id).await?;

        Ok((loan, item))
    }

    async fn item(&self, id: i32) -> Result<Item, AppError> {
        ItemRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
    }
}
