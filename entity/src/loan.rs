use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "overdue")]
    Overdue,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "defaulted")]
    Defaulted,
    #[sea_orm(string_value = "extended")]
    Extended,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl LoanStatus {
    /// Statuses in which the loan is still outstanding against its collateral.
    pub const OPEN: [LoanStatus; 3] = [LoanStatus::Active, LoanStatus::Overdue, LoanStatus::Extended];

    /// Statuses in which the loan still holds its collateral, including loans not yet
    /// disbursed.
    pub const SECURING: [LoanStatus; 4] = [
        LoanStatus::Pending,
        LoanStatus::Active,
        LoanStatus::Overdue,
        LoanStatus::Extended,
    ];

    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }
}

/// A collateralized loan against a pawned item.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub loan_code: String,
    pub customer_id: i32,
    pub item_id: i32,
    /// Principal in cents.
    pub loan_amount: i64,
    /// Flat interest over the loan term, as a percentage of the principal.
    pub interest_rate: f64,
    pub term_days: i32,
    pub start_date: Date,
    pub due_date: Date,
    pub status: LoanStatus,
    pub collateral_description: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
