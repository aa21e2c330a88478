use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[sea_orm(string_value = "pawned")]
    Pawned,
    #[sea_orm(string_value = "redeemed")]
    Redeemed,
    #[sea_orm(string_value = "defaulted")]
    Defaulted,
    #[sea_orm(string_value = "for_sale")]
    ForSale,
    #[sea_orm(string_value = "sold")]
    Sold,
    #[sea_orm(string_value = "damaged")]
    Damaged,
    #[sea_orm(string_value = "lost")]
    Lost,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    #[sea_orm(string_value = "jewelry")]
    Jewelry,
    #[sea_orm(string_value = "electronics")]
    Electronics,
    #[sea_orm(string_value = "musical_instruments")]
    MusicalInstruments,
    #[sea_orm(string_value = "tools")]
    Tools,
    #[sea_orm(string_value = "watches")]
    Watches,
    #[sea_orm(string_value = "firearms")]
    Firearms,
    #[sea_orm(string_value = "collectibles")]
    Collectibles,
    #[sea_orm(string_value = "luxury_items")]
    LuxuryItems,
    #[sea_orm(string_value = "other")]
    Other,
}

/// An inventory item, either held as collateral or offered for sale.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub item_code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: ItemCategory,
    pub status: ItemStatus,
    pub serial_number: Option<String>,
    /// Appraised value in cents.
    pub appraisal_value: i64,
    /// Asking price in cents.
    pub selling_price: Option<i64>,
    pub condition: Option<String>,
    pub notes: Option<String>,
    pub customer_id: Option<i32>,
    pub branch_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "SetNull"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::branch::Entity",
        from = "Column::BranchId",
        to = "super::branch::Column::Id"
    )]
    Branch,
    #[sea_orm(has_many = "super::loan::Entity")]
    Loan,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branch.def()
    }
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
