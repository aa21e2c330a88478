use chrono::{DateTime, Utc};

use crate::model::branch::{BranchDto, CreateBranchDto, UpdateBranchDto};

/// A physical shop location.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Branch {
    pub fn from_entity(entity: entity::branch::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            address: entity.address,
            city: entity.city,
            state: entity.state,
            phone: entity.phone,
            email: entity.email,
            is_active: entity.is_active,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> BranchDto {
        BranchDto {
            id: self.id,
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            phone: self.phone,
            email: self.email,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBranchParams {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
}

impl CreateBranchParams {
    pub fn from_dto(dto: CreateBranchDto) -> Self {
        Self {
            name: dto.name,
            address: dto.address,
            city: dto.city,
            state: dto.state,
            phone: dto.phone,
            email: dto.email,
            is_active: dto.is_active,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBranchParams {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateBranchParams {
    pub fn from_dto(dto: UpdateBranchDto) -> Self {
        Self {
            name: dto.name,
            address: dto.address,
            city: dto.city,
            state: dto.state,
            phone: dto.phone,
            email: dto.email,
            is_active: dto.is_active,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BranchFilter {
    pub is_active: Option<bool>,
    /// Matches name or city.
    pub search: Option<String>,
}
