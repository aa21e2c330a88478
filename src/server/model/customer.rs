use chrono::{DateTime, NaiveDate, Utc};

use crate::model::customer::{
    CreateCustomerDto, CustomerDto, CustomerSearchDto, UpdateCustomerDto,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i32,
    pub customer_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub credit_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn from_entity(entity: entity::customer::Model) -> Self {
        Self {
            id: entity.id,
            customer_code: entity.customer_code,
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            phone: entity.phone,
            address: entity.address,
            city: entity.city,
            state: entity.state,
            zip_code: entity.zip_code,
            id_type: entity.id_type,
            id_number: entity.id_number,
            date_of_birth: entity.date_of_birth,
            notes: entity.notes,
            is_active: entity.is_active,
            credit_score: entity.credit_score,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn into_dto(self) -> CustomerDto {
        CustomerDto {
            id: self.id,
            customer_code: self.customer_code,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            id_type: self.id_type,
            id_number: self.id_number,
            date_of_birth: self.date_of_birth,
            notes: self.notes,
            is_active: self.is_active,
            credit_score: self.credit_score,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCustomerParams {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
    pub credit_score: Option<i32>,
}

impl CreateCustomerParams {
    pub fn from_dto(dto: CreateCustomerDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
            address: dto.address,
            city: dto.city,
            state: dto.state,
            zip_code: dto.zip_code,
            id_type: dto.id_type,
            id_number: dto.id_number,
            date_of_birth: dto.date_of_birth,
            notes: dto.notes,
            credit_score: dto.credit_score,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCustomerParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
    pub credit_score: Option<i32>,
}

impl UpdateCustomerParams {
    pub fn from_dto(dto: UpdateCustomerDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
            address: dto.address,
            city: dto.city,
            state: dto.state,
            zip_code: dto.zip_code,
            id_type: dto.id_type,
            id_number: dto.id_number,
            date_of_birth: dto.date_of_birth,
            notes: dto.notes,
            is_active: dto.is_active,
            credit_score: dto.credit_score,
        }
    }
}

/// Filters shared by the customer list and search endpoints.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    /// Matches first name, last name, email, phone or customer code.
    pub search_term: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub customer_code: Option<String>,
    pub is_active: Option<bool>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl CustomerFilter {
    pub fn from_search_dto(dto: CustomerSearchDto) -> Self {
        Self {
            search_term: dto.search_term,
            email: dto.email,
            phone: dto.phone,
            customer_code: dto.customer_code,
            is_active: dto.is_active,
            city: dto.city,
            state: dto.state,
        }
    }
}
