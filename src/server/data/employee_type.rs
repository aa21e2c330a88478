use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::employee::{
    CreateEmployeeTypeParams, EmployeeType, UpdateEmployeeTypeParams,
};

pub struct EmployeeTypeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmployeeTypeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateEmployeeTypeParams) -> Result<EmployeeType, DbErr> {
        let entity = entity::employee_type::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(Utc::now()),
            updated_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(EmployeeType::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<EmployeeType>, DbErr> {
        let entity = entity::prelude::EmployeeType::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(EmployeeType::from_entity))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<EmployeeType>, DbErr> {
        let entity = entity::prelude::EmployeeType::find()
            .filter(entity::employee_type::Column::Name.eq(name))
            .one(self.db)
            .await?;

        Ok(entity.map(EmployeeType::from_entity))
    }

    pub async fn get_all(&self) -> Result<Vec<EmployeeType>, DbErr> {
        let entities = entity::prelude::EmployeeType::find()
            .order_by_asc(entity::employee_type::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(EmployeeType::from_entity).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateEmployeeTypeParams,
    ) -> Result<Option<EmployeeType>, DbErr> {
        let Some(employee_type) = entity::prelude::EmployeeType::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active_model: entity::employee_type::ActiveModel = employee_type.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        active_model.updated_at = ActiveValue::Set(Some(Utc::now()));

        let entity = active_model.update(self.db).await?;

        Ok(Some(EmployeeType::from_entity(entity)))
    }

    pub async fn count_employees(&self, id: i32) -> Result<u64, DbErr> {
        entity::prelude::Employee::find()
            .filter(entity::employee::Column::EmployeeTypeId.eq(id))
            .count(self.db)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::EmployeeType::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
