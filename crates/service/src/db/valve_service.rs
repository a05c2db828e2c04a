use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::{debug, instrument};
use models::valve::{self, Entity as ValveEntity};
use crate::errors::ServiceError;

/// Writable fields of a valve, as submitted on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ValveInput {
    pub nome: String,
    pub descricao: String,
    pub tipo: String,
    pub vazao: f64,
}

impl ValveInput {
    fn validate(&self) -> Result<(), ServiceError> {
        valve::validate(&self.nome, &self.descricao, &self.tipo, self.vazao)?;
        Ok(())
    }
}

/// Unique-constraint violations become `DuplicateName`; anything else is a plain db error.
fn map_write_err(nome: &str, e: DbErr) -> ServiceError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::DuplicateName(nome.to_string()),
        _ => ServiceError::Db(e.to_string()),
    }
}

/// Insert a new valve; the database assigns the id.
#[instrument(skip(db, input), fields(nome = %input.nome))]
pub async fn create_valve(db: &DatabaseConnection, input: &ValveInput) -> Result<valve::Model, ServiceError> {
    input.validate()?;
    let am = valve::ActiveModel {
        nome: Set(input.nome.clone()),
        descricao: Set(input.descricao.clone()),
        tipo: Set(input.tipo.clone()),
        vazao: Set(input.vazao),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| map_write_err(&input.nome, e))?;
    debug!(id = created.id, "valve inserted");
    Ok(created)
}

/// Every valve in primary-key order.
pub async fn list_valves(db: &DatabaseConnection) -> Result<Vec<valve::Model>, ServiceError> {
    let rows = ValveEntity::find()
        .order_by_asc(valve::Column::Id)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn find_valve_by_name(db: &DatabaseConnection, nome: &str) -> Result<valve::Model, ServiceError> {
    ValveEntity::find()
        .filter(valve::Column::Nome.eq(nome))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("valve"))
}

pub async fn find_valve_by_id(db: &DatabaseConnection, id: i32) -> Result<valve::Model, ServiceError> {
    ValveEntity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("valve"))
}

/// Overwrite all four writable fields of the valve with `id`.
#[instrument(skip(db, input), fields(nome = %input.nome))]
pub async fn update_valve(db: &DatabaseConnection, id: i32, input: &ValveInput) -> Result<valve::Model, ServiceError> {
    input.validate()?;
    let mut am: valve::ActiveModel = find_valve_by_id(db, id).await?.into();
    am.nome = Set(input.nome.clone());
    am.descricao = Set(input.descricao.clone());
    am.tipo = Set(input.tipo.clone());
    am.vazao = Set(input.vazao);
    match am.update(db).await {
        Ok(updated) => Ok(updated),
        // row removed between the lookup and the update
        Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("valve")),
        Err(e) => Err(map_write_err(&input.nome, e)),
    }
}

/// Delete by name; returns the number of rows removed (0 or 1).
pub async fn delete_valve_by_name(db: &DatabaseConnection, nome: &str) -> Result<u64, ServiceError> {
    let res = ValveEntity::delete_many()
        .filter(valve::Column::Nome.eq(nome))
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
