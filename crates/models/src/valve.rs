use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "valve")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub nome: String,
    pub descricao: String,
    pub tipo: String,
    pub vazao: f64,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NOME_MAX_LEN: usize = 140;
pub const DESCRICAO_MAX_LEN: usize = 4000;
pub const TIPO_MAX_LEN: usize = 140;

fn validate_text(field: &str, value: &str, max: usize) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    if value.chars().count() > max {
        return Err(errors::ModelError::Validation(format!("{field} longer than {max} characters")));
    }
    Ok(())
}

pub fn validate_nome(nome: &str) -> Result<(), errors::ModelError> {
    validate_text("nome", nome, NOME_MAX_LEN)
}

pub fn validate_vazao(vazao: f64) -> Result<(), errors::ModelError> {
    if !vazao.is_finite() {
        return Err(errors::ModelError::Validation("vazao must be a finite number".into()));
    }
    Ok(())
}

/// Check every writable field of a valve before it reaches the database.
pub fn validate(nome: &str, descricao: &str, tipo: &str, vazao: f64) -> Result<(), errors::ModelError> {
    validate_nome(nome)?;
    validate_text("descricao", descricao, DESCRICAO_MAX_LEN)?;
    validate_text("tipo", tipo, TIPO_MAX_LEN)?;
    validate_vazao(vazao)
}
