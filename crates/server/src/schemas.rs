//! Request forms and response bodies, plus the mapping from stored valves.

use models::valve;
use serde::{Deserialize, Serialize};
use service::db::valve_service::ValveInput;
use utoipa::{IntoParams, ToSchema};

pub const DELETED_MESSAGE: &str = "Válvula removida";

/// Fields of a new valve, sent as `application/x-www-form-urlencoded`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValveForm {
    #[schema(example = "Válvula 1")]
    pub nome: String,
    #[schema(example = "Válvula de gaveta da linha principal")]
    pub descricao: String,
    #[schema(example = "gaveta")]
    pub tipo: String,
    #[schema(example = 12.5)]
    pub vazao: f64,
}

impl From<ValveForm> for ValveInput {
    fn from(f: ValveForm) -> Self {
        ValveInput { nome: f.nome, descricao: f.descricao, tipo: f.tipo, vazao: f.vazao }
    }
}

/// Full replacement of an existing valve, addressed by `id`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ValveUpdateForm {
    #[schema(example = 1)]
    pub id: i32,
    pub nome: String,
    pub descricao: String,
    pub tipo: String,
    pub vazao: f64,
}

impl ValveUpdateForm {
    pub fn into_parts(self) -> (i32, ValveInput) {
        let input = ValveInput { nome: self.nome, descricao: self.descricao, tipo: self.tipo, vazao: self.vazao };
        (self.id, input)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValveQuery {
    /// Name of the valve to remove.
    pub nome: String,
}

/// Optional body of `POST /export/URL_to_PDF`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UrlToPdfRequest {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ValveView {
    pub id: i32,
    pub nome: String,
    pub descricao: String,
    pub tipo: String,
    pub vazao: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValveListView {
    #[serde(rename = "válvulas")]
    pub valvulas: Vec<ValveView>,
}

/// Delete confirmation; key spelling matches what existing clients read.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValveDeletedView {
    #[serde(rename = "mesage")]
    pub message: String,
    #[serde(rename = "Nome")]
    pub nome: String,
}

impl ValveDeletedView {
    pub fn new(nome: String) -> Self {
        Self { message: DELETED_MESSAGE.to_string(), nome }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorView {
    pub message: String,
}

pub fn present_one(v: valve::Model) -> ValveView {
    ValveView { id: v.id, nome: v.nome, descricao: v.descricao, tipo: v.tipo, vazao: v.vazao }
}

pub fn present_many(valves: Vec<valve::Model>) -> ValveListView {
    ValveListView { valvulas: valves.into_iter().map(present_one).collect() }
}
