use axum::{
    extract::{Query, State},
    Form, Json,
};
use percent_encoding::percent_decode_str;
use service::{
    db::valve_service::{self, ValveInput},
    errors::ServiceError,
};
use tracing::{debug, error, info, warn};

use crate::{
    errors::JsonApiError,
    schemas::{
        present_many, present_one, ErrorView, ValveDeletedView, ValveForm, ValveListView, ValveQuery,
        ValveUpdateForm, ValveView,
    },
    state::ServerState,
};

pub const DUPLICATE_NAME_MSG: &str = "Válvula de mesmo nome já salva na base :/";
pub const SAVE_FAILED_MSG: &str = "Não foi possível salvar novo item :/";
pub const DELETE_NOT_FOUND_MSG: &str = "Válvula não encontrada na base :/";
pub const UPDATE_NOT_FOUND_MSG: &str = "Válvula não encontrada";
pub const LIST_FAILED_MSG: &str = "Não foi possível listar as válvulas :/";
pub const DELETE_FAILED_MSG: &str = "Não foi possível remover a válvula :/";
pub const UPDATE_FAILED_MSG: &str = "Não foi possível atualizar a válvula :/";
pub const UPDATE_INVALID_MSG: &str = "Dados inválidos para a válvula :/";

/// Name used for lookup on delete. The query extractor has already decoded
/// once; `twice` applies one more percent-decode for clients that double-encode.
pub fn decode_nome(raw: &str, twice: bool) -> String {
    if twice {
        percent_decode_str(raw).decode_utf8_lossy().into_owned()
    } else {
        raw.to_string()
    }
}

#[utoipa::path(
    post, path = "/valve", tag = "Válvula",
    request_body(content = ValveForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Válvula adicionada", body = ValveView),
        (status = 409, description = "Válvula de mesmo nome já existe", body = ErrorView),
        (status = 400, description = "Erro ao salvar a válvula", body = ErrorView)
    )
)]
pub async fn add_valve(
    State(state): State<ServerState>,
    Form(form): Form<ValveForm>,
) -> Result<Json<ValveView>, JsonApiError> {
    let input: ValveInput = form.into();
    debug!(nome = %input.nome, "add valve request");
    match valve_service::create_valve(&state.db, &input).await {
        Ok(v) => {
            info!(id = v.id, nome = %v.nome, "valve added");
            Ok(Json(present_one(v)))
        }
        Err(ServiceError::DuplicateName(nome)) => {
            warn!(%nome, "valve name already stored");
            Err(JsonApiError::conflict(DUPLICATE_NAME_MSG))
        }
        Err(e) => {
            warn!(err = %e, nome = %input.nome, "add valve failed");
            Err(JsonApiError::bad_request(SAVE_FAILED_MSG))
        }
    }
}

#[utoipa::path(
    get, path = "/valves", tag = "Válvula",
    responses(
        (status = 200, description = "Listagem de válvulas", body = ValveListView),
        (status = 500, description = "Erro ao consultar a base", body = ErrorView)
    )
)]
pub async fn list_valves(State(state): State<ServerState>) -> Result<Json<ValveListView>, JsonApiError> {
    match valve_service::list_valves(&state.db).await {
        Ok(list) => {
            debug!(count = list.len(), "list valves");
            Ok(Json(present_many(list)))
        }
        Err(e) => {
            error!(err = %e, "list valves failed");
            Err(JsonApiError::internal(LIST_FAILED_MSG))
        }
    }
}

#[utoipa::path(
    delete, path = "/valve", tag = "Válvula",
    params(ValveQuery),
    responses(
        (status = 200, description = "Válvula removida", body = ValveDeletedView),
        (status = 404, description = "Válvula não encontrada", body = ErrorView)
    )
)]
pub async fn delete_valve(
    State(state): State<ServerState>,
    Query(q): Query<ValveQuery>,
) -> Result<Json<ValveDeletedView>, JsonApiError> {
    let nome = decode_nome(&q.nome, state.compat.double_decode_delete);
    debug!(%nome, "delete valve request");
    match valve_service::delete_valve_by_name(&state.db, &nome).await {
        Ok(0) => {
            warn!(%nome, "valve to delete not found");
            Err(JsonApiError::not_found(DELETE_NOT_FOUND_MSG))
        }
        Ok(_) => {
            info!(%nome, "valve deleted");
            Ok(Json(ValveDeletedView::new(nome)))
        }
        Err(e) => {
            error!(err = %e, %nome, "delete valve failed");
            Err(JsonApiError::internal(DELETE_FAILED_MSG))
        }
    }
}

#[utoipa::path(
    put, path = "/valve", tag = "Válvula",
    request_body(content = ValveUpdateForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Válvula atualizada", body = ValveView),
        (status = 404, description = "Válvula não encontrada", body = ErrorView),
        (status = 409, description = "Outra válvula já usa este nome", body = ErrorView),
        (status = 400, description = "Dados inválidos", body = ErrorView)
    )
)]
pub async fn update_valve(
    State(state): State<ServerState>,
    Form(form): Form<ValveUpdateForm>,
) -> Result<Json<ValveView>, JsonApiError> {
    let (id, input) = form.into_parts();
    debug!(id, nome = %input.nome, "update valve request");
    match valve_service::update_valve(&state.db, id, &input).await {
        Ok(v) => {
            info!(id = v.id, nome = %v.nome, "valve updated");
            Ok(Json(present_one(v)))
        }
        Err(ServiceError::NotFound(_)) => {
            warn!(id, "valve to update not found");
            Err(JsonApiError::not_found(UPDATE_NOT_FOUND_MSG))
        }
        Err(ServiceError::DuplicateName(nome)) => {
            warn!(id, %nome, "rename collides with stored valve");
            Err(JsonApiError::conflict(DUPLICATE_NAME_MSG))
        }
        Err(e) if e.is_validation() => {
            warn!(id, err = %e, "invalid valve update");
            Err(JsonApiError::bad_request(UPDATE_INVALID_MSG))
        }
        Err(e) => {
            error!(id, err = %e, "update valve failed");
            Err(JsonApiError::internal(UPDATE_FAILED_MSG))
        }
    }
}
