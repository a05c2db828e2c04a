use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use service::export::{self, ExportFormat};
use tracing::{debug, error, info};

use crate::{
    errors::{ApiError, JsonApiError},
    schemas::{ErrorView, UrlToPdfRequest},
    state::ServerState,
};

pub const URL_TO_PDF_FAILED_MSG: &str = "Failed to generate PDF";
pub const URL_TO_PDF_FILENAME: &str = "exported_URL.pdf";

pub fn failure_message(format: ExportFormat) -> String {
    format!("Erro ao exportar para {}", format.extension().to_uppercase())
}

/// Render every stored valve as a file attachment.
async fn export_as(state: &ServerState, format: ExportFormat) -> Response {
    debug!(format = format.extension(), "export request");
    match export::export_valves(&state.db, format).await {
        Ok(bytes) => {
            info!(format = format.extension(), bytes = bytes.len(), "export served");
            (
                [
                    (header::CONTENT_TYPE, format.content_type().to_string()),
                    (header::CONTENT_DISPOSITION, format.content_disposition()),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!(err = %e, format = format.extension(), "export failed");
            JsonApiError::internal(failure_message(format)).into_response()
        }
    }
}

#[utoipa::path(
    get, path = "/export/csv", tag = "Válvula",
    responses(
        (status = 200, description = "valves.csv", content_type = "text/csv"),
        (status = 500, description = "Erro ao exportar", body = ErrorView)
    )
)]
pub async fn export_csv(State(state): State<ServerState>) -> Response {
    export_as(&state, ExportFormat::Csv).await
}

#[utoipa::path(
    get, path = "/export/pdf", tag = "Válvula",
    responses(
        (status = 200, description = "valves.pdf", content_type = "application/pdf"),
        (status = 500, description = "Erro ao exportar", body = ErrorView)
    )
)]
pub async fn export_pdf(State(state): State<ServerState>) -> Response {
    export_as(&state, ExportFormat::Pdf).await
}

#[utoipa::path(
    get, path = "/export/xml", tag = "Válvula",
    responses(
        (status = 200, description = "valves.xml", content_type = "application/xml"),
        (status = 500, description = "Erro ao exportar para XML", body = ErrorView)
    )
)]
pub async fn export_xml(State(state): State<ServerState>) -> Response {
    export_as(&state, ExportFormat::Xml).await
}

#[utoipa::path(
    get, path = "/export/xlsx", tag = "Válvula",
    responses(
        (status = 200, description = "valves.xlsx",
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 500, description = "Erro ao exportar", body = ErrorView)
    )
)]
pub async fn export_xlsx(State(state): State<ServerState>) -> Response {
    export_as(&state, ExportFormat::Xlsx).await
}

#[utoipa::path(
    get, path = "/export/docx", tag = "Válvula",
    responses(
        (status = 200, description = "valves.docx",
            content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 500, description = "Erro ao exportar", body = ErrorView)
    )
)]
pub async fn export_docx(State(state): State<ServerState>) -> Response {
    export_as(&state, ExportFormat::Docx).await
}

#[utoipa::path(
    post, path = "/export/URL_to_PDF", tag = "Válvula",
    request_body(content = UrlToPdfRequest, description = "Optional; `value` is honoured only when enabled in config", content_type = "application/json"),
    responses(
        (status = 200, description = "exported_URL.pdf", content_type = "application/pdf"),
        (status = 500, description = "Failed to generate PDF")
    )
)]
pub async fn export_url_to_pdf(
    State(state): State<ServerState>,
    body: Option<Json<UrlToPdfRequest>>,
) -> Result<Response, ApiError> {
    let requested = body.and_then(|Json(b)| b.value);
    match state.pdf.convert(requested.as_deref()).await {
        Ok(pdf) => Ok((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (header::CONTENT_DISPOSITION, format!("attachment; filename={URL_TO_PDF_FILENAME}")),
            ],
            pdf,
        )
            .into_response()),
        Err(e) => {
            error!(err = %e, "url to pdf failed");
            Err(ApiError(URL_TO_PDF_FAILED_MSG.to_string()))
        }
    }
}
