use std::path::Path;

use axum::{
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeFile,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{openapi::ApiDoc, state::ServerState};

pub mod export;
pub mod valves;

pub const SWAGGER_PATH: &str = "/openapi/swagger";
pub const OPENAPI_JSON_PATH: &str = "/openapi/openapi.json";

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Home sends the browser to the Swagger UI.
#[utoipa::path(
    get, path = "/", tag = "Documentação",
    responses((status = 303, description = "Redireciona para a documentação Swagger"))
)]
pub async fn home() -> Redirect {
    Redirect::to(SWAGGER_PATH)
}

/// Build the application router: documentation, valve CRUD and exports.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let favicon = ServeFile::new(Path::new(&state.static_dir).join("favicon.ico"));

    let docs = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route_service("/favicon.ico", favicon)
        .merge(SwaggerUi::new(SWAGGER_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()));

    let valves = Router::new()
        .route(
            "/valve",
            post(valves::add_valve)
                .put(valves::update_valve)
                .delete(valves::delete_valve),
        )
        .route("/valves", get(valves::list_valves));

    let exports = Router::new()
        .route("/export/csv", get(export::export_csv))
        .route("/export/pdf", get(export::export_pdf))
        .route("/export/xml", get(export::export_xml))
        .route("/export/xlsx", get(export::export_xlsx))
        .route("/export/docx", get(export::export_docx))
        .route("/export/URL_to_PDF", post(export::export_url_to_pdf));

    docs.merge(valves)
        .merge(exports)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{header, Request, StatusCode}};
    use configs::{AppConfig, DatabaseConfig};
    use tower::ServiceExt;

    async fn app() -> Router {
        let db = models::db::connect_and_migrate(&DatabaseConfig::in_memory()).await.unwrap();
        let state = ServerState::new(db, &AppConfig::default()).unwrap();
        build_router(state, CorsLayer::very_permissive())
    }

    #[tokio::test]
    async fn home_redirects_to_swagger() {
        let res = app()
            .await
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], SWAGGER_PATH);
    }

    #[tokio::test]
    async fn openapi_document_lists_valve_routes() {
        let res = app()
            .await
            .oneshot(Request::builder().uri(OPENAPI_JSON_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        for path in ["/valve", "/valves", "/export/csv", "/export/URL_to_PDF"] {
            assert!(doc["paths"].get(path).is_some(), "missing {path}");
        }
        let delete_404 = &doc["paths"]["/valve"]["delete"]["responses"]["404"];
        assert_eq!(
            delete_404["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ErrorView"
        );
    }

    #[tokio::test]
    async fn missing_form_field_is_rejected_before_store() {
        let res = app()
            .await
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/valve")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("nome=V1&tipo=gaveta"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(res.status().is_client_error());
    }
}
