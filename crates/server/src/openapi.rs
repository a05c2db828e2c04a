use utoipa::OpenApi;

use crate::schemas::{
    ErrorView, UrlToPdfRequest, ValveDeletedView, ValveForm, ValveListView, ValveUpdateForm, ValveView,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Valve API", version = "1.0.0", description = "Cadastro e exportação de válvulas"),
    paths(
        crate::routes::home,
        crate::routes::health,
        crate::routes::valves::add_valve,
        crate::routes::valves::list_valves,
        crate::routes::valves::delete_valve,
        crate::routes::valves::update_valve,
        crate::routes::export::export_csv,
        crate::routes::export::export_pdf,
        crate::routes::export::export_xml,
        crate::routes::export::export_xlsx,
        crate::routes::export::export_docx,
        crate::routes::export::export_url_to_pdf,
    ),
    components(
        schemas(
            ValveForm,
            ValveUpdateForm,
            ValveView,
            ValveListView,
            ValveDeletedView,
            ErrorView,
            UrlToPdfRequest,
        )
    ),
    tags(
        (name = "Documentação", description = "Seleção de documentação: Swagger"),
        (name = "Válvula", description = "Adição, visualização, remoção e exportação de válvulas à base"),
        (name = "health")
    )
)]
pub struct ApiDoc;
