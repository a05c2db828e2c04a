//! Table exports of the full valve list.
//!
//! Every format renders the same table: a header row with [`HEADERS`] followed
//! by one row per valve in store order. Renderers are pure functions over
//! `&[valve::Model]` and return the complete payload in memory.

use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::debug;

use models::valve;

use crate::{db::valve_service, errors::ServiceError};

pub mod csv;
pub mod docx;
pub mod pdf;
pub mod xlsx;
pub mod xml;

pub const HEADERS: [&str; 5] = ["ID", "Nome", "Descrição", "Tipo", "Vazão"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv: {0}")]
    Csv(String),
    #[error("pdf: {0}")]
    Pdf(String),
    #[error("xml: {0}")]
    Xml(String),
    #[error("xlsx: {0}")]
    Xlsx(String),
    #[error("docx: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
    Xml,
    Xlsx,
    Docx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [Self::Csv, Self::Pdf, Self::Xml, Self::Xlsx, Self::Docx];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Xml => "xml",
            Self::Xlsx => "xlsx",
            Self::Docx => "docx",
        }
    }

    pub fn file_name(self) -> String {
        format!("valves.{}", self.extension())
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Xml => "application/xml; charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }

    pub fn content_disposition(self) -> String {
        format!("attachment; filename={}", self.file_name())
    }

    pub fn render(self, valves: &[valve::Model]) -> Result<Vec<u8>, ExportError> {
        match self {
            Self::Csv => csv::render(valves),
            Self::Pdf => pdf::render(valves),
            Self::Xml => xml::render(valves),
            Self::Xlsx => xlsx::render(valves),
            Self::Docx => docx::render(valves),
        }
    }
}

/// Flow rate as text: integral values keep one decimal (`3.0`), others use the
/// shortest round-trip form (`12.5`, `0.25`).
pub fn format_vazao(vazao: f64) -> String {
    if vazao.is_finite() && vazao.fract() == 0.0 && vazao.abs() < 1e16 {
        format!("{vazao:.1}")
    } else {
        vazao.to_string()
    }
}

/// One table row, every cell stringified.
pub fn row_cells(v: &valve::Model) -> [String; 5] {
    [
        v.id.to_string(),
        v.nome.clone(),
        v.descricao.clone(),
        v.tipo.clone(),
        format_vazao(v.vazao),
    ]
}

/// Load every valve and render it in `format`.
pub async fn export_valves(db: &DatabaseConnection, format: ExportFormat) -> Result<Vec<u8>, ServiceError> {
    let valves = valve_service::list_valves(db).await?;
    let bytes = format.render(&valves)?;
    debug!(format = format.extension(), rows = valves.len(), bytes = bytes.len(), "export rendered");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::valve_service::{create_valve, ValveInput}, test_support::get_db};

    #[test]
    fn vazao_text_matches_table_convention() {
        assert_eq!(format_vazao(12.5), "12.5");
        assert_eq!(format_vazao(3.0), "3.0");
        assert_eq!(format_vazao(-4.0), "-4.0");
        assert_eq!(format_vazao(0.25), "0.25");
    }

    #[test]
    fn headers_and_file_names() {
        assert_eq!(ExportFormat::Csv.content_disposition(), "attachment; filename=valves.csv");
        assert_eq!(ExportFormat::Docx.file_name(), "valves.docx");
        assert!(ExportFormat::Xlsx.content_type().contains("spreadsheetml"));
    }

    #[tokio::test]
    async fn every_format_renders_from_store() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        create_valve(&db, &ValveInput { nome: "V1".into(), descricao: "desc".into(), tipo: "gate".into(), vazao: 12.5 }).await?;
        for format in ExportFormat::ALL {
            let bytes = export_valves(&db, format).await?;
            assert!(!bytes.is_empty(), "{format:?} produced no bytes");
        }
        Ok(())
    }

    #[tokio::test]
    async fn every_format_renders_empty_table() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for format in ExportFormat::ALL {
            assert!(!export_valves(&db, format).await?.is_empty());
        }
        Ok(())
    }
}
