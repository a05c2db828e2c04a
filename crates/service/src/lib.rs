//! Service layer for the valve API.
//! - `db`: entity store operations on the `valve` table.
//! - `export`: renders the full valve list as CSV, PDF, XML, XLSX or DOCX.
//! - `url_to_pdf`: client for the third-party HTML-to-PDF service.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod db;
pub mod export;
pub mod url_to_pdf;
