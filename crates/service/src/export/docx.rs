use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType, Table, TableCell, TableRow};
use models::valve;

use super::{row_cells, ExportError, HEADERS};

pub const TITLE: &str = "Exportação de Dados de Válvulas";
const HEADING_STYLE: &str = "Heading1";
// twentieths of a point, five columns over a 6.5in text block
const COLUMN_WIDTH: usize = 1872;

fn text_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
}

fn table_row<S: AsRef<str>>(cells: &[S]) -> TableRow {
    TableRow::new(cells.iter().map(|c| text_cell(c.as_ref())).collect())
}

/// Level-1 heading followed by a bordered grid with the header row and one row per valve.
pub fn render(valves: &[valve::Model]) -> Result<Vec<u8>, ExportError> {
    let mut rows = Vec::with_capacity(valves.len() + 1);
    rows.push(table_row(&HEADERS));
    rows.extend(valves.iter().map(|v| table_row(&row_cells(v))));

    let heading = Style::new(HEADING_STYLE, StyleType::Paragraph)
        .name("Heading 1")
        .size(32)
        .bold();
    let doc = Docx::new()
        .add_style(heading)
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(TITLE)).style(HEADING_STYLE))
        .add_table(Table::new(rows).set_grid(vec![COLUMN_WIDTH; HEADERS.len()]));

    let mut out = Cursor::new(Vec::new());
    doc.build().pack(&mut out).map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(out.into_inner())
}
