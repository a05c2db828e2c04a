use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use models::valve;

use super::{row_cells, ExportError, HEADERS};

const SHEET_NAME: &str = "Sheet";
const HEADER_FILL: u32 = 0xDDDDDD;
const WIDTH_PADDING: usize = 2;

fn xlsx_err(e: XlsxError) -> ExportError {
    ExportError::Xlsx(e.to_string())
}

/// Column widths in characters: longest stringified cell (header included) plus padding.
pub fn column_widths(valves: &[valve::Model]) -> [usize; 5] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for v in valves {
        for (w, cell) in widths.iter_mut().zip(row_cells(v)) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths.map(|w| w + WIDTH_PADDING)
}

fn write_table(sheet: &mut Worksheet, valves: &[valve::Model]) -> Result<(), XlsxError> {
    let header = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border_bottom(FormatBorder::Thin);
    let body = Format::new()
        .set_border_top(FormatBorder::Thin)
        .set_border_bottom(FormatBorder::Thin);

    sheet.set_name(SHEET_NAME)?;
    for (col, title) in (0u16..).zip(HEADERS) {
        sheet.write_string_with_format(0, col, title, &header)?;
    }
    for (row, v) in (1u32..).zip(valves) {
        sheet.write_number_with_format(row, 0, v.id, &body)?;
        sheet.write_string_with_format(row, 1, &v.nome, &body)?;
        sheet.write_string_with_format(row, 2, &v.descricao, &body)?;
        sheet.write_string_with_format(row, 3, &v.tipo, &body)?;
        sheet.write_number_with_format(row, 4, v.vazao, &body)?;
    }
    for (col, width) in (0u16..).zip(column_widths(valves)) {
        sheet.set_column_width(col, width as f64)?;
    }
    Ok(())
}

/// Single-sheet workbook: styled header, bordered body, `id`/`vazao` as numbers.
pub fn render(valves: &[valve::Model]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    write_table(workbook.add_worksheet(), valves).map_err(xlsx_err)?;
    workbook.save_to_buffer().map_err(xlsx_err)
}
