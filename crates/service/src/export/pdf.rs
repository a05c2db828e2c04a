//! Landscape-letter PDF with a single centred table.
//!
//! Builtin Helvetica carries no glyph metrics, so cell widths are estimated
//! from an average glyph width. Rows that do not fit on one page continue on
//! the next one with the header repeated.
//!
//! The builtin fonts are WinAnsi-encoded: Latin-1 text renders, anything
//! outside that set (CJK, Greek, ...) is left out of the page.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect, Rgb,
};
use models::valve;
use tracing::warn;

use super::{row_cells, ExportError, HEADERS};

pub const PAGE_WIDTH_MM: f32 = 279.4;
pub const PAGE_HEIGHT_MM: f32 = 215.9;
const MARGIN_MM: f32 = 25.4;
const PT_TO_MM: f32 = 0.352_778;

const FONT_SIZE_PT: f32 = 10.0;
const LEADING_PT: f32 = 12.0;
const PAD_X_PT: f32 = 6.0;
const PAD_TOP_PT: f32 = 3.0;
const PAD_BOTTOM_PT: f32 = 3.0;
const HEADER_PAD_BOTTOM_PT: f32 = 12.0;
const GRID_PT: f32 = 1.0;
// average advance of a Helvetica glyph, as a fraction of the font size
const GLYPH_EM: f32 = 0.52;
const BOLD_GLYPH_EM: f32 = 0.58;

/// Latin-1 plus the typographic marks WinAnsi places in 0x80..0x9F.
fn winansi_encodable(c: char) -> bool {
    matches!(c, '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}') || "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ".contains(c)
}

/// Characters of `text` the builtin fonts cannot draw.
pub fn unencodable_chars(text: &str) -> usize {
    text.chars().filter(|&c| !winansi_encodable(c)).count()
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn grey() -> Color { rgb(0.5, 0.5, 0.5) }
fn whitesmoke() -> Color { rgb(0.96, 0.96, 0.96) }
fn beige() -> Color { rgb(0.96, 0.96, 0.86) }
fn black() -> Color { rgb(0.0, 0.0, 0.0) }

fn pt(v: f32) -> f32 {
    v * PT_TO_MM
}

fn text_width_mm(text: &str, bold: bool) -> f32 {
    let em = if bold { BOLD_GLYPH_EM } else { GLYPH_EM };
    pt(text.chars().count() as f32 * FONT_SIZE_PT * em)
}

/// Geometry of the table, in millimetres from the bottom-left page corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub col_widths: [f32; 5],
    pub x0: f32,
    pub top: f32,
    pub header_height: f32,
    pub row_height: f32,
}

impl TableLayout {
    pub fn compute(rows: &[[String; 5]]) -> Self {
        let mut col_widths = HEADERS.map(|h| text_width_mm(h, true));
        for row in rows {
            for (w, cell) in col_widths.iter_mut().zip(row) {
                *w = w.max(text_width_mm(cell, false));
            }
        }
        let mut col_widths = col_widths.map(|w| w + pt(2.0 * PAD_X_PT));

        let available = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
        let total: f32 = col_widths.iter().sum();
        if total > available {
            let scale = available / total;
            col_widths = col_widths.map(|w| w * scale);
        }
        let total: f32 = col_widths.iter().sum();

        Self {
            col_widths,
            x0: MARGIN_MM + (available - total) / 2.0,
            top: PAGE_HEIGHT_MM - MARGIN_MM,
            header_height: pt(PAD_TOP_PT + LEADING_PT + HEADER_PAD_BOTTOM_PT),
            row_height: pt(PAD_TOP_PT + LEADING_PT + PAD_BOTTOM_PT),
        }
    }

    pub fn table_width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    /// Body rows that fit below the header on one page; at least one.
    pub fn rows_per_page(&self) -> usize {
        let body = PAGE_HEIGHT_MM - 2.0 * MARGIN_MM - self.header_height;
        ((body / self.row_height).floor() as usize).max(1)
    }

    pub fn page_count(&self, rows: usize) -> usize {
        rows.div_ceil(self.rows_per_page()).max(1)
    }

    fn col_x(&self, col: usize) -> f32 {
        self.x0 + self.col_widths[..col].iter().sum::<f32>()
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn fill_rect(layer: &PdfLayerReference, color: Color, x: f32, y: f32, w: f32, h: f32) {
    layer.set_fill_color(color);
    layer.add_rect(Rect::new(Mm(x), Mm(y), Mm(x + w), Mm(y + h)).with_mode(PaintMode::Fill));
}

fn stroke_line(layer: &PdfLayerReference, from: (f32, f32), to: (f32, f32)) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    });
}

/// Centre every cell of one row horizontally; `baseline` is the text baseline.
fn draw_row_text<S: AsRef<str>>(
    layer: &PdfLayerReference,
    layout: &TableLayout,
    cells: &[S],
    baseline: f32,
    font: &IndirectFontRef,
    bold: bool,
) {
    for (col, cell) in cells.iter().enumerate() {
        let text = cell.as_ref();
        let slack = (layout.col_widths[col] - text_width_mm(text, bold)).max(0.0);
        layer.use_text(text, FONT_SIZE_PT, Mm(layout.col_x(col) + slack / 2.0), Mm(baseline), font);
    }
}

fn draw_page(layer: &PdfLayerReference, layout: &TableLayout, fonts: &Fonts, rows: &[[String; 5]]) {
    let width = layout.table_width();
    let header_bottom = layout.top - layout.header_height;
    let body_height = layout.row_height * rows.len() as f32;
    let bottom = header_bottom - body_height;

    fill_rect(layer, grey(), layout.x0, header_bottom, width, layout.header_height);
    if !rows.is_empty() {
        fill_rect(layer, beige(), layout.x0, bottom, width, body_height);
    }

    layer.set_fill_color(whitesmoke());
    draw_row_text(layer, layout, &HEADERS, header_bottom + pt(HEADER_PAD_BOTTOM_PT), &fonts.bold, true);
    layer.set_fill_color(black());
    for (i, row) in rows.iter().enumerate() {
        let row_bottom = header_bottom - layout.row_height * (i + 1) as f32;
        draw_row_text(layer, layout, row, row_bottom + pt(PAD_BOTTOM_PT + 1.0), &fonts.regular, false);
    }

    layer.set_outline_color(black());
    layer.set_outline_thickness(GRID_PT);
    let mut y = layout.top;
    stroke_line(layer, (layout.x0, y), (layout.x0 + width, y));
    y = header_bottom;
    stroke_line(layer, (layout.x0, y), (layout.x0 + width, y));
    for _ in rows {
        y -= layout.row_height;
        stroke_line(layer, (layout.x0, y), (layout.x0 + width, y));
    }
    for col in 0..=HEADERS.len() {
        let x = layout.col_x(col);
        stroke_line(layer, (x, layout.top), (x, bottom));
    }
}

/// Grey header band with white bold text, beige body, full black grid, centred cells.
pub fn render(valves: &[valve::Model]) -> Result<Vec<u8>, ExportError> {
    let rows: Vec<[String; 5]> = valves.iter().map(row_cells).collect();
    let layout = TableLayout::compute(&rows);
    let dropped: usize = rows.iter().flatten().map(|cell| unencodable_chars(cell)).sum();
    if dropped > 0 {
        warn!(dropped, "characters outside WinAnsi left out of the PDF");
    }

    let (doc, page, layer) = PdfDocument::new("valves", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "table");
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ExportError::Pdf(e.to_string()))?,
    };

    let per_page = layout.rows_per_page();
    let mut chunks = rows.chunks(per_page);
    let first = chunks.next().unwrap_or(&[]);
    draw_page(&doc.get_page(page).get_layer(layer), &layout, &fonts, first);
    for chunk in chunks {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "table");
        draw_page(&doc.get_page(page).get_layer(layer), &layout, &fonts, chunk);
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_valves;

    fn rows(n: usize) -> Vec<[String; 5]> {
        (1..=n)
            .map(|i| [i.to_string(), format!("V{i}"), "desc".into(), "gate".into(), "1.0".into()])
            .collect()
    }

    #[test]
    fn renders_pdf_document() {
        let bytes = render(&sample_valves()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    /// Text operands of every `Tj`, page by page.
    fn page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
        use printpdf::lopdf::{content::Content, Document, Object};

        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        // WinAnsi matches Latin-1 for the characters used here
                        Some(Object::String(raw, _)) => Some(raw.iter().map(|&b| b as char).collect()),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    fn expected_texts(valves: &[valve::Model]) -> Vec<String> {
        let mut out: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
        out.extend(valves.iter().flat_map(row_cells));
        out
    }

    fn numbered_valves(n: i32) -> Vec<valve::Model> {
        (1..=n)
            .map(|i| valve::Model {
                id: i,
                nome: format!("V{i}"),
                descricao: "desc".into(),
                tipo: "gate".into(),
                vazao: f64::from(i),
            })
            .collect()
    }

    #[test]
    fn header_and_cells_drawn_in_row_order() {
        let valves = sample_valves();
        let pages = page_texts(&render(&valves).unwrap());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], expected_texts(&valves));
    }

    #[test]
    fn header_repeats_on_continuation_pages() {
        let one_row: Vec<[String; 5]> = numbered_valves(1).iter().map(row_cells).collect();
        let per_page = TableLayout::compute(&one_row).rows_per_page();
        let valves = numbered_valves(per_page as i32 + 3);

        let pages = page_texts(&render(&valves).unwrap());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0], expected_texts(&valves[..per_page]));
        assert_eq!(pages[1], expected_texts(&valves[per_page..]));
    }

    #[test]
    fn counts_characters_the_builtin_font_drops() {
        assert_eq!(unencodable_chars("阀门 Ω"), 3);
        assert_eq!(unencodable_chars("Válvula, esfera – “A” €"), 0);

        let mut valves = numbered_valves(1);
        valves[0].nome = "阀门 Ω".into();
        let pages = page_texts(&render(&valves).unwrap());
        assert_eq!(pages[0][6], " ");
    }

    #[test]
    fn renders_empty_table() {
        let bytes = render(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn table_is_centred_within_margins() {
        let layout = TableLayout::compute(&rows(3));
        let right = layout.x0 + layout.table_width();
        assert!(layout.x0 >= MARGIN_MM);
        assert!(right <= PAGE_WIDTH_MM - MARGIN_MM + 1e-3);
        let left_gap = layout.x0;
        let right_gap = PAGE_WIDTH_MM - right;
        assert!((left_gap - right_gap).abs() < 1e-3);
    }

    #[test]
    fn wide_cells_are_scaled_to_fit() {
        let mut r = rows(1);
        r[0][2] = "x".repeat(2000);
        let layout = TableLayout::compute(&r);
        assert!(layout.table_width() <= PAGE_WIDTH_MM - 2.0 * MARGIN_MM + 1e-3);
    }

    #[test]
    fn columns_grow_with_content() {
        let short = TableLayout::compute(&rows(1));
        let mut r = rows(1);
        r[0][1] = "a much longer valve name".into();
        let long = TableLayout::compute(&r);
        assert!(long.col_widths[1] > short.col_widths[1]);
        assert_eq!(long.col_widths[0], short.col_widths[0]);
    }

    #[test]
    fn long_tables_span_pages() {
        let layout = TableLayout::compute(&rows(1));
        let per_page = layout.rows_per_page();
        assert!(per_page > 1);
        assert_eq!(layout.page_count(0), 1);
        assert_eq!(layout.page_count(per_page), 1);
        assert_eq!(layout.page_count(per_page + 1), 2);
    }
}
