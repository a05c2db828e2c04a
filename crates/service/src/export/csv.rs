use csv::{Terminator, WriterBuilder};
use models::valve;

use super::{row_cells, ExportError, HEADERS};

/// Comma-separated table, CRLF line endings, quoting only where needed.
pub fn render(valves: &[valve::Model]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(HEADERS).map_err(|e| ExportError::Csv(e.to_string()))?;
    for v in valves {
        writer.write_record(row_cells(v)).map_err(|e| ExportError::Csv(e.to_string()))?;
    }
    writer.into_inner().map_err(|e| ExportError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_valves;

    fn parse(bytes: &[u8]) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn header_plus_one_row_per_valve() {
        let valves = sample_valves();
        let rows = parse(&render(&valves).unwrap());
        assert_eq!(rows.len(), valves.len() + 1);
        assert_eq!(rows[0], HEADERS);
        for (row, v) in rows[1..].iter().zip(&valves) {
            assert_eq!(row, &row_cells(v));
        }
    }

    #[test]
    fn commas_and_quotes_are_quoted() {
        let text = String::from_utf8(render(&sample_valves()).unwrap()).unwrap();
        assert!(text.starts_with("ID,Nome,Descrição,Tipo,Vazão\r\n"));
        assert!(text.contains("1,V1,desc,gate,12.5\r\n"));
        assert!(text.contains("2,\"Válvula, esfera\",\"Linha \"\"A\"\"\",ball,3.0\r\n"));
    }

    #[test]
    fn empty_table_is_header_only() {
        let rows = parse(&render(&[]).unwrap());
        assert_eq!(rows, vec![HEADERS.map(String::from).to_vec()]);
    }
}
