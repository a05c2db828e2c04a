use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use models::valve;

use super::{format_vazao, ExportError};

const INDENT: usize = 4;

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ExportError> {
    writer.write_event(event).map_err(|e| ExportError::Xml(e.to_string()))
}

/// Scalar child element; text content is escaped.
fn write_field(writer: &mut Writer<Vec<u8>>, name: &str, value: &str) -> Result<(), ExportError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(value)))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

/// `<valves>` root with one `<valve>` per row and children `id, nome, descricao, tipo, vazao`.
pub fn render(valves: &[valve::Model]) -> Result<Vec<u8>, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write(&mut writer, Event::Start(BytesStart::new("valves")))?;
    for v in valves {
        write(&mut writer, Event::Start(BytesStart::new("valve")))?;
        write_field(&mut writer, "id", &v.id.to_string())?;
        write_field(&mut writer, "nome", &v.nome)?;
        write_field(&mut writer, "descricao", &v.descricao)?;
        write_field(&mut writer, "tipo", &v.tipo)?;
        write_field(&mut writer, "vazao", &format_vazao(v.vazao))?;
        write(&mut writer, Event::End(BytesEnd::new("valve")))?;
    }
    write(&mut writer, Event::End(BytesEnd::new("valves")))?;
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_valves;

    fn render_str(valves: &[valve::Model]) -> String {
        String::from_utf8(render(valves).unwrap()).unwrap()
    }

    #[test]
    fn one_valve_element_per_row() {
        let valves = sample_valves();
        let xml = render_str(&valves);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert_eq!(xml.matches("<valve>").count(), valves.len());
        assert!(xml.contains("<valves>"));
        assert!(xml.trim_end().ends_with("</valves>"));
        assert!(xml.contains("        <id>1</id>\n        <nome>V1</nome>"));
        assert!(xml.contains("<vazao>12.5</vazao>"));
        assert!(xml.contains("<vazao>3.0</vazao>"));
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let xml = render_str(&sample_valves());
        assert!(xml.contains("<nome>R&amp;D &lt;test&gt;</nome>"));
        assert!(!xml.contains("R&D"));
    }

    #[test]
    fn output_parses_back() {
        use quick_xml::events::Event as Ev;
        use quick_xml::Reader;

        let valves = sample_valves();
        let xml = render_str(&valves);
        let mut reader = Reader::from_str(&xml);
        let mut names = Vec::new();
        let mut in_nome = false;
        loop {
            match reader.read_event().unwrap() {
                Ev::Start(e) if e.name().as_ref() == b"nome" => in_nome = true,
                Ev::Text(t) if in_nome => {
                    names.push(t.unescape().unwrap().into_owned());
                    in_nome = false;
                }
                Ev::Eof => break,
                _ => {}
            }
        }
        let expected: Vec<_> = valves.iter().map(|v| v.nome.clone()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn empty_table_has_root_only() {
        let xml = render_str(&[]);
        assert!(xml.contains("<valves>"));
        assert!(xml.contains("</valves>"));
        assert!(!xml.contains("<valve>"));
    }
}
