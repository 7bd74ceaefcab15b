//! XML export and import of talk tables
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <tlk>
//!     <string index="0" soundResRef="">John</string>
//!     <string index="1" soundResRef="jane">Jane</string>
//! </tlk>
//! ```

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};
use crate::table::{IndexedString, TalkTable};

const ROOT: &[u8] = b"tlk";
const STRING: &[u8] = b"string";

/// Convert a table to an XML document
pub fn to_xml(table: &TalkTable) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("tlk")))?;

    for (index, string) in table.iter().enumerate() {
        let mut element = BytesStart::new("string");
        element.push_attribute(("index", index.to_string().as_str()));
        element.push_attribute(("soundResRef", string.sound_res_ref.as_str()));

        if string.text.is_empty() {
            writer.write_event(Event::Empty(element))?;
        } else {
            writer.write_event(Event::Start(element.borrow()))?;
            writer.write_event(Event::Text(BytesText::new(&string.text)))?;
            writer.write_event(Event::End(BytesEnd::new("string")))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("tlk")))?;

    let mut xml = String::from_utf8(output)
        .map_err(|e| Error::InvalidDocument(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

fn parse_string_element(element: &BytesStart) -> Result<IndexedString> {
    let mut index = None;
    let mut sound_res_ref = String::new();

    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"index" => {
                index = Some(value.parse::<usize>().map_err(|_| {
                    Error::InvalidDocument(format!("invalid index {:?}", value))
                })?);
            }
            b"soundResRef" => sound_res_ref = value.into_owned(),
            _ => {}
        }
    }

    Ok(IndexedString {
        index: index
            .ok_or_else(|| Error::InvalidDocument("string element without an index".into()))?,
        text: String::new(),
        sound_res_ref,
    })
}

fn misplaced_string() -> Error {
    Error::InvalidDocument("string element outside of the tlk root element".into())
}

/// Parse a table from an XML document
pub fn from_xml(content: &str) -> Result<TalkTable> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(false);

    let mut strings = Vec::new();
    let mut current: Option<IndexedString> = None;
    let mut seen_root = false;
    let mut in_root = false;
    // Number of open elements, the root sits at depth 1
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                let name = e.name();
                if depth == 1 && name.as_ref() == ROOT {
                    seen_root = true;
                    in_root = true;
                } else if name.as_ref() == STRING {
                    if !in_root || depth != 2 {
                        return Err(misplaced_string());
                    }
                    current = Some(parse_string_element(&e)?);
                }
            }
            Event::Empty(e) => {
                let name = e.name();
                if depth == 0 && name.as_ref() == ROOT {
                    seen_root = true;
                } else if name.as_ref() == STRING {
                    if !in_root || depth != 1 {
                        return Err(misplaced_string());
                    }
                    strings.push(parse_string_element(&e)?);
                }
            }
            Event::Text(e) => {
                if let Some(string) = current.as_mut() {
                    string.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(string) = current.as_mut() {
                    string.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => {
                if depth == 2 && e.name().as_ref() == STRING {
                    if let Some(string) = current.take() {
                        strings.push(string);
                    }
                } else if depth == 1 {
                    in_root = false;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(Error::InvalidDocument("missing tlk root element".into()));
    }

    TalkTable::from_indexed(strings)
}

#[cfg(test)]
mod test {
    use pretty_assertions::{assert_eq, assert_str_eq};

    use crate::error::{Error, Result};
    use crate::table::{TalkString, TalkTable};
    use crate::xml::{from_xml, to_xml};

    #[test]
    fn write_xml() -> Result<()> {
        let table = TalkTable::new(vec![
            TalkString::new("John & <Jane>", ""),
            TalkString::new("", "jane"),
        ]);

        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<tlk>\n",
            "\t<string index=\"0\" soundResRef=\"\">John &amp; &lt;Jane&gt;</string>\n",
            "\t<string index=\"1\" soundResRef=\"jane\"/>\n",
            "</tlk>\n",
        );

        assert_str_eq!(to_xml(&table)?, expected);

        Ok(())
    }

    #[test]
    fn read_xml() -> Result<()> {
        let content = concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<tlk>\n",
            "\t<string index=\"1\" soundResRef=\"JANE\"> Jane </string>\n",
            "\t<string index=\"0\">John &amp; co</string>\n",
            "\t<string index=\"2\" soundResRef=\"\"/>\n",
            "</tlk>\n",
        );

        let table = from_xml(content)?;
        assert_eq!(
            table,
            TalkTable::new(vec![
                TalkString::new("John & co", ""),
                TalkString::new(" Jane ", "jane"),
                TalkString::new("", ""),
            ])
        );

        Ok(())
    }

    #[test]
    fn read_xml_without_root() {
        let table = from_xml("<strings><string index=\"0\">John</string></strings>");
        assert!(matches!(table, Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn read_xml_with_strings_outside_root() {
        let before = from_xml("<string index=\"0\">John</string><tlk/>");
        assert!(matches!(before, Err(Error::InvalidDocument(_))));

        let after = from_xml("<tlk></tlk><string index=\"0\"/>");
        assert!(matches!(after, Err(Error::InvalidDocument(_))));

        let nested = from_xml("<tlk><group><string index=\"0\">John</string></group></tlk>");
        assert!(matches!(nested, Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn read_empty_root() -> Result<()> {
        assert!(from_xml("<?xml version=\"1.0\"?><tlk/>")?.is_empty());
        Ok(())
    }

    #[test]
    fn read_xml_without_index() {
        let table = from_xml("<tlk><string>John</string></tlk>");
        assert!(matches!(table, Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn read_xml_with_gap() {
        let table = from_xml("<tlk><string index=\"1\">John</string></tlk>");
        assert!(matches!(table, Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn xml_round_trip() -> Result<()> {
        let table = TalkTable::new(vec![
            TalkString::new("Line one\nLine two", ""),
            TalkString::new("\"Quoted\" 'text'", "n_quote"),
        ]);

        assert_eq!(from_xml(&to_xml(&table)?)?, table);

        Ok(())
    }
}
