//! Structured (de)serialization of talk tables
//!
//! A table is represented as a sequence of `{index, text, soundResRef}`
//! records in strref order.

use serde::{de, ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};
use std::io::{Read, Write};

use crate::error::Result;
use crate::table::{IndexedString, TalkTable};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexedStringRef<'a> {
    index: usize,
    text: &'a str,
    sound_res_ref: &'a str,
}

impl Serialize for TalkTable {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (index, string) in self.iter().enumerate() {
            seq.serialize_element(&IndexedStringRef {
                index,
                text: &string.text,
                sound_res_ref: &string.sound_res_ref,
            })?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for TalkTable {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings = Vec::<IndexedString>::deserialize(deserializer)?;
        TalkTable::from_indexed(strings).map_err(de::Error::custom)
    }
}

/// Write `table` as pretty printed JSON
pub fn to_json_writer(table: &TalkTable, writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}

/// Read a table from JSON
pub fn from_json_reader(reader: impl Read) -> Result<TalkTable> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::error::Result;
    use crate::table::{TalkString, TalkTable};

    #[test]
    fn serialize_table() -> Result<()> {
        let table = TalkTable::new(vec![
            TalkString::new("John", ""),
            TalkString::new("Jane", "jane"),
        ]);

        assert_eq!(
            serde_json::to_value(&table)?,
            json!([
                { "index": 0, "text": "John", "soundResRef": "" },
                { "index": 1, "text": "Jane", "soundResRef": "jane" },
            ])
        );

        Ok(())
    }

    #[test]
    fn deserialize_table_out_of_order() -> Result<()> {
        let table: TalkTable = serde_json::from_value(json!([
            { "index": 1, "text": "Jane", "soundResRef": "JANE" },
            { "index": 0, "text": "John" },
        ]))?;

        assert_eq!(
            table,
            TalkTable::new(vec![
                TalkString::new("John", ""),
                TalkString::new("Jane", "jane"),
            ])
        );

        Ok(())
    }

    #[test]
    fn deserialize_table_with_gap() {
        let table = serde_json::from_value::<TalkTable>(json!([
            { "index": 0, "text": "John" },
            { "index": 2, "text": "Jane" },
        ]));

        assert!(table.is_err());
    }

    #[test]
    fn deserialize_table_with_duplicate() {
        let table = serde_json::from_value::<TalkTable>(json!([
            { "index": 0, "text": "John" },
            { "index": 0, "text": "Jane" },
        ]));

        assert!(table.is_err());
    }

    #[test]
    fn deserialize_table_with_long_res_ref() {
        let table = serde_json::from_value::<TalkTable>(json!([
            { "index": 0, "text": "John", "soundResRef": "seventeen_chars_x" },
        ]));

        assert!(table.is_err());
    }
}
