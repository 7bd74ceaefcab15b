//! In-memory talk table
//!

use derive_more::derive::{Deref, Display, IntoIterator};

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::RES_REF_SIZE;

/// A single localized string
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Display)]
#[display("{text}")]
pub struct TalkString {
    /// The localized text, may be empty
    pub text: String,

    /// Lower-cased name of the sound played with the text, may be empty
    pub sound_res_ref: String,
}

impl TalkString {
    /// Create a string, lower-casing the ASCII letters of the sound resref.
    pub fn new(text: impl Into<String>, sound_res_ref: impl AsRef<str>) -> Self {
        Self {
            text: text.into(),
            sound_res_ref: sound_res_ref.as_ref().to_ascii_lowercase(),
        }
    }
}

/// The localized strings of one game installation, addressed by strref.
///
/// The position of an entry is its strref. Tables are never modified once
/// built, share them with an [`std::sync::Arc`] and rebuild on edit.
///
/// ```
/// use kotor_tlk::table::TalkTableBuilder;
///
/// # fn doit() -> kotor_tlk::error::Result<()> {
/// let mut builder = TalkTableBuilder::new();
/// builder.push("John", "")?;
/// let strref = builder.push("Jane", "JANE")?;
///
/// let table = builder.build();
/// assert_eq!(table.get_string(strref).sound_res_ref, "jane");
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deref, IntoIterator)]
pub struct TalkTable {
    #[deref]
    #[into_iterator(owned, ref)]
    entries: Vec<TalkString>,

    language_id: u32,
}

impl TalkTable {
    /// Create a table from entries in strref order.
    pub fn new(entries: Vec<TalkString>) -> Self {
        Self::with_language(entries, 0)
    }

    /// Create a table from entries in strref order, tagged with a language.
    pub fn with_language(entries: Vec<TalkString>, language_id: u32) -> Self {
        Self {
            entries,
            language_id,
        }
    }

    /// The language id this table was read with
    pub fn language_id(&self) -> u32 {
        self.language_id
    }

    /// Look up a string by strref.
    ///
    /// # Panics
    ///
    /// Panics if `strref` is out of range.
    pub fn get_string(&self, strref: usize) -> &TalkString {
        &self.entries[strref]
    }

    /// Unwrap the entries of this table
    pub fn into_inner(self) -> Vec<TalkString> {
        self.entries
    }
}

/// A talk table entry together with its strref, as found in exported documents
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct IndexedString {
    /// Strref of the entry
    pub index: usize,

    /// The localized text
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: String,

    /// Name of the sound played with the text
    #[cfg_attr(feature = "serde", serde(default))]
    pub sound_res_ref: String,
}

impl TalkTable {
    /// Order `strings` by index into a table.
    ///
    /// The indices must cover `0..strings.len()` exactly once and every sound
    /// resref must fit in 16 bytes.
    pub fn from_indexed(mut strings: Vec<IndexedString>) -> Result<TalkTable> {
        strings.sort_by_key(|s| s.index);

        strings
            .into_iter()
            .enumerate()
            .map(|(expected, string)| {
                if string.index != expected {
                    return Err(Error::InvalidDocument(format!(
                        "expected an entry with index {}, found {}",
                        expected, string.index
                    )));
                }
                if string.sound_res_ref.len() > RES_REF_SIZE {
                    return Err(Error::ResRefTooLong(string.sound_res_ref));
                }
                Ok(TalkString::new(string.text, string.sound_res_ref))
            })
            .collect()
    }
}

impl FromIterator<TalkString> for TalkTable {
    fn from_iter<T: IntoIterator<Item = TalkString>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Accumulates strings before freezing them into a [`TalkTable`]
#[derive(Debug, Default, Clone)]
pub struct TalkTableBuilder {
    entries: Vec<TalkString>,
    language_id: u32,
}

impl TalkTableBuilder {
    /// An empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag the table with a language id
    pub fn language_id(mut self, language_id: u32) -> Self {
        self.language_id = language_id;
        self
    }

    /// Append a string, returning its strref.
    pub fn push(
        &mut self,
        text: impl Into<String>,
        sound_res_ref: impl AsRef<str>,
    ) -> Result<usize> {
        let sound_res_ref = sound_res_ref.as_ref();
        if sound_res_ref.len() > RES_REF_SIZE {
            return Err(Error::ResRefTooLong(sound_res_ref.to_owned()));
        }

        self.entries.push(TalkString::new(text, sound_res_ref));
        Ok(self.entries.len() - 1)
    }

    /// Number of strings pushed so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no strings have been pushed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the accumulated strings
    pub fn build(self) -> TalkTable {
        TalkTable::with_language(self.entries, self.language_id)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::thread;

    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::table::{IndexedString, TalkString, TalkTable, TalkTableBuilder};

    #[test]
    fn builder_assigns_strrefs_in_order() -> Result<()> {
        let mut builder = TalkTableBuilder::new().language_id(2);
        assert_eq!(builder.push("John", "")?, 0);
        assert_eq!(builder.push("Jane", "Jane")?, 1);
        assert_eq!(builder.push("John", "")?, 2);

        let table = builder.build();
        assert_eq!(table.len(), 3);
        assert_eq!(table.language_id(), 2);
        assert_eq!(table.get_string(1), &TalkString::new("Jane", "jane"));
        assert_eq!(table[0], table[2]);

        Ok(())
    }

    #[test]
    fn builder_rejects_long_res_ref() {
        let mut builder = TalkTableBuilder::new();
        let result = builder.push("text", "seventeen_chars_x");
        assert!(matches!(result, Err(Error::ResRefTooLong(_))));
        assert!(builder.is_empty());

        assert!(builder.push("text", "sixteen_chars_xx").is_ok());
    }

    #[test]
    fn builder_keeps_res_ref_length() -> Result<()> {
        let res_ref = "İ".repeat(8);
        assert_eq!(res_ref.len(), 16);

        let mut builder = TalkTableBuilder::new();
        let strref = builder.push("x", &res_ref)?;
        assert_eq!(builder.push("y", "İİİİİİİJ")?, 1);

        let table = builder.build();
        assert_eq!(table.get_string(strref).sound_res_ref, res_ref);
        assert_eq!(table.get_string(1).sound_res_ref, "İİİİİİİj");

        Ok(())
    }

    #[test]
    fn get_returns_none_out_of_range() {
        let table = TalkTable::new(vec![TalkString::new("John", "")]);
        assert!(table.get(0).is_some());
        assert!(table.get(1).is_none());
    }

    #[test]
    #[should_panic]
    fn get_string_panics_out_of_range() {
        let table = TalkTable::default();
        table.get_string(0);
    }

    #[test]
    fn iterates_in_strref_order() {
        let table: TalkTable = ["a", "b", "c"]
            .into_iter()
            .map(|t| TalkString::new(t, ""))
            .collect();

        let texts = (&table)
            .into_iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(table.to_vec()[1].to_string(), "b");
    }

    fn indexed(index: usize, text: &str, sound_res_ref: &str) -> IndexedString {
        IndexedString {
            index,
            text: text.into(),
            sound_res_ref: sound_res_ref.into(),
        }
    }

    #[test]
    fn from_indexed_orders_by_index() -> Result<()> {
        let table = TalkTable::from_indexed(vec![
            indexed(2, "c", ""),
            indexed(0, "a", "A"),
            indexed(1, "b", ""),
        ])?;

        assert_eq!(
            table,
            TalkTable::new(vec![
                TalkString::new("a", "a"),
                TalkString::new("b", ""),
                TalkString::new("c", ""),
            ])
        );

        Ok(())
    }

    #[test]
    fn from_indexed_rejects_gaps_and_duplicates() {
        let gap = TalkTable::from_indexed(vec![indexed(0, "a", ""), indexed(2, "c", "")]);
        assert!(matches!(gap, Err(Error::InvalidDocument(_))));

        let duplicate = TalkTable::from_indexed(vec![indexed(0, "a", ""), indexed(0, "b", "")]);
        assert!(matches!(duplicate, Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn shared_between_threads() {
        let table = Arc::new(TalkTable::new(vec![TalkString::new("John", "")]));

        let handles = (0..4)
            .map(|_| {
                let table = Arc::clone(&table);
                thread::spawn(move || table.get_string(0).text.clone())
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "John");
        }
    }
}
