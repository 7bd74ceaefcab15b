//! Types for writing TLK talk tables
//!

use binrw::BinWrite;
use bon::Builder;
use std::io::{Cursor, Seek, Write};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::table::{TalkString, TalkTable};
use crate::types::{res_ref_bytes, EntryFlags, TlkEntry, TlkHeader};

/// How the presence flags of each entry are computed
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum FlagPolicy {
    /// Mark text, sound and sound length as present on every entry
    #[default]
    Always,

    /// Only mark the values an entry actually has
    FromContent,
}

impl FlagPolicy {
    fn flags_for(self, string: &TalkString) -> EntryFlags {
        match self {
            FlagPolicy::Always => EntryFlags::ALL,
            FlagPolicy::FromContent => {
                let mut flags = EntryFlags::default();
                if !string.text.is_empty() {
                    flags.insert(EntryFlags::TEXT_PRESENT);
                }
                if !string.sound_res_ref.is_empty() {
                    flags.insert(EntryFlags::SOUND_PRESENT);
                    flags.insert(EntryFlags::SOUND_LENGTH_PRESENT);
                }
                flags
            }
        }
    }
}

/// Options for how the TLK file should be written
#[derive(Debug, Clone, Copy, Default, Builder)]
pub struct TlkWriterOptions {
    /// The language id stored in the header
    #[builder(default)]
    pub language_id: u32,

    /// How entry flags are computed
    #[builder(default)]
    pub flags: FlagPolicy,
}

/// TLK file generator
///
/// ```
/// # fn doit() -> kotor_tlk::error::Result<()>
/// # {
/// use kotor_tlk::table::{TalkString, TalkTable};
/// use kotor_tlk::write::{TlkWriter, TlkWriterOptions};
///
/// let table = TalkTable::new(vec![TalkString::new("Hello, World!", "")]);
///
/// // We use a buffer here, though you'd normally use a `File`
/// let tlk = TlkWriter::new(std::io::Cursor::new(Vec::new()), TlkWriterOptions::default());
/// let buffer = tlk.save(&table)?.into_inner();
///
/// assert_eq!(buffer.len(), 20 + 40 + 13);
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct TlkWriter<W: Write + Seek> {
    inner: W,
    options: TlkWriterOptions,
}

impl<W: Write + Seek> TlkWriter<W> {
    /// Wrap an output stream.
    pub fn new(inner: W, options: TlkWriterOptions) -> TlkWriter<W> {
        TlkWriter { inner, options }
    }

    /// Write `table` and return the output stream.
    ///
    /// Entries and strings are assembled in memory first, so nothing is
    /// written when the table does not fit the format.
    #[instrument(skip_all, err, fields(strings = table.len()))]
    pub fn save(mut self, table: &TalkTable) -> Result<W> {
        let string_count = u32::try_from(table.len()).map_err(|_| Error::TooLarge)?;
        let header =
            TlkHeader::new(self.options.language_id, string_count).ok_or(Error::TooLarge)?;
        debug!(
            language_id = header.language_id,
            string_count = header.string_count,
            strings_offset = header.strings_offset,
            "writing header"
        );

        let mut entry_block = Cursor::new(Vec::with_capacity(table.len() * 40));
        let mut string_block = Vec::new();

        for string in table {
            let offset_to_string = u32::try_from(string_block.len()).map_err(|_| Error::TooLarge)?;
            let string_size = u32::try_from(string.text.len()).map_err(|_| Error::TooLarge)?;

            TlkEntry {
                flags: self.options.flags.flags_for(string),
                sound_res_ref: res_ref_bytes(&string.sound_res_ref),
                offset_to_string,
                string_size,
                ..Default::default()
            }
            .write(&mut entry_block)?;

            string_block.extend_from_slice(string.text.as_bytes());
        }

        if u32::try_from(string_block.len()).is_err() {
            return Err(Error::TooLarge);
        }

        header.write(&mut self.inner)?;
        self.inner.write_all(entry_block.get_ref())?;
        self.inner.write_all(&string_block)?;

        Ok(self.inner)
    }
}
