//! Types for reading TLK talk tables
//!

use binrw::BinRead;
use std::io::{Read, Seek, SeekFrom};
use tracing::{debug, instrument, trace};

use crate::{
    error::Result,
    table::{TalkString, TalkTable},
    types::{EntryFlags, TlkEntry, TlkHeader},
};

/// TLK file reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_strings(reader: impl Read + Seek) -> kotor_tlk::error::Result<()> {
///     let tlk = kotor_tlk::TlkReader::new(reader).load()?;
///
///     for (strref, string) in tlk.iter().enumerate() {
///         println!("{}: {}", strref, string);
///     }
///
///     Ok(())
/// }
/// ```
pub struct TlkReader<R> {
    reader: R,
}

impl<R: Read + Seek> TlkReader<R> {
    /// Wrap an input stream positioned at the start of a TLK file.
    pub fn new(reader: R) -> TlkReader<R> {
        TlkReader { reader }
    }

    /// Read the whole talk table.
    ///
    /// Fails without producing a table when the signature is wrong or the
    /// stream ends early.
    #[instrument(skip(self), err)]
    pub fn load(&mut self) -> Result<TalkTable> {
        let header = TlkHeader::read(&mut self.reader)?;
        debug!(
            language_id = header.language_id,
            string_count = header.string_count,
            strings_offset = header.strings_offset,
            "read header"
        );

        let entries = (0..header.string_count)
            .map(|_| TlkEntry::read(&mut self.reader))
            .collect::<binrw::BinResult<Vec<_>>>()?;

        let strings = entries
            .iter()
            .enumerate()
            .map(|(strref, entry)| {
                trace!(strref, flags = entry.flags.0, "reading entry");
                self.read_string(&header, entry)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TalkTable::with_language(strings, header.language_id))
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_string(&mut self, header: &TlkHeader, entry: &TlkEntry) -> Result<TalkString> {
        let text = if entry.flags.contains(EntryFlags::TEXT_PRESENT) && entry.string_size > 0 {
            let start = header.strings_offset as u64 + entry.offset_to_string as u64;
            self.reader.seek(SeekFrom::Start(start))?;

            let mut buffer = vec![0u8; entry.string_size as usize];
            self.reader.read_exact(&mut buffer)?;
            String::from_utf8_lossy(&buffer).into_owned()
        } else {
            String::new()
        };

        let sound_res_ref = if entry.flags.contains(EntryFlags::SOUND_PRESENT) {
            entry.sound_res_ref()
        } else {
            String::new()
        };

        Ok(TalkString {
            text,
            sound_res_ref,
        })
    }
}
