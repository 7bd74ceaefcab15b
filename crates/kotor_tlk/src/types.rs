//! Base types for structure of TLK file.

use binrw::{BinRead, BinWrite};

/// Size in bytes of the signature and [`TlkHeader`] fields
pub const HEADER_SIZE: u32 = 20;

/// Size in bytes of a single [`TlkEntry`]
pub const ENTRY_SIZE: u32 = 40;

/// Maximum length in bytes of a resource reference
pub const RES_REF_SIZE: usize = 16;

/// TLK file header
///
/// Defines the header of the TLK file which always starts with "TLK V3.0".
/// All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(magic = b"TLK V3.0", little)]
pub struct TlkHeader {
    /// Language of the strings, not interpreted
    pub language_id: u32,

    /// The number of entries stored in the file
    pub string_count: u32,

    /// The offset from the beginning of the file where the string data starts
    pub strings_offset: u32,
}

impl TlkHeader {
    /// Header for a file holding `string_count` entries, with the string data
    /// placed right after the entry table.
    pub fn new(language_id: u32, string_count: u32) -> Option<Self> {
        let strings_offset = string_count
            .checked_mul(ENTRY_SIZE)?
            .checked_add(HEADER_SIZE)?;

        Some(Self {
            language_id,
            string_count,
            strings_offset,
        })
    }
}

/// Presence bits of a [`TlkEntry`]
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct EntryFlags(pub u32);

impl EntryFlags {
    /// The entry has text in the string data block
    pub const TEXT_PRESENT: EntryFlags = EntryFlags(0x1);

    /// The entry references a sound
    pub const SOUND_PRESENT: EntryFlags = EntryFlags(0x2);

    /// The entry carries a sound length
    pub const SOUND_LENGTH_PRESENT: EntryFlags = EntryFlags(0x4);

    /// Every known bit set
    pub const ALL: EntryFlags = EntryFlags(0x7);

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: EntryFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set every bit of `other`
    pub fn insert(&mut self, other: EntryFlags) {
        self.0 |= other.0;
    }
}

/// TLK file entry
///
/// Fixed size record describing one string. Every field is always present,
/// [`EntryFlags`] only governs how they are interpreted.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct TlkEntry {
    /// Which of the optional values are meaningful
    pub flags: EntryFlags,

    /// Name of the sound played with the string, NUL padded
    pub sound_res_ref: [u8; RES_REF_SIZE],

    /// Unused by the engine
    pub volume_variance: u32,

    /// Unused by the engine
    pub pitch_variance: u32,

    /// The offset from the start of the string data for this entry's text
    pub offset_to_string: u32,

    /// The length of this entry's text in bytes
    pub string_size: u32,

    /// Duration of the sound in seconds
    pub sound_length: f32,
}

impl TlkEntry {
    /// Sound resref up to the first NUL, ASCII lower-cased
    pub fn sound_res_ref(&self) -> String {
        let end = self
            .sound_res_ref
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(RES_REF_SIZE);
        String::from_utf8_lossy(&self.sound_res_ref[..end]).to_ascii_lowercase()
    }
}

/// Pad or truncate `value` to a resref field
pub fn res_ref_bytes(value: &str) -> [u8; RES_REF_SIZE] {
    let mut buffer = [0u8; RES_REF_SIZE];
    let len = value.len().min(RES_REF_SIZE);
    buffer[..len].copy_from_slice(&value.as_bytes()[..len]);
    buffer
}
