//! This library handles reading from and creating **TLK** talk tables used by
//! *Star Wars: Knights of the Old Republic* and other Aurora engine games.
//!
//! # TLK Format Documentation
//!
//! A talk table holds every localized string of a game installation. Other
//! resources refer to a string by its position in the table, its *strref*.
//! TLK files are typically identified with the `.tlk` extension, the main
//! table of a game being `dialog.tlk`.
//!
//! ## File Structure
//!
//! A TLK file consists of a header, followed by a fixed size entry for every string, and the string data.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Signature              | 8 bytes: "TLK V3.0"                                        |
//! | 0x0008         | Language ID            | 4 bytes: Language of the strings                           |
//! | 0x000C         | String Count           | 4 bytes: Number of entries in the file                     |
//! | 0x0010         | Strings Offset         | 4 bytes: Offset to the string data                         |
//!
//! ### Header
//!
//! - **Signature**: The 8 ASCII characters `TLK V3.0`, without a terminator.
//! - **Language ID**: A 4-byte unsigned integer identifying the language. It is read but not interpreted.
//! - **String Count**: A 4-byte unsigned integer indicating the number of entries in the file.
//! - **Strings Offset**: A 4-byte unsigned integer specifying the offset from the beginning of the file
//!   to the string data. Files written by this library place it right after the entries, at `20 + 40 * count`.
//!
//! ### Entries
//!
//! After the header, the TLK file contains one 40 byte entry per string, in strref order.
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Flags                  | 4 bytes: Which values of the entry are present          |
//! | 0x0004         | Sound ResRef           | 16 bytes: Name of the sound, NUL padded                 |
//! | 0x0014         | Volume Variance        | 4 bytes: Unused                                         |
//! | 0x0018         | Pitch Variance         | 4 bytes: Unused                                         |
//! | 0x001C         | Offset To String       | 4 bytes: Offset of the text within the string data      |
//! | 0x0020         | String Size            | 4 bytes: Length of the text in bytes                    |
//! | 0x0024         | Sound Length           | 4 bytes: Duration of the sound as a float               |
//!
//! - **Flags**: A bit set where
//!   - `0x1`: the text is present
//!   - `0x2`: the sound resref is present
//!   - `0x4`: the sound length is present
//!
//!   Every field is always stored. A cleared flag only means the value is to be ignored.
//! - **Sound ResRef**: Resource names are case insensitive and have their ASCII letters lower-cased when read.
//!
//! ### String Data
//!
//! The text of every entry is stored at `Strings Offset + Offset To String`, **String Size** bytes long
//! and without terminator. Entries are not required to be stored in order.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.tlk`
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod error;
pub mod read;
#[cfg(feature = "serde")]
pub mod serde;
pub mod table;
pub mod types;
pub mod write;
#[cfg(feature = "xml")]
pub mod xml;

pub use read::TlkReader;
pub use table::{TalkString, TalkTable};
pub use write::TlkWriter;
