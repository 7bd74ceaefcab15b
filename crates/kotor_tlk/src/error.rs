//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(binrw::Error),

    /// Transparent wrapper for [`quick_xml::Error`]
    #[cfg(feature = "xml")]
    #[error(transparent)]
    XmlError(#[from] quick_xml::Error),

    /// Transparent wrapper for [`serde_json::Error`]
    #[cfg(feature = "serde")]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// File does not start with the `TLK V3.0` signature
    #[error("file is an invalid talk table")]
    #[diagnostic(help("talk tables start with the 8 byte signature \"TLK V3.0\""))]
    InvalidSignature,

    /// A sound resref longer than 16 bytes
    #[error("sound resref {0:?} is longer than 16 bytes")]
    ResRefTooLong(String),

    /// The table does not fit in the 32 bit offsets of the format
    #[error("talk table is too large to be written")]
    TooLarge,

    /// A JSON or XML document that does not describe a table
    #[error("invalid talk table document: {0}")]
    InvalidDocument(String),
}

impl From<binrw::Error> for Error {
    fn from(value: binrw::Error) -> Self {
        match value {
            binrw::Error::Io(err) => Error::IOError(err),
            binrw::Error::BadMagic { .. } => Error::InvalidSignature,
            binrw::Error::Backtrace(backtrace) => Error::from(*backtrace.error),
            other => Error::BinRWError(other),
        }
    }
}

#[cfg(feature = "xml")]
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(value: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlError(value.into())
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
