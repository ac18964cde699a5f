//! nm record parsing
//!
//! A record is one line of `go tool nm -size` output:
//!
//! ```text
//!  113b3e0        208 T crypto/cipher.xorBytes
//!  address       size kind name
//! ```

use std::num::ParseIntError;

use thiserror::Error;

use super::tokenizer::tokenize;

/// Minimum number of fields a usable record carries
pub const MIN_FIELDS: usize = 4;

/// Symbol kind letter as printed by nm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// `T` text (code) segment symbol
    Text,
    /// `t` static text segment symbol
    StaticText,
    /// `R` read-only data segment symbol
    ReadOnly,
    /// `r` static read-only data segment symbol
    StaticReadOnly,
    /// `D` data segment symbol
    Data,
    /// `d` static data segment symbol
    StaticData,
    /// `B` bss segment symbol
    Bss,
    /// `b` static bss segment symbol
    StaticBss,
    /// `C` constant address
    Constant,
    /// `U` referenced but undefined symbol
    Undefined,
    /// Anything else
    Other,
}

impl SymbolKind {
    /// Classify a kind token
    pub fn from_token(token: &str) -> Self {
        match token {
            "T" => Self::Text,
            "t" => Self::StaticText,
            "R" => Self::ReadOnly,
            "r" => Self::StaticReadOnly,
            "D" => Self::Data,
            "d" => Self::StaticData,
            "B" => Self::Bss,
            "b" => Self::StaticBss,
            "C" => Self::Constant,
            "U" => Self::Undefined,
            _ => Self::Other,
        }
    }

    /// Undefined symbols have no size attribution
    pub fn is_undefined(self) -> bool {
        self == Self::Undefined
    }
}

/// One parsed nm record, borrowing from its line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord<'a> {
    /// Symbol size in bytes
    pub size_bytes: u64,
    /// Kind letter
    pub kind: SymbolKind,
    /// Fully-qualified symbol name
    pub name: &'a str,
}

/// Why a line did not yield a record
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// Too few fields to be a sized symbol
    #[error("expected at least 4 fields, found {0}")]
    Malformed(usize),

    /// The size column is not a decimal integer
    #[error("invalid size {token:?} for symbol {name}")]
    InvalidSize {
        /// Symbol name from the same line
        name: String,
        /// Offending size token
        token: String,
        #[source]
        /// Integer parse error
        source: ParseIntError,
    },
}

/// Parse one nm line into a [`SymbolRecord`]
///
/// # Examples
///
/// ```
/// use gosize::analyzer::{parse_record, SymbolKind};
///
/// let record = parse_record("16b9450         16 R crypto.statictmp_0").unwrap();
/// assert_eq!(record.size_bytes, 16);
/// assert_eq!(record.kind, SymbolKind::ReadOnly);
/// assert_eq!(record.name, "crypto.statictmp_0");
/// ```
pub fn parse_record(line: &str) -> Result<SymbolRecord<'_>, RecordError> {
    let fields = tokenize(line);
    if fields.len() < MIN_FIELDS {
        return Err(RecordError::Malformed(fields.len()));
    }

    let name = fields[3];
    let size_bytes = fields[1]
        .parse::<u64>()
        .map_err(|source| RecordError::InvalidSize {
            name: name.to_string(),
            token: fields[1].to_string(),
            source,
        })?;

    Ok(SymbolRecord {
        size_bytes,
        kind: SymbolKind::from_token(fields[2]),
        name,
    })
}

/// True when the line describes an undefined (`U`) symbol.
///
/// Undefined entries may omit the address column, so the kind letter is
/// looked for among the leading fields rather than at a fixed index.
pub fn is_undefined_line(line: &str) -> bool {
    line.split_whitespace()
        .take(MIN_FIELDS - 1)
        .any(|field| SymbolKind::from_token(field).is_undefined())
}
