//! Schema source loading.
//!
//! Schema files exported from different tools arrive in different encodings.
//! Loading detects UTF-16 (with or without a byte order mark) and a UTF-8 BOM
//! before handing plain text to the analyzer.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::GeneratorError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// The encoding detected for a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    /// UTF-16 LE recognised by its NUL pattern rather than a BOM.
    Utf16LeNoBom,
}

/// Detects the encoding of raw schema bytes.
///
/// BOM-less input longer than 10 bytes whose second and fourth bytes are NUL
/// is taken to be UTF-16 LE, which is what ASCII text looks like in that
/// encoding.
pub fn detect_encoding(bytes: &[u8]) -> SourceEncoding {
    if bytes.starts_with(UTF16_LE_BOM) {
        SourceEncoding::Utf16Le
    } else if bytes.starts_with(UTF16_BE_BOM) {
        SourceEncoding::Utf16Be
    } else if bytes.starts_with(UTF8_BOM) {
        SourceEncoding::Utf8Bom
    } else if bytes.len() > 10 && bytes[1] == 0 && bytes[3] == 0 {
        SourceEncoding::Utf16LeNoBom
    } else {
        SourceEncoding::Utf8
    }
}

/// Decodes raw schema bytes to text.
///
/// Invalid sequences are replaced rather than rejected.
///
/// ## Examples
///
/// ```
/// use graphgen_gen::source::decode_schema;
///
/// let utf16: Vec<u8> = [0xFF, 0xFE]
///     .into_iter()
///     .chain("type A".encode_utf16().flat_map(u16::to_le_bytes))
///     .collect();
/// assert_eq!(decode_schema(&utf16), "type A");
/// assert_eq!(decode_schema(b"\xEF\xBB\xBFenum E { X }"), "enum E { X }");
/// ```
pub fn decode_schema(bytes: &[u8]) -> String {
    match detect_encoding(bytes) {
        SourceEncoding::Utf16Le => decode_utf16(&bytes[UTF16_LE_BOM.len()..], u16::from_le_bytes),
        SourceEncoding::Utf16Be => decode_utf16(&bytes[UTF16_BE_BOM.len()..], u16::from_be_bytes),
        SourceEncoding::Utf16LeNoBom => decode_utf16(bytes, u16::from_le_bytes),
        SourceEncoding::Utf8Bom => String::from_utf8_lossy(&bytes[UTF8_BOM.len()..]).into_owned(),
        SourceEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Reads and decodes a schema file.
///
/// ## Errors
///
/// - `GeneratorError::SchemaNotFound` if the path is missing or not a file
/// - `GeneratorError::SchemaRead` if the file cannot be read
pub fn load_schema(path: &Path) -> Result<String, GeneratorError> {
    if !path.is_file() {
        return Err(GeneratorError::SchemaNotFound(path.display().to_string()));
    }

    let bytes = fs::read(path).map_err(|e| GeneratorError::SchemaRead {
        path: path.display().to_string(),
        source: e,
    })?;

    let encoding = detect_encoding(&bytes);
    debug!(path = %path.display(), ?encoding, bytes = bytes.len(), "Loaded schema source");

    Ok(decode_schema(&bytes))
}
