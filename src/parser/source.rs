//! Input bytes and text decoding.

use std::borrow::Cow;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// The bytes of one imported file, read once and shared by every strategy.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    bytes: Vec<u8>,
}

impl SourceFile {
    /// Wraps in-memory content.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Reads a file from disk.
    ///
    /// A missing file is [`EngineError::FileNotFound`]; any other I/O error
    /// is returned as the inner `Err` so the caller can degrade instead.
    pub fn read(path: &Path) -> EngineResult<Result<Self, std::io::Error>> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(Ok(Self::from_bytes(path.display().to_string(), bytes))),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(EngineError::FileNotFound {
                path: path.display().to_string(),
            }),
            Err(err) => Ok(Err(err)),
        }
    }

    /// Display name (usually the path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content decoded as text.
    ///
    /// Honors UTF-16 byte-order marks, which some time-clock tools write,
    /// strips a UTF-8 BOM and otherwise decodes UTF-8 lossily.
    pub fn text(&self) -> Cow<'_, str> {
        decode_text(&self.bytes)
    }
}

fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match bytes {
        [0xFF, 0xFE, rest @ ..] => Cow::Owned(decode_utf16(rest, u16::from_le_bytes)),
        [0xFE, 0xFF, rest @ ..] => Cow::Owned(decode_utf16(rest, u16::from_be_bytes)),
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest),
        _ => String::from_utf8_lossy(bytes),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
