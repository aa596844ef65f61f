//! Strict text decoding for package files.
//!
//! Decoding never falls back to a lossy conversion: bytes that are invalid
//! under the requested encoding are an error.

use std::fmt;
use std::str::FromStr;

use crate::error::{ResourceError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// UTF-8, with a leading byte order mark stripped if present
    Utf8Sig,
    Utf16Le,
    Utf16Be,
    Latin1,
}

impl TextEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode `bytes` read from `origin` (used in error messages only).
    pub fn decode(&self, bytes: &[u8], origin: &str) -> Result<String> {
        let err = || ResourceError::Encoding {
            path: origin.to_string(),
            encoding: self.label(),
        };

        match self {
            TextEncoding::Utf8 => std::str::from_utf8(bytes).map(str::to_owned).map_err(|_| err()),
            TextEncoding::Utf8Sig => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                std::str::from_utf8(bytes).map(str::to_owned).map_err(|_| err())
            }
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(err());
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| match self {
                        TextEncoding::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                        _ => u16::from_be_bytes([pair[0], pair[1]]),
                    })
                    .collect();
                String::from_utf16(&units).map_err(|_| err())
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = ResourceError;

    fn from_str(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-8-sig" | "utf8-sig" => Ok(TextEncoding::Utf8Sig),
            "utf-16le" | "utf-16-le" => Ok(TextEncoding::Utf16Le),
            "utf-16be" | "utf-16-be" => Ok(TextEncoding::Utf16Be),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            _ => Err(ResourceError::Config(format!("unsupported text encoding: {label}"))),
        }
    }
}

/// Universal newlines: `\r\n` and lone `\r` both become `\n`.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_is_strict() {
        assert_eq!(TextEncoding::Utf8.decode(b"caf\xc3\xa9", "x").unwrap(), "café");
        let err = TextEncoding::Utf8.decode(b"caf\xe9", "Packages/P/a.txt").unwrap_err();
        assert!(matches!(err, ResourceError::Encoding { encoding: "utf-8", .. }));
    }

    #[test]
    fn test_latin1_and_bom() {
        assert_eq!(TextEncoding::Latin1.decode(b"caf\xe9", "x").unwrap(), "café");
        assert_eq!(TextEncoding::Utf8Sig.decode(b"\xef\xbb\xbfhi", "x").unwrap(), "hi");
        assert_eq!(TextEncoding::Utf8Sig.decode(b"hi", "x").unwrap(), "hi");
    }

    #[test]
    fn test_utf16() {
        assert_eq!(TextEncoding::Utf16Le.decode(&[b'h', 0, b'i', 0], "x").unwrap(), "hi");
        assert_eq!(TextEncoding::Utf16Be.decode(&[0, b'h', 0, b'i'], "x").unwrap(), "hi");
        assert!(TextEncoding::Utf16Le.decode(&[b'h', 0, b'i'], "x").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("utf_16_le".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16Le);
        assert_eq!("iso-8859-1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert!("ebcdic".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n".to_string()), "a\nb\nc\n");
    }
}
