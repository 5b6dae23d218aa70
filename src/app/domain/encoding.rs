use serde::{Deserialize, Serialize};

use crate::app::infrastructure::error::{AppError, Result};

/// Character encodings a document can be read and written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Latin1,
}

impl Encoding {
    /// Canonical label, as shown in the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf8Bom => "UTF-8 BOM",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Look up an encoding by label. Matching ignores case, `-` and `_`.
    pub fn from_label(label: &str) -> Result<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "utf8" => Ok(Self::Utf8),
            "utf8bom" => Ok(Self::Utf8Bom),
            "utf16le" | "utf16" => Ok(Self::Utf16Le),
            "utf16be" => Ok(Self::Utf16Be),
            "iso88591" | "latin1" | "cp819" => Ok(Self::Latin1),
            _ => Err(AppError::UnsupportedEncoding(label.to_string())),
        }
    }

    /// Byte order mark written ahead of the content, if any.
    pub fn bom(&self) -> &'static [u8] {
        match self {
            Self::Utf8Bom => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf8 | Self::Latin1 => &[],
        }
    }

    /// Detect an encoding from a leading byte order mark.
    pub fn sniff_bom(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            Some(Self::Utf8Bom)
        } else if bytes.starts_with(&[0xFF, 0xFE]) {
            Some(Self::Utf16Le)
        } else if bytes.starts_with(&[0xFE, 0xFF]) {
            Some(Self::Utf16Be)
        } else {
            None
        }
    }

    /// Decode `bytes` (BOM included or not). Returns `None` on invalid input.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let body = bytes.strip_prefix(self.bom()).unwrap_or(bytes);
        match self {
            Self::Utf8 | Self::Utf8Bom => String::from_utf8(body.to_vec()).ok(),
            Self::Latin1 => Some(body.iter().map(|&b| b as char).collect()),
            Self::Utf16Le | Self::Utf16Be => {
                if body.len() % 2 != 0 {
                    return None;
                }
                let units = body.chunks_exact(2).map(|pair| match self {
                    Self::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                    _ => u16::from_be_bytes([pair[0], pair[1]]),
                });
                char::decode_utf16(units).collect::<std::result::Result<String, _>>().ok()
            }
        }
    }

    /// Encode `text`, BOM first. Returns `None` if a character can't be represented.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        let mut out = self.bom().to_vec();
        match self {
            Self::Utf8 | Self::Utf8Bom => out.extend_from_slice(text.as_bytes()),
            Self::Latin1 => {
                for ch in text.chars() {
                    let code = u32::from(ch);
                    if code > 0xFF {
                        return None;
                    }
                    out.push(code as u8);
                }
            }
            Self::Utf16Le => {
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
            }
            Self::Utf16Be => {
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
        }
        Some(out)
    }
}

/// Line terminator convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    /// The platform's native terminator.
    pub fn system() -> Self {
        if cfg!(windows) { Self::CrLf } else { Self::Lf }
    }

    /// The first terminator found in `text`, if any.
    pub fn detect(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        let idx = bytes.iter().position(|&b| b == b'\n' || b == b'\r')?;
        Some(match bytes[idx] {
            b'\n' => Self::Lf,
            _ if bytes.get(idx + 1) == Some(&b'\n') => Self::CrLf,
            _ => Self::Cr,
        })
    }

    /// Normalize every terminator in `text` to `\n`.
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n").replace('\r', "\n")
    }

    /// Convert `\n`-normalized text to this terminator.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            other => text.replace('\n', other.as_str()),
        }
    }
}
