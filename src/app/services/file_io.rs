use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use std::time::SystemTime;

use crate::app::domain::document::LoadedText;
use crate::app::domain::encoding::{Encoding, LineEnding};
use crate::app::infrastructure::error::{AppError, Result};

/// Encoding and terminator used when a file gives no hint of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFallbacks {
    pub encoding: Encoding,
    pub line_ending: LineEnding,
}

/// Last modification time of a file, or `None` if it can't be read.
pub fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

pub fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| AppError::from_io(e, path))
}

/// Create an empty file, failing if it already exists.
pub fn create_empty(path: &Path) -> Result<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| AppError::from_io(e, path))
}

/// Read and decode a file.
///
/// With no `requested` encoding the byte order mark decides, then
/// `fallbacks.encoding`.
pub fn read_document(
    path: &Path,
    requested: Option<Encoding>,
    fallbacks: TextFallbacks,
) -> Result<LoadedText> {
    let metadata = fs::metadata(path).map_err(|e| AppError::from_io(e, path))?;
    let size = metadata.len();

    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(size as usize)
        .map_err(|_| AppError::OutOfMemory {
            path: path.to_path_buf(),
            size,
        })?;
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut bytes))
        .map_err(|e| AppError::from_io(e, path))?;

    let mut loaded = decode_bytes(&bytes, requested, fallbacks, path)?;
    loaded.modified = metadata.modified().ok();
    loaded.read_only = metadata.permissions().readonly();
    Ok(loaded)
}

/// Decode raw bytes into normalized text. `origin` only names the source in errors.
pub fn decode_bytes(
    bytes: &[u8],
    requested: Option<Encoding>,
    fallbacks: TextFallbacks,
    origin: &Path,
) -> Result<LoadedText> {
    let sniffed = Encoding::sniff_bom(bytes);
    let encoding = match (requested, sniffed) {
        (Some(Encoding::Utf8), Some(Encoding::Utf8Bom)) => Encoding::Utf8Bom,
        (Some(requested), _) => requested,
        (None, Some(sniffed)) => sniffed,
        (None, None) => fallbacks.encoding,
    };

    let raw = encoding.decode(bytes).ok_or_else(|| AppError::Malformed {
        path: origin.to_path_buf(),
        encoding: encoding.label().to_string(),
    })?;

    Ok(LoadedText {
        line_ending: LineEnding::detect(&raw).unwrap_or(fallbacks.line_ending),
        text: LineEnding::normalize(&raw),
        encoding,
        modified: None,
        read_only: false,
    })
}

/// Encode and write `text` (`\n`-terminated) to `path`.
/// Returns the file's new modification time.
pub fn write_document(
    path: &Path,
    text: &str,
    encoding: Encoding,
    line_ending: LineEnding,
) -> Result<Option<SystemTime>> {
    let bytes = encoding
        .encode(&line_ending.apply(text))
        .ok_or_else(|| AppError::Malformed {
            path: path.to_path_buf(),
            encoding: encoding.label().to_string(),
        })?;

    let mut file = File::create(path).map_err(|e| AppError::from_io(e, path))?;
    file.write_all(&bytes)
        .and_then(|_| file.flush())
        .map_err(|e| AppError::from_io(e, path))?;
    drop(file);

    Ok(modified_time(path))
}
