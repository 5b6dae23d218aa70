use std::path::Path;

use crate::app::domain::document::LoadedText;
use crate::app::domain::encoding::Encoding;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::file_io::{TextFallbacks, decode_bytes};

const TIMEOUT_SECS: u64 = 15;

/// Fetch a document over HTTP(S). Remote documents are always read-only.
pub fn fetch_document(
    url: &str,
    requested: Option<Encoding>,
    fallbacks: TextFallbacks,
) -> Result<LoadedText> {
    tracing::debug!("Fetching remote document {}", url);
    let response = minreq::get(url)
        .with_timeout(TIMEOUT_SECS)
        .send()
        .map_err(|e| classify_transport_error(e, url))?;

    check_status(response.status_code, &response.reason_phrase, url)?;

    let mut loaded = decode_bytes(response.as_bytes(), requested, fallbacks, Path::new(url))?;
    loaded.read_only = true;
    Ok(loaded)
}

/// Map an HTTP status to the matching failure class.
pub fn check_status(status: i32, reason: &str, url: &str) -> Result<()> {
    match status {
        200..=299 => Ok(()),
        401 | 403 | 407 => Err(AppError::Login(url.to_string())),
        _ => Err(AppError::Remote(format!("{} {} ({})", status, reason, url))),
    }
}

fn classify_transport_error(err: minreq::Error, url: &str) -> AppError {
    match err {
        minreq::Error::AddressNotFound => AppError::UnknownHost(host_of(url).to_string()),
        minreq::Error::IoError(io) => match io.kind() {
            std::io::ErrorKind::ConnectionRefused => AppError::ConnectionRefused(url.to_string()),
            _ if looks_like_dns_failure(&io.to_string()) => {
                AppError::UnknownHost(host_of(url).to_string())
            }
            _ => AppError::Remote(io.to_string()),
        },
        other => AppError::Remote(other.to_string()),
    }
}

fn looks_like_dns_failure(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("lookup") || lower.contains("resolve") || lower.contains("not known")
}

/// Host portion of a URL, without scheme, credentials, port or path.
pub fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    host_port.split(':').next().unwrap_or(host_port)
}
