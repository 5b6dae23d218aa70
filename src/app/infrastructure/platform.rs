/// Whether file names on the host file system are case-sensitive.
///
/// Windows and macOS default volumes fold case; everything else is treated
/// as case-sensitive.
pub fn file_system_is_case_sensitive() -> bool {
    !cfg!(any(target_os = "windows", target_os = "macos"))
}

/// Whether a path refers to a remote (network) location rather than a local file.
pub fn is_remote_location(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
