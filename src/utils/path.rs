//! Helpers for the slash-separated, workspace-relative paths used by the
//! explorer. Host-side paths always use `/` regardless of platform; only
//! the shell integration deals in native paths.

/// Join two relative path segments, ignoring empty parts.
pub fn join(base: &str, name: &str) -> String {
    match (base.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (_, true) => base.trim_end_matches('/').to_string(),
        _ => format!("{}/{}", base.trim_end_matches('/'), name),
    }
}

/// The extension of the last path segment, including the dot, or "".
pub fn extname(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        // A leading dot marks a hidden file, not an extension.
        Some(0) | None => "",
        Some(idx) => &name[idx..],
    }
}

/// Normalize an absolute path to the platform's separators for handing to
/// shell integrations.
pub fn normalize(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace('/', &std::path::MAIN_SEPARATOR.to_string())
    }
}
