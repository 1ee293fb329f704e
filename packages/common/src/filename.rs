/// Reasons a filename is refused by [`validate_flat_filename`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    #[error("Filename cannot be empty")]
    Empty,
    #[error("Invalid filename: path separators are not allowed")]
    ContainsPathSeparator,
    #[error("Invalid filename: '..' is not allowed")]
    PathTraversal,
    #[error("Invalid filename: null bytes are not allowed")]
    NullByte,
    #[error("Invalid filename: hidden files (starting with '.') are not allowed")]
    Hidden,
    /// CR, LF and other ASCII control characters.
    #[error("Invalid filename: control characters are not allowed")]
    ControlCharacter,
}

/// Validates a flat filename that must resolve to a direct child of a directory.
///
/// Unlike a path check, any occurrence of `..` is refused, not just whole
/// `..` segments.
pub fn validate_flat_filename(filename: &str) -> Result<&str, FilenameError> {
    if filename.trim().is_empty() {
        return Err(FilenameError::Empty);
    }

    if filename.contains('\0') {
        return Err(FilenameError::NullByte);
    }

    if filename.chars().any(|c| c.is_ascii_control()) {
        return Err(FilenameError::ControlCharacter);
    }

    if filename.contains('/') || filename.contains('\\') {
        return Err(FilenameError::ContainsPathSeparator);
    }

    if filename.contains("..") {
        return Err(FilenameError::PathTraversal);
    }

    if filename.starts_with('.') {
        return Err(FilenameError::Hidden);
    }

    Ok(filename)
}

/// Returns the last path component of a client-supplied name.
///
/// Both `/` and `\` count as separators since browsers on Windows may send
/// full paths.
pub fn basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Reduces a client-supplied filename to a safe flat name.
///
/// Characters outside `[A-Za-z0-9._-]` become `_`, runs of dots collapse to a
/// single dot and leading dots are dropped. Returns `"upload"` when nothing
/// usable is left.
pub fn sanitize_basename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in basename(name.trim()).chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            c
        } else {
            '_'
        };
        if c == '.' && (out.is_empty() || out.ends_with('.')) {
            continue;
        }
        out.push(c);
    }

    if out.is_empty() || out == "." {
        "upload".to_string()
    } else {
        out
    }
}

/// Lowercased extension of a filename, without the dot.
pub fn extension(name: &str) -> Option<String> {
    let name = basename(name);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
