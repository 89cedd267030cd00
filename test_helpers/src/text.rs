//! Text helpers for behavioural step arguments.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Turns a single-line step argument into YAML text.
///
/// Outer quotes are removed and literal `\n` sequences become newlines, so
/// feature files can spell block-style YAML on one line.
#[must_use]
pub fn yaml_text(value: &str) -> String {
    unquote(value).replace("\\n", "\n")
}
