//! Field-level validation shared by the HTTP handlers.

/// Permissive email shape check used across the site's forms: exactly one
/// `@`, no whitespace anywhere, and a dot inside the domain with at least one
/// character on each side.
pub(crate) fn looks_like_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + ch.len_utf8() < domain.len())
}
