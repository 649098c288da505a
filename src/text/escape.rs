//! Backslash escape decoding for formspec values.

/// Decode backslash escapes: `\x` becomes `x` for any character `x`.
///
/// A trailing lone backslash is dropped.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
