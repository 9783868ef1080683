//! vCard 3.0 text-value escaping.
//!
//! Reserved characters are escaped in a fixed order: backslash first, then
//! newline, semicolon and comma, so later substitutions never see a
//! backslash introduced by an earlier one.

/// Escape a free-text value for use after the `:` of a content line.
///
/// CRLF and bare CR are treated as a newline. The output never contains a
/// raw line break.
pub fn escape_text(value: &str) -> String {
    let normalized = value.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace(';', "\\;")
        .replace(',', "\\,")
}

/// Reverse [`escape_text`].
///
/// Accepts `\N` as well as `\n`. Unknown escape sequences are kept verbatim.
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') | Some('N') => out.push('\n'),
            Some(';') => out.push(';'),
            Some(',') => out.push(','),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
