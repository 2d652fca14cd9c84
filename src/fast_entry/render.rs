//! Substitution of decoded arguments into a format string.

use std::fmt::Write;

use super::FastLogEntry;

/// Replace each `{}` in the entry's format string with the next argument.
///
/// `{{` and `}}` produce literal braces. Placeholders without a matching
/// argument are kept verbatim; surplus arguments are ignored.
pub fn render<const N: usize>(entry: &FastLogEntry<'_, N>) -> String {
    let mut args = entry.args();
    let mut out = String::with_capacity(entry.format_string().len());
    let mut chars = entry.format_string().chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                out.push(c);
                chars.next();
            }
            ('{', Some('}')) => {
                chars.next();
                match args.next() {
                    Some(arg) => {
                        let _ = write!(out, "{arg}");
                    }
                    None => out.push_str("{}"),
                }
            }
            _ => out.push(c),
        }
    }
    out
}
