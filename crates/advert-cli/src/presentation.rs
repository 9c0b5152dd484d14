//! Terminal formatting helpers.

use std::fmt::Write as _;

use advert_core::render::PARAGRAPH_SEPARATOR;

/// Make engine control codes visible: color bytes become `\xNN`, the
/// paragraph separator becomes `\n`.
pub fn escape_control(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for c in message.chars() {
        if c == PARAGRAPH_SEPARATOR {
            out.push_str("\\n");
        } else if c.is_control() {
            let _ = write!(out, "\\x{:02X}", u32::from(c));
        } else {
            out.push(c);
        }
    }
    out
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}
