//! Byte escaping for string literals in emitted source, per §4.5: bytes
//! `<= 31` become `\0`, `\n`, `\t`, `\r` or `\x{n}`; `\`, `'`, `"` are
//! backslash-escaped; everything else passes through.

use std::fmt::Write as _;

const SPECIAL_CHARACTER_MAX: u8 = 31;

pub fn escape_byte(out: &mut String, byte: u8) {
    if byte <= SPECIAL_CHARACTER_MAX {
        match byte {
            0 => out.push_str("\\0"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            b'\r' => out.push_str("\\r"),
            _ => {
                let _ = write!(out, "\\x{byte:x}");
            }
        }
    } else {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'"' => out.push_str("\\\""),
            _ => out.push(byte as char),
        }
    }
}

pub fn escape_str(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for byte in message.bytes() {
        escape_byte(&mut out, byte);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes_use_named_escapes() {
        assert_eq!(escape_str("\n\t\r"), "\\n\\t\\r");
    }

    #[test]
    fn other_control_bytes_use_hex_escapes() {
        assert_eq!(escape_str("\x01"), "\\x1");
        assert_eq!(escape_str("\x1f"), "\\x1f");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        assert_eq!(escape_str("a\"b\\c'd"), "a\\\"b\\\\c\\'d");
    }

    #[test]
    fn printable_bytes_pass_through() {
        assert_eq!(escape_str("unterminated string"), "unterminated string");
    }
}
