//! Character classification used by the scanner.

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';
pub const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Whitespace that is not a line terminator.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    match ch {
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | BYTE_ORDER_MARK => true,
        c if c.is_ascii() => false,
        c => c.is_whitespace() && !is_line_break(c),
    }
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    match ch {
        'a'..='z' | 'A'..='Z' | '_' | '$' => true,
        c if c.is_ascii() => false,
        c => c.is_alphabetic(),
    }
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    match ch {
        'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '$' => true,
        ZERO_WIDTH_NON_JOINER | ZERO_WIDTH_JOINER => true,
        c if c.is_ascii() => false,
        c => c.is_alphanumeric(),
    }
}

#[inline]
pub fn is_digit_in_radix(ch: char, radix: u32) -> bool {
    ch.is_digit(radix)
}
