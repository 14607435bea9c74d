//! Code-point classification.
//!
//! Every predicate here is a pure function of a single scalar value. Callers
//! holding a lookahead result (`Option<char>`, where `None` is the end of
//! input) use `Option::is_some_and`, so the end of input never matches.

/// [§ 4.2 whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
///
/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
///
/// U+000C FORM FEED is accepted as well: the CSS preprocessor has already
/// turned it into a newline, and the HTML tokenizer treats it as whitespace
/// in every state that skips whitespace.
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | ' ')
}

/// [§ 4.2 digit](https://www.w3.org/TR/css-syntax-3/#digit)
///
/// "A code point between U+0030 DIGIT ZERO (0) and U+0039 DIGIT NINE (9) inclusive."
#[must_use]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// [§ 4.2 hex digit](https://www.w3.org/TR/css-syntax-3/#hex-digit)
///
/// "A digit, or a code point between U+0041 LATIN CAPITAL LETTER A (A) and
/// U+0046 LATIN CAPITAL LETTER F (F) inclusive, or a code point between
/// U+0061 LATIN SMALL LETTER A (a) and U+0066 LATIN SMALL LETTER F (f) inclusive."
#[must_use]
pub const fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// [§ 4.2 letter](https://www.w3.org/TR/css-syntax-3/#letter)
///
/// "An uppercase letter or a lowercase letter."
#[must_use]
pub const fn is_ascii_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// [§ 4.2 non-ASCII ident code point](https://www.w3.org/TR/css-syntax-3/#non-ascii-ident-code-point)
///
/// The range table below is exact. `char` cannot hold a surrogate, so the
/// open-ended range from U+10000 stops at U+10FFFF by construction.
#[must_use]
pub const fn is_non_ascii_ident(c: char) -> bool {
    matches!(
        c as u32,
        0xB7
            | 0xC0..=0xD6
            | 0xD8..=0xF6
            | 0xF8..=0x37D
            | 0x37F..=0x1FFF
            | 0x200C
            | 0x200D
            | 0x203F
            | 0x2040
            | 0x2070..=0x218F
            | 0x2C00..=0x2FEF
            | 0x3001..=0xD7FF
            | 0xF900..=0xFDCF
            | 0xFDF0..=0xFFFD
            | 0x10000..
    )
}

/// [§ 4.2 non-printable code point](https://www.w3.org/TR/css-syntax-3/#non-printable-code-point)
///
/// "A code point between U+0000 NULL and U+0008 BACKSPACE inclusive, or
/// U+000B LINE TABULATION, or a code point between U+000E SHIFT OUT and
/// U+001F INFORMATION SEPARATOR ONE inclusive, or U+007F DELETE."
#[must_use]
pub const fn is_non_printable(c: char) -> bool {
    matches!(c as u32, 0x00..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F)
}

/// [§ 4.2 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
///
/// "A letter, a non-ASCII ident code point, or U+005F LOW LINE (_)."
#[must_use]
pub const fn is_ident_start(c: char) -> bool {
    is_ascii_alpha(c) || c == '_' || is_non_ascii_ident(c)
}

/// [§ 4.2 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// "An ident-start code point, a digit, or U+002D HYPHEN-MINUS (-)."
#[must_use]
pub const fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || is_digit(c) || c == '-'
}

/// [Infra § 4.6 surrogate](https://infra.spec.whatwg.org/#surrogate)
#[must_use]
pub const fn is_surrogate(value: u32) -> bool {
    matches!(value, 0xD800..=0xDFFF)
}

/// [Infra § 4.6 noncharacter](https://infra.spec.whatwg.org/#noncharacter)
///
/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, ..., U+10FFFE, or U+10FFFF."
#[must_use]
pub const fn is_noncharacter(value: u32) -> bool {
    matches!(value, 0xFDD0..=0xFDEF) || (value <= 0x10_FFFF && (value & 0xFFFE) == 0xFFFE)
}

/// [Infra § 4.6 control](https://infra.spec.whatwg.org/#control)
///
/// "A C0 control or a code point in the range U+007F DELETE to
/// U+009F APPLICATION PROGRAM COMMAND, inclusive."
#[must_use]
pub const fn is_control(value: u32) -> bool {
    matches!(value, 0x00..=0x1F | 0x7F..=0x9F)
}
