//! Character reference states of the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state).

use quill_common::codepoint::{is_control, is_noncharacter, is_surrogate, is_whitespace};

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ErrorCode;
use super::named_character_references::{any_entity_has_prefix, lookup_entity};

/// The largest valid Unicode code point.
const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
const C1_REPLACEMENTS: [(u32, u32); 27] = [
    (0x80, 0x20AC),
    (0x82, 0x201A),
    (0x83, 0x0192),
    (0x84, 0x201E),
    (0x85, 0x2026),
    (0x86, 0x2020),
    (0x87, 0x2021),
    (0x88, 0x02C6),
    (0x89, 0x2030),
    (0x8A, 0x0160),
    (0x8B, 0x2039),
    (0x8C, 0x0152),
    (0x8E, 0x017D),
    (0x91, 0x2018),
    (0x92, 0x2019),
    (0x93, 0x201C),
    (0x94, 0x201D),
    (0x95, 0x2022),
    (0x96, 0x2013),
    (0x97, 0x2014),
    (0x98, 0x02DC),
    (0x99, 0x2122),
    (0x9A, 0x0161),
    (0x9B, 0x203A),
    (0x9C, 0x0153),
    (0x9E, 0x017E),
    (0x9F, 0x0178),
];

/// Replacement for a numeric reference into the C1 control range, if the
/// table names one.
#[must_use]
pub fn c1_replacement(code: u32) -> Option<u32> {
    C1_REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == code)
        .map(|(_, to)| *to)
}

impl HTMLTokenizer {
    /// "If the character reference was consumed as part of an attribute"
    ///
    /// True when the return state is one of the attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = core::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            if let Some(tag) = self.current_tag.as_mut() {
                tag.push_attribute_value_str(&buffer);
            }
        } else {
            self.emit_characters(&buffer);
        }
    }

    /// Append one character to the attribute value or emit it, depending on
    /// where the reference was found.
    fn push_reference_character(&mut self, c: char) {
        if self.is_consumed_as_part_of_attribute() {
            if let Some(tag) = self.current_tag.as_mut() {
                tag.push_attribute_value(c);
            }
        } else {
            self.emit_character(c);
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026
        // AMPERSAND (&) character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric"
            // "Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#)"
            // "Append the current input character to the temporary buffer. Switch
            // to the numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else"
            // "Flush code points consumed as a character reference. Reconsume in
            // the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// This state looks ahead instead of consuming one character per step.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        // "Consume the maximum number of characters possible, where the consumed
        // characters are one of the identifiers in the first column of the named
        // character references table. Append each character to the temporary
        // buffer when it's consumed."
        let mut candidate = String::new();
        let mut longest_match: Option<(usize, &'static str)> = None;
        let mut offset = 0;
        while let Some(c) = self.cursor.peek(offset) {
            candidate.push(c);
            offset += 1;
            if let Some(replacement) = lookup_entity(&candidate) {
                longest_match = Some((offset, replacement));
            }
            if !any_entity_has_prefix(&candidate) {
                break;
            }
        }

        // "If there is a match"
        if let Some((length, replacement)) = longest_match {
            let matched: String = candidate.chars().take(length).collect();
            for _ in 0..length {
                let _ = self.consume();
            }
            self.temporary_buffer.push_str(&matched);
            let ends_with_semicolon = matched.ends_with(';');

            // "If the character reference was consumed as part of an attribute, and
            // the last character matched is not a U+003B SEMICOLON character (;),
            // and the next input character is either a U+003D EQUALS SIGN character
            // (=) or an ASCII alphanumeric, then, for historical reasons, flush code
            // points consumed as a character reference and switch to the return
            // state."
            let next = self.cursor.peek(0);
            if self.is_consumed_as_part_of_attribute()
                && !ends_with_semicolon
                && next.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
            {
                self.flush_code_points_consumed_as_character_reference();
                self.switch_to(self.return_state);
                return;
            }

            // "If the last character matched is not a U+003B SEMICOLON character
            // (;), then this is a missing-semicolon-after-character-reference
            // parse error."
            if !ends_with_semicolon {
                self.parse_error(ErrorCode::MissingSemicolonAfterCharacterReference);
            }

            // "Set the temporary buffer to the empty string. Append one or two
            // characters corresponding to the character reference name (as given
            // by the second column of the named character references table) to the
            // temporary buffer."
            self.temporary_buffer.clear();
            self.temporary_buffer.push_str(replacement);

            // "Flush code points consumed as a character reference. Switch to the
            // return state."
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(self.return_state);
        } else {
            // "Otherwise"
            // "Flush code points consumed as a character reference. Switch to the
            // ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(TokenizerState::AmbiguousAmpersand);
        }
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric"
            // "If the character reference was consumed as part of an attribute, then
            // append the current input character to the current attribute's value.
            // Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => self.push_reference_character(c),
            // "U+003B SEMICOLON (;)"
            // "This is an unknown-named-character-reference parse error. Reconsume
            // in the return state."
            Some(';') => {
                self.parse_error(ErrorCode::UnknownNamedCharacterReference);
                self.reconsume_in_return_state();
            }
            // "Anything else"
            // "Reconsume in the return state."
            _ => self.reconsume_in_return_state(),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;

        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X"
            // "U+0058 LATIN CAPITAL LETTER X"
            // "Append the current input character to the temporary buffer. Switch to
            // the hexadecimal character reference start state."
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            // "Anything else"
            // "Reconsume in the decimal character reference start state."
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            // "ASCII hex digit"
            // "Reconsume in the hexadecimal character reference state."
            Some(c) if c.is_ascii_hexdigit() => {
                self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
            }
            // "Anything else"
            // "This is an absence-of-digits-in-numeric-character-reference parse
            // error. Flush code points consumed as a character reference. Reconsume
            // in the return state."
            _ => {
                self.parse_error(ErrorCode::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            // "ASCII digit"
            // "Reconsume in the decimal character reference state."
            Some(c) if c.is_ascii_digit() => {
                self.reconsume_in(TokenizerState::DecimalCharacterReference);
            }
            // "Anything else"
            _ => {
                self.parse_error(ErrorCode::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference();
                self.reconsume_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        match self.current_input_character {
            // "ASCII digit", "ASCII upper hex digit", "ASCII lower hex digit"
            // "Multiply the character reference code by 16. Add a numeric version
            // of the current input character to the character reference code."
            Some(c) if c.is_ascii_hexdigit() => {
                self.accumulate_character_reference_digit(c, 16);
            }
            // "U+003B SEMICOLON"
            // "Switch to the numeric character reference end state."
            Some(';') => self.switch_to(TokenizerState::NumericCharacterReferenceEnd),
            // "Anything else"
            // "This is a missing-semicolon-after-character-reference parse error.
            // Reconsume in the numeric character reference end state."
            _ => {
                self.parse_error(ErrorCode::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        match self.current_input_character {
            // "ASCII digit"
            // "Multiply the character reference code by 10. Add a numeric version of
            // the current input character to the character reference code."
            Some(c) if c.is_ascii_digit() => {
                self.accumulate_character_reference_digit(c, 10);
            }
            // "U+003B SEMICOLON"
            Some(';') => self.switch_to(TokenizerState::NumericCharacterReferenceEnd),
            // "Anything else"
            _ => {
                self.parse_error(ErrorCode::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// Fold one more digit into the character reference code. The code
    /// saturates just past the Unicode range so that long digit runs cannot
    /// overflow; any such value is reported as out of range.
    fn accumulate_character_reference_digit(&mut self, c: char, radix: u32) {
        let digit = c.to_digit(radix).unwrap_or(0);
        self.character_reference_code = self
            .character_reference_code
            .saturating_mul(radix)
            .saturating_add(digit)
            .min(MAX_CODE_POINT + 1);
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// "Check the character reference code:" - this state consumes nothing.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let mut code = self.character_reference_code;

        if code == 0 {
            // "If the number is 0x00, then this is a null-character-reference parse
            // error. Set the character reference code to 0xFFFD."
            self.parse_error(ErrorCode::NullCharacterReference);
            code = 0xFFFD;
        } else if code > MAX_CODE_POINT {
            // "If the number is greater than 0x10FFFF, then this is a
            // character-reference-outside-unicode-range parse error. Set the
            // character reference code to 0xFFFD."
            self.parse_error(ErrorCode::CharacterReferenceOutsideUnicodeRange);
            code = 0xFFFD;
        } else if is_surrogate(code) {
            // "If the number is a surrogate, then this is a
            // surrogate-character-reference parse error. Set the character
            // reference code to 0xFFFD."
            self.parse_error(ErrorCode::SurrogateCharacterReference);
            code = 0xFFFD;
        } else if is_noncharacter(code) {
            // "If the number is a noncharacter, then this is a
            // noncharacter-character-reference parse error."
            self.parse_error(ErrorCode::NoncharacterCharacterReference);
        } else if code == 0x0D
            || (is_control(code) && !char::from_u32(code).is_some_and(is_whitespace))
        {
            // "If the number is 0x0D, or a control that's not ASCII whitespace, then
            // this is a control-character-reference parse error."
            self.parse_error(ErrorCode::ControlCharacterReference);
            if let Some(replacement) = c1_replacement(code) {
                code = replacement;
            }
        }

        // "Set the temporary buffer to the empty string. Append a code point equal
        // to the character reference code to the temporary buffer. Flush code
        // points consumed as a character reference. Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer
            .push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
    }
}
