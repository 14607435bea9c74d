//! DOCTYPE states, [§ 13.2.5.53](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
//! through [§ 13.2.5.68](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state).
//!
//! The public and system identifier states are mirror images of each other,
//! so each pair shares one handler parameterized by [`DoctypeIdentifier`].

use quill_common::codepoint::is_whitespace;

use super::core::{DoctypeIdentifier, HTMLTokenizer, TokenizerState};
use super::error::ErrorCode;
use super::token::DoctypeBuilder;

impl DoctypeIdentifier {
    const fn double_quoted_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            Self::System => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
        }
    }

    const fn single_quoted_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            Self::System => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        }
    }

    const fn before_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::BeforeDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::BeforeDOCTYPESystemIdentifier,
        }
    }

    const fn after_state(self) -> TokenizerState {
        match self {
            Self::Public => TokenizerState::AfterDOCTYPEPublicIdentifier,
            Self::System => TokenizerState::AfterDOCTYPESystemIdentifier,
        }
    }

    const fn missing_whitespace_after_keyword(self) -> ErrorCode {
        match self {
            Self::Public => ErrorCode::MissingWhitespaceAfterDoctypePublicKeyword,
            Self::System => ErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword,
        }
    }

    const fn missing_identifier(self) -> ErrorCode {
        match self {
            Self::Public => ErrorCode::MissingDoctypePublicIdentifier,
            Self::System => ErrorCode::MissingDoctypeSystemIdentifier,
        }
    }

    const fn missing_quote(self) -> ErrorCode {
        match self {
            Self::Public => ErrorCode::MissingQuoteBeforeDoctypePublicIdentifier,
            Self::System => ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier,
        }
    }

    const fn abrupt_end(self) -> ErrorCode {
        match self {
            Self::Public => ErrorCode::AbruptDoctypePublicIdentifier,
            Self::System => ErrorCode::AbruptDoctypeSystemIdentifier,
        }
    }
}

impl HTMLTokenizer {
    /// The DOCTYPE under construction.
    fn doctype_mut(&mut self) -> &mut DoctypeBuilder {
        self.current_doctype.get_or_insert_with(DoctypeBuilder::new)
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype(&mut self) {
        self.parse_error(ErrorCode::EofInDoctype);
        self.doctype_mut().set_force_quirks();
        self.emit_current_doctype();
        self.emit_eof();
    }

    /// "Switch to the data state. Emit the current DOCTYPE token."
    fn finish_doctype(&mut self) {
        self.switch_to(TokenizerState::Data);
        self.emit_current_doctype();
    }

    /// Report `code`, turn on force-quirks and leave for the bogus DOCTYPE
    /// state, reconsuming the current character.
    fn bogus_doctype(&mut self, code: ErrorCode) {
        self.parse_error(code);
        self.doctype_mut().set_force_quirks();
        self.reconsume_in(TokenizerState::BogusDOCTYPE);
    }

    /// Start an empty identifier and switch to its quoted state.
    fn begin_doctype_identifier(&mut self, identifier: DoctypeIdentifier, quote: char) {
        let doctype = self.doctype_mut();
        match identifier {
            DoctypeIdentifier::Public => doctype.begin_public_identifier(),
            DoctypeIdentifier::System => doctype.begin_system_identifier(),
        }
        if quote == '"' {
            self.switch_to(identifier.double_quoted_state());
        } else {
            self.switch_to(identifier.single_quoted_state());
        }
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF), U+000C FORM FEED
            // (FF), U+0020 SPACE - Switch to the before DOCTYPE name state."
            Some(c) if is_whitespace(c) => self.switch_to(TokenizerState::BeforeDOCTYPEName),
            // "U+003E GREATER-THAN SIGN (>) - Reconsume in the before DOCTYPE name state."
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            // "EOF - This is an eof-in-doctype parse error. Create a new DOCTYPE token. Set
            // its force-quirks flag to on. Emit the current token. Emit an end-of-file token."
            None => {
                self.current_doctype = Some(DoctypeBuilder::quirky());
                self.eof_in_doctype();
            }
            // "Anything else - This is a missing-whitespace-before-doctype-name parse error.
            // Reconsume in the before DOCTYPE name state."
            Some(_) => {
                self.parse_error(ErrorCode::MissingWhitespaceBeforeDoctypeName);
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if is_whitespace(c) => {}
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-name parse error.
            // Create a new DOCTYPE token. Set its force-quirks flag to on. Switch to the data
            // state. Emit the current token."
            Some('>') => {
                self.parse_error(ErrorCode::MissingDoctypeName);
                self.current_doctype = Some(DoctypeBuilder::quirky());
                self.finish_doctype();
            }
            None => {
                self.current_doctype = Some(DoctypeBuilder::quirky());
                self.eof_in_doctype();
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error. Create a new
            // DOCTYPE token. Set the token's name to a U+FFFD REPLACEMENT CHARACTER character.
            // Switch to the DOCTYPE name state."
            Some('\0') => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                let mut doctype = DoctypeBuilder::new();
                doctype.push_name('\u{FFFD}');
                self.current_doctype = Some(doctype);
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            // "ASCII upper alpha - Create a new DOCTYPE token. Set the token's name to the
            // lowercase version of the current input character."
            // "Anything else - Create a new DOCTYPE token. Set the token's name to the
            // current input character. Switch to the DOCTYPE name state."
            Some(c) => {
                let mut doctype = DoctypeBuilder::new();
                doctype.push_name(c.to_ascii_lowercase());
                self.current_doctype = Some(doctype);
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => self.switch_to(TokenizerState::AfterDOCTYPEName),
            Some('>') => self.finish_doctype(),
            Some('\0') => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.doctype_mut().push_name('\u{FFFD}');
            }
            None => self.eof_in_doctype(),
            Some(c) => self.doctype_mut().push_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    pub(super) fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some('>') => self.finish_doctype(),
            None => self.eof_in_doctype(),
            // "If the six characters starting from the current input character are an ASCII
            // case-insensitive match for the word "PUBLIC", then consume those characters and
            // switch to the after DOCTYPE public keyword state."
            // "Otherwise, if the six characters starting from the current input character are
            // an ASCII case-insensitive match for the word "SYSTEM", then consume those
            // characters and switch to the after DOCTYPE system keyword state."
            // "Otherwise, this is an invalid-character-sequence-after-doctype-name parse
            // error. Set the current DOCTYPE token's force-quirks flag to on. Reconsume in
            // the bogus DOCTYPE state."
            Some(_) => {
                self.cursor.retreat();
                if self.consume_if_next_are_ignore_case("PUBLIC") {
                    self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
                } else if self.consume_if_next_are_ignore_case("SYSTEM") {
                    self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
                } else {
                    self.parse_error(ErrorCode::InvalidCharacterSequenceAfterDoctypeName);
                    self.doctype_mut().set_force_quirks();
                    self.switch_to(TokenizerState::BogusDOCTYPE);
                }
            }
        }
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// and [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_keyword_state(&mut self, identifier: DoctypeIdentifier) {
        match self.current_input_character {
            // "Switch to the before DOCTYPE public identifier state."
            Some(c) if is_whitespace(c) => self.switch_to(identifier.before_state()),
            // "U+0022 QUOTATION MARK (") - This is a
            // missing-whitespace-after-doctype-public-keyword parse error. Set the current
            // DOCTYPE token's public identifier to the empty string (not missing), then
            // switch to the DOCTYPE public identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(identifier.missing_whitespace_after_keyword());
                self.begin_doctype_identifier(identifier, quote);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-doctype-public-identifier
            // parse error. Set the current DOCTYPE token's force-quirks flag to on. Switch to
            // the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.parse_error(identifier.missing_identifier());
                self.doctype_mut().set_force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            // "Anything else - This is a missing-quote-before-doctype-public-identifier parse
            // error. Set the current DOCTYPE token's force-quirks flag to on. Reconsume in the
            // bogus DOCTYPE state."
            Some(_) => self.bogus_doctype(identifier.missing_quote()),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// and [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_identifier_state(&mut self, identifier: DoctypeIdentifier) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(identifier, quote),
            Some('>') => {
                self.parse_error(identifier.missing_identifier());
                self.doctype_mut().set_force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(identifier.missing_quote()),
        }
    }

    /// [§ 13.2.5.59](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// to [§ 13.2.5.60](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    /// and [§ 13.2.5.65](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    /// to [§ 13.2.5.66](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    pub(super) fn handle_doctype_identifier_quoted_state(
        &mut self,
        identifier: DoctypeIdentifier,
        quote: char,
    ) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(identifier.after_state()),
            Some('\0') => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.push_doctype_identifier(identifier, '\u{FFFD}');
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an abrupt-doctype-public-identifier
            // parse error. Set the current DOCTYPE token's force-quirks flag to on. Switch to
            // the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.parse_error(identifier.abrupt_end());
                self.doctype_mut().set_force_quirks();
                self.finish_doctype();
            }
            None => self.eof_in_doctype(),
            Some(c) => self.push_doctype_identifier(identifier, c),
        }
    }

    fn push_doctype_identifier(&mut self, identifier: DoctypeIdentifier, c: char) {
        let doctype = self.doctype_mut();
        match identifier {
            DoctypeIdentifier::Public => doctype.push_public_identifier(c),
            DoctypeIdentifier::System => doctype.push_system_identifier(c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => self.finish_doctype(),
            // "This is a missing-whitespace-between-doctype-public-and-system-identifiers
            // parse error. Set the current DOCTYPE token's system identifier to the empty
            // string (not missing), then switch to the DOCTYPE system identifier
            // (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(
                    ErrorCode::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                );
                self.begin_doctype_identifier(DoctypeIdentifier::System, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some('>') => self.finish_doctype(),
            Some(quote @ ('"' | '\'')) => {
                self.begin_doctype_identifier(DoctypeIdentifier::System, quote);
            }
            None => self.eof_in_doctype(),
            Some(_) => self.bogus_doctype(ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state(&mut self) {
        match self.current_input_character {
            Some(c) if is_whitespace(c) => {}
            Some('>') => self.finish_doctype(),
            None => self.eof_in_doctype(),
            // "This is an unexpected-character-after-doctype-system-identifier parse error.
            // Reconsume in the bogus DOCTYPE state. (This does not set the current DOCTYPE
            // token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error(ErrorCode::UnexpectedCharacterAfterDoctypeSystemIdentifier);
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.finish_doctype(),
            // "U+0000 NULL - This is an unexpected-null-character parse error. Ignore the
            // character."
            Some('\0') => self.parse_error(ErrorCode::UnexpectedNullCharacter),
            // "EOF - Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_current_doctype();
                self.emit_eof();
            }
            Some(_) => {}
        }
    }
}
