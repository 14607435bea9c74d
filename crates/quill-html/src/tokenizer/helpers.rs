//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - Input preprocessing and the input stream checks
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token")
//! - The appropriate-end-tag unwind shared by RCDATA, RAWTEXT and script data
//! - Parse error recording

use quill_common::codepoint::{is_control, is_noncharacter, is_whitespace};

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::{ErrorCode, HtmlParseError};
use super::token::{TagBuilder, TagKind, Token};

/// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream)
///
/// "Before the tokenization stage, the input stream must be preprocessed by
/// normalizing newlines."
///
/// "To normalize newlines in a string, replace every U+000D CR U+000A LF code
/// point pair with a single U+000A LF code point, and then replace every
/// remaining U+000D CR code point with a U+000A LF code point."
#[must_use]
pub fn normalize_newlines(input: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                let _ = chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Steps the cursor back so the same character (or EOF) is read again in
    /// the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.cursor.retreat();
        self.state = new_state;
    }

    /// Reconsume in the return state set by the last character reference.
    pub(super) const fn reconsume_in_return_state(&mut self) {
        let return_state = self.return_state;
        self.reconsume_in(return_state);
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Consume the next input character"
    ///
    /// The first time a code point is read it is checked against the input
    /// stream rules of [§ 13.2.3.5](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream).
    /// Reconsuming does not report it again.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.cursor.advance()?;
        let position = self.cursor.position();
        if position > self.checked_up_to {
            self.checked_up_to = position;
            let value = u32::from(c);
            // "Any occurrences of noncharacters in the input stream are
            // noncharacter-in-input-stream parse errors. Any occurrences of
            // controls other than ASCII whitespace and U+0000 NULL characters
            // are control-character-in-input-stream parse errors."
            if is_noncharacter(value) {
                self.parse_error(ErrorCode::NoncharacterInInputStream);
            } else if is_control(value) && !is_whitespace(c) && c != '\0' {
                self.parse_error(ErrorCode::ControlCharacterInInputStream);
            }
        }
        Some(c)
    }

    /// "If the next few characters are..." followed by "consume those characters".
    ///
    /// Returns false, consuming nothing, when they are not.
    pub(super) fn consume_if_next_are(&mut self, literal: &str) -> bool {
        if self.cursor.starts_with(literal) {
            self.cursor.skip(literal.chars().count());
            true
        } else {
            false
        }
    }

    /// Like [`consume_if_next_are`](Self::consume_if_next_are) with an ASCII
    /// case-insensitive match.
    pub(super) fn consume_if_next_are_ignore_case(&mut self, literal: &str) -> bool {
        if self.cursor.starts_with_ignore_ascii_case(literal) {
            self.cursor.skip(literal.chars().count());
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "Emit the current tag token."
    ///
    /// A start tag records its name as the last start tag emitted. An end tag
    /// carrying attributes or a self-closing flag is a parse error.
    pub(super) fn emit_current_tag(&mut self) {
        let Some(tag) = self.current_tag.take() else {
            return;
        };
        match tag.kind() {
            TagKind::Start => {
                self.last_start_tag_name = Some(tag.name().to_string());
            }
            TagKind::End => {
                // "When an end tag token is emitted with attributes, that is an
                // end-tag-with-attributes parse error."
                if tag.has_attributes() {
                    self.parse_error(ErrorCode::EndTagWithAttributes);
                }
            }
        }
        let token = tag.build();
        // "When an end tag token is emitted with its self-closing flag set,
        // that is an end-tag-with-trailing-solidus parse error."
        if matches!(
            token,
            Token::EndTag {
                self_closing: true,
                ..
            }
        ) {
            self.parse_error(ErrorCode::EndTagWithTrailingSolidus);
        }
        self.pending.push_back(token);
    }

    /// "Emit the comment token."
    pub(super) fn emit_current_comment(&mut self) {
        if let Some(comment) = self.current_comment.take() {
            self.pending.push_back(comment.build());
        }
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_current_doctype(&mut self) {
        if let Some(doctype) = self.current_doctype.take() {
            self.pending.push_back(doctype.build());
        }
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character(&mut self, c: char) {
        self.pending.push_back(Token::character(c));
    }

    /// Emit one character token per character of `s`.
    pub(super) fn emit_characters(&mut self, s: &str) {
        self.pending.extend(s.chars().map(Token::character));
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof(&mut self) {
        self.pending.push_back(Token::EndOfFile);
        self.emitted_eof = true;
    }
}

// =============================================================================
// RCDATA / RAWTEXT / Script Data Helpers
// =============================================================================

impl HTMLTokenizer {
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.last_start_tag_name, &self.current_tag) {
            (Some(last), Some(tag)) => tag.kind() == TagKind::End && tag.name() == last,
            _ => false,
        }
    }

    /// The "anything else" branch of the RCDATA, RAWTEXT, script data and
    /// script data escaped end tag name states:
    ///
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// X state."
    pub(super) fn unwind_end_tag_name(&mut self, text_state: TokenizerState) {
        self.emit_character('<');
        self.emit_character('/');
        let buffer = core::mem::take(&mut self.temporary_buffer);
        self.emit_characters(&buffer);
        self.current_tag = None;
        self.reconsume_in(text_state);
    }

    /// The shared body of the RCDATA, RAWTEXT, script data and script data
    /// escaped end tag name states.
    pub(super) fn handle_text_end_tag_name(&mut self, text_state: TokenizerState) {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION (tab)", "U+000A LINE FEED (LF)",
            // "U+000C FORM FEED (FF)", "U+0020 SPACE"
            // "If the current end tag token is an appropriate end tag token, then
            // switch to the before attribute name state. Otherwise, treat it as
            // per the "anything else" entry below."
            Some(c) if is_whitespace(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "U+002F SOLIDUS (/)"
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "...switch to the data state and emit the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag();
            }
            // "ASCII upper alpha"
            // "Append the lowercase version of the current input character to the
            // current tag token's tag name. Append the current input character to
            // the temporary buffer."
            // "ASCII lower alpha"
            // "Append the current input character to the current tag token's tag
            // name. Append the current input character to the temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.push_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
            }
            // "Anything else"
            _ => self.unwind_end_tag_name(text_state),
        }
    }

    /// The shared body of the RCDATA, RAWTEXT, script data and script data
    /// escaped end tag open states.
    pub(super) fn handle_text_end_tag_open(
        &mut self,
        name_state: TokenizerState,
        text_state: TokenizerState,
    ) {
        match self.current_input_character {
            // "ASCII alpha"
            // "Create a new end tag token, set its tag name to the empty string.
            // Reconsume in the X end tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(TagBuilder::new(TagKind::End));
                self.reconsume_in(name_state);
            }
            // "Anything else"
            // "Emit a U+003C LESS-THAN SIGN character token and a U+002F SOLIDUS
            // character token. Reconsume in the X state."
            _ => {
                self.emit_character('<');
                self.emit_character('/');
                self.reconsume_in(text_state);
            }
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl HTMLTokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a named parse error and reports it through the warning system.
    /// Parse errors in HTML are not fatal - the tokenizer recovers and continues.
    pub(super) fn parse_error(&mut self, code: ErrorCode) {
        let position = self.cursor.position().min(self.cursor.len());
        let error = HtmlParseError::new(code, position);
        error.report("HTML Tokenizer");
        self.errors.push(error);
    }
}
