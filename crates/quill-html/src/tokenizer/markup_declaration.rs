//! Markup declarations: comments, bogus comments and CDATA sections.
//!
//! [§ 13.2.5.41](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
//! through [§ 13.2.5.52](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state),
//! plus the CDATA section states of § 13.2.5.69 to § 13.2.5.71.

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::ErrorCode;
use super::token::CommentBuilder;

impl HTMLTokenizer {
    /// The comment under construction.
    fn comment_mut(&mut self) -> &mut CommentBuilder {
        self.current_comment.get_or_insert_with(CommentBuilder::new)
    }

    /// "This is an eof-in-comment parse error. Emit the current comment token.
    /// Emit an end-of-file token."
    fn eof_in_comment(&mut self) {
        self.parse_error(ErrorCode::EofInComment);
        self.emit_current_comment();
        self.emit_eof();
    }

    /// "Switch to the data state. Emit the current comment token."
    fn finish_comment(&mut self) {
        self.switch_to(TokenizerState::Data);
        self.emit_current_comment();
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)"
            // "Switch to the data state. Emit the current comment token."
            Some('>') => self.finish_comment(),
            // "EOF"
            // "Emit the comment. Emit an end-of-file token."
            None => {
                self.emit_current_comment();
                self.emit_eof();
            }
            // "U+0000 NULL"
            // "This is an unexpected-null-character parse error. Append a U+FFFD
            // REPLACEMENT CHARACTER character to the comment token's data."
            Some('\0') => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.comment_mut().push('\u{FFFD}');
            }
            // "Anything else"
            // "Append the current input character to the comment token's data."
            Some(c) => self.comment_mut().push(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// This state looks at the upcoming characters without consuming a
    /// current input character first.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        // "If the next two characters are both U+002D HYPHEN-MINUS characters (-),
        // consume those two characters, create a comment token whose data is the empty
        // string, and switch to the comment start state."
        if self.consume_if_next_are("--") {
            self.current_comment = Some(CommentBuilder::new());
            self.switch_to(TokenizerState::CommentStart);
        }
        // "Otherwise, if the next seven characters are an ASCII case-insensitive
        // match for the word 'DOCTYPE', consume those characters and switch to the
        // DOCTYPE state."
        else if self.consume_if_next_are_ignore_case("DOCTYPE") {
            self.switch_to(TokenizerState::DOCTYPE);
        }
        // "Otherwise, if there is an adjusted current node and it is not an element in
        // the HTML namespace and the next seven characters are a case-sensitive match
        // for the string "[CDATA[", then consume those characters and switch to the
        // CDATA section state. Otherwise, this is a cdata-in-html-content parse error.
        // Create a comment token whose data is the "[CDATA[" string. Switch to the
        // bogus comment state."
        else if self.consume_if_next_are("[CDATA[") {
            if self.cdata_allowed {
                self.switch_to(TokenizerState::CDATASection);
            } else {
                self.parse_error(ErrorCode::CdataInHtmlContent);
                let mut comment = CommentBuilder::new();
                comment.push_str("[CDATA[");
                self.current_comment = Some(comment);
                self.switch_to(TokenizerState::BogusComment);
            }
        }
        // "Otherwise, this is an incorrectly-opened-comment parse error. Create a comment
        // token whose data is the empty string. Switch to the bogus comment state (don't
        // consume anything in the current state)."
        else {
            self.parse_error(ErrorCode::IncorrectlyOpenedComment);
            self.current_comment = Some(CommentBuilder::new());
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-)"
            // "Switch to the comment start dash state."
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is an abrupt-closing-of-empty-comment parse error. Switch to the data
            // state. Emit the current comment token."
            Some('>') => {
                self.parse_error(ErrorCode::AbruptClosingOfEmptyComment);
                self.finish_comment();
            }
            // "Anything else"
            // "Reconsume in the comment state."
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.parse_error(ErrorCode::AbruptClosingOfEmptyComment);
                self.finish_comment();
            }
            None => self.eof_in_comment(),
            // "Anything else"
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment token's data.
            // Reconsume in the comment state."
            Some(_) => {
                self.comment_mut().push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<)"
            // "Append the current input character to the comment token's data. Switch to
            // the comment less-than sign state."
            Some('<') => {
                self.comment_mut().push('<');
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            // "U+002D HYPHEN-MINUS (-)"
            // "Switch to the comment end dash state."
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.parse_error(ErrorCode::UnexpectedNullCharacter);
                self.comment_mut().push('\u{FFFD}');
            }
            None => self.eof_in_comment(),
            Some(c) => self.comment_mut().push(c),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!)"
            // "Append the current input character to the comment token's data. Switch to
            // the comment less-than sign bang state."
            Some('!') => {
                self.comment_mut().push('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            // "U+003C LESS-THAN SIGN (<)"
            // "Append the current input character to the comment token's data."
            Some('<') => self.comment_mut().push('<'),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentLessThanSignBangDash),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentLessThanSignBangDashDash),
            _ => self.reconsume_in(TokenizerState::CommentEndDash),
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>)", "EOF"
            // "Reconsume in the comment end state."
            Some('>') | None => self.reconsume_in(TokenizerState::CommentEnd),
            // "Anything else"
            // "This is a nested-comment parse error. Reconsume in the comment end state."
            Some(_) => {
                self.parse_error(ErrorCode::NestedComment);
                self.reconsume_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(),
            Some(_) => {
                self.comment_mut().push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => self.finish_comment(),
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            // "U+002D HYPHEN-MINUS (-)"
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment token's data."
            Some('-') => self.comment_mut().push('-'),
            None => self.eof_in_comment(),
            // "Anything else"
            // "Append two U+002D HYPHEN-MINUS characters (-) to the comment token's data.
            // Reconsume in the comment state."
            Some(_) => {
                self.comment_mut().push_str("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-)"
            // "Append two U+002D HYPHEN-MINUS characters (-) and a U+0021 EXCLAMATION MARK
            // character (!) to the comment token's data. Switch to the comment end dash
            // state."
            Some('-') => {
                self.comment_mut().push_str("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            // "U+003E GREATER-THAN SIGN (>)"
            // "This is an incorrectly-closed-comment parse error. Switch to the data state.
            // Emit the current comment token."
            Some('>') => {
                self.parse_error(ErrorCode::IncorrectlyClosedComment);
                self.finish_comment();
            }
            None => self.eof_in_comment(),
            Some(_) => {
                self.comment_mut().push_str("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    pub(super) fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            // "U+005D RIGHT SQUARE BRACKET (])"
            // "Switch to the CDATA section bracket state."
            Some(']') => self.switch_to(TokenizerState::CDATASectionBracket),
            // "EOF"
            // "This is an eof-in-cdata parse error. Emit an end-of-file token."
            None => {
                self.parse_error(ErrorCode::EofInCdata);
                self.emit_eof();
            }
            // "Anything else"
            // "Emit the current input character as a character token."
            Some(c) => self.emit_character(c),
        }
    }

    /// [§ 13.2.5.70 CDATA section bracket state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state)
    pub(super) fn handle_cdata_section_bracket_state(&mut self) {
        match self.current_input_character {
            Some(']') => self.switch_to(TokenizerState::CDATASectionEnd),
            // "Anything else"
            // "Emit a U+005D RIGHT SQUARE BRACKET character token. Reconsume in the CDATA
            // section state."
            _ => {
                self.emit_character(']');
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }

    /// [§ 13.2.5.71 CDATA section end state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state)
    pub(super) fn handle_cdata_section_end_state(&mut self) {
        match self.current_input_character {
            // "U+005D RIGHT SQUARE BRACKET (])"
            // "Emit a U+005D RIGHT SQUARE BRACKET character token."
            Some(']') => self.emit_character(']'),
            // "U+003E GREATER-THAN SIGN character"
            // "Switch to the data state."
            Some('>') => self.switch_to(TokenizerState::Data),
            // "Anything else"
            // "Emit two U+005D RIGHT SQUARE BRACKET character tokens. Reconsume in the
            // CDATA section state."
            _ => {
                self.emit_characters("]]");
                self.reconsume_in(TokenizerState::CDATASection);
            }
        }
    }
}
