use quill_common::Cursor;
use quill_common::codepoint::{
    is_digit, is_hex_digit, is_ident_continue, is_ident_start, is_non_printable, is_whitespace,
};

use super::error::{CssParseError, ErrorCode};
use super::preprocess::preprocess;
use super::token::{CSSToken, HashType, NumericType, Sign};

/// The largest code point a unicode-range or escape may name.
const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// [§ 4.3 Tokenizer Algorithms](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms)
///
/// CSS tokenizer following the CSS Syntax Module Level 3 specification.
///
/// The tokenizer is a pull-based [`Iterator`]: every call to `next` consumes
/// exactly one token's worth of input. Once the input is exhausted it keeps
/// returning `None`. Use [`CSSTokenizer::run`] to collect everything at once
/// with a trailing [`CSSToken::EOF`].
pub struct CSSTokenizer {
    /// The preprocessed input and the position in it.
    cursor: Cursor,
    /// Whether `U+...` may be read as a `<unicode-range-token>`.
    unicode_ranges_allowed: bool,
    /// Collected tokens (filled by `run`)
    tokens: Vec<CSSToken>,
    /// Parse errors encountered so far.
    errors: Vec<CssParseError>,
}

impl CSSTokenizer {
    /// Create a new CSS tokenizer with the given input.
    ///
    /// The input is [preprocessed](super::preprocess) once, up front.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            cursor: Cursor::from_chars(preprocess(&input.into())),
            unicode_ranges_allowed: false,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// [§ 4.3.1](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// "This section describes how to consume a token from a stream of code
    /// points. Additionally takes an optional boolean unicode ranges allowed,
    /// defaulting to false."
    #[must_use]
    pub const fn with_unicode_ranges(mut self, allowed: bool) -> Self {
        self.unicode_ranges_allowed = allowed;
        self
    }

    /// Tokenize the whole input and append a final [`CSSToken::EOF`].
    pub fn run(&mut self) {
        while let Some(token) = self.consume_token() {
            self.tokens.push(token);
        }
        self.tokens.push(CSSToken::EOF);
    }

    /// Return the collected tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<CSSToken> {
        self.tokens
    }

    /// Return a reference to the collected tokens.
    #[must_use]
    pub fn tokens(&self) -> &[CSSToken] {
        &self.tokens
    }

    /// Parse errors reported so far.
    #[must_use]
    pub fn errors(&self) -> &[CssParseError] {
        &self.errors
    }

    /// [§ 4.3.1 Consume a token](https://www.w3.org/TR/css-syntax-3/#consume-token)
    ///
    /// "This section describes how to consume a token from a stream of code points.
    /// It will return a single token of any type."
    ///
    /// Returns `None` once the end of input has been consumed.
    fn consume_token(&mut self) -> Option<CSSToken> {
        // "Consume comments."
        self.consume_comments();

        // "Consume the next input code point."
        // "EOF: Return an <EOF-token>."
        let c = self.cursor.advance()?;

        let token = match c {
            // "whitespace"
            // "Consume as much whitespace as possible. Return a <whitespace-token>."
            c if is_whitespace(c) => {
                self.consume_whitespace();
                CSSToken::Whitespace
            }

            // "U+0022 QUOTATION MARK (")"
            // "Consume a string token and return it."
            '"' => self.consume_string_token('"'),

            // "U+0023 NUMBER SIGN (#)"
            '#' => {
                // "If the next input code point is an ident code point or the next
                // two input code points are a valid escape..."
                if self.cursor.peek(0).is_some_and(is_ident_continue)
                    || is_valid_escape(self.cursor.peek(0), self.cursor.peek(1))
                {
                    // "If the next 3 input code points would start an ident sequence,
                    // set the <hash-token>'s type flag to 'id'."
                    let hash_type = if self.next_would_start_ident_sequence() {
                        HashType::Id
                    } else {
                        HashType::Unrestricted
                    };

                    // "Consume an ident sequence, and set the <hash-token>'s value
                    // to the returned string."
                    let value = self.consume_ident_sequence();

                    CSSToken::Hash { value, hash_type }
                } else {
                    // "Otherwise, return a <delim-token> with its value set to the
                    // current input code point."
                    CSSToken::Delim('#')
                }
            }

            // "U+0027 APOSTROPHE (')"
            // "Consume a string token and return it."
            '\'' => self.consume_string_token('\''),

            // "U+0028 LEFT PARENTHESIS (()"
            '(' => CSSToken::LeftParen,

            // "U+0029 RIGHT PARENTHESIS ())"
            ')' => CSSToken::RightParen,

            // "U+002B PLUS SIGN (+)"
            '+' => {
                // "If the input stream starts with a number, reconsume the current
                // input code point, consume a numeric token, and return it."
                if self.current_would_start_number(c) {
                    self.cursor.retreat();
                    self.consume_numeric_token()
                } else {
                    CSSToken::Delim('+')
                }
            }

            // "U+002C COMMA (,)"
            ',' => CSSToken::Comma,

            // "U+002D HYPHEN-MINUS (-)"
            '-' => {
                // "If the input stream starts with a number, reconsume the current
                // input code point, consume a numeric token, and return it."
                if self.current_would_start_number(c) {
                    self.cursor.retreat();
                    self.consume_numeric_token()
                }
                // "Otherwise, if the next 2 input code points are U+002D HYPHEN-MINUS
                // U+003E GREATER-THAN SIGN (->), consume them and return a <CDC-token>."
                else if self.cursor.starts_with("->") {
                    self.cursor.skip(2);
                    CSSToken::CDC
                }
                // "Otherwise, if the input stream starts with an ident sequence,
                // reconsume the current input code point, consume an ident-like
                // token, and return it."
                else if would_start_ident_sequence(
                    Some(c),
                    self.cursor.peek(0),
                    self.cursor.peek(1),
                ) {
                    self.cursor.retreat();
                    self.consume_ident_like_token()
                } else {
                    CSSToken::Delim('-')
                }
            }

            // "U+002E FULL STOP (.)"
            '.' => {
                if self.current_would_start_number(c) {
                    self.cursor.retreat();
                    self.consume_numeric_token()
                } else {
                    CSSToken::Delim('.')
                }
            }

            // "U+003A COLON (:)"
            ':' => CSSToken::Colon,

            // "U+003B SEMICOLON (;)"
            ';' => CSSToken::Semicolon,

            // "U+003C LESS-THAN SIGN (<)"
            '<' => {
                // "If the next 3 input code points are U+0021 EXCLAMATION MARK U+002D
                // HYPHEN-MINUS U+002D HYPHEN-MINUS (!--), consume them and return a
                // <CDO-token>."
                if self.cursor.starts_with("!--") {
                    self.cursor.skip(3);
                    CSSToken::CDO
                } else {
                    CSSToken::Delim('<')
                }
            }

            // "U+0040 COMMERCIAL AT (@)"
            '@' => {
                // "If the next 3 input code points would start an ident sequence,
                // consume an ident sequence, create an <at-keyword-token> with its
                // value set to the returned value, and return it."
                if self.next_would_start_ident_sequence() {
                    CSSToken::AtKeyword(self.consume_ident_sequence())
                } else {
                    CSSToken::Delim('@')
                }
            }

            // "U+005B LEFT SQUARE BRACKET ([)"
            '[' => CSSToken::LeftBracket,

            // "U+005C REVERSE SOLIDUS (\)"
            '\\' => {
                // "If the input stream starts with a valid escape, reconsume the
                // current input code point, consume an ident-like token, and return it."
                if is_valid_escape(Some(c), self.cursor.peek(0)) {
                    self.cursor.retreat();
                    self.consume_ident_like_token()
                } else {
                    // "Otherwise, this is a parse error. Return a <delim-token> with
                    // its value set to the current input code point."
                    self.parse_error(ErrorCode::InvalidEscape);
                    CSSToken::Delim('\\')
                }
            }

            // "U+005D RIGHT SQUARE BRACKET (])"
            ']' => CSSToken::RightBracket,

            // "U+007B LEFT CURLY BRACKET ({)"
            '{' => CSSToken::LeftBrace,

            // "U+007D RIGHT CURLY BRACKET (})"
            '}' => CSSToken::RightBrace,

            // "digit"
            // "Reconsume the current input code point, consume a numeric token, and return it."
            c if is_digit(c) => {
                self.cursor.retreat();
                self.consume_numeric_token()
            }

            // "U+0055 LATIN CAPITAL LETTER U (U)"
            // "U+0075 LATIN SMALL LETTER U (u)"
            // "If unicode ranges allowed is true and the input stream would start a
            // unicode-range, reconsume the current input code point, consume a
            // unicode-range token, and return it."
            'U' | 'u'
                if self.unicode_ranges_allowed
                    && would_start_unicode_range(
                        Some(c),
                        self.cursor.peek(0),
                        self.cursor.peek(1),
                    ) =>
            {
                self.cursor.retreat();
                self.consume_unicode_range_token()
            }

            // "ident-start code point"
            // "Reconsume the current input code point, consume an ident-like token, and return it."
            c if is_ident_start(c) => {
                self.cursor.retreat();
                self.consume_ident_like_token()
            }

            // "anything else"
            // "Return a <delim-token> with its value set to the current input code point."
            c => CSSToken::Delim(c),
        };

        Some(token)
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comment)
    ///
    /// "If the next two input code points are U+002F SOLIDUS (/) followed by
    /// U+002A ASTERISK (*), consume them and all following code points up to
    /// and including the first U+002A ASTERISK (*) followed by U+002F SOLIDUS (/),
    /// or up to an EOF code point. Return to the start of this step."
    ///
    /// "If the preceding paragraph ended by consuming an EOF code point, this is
    /// a parse error."
    fn consume_comments(&mut self) {
        while self.cursor.starts_with("/*") {
            self.cursor.skip(2);

            loop {
                if self.cursor.starts_with("*/") {
                    self.cursor.skip(2);
                    break;
                }
                if self.cursor.advance().is_none() {
                    self.cursor.retreat();
                    self.parse_error(ErrorCode::UnterminatedComment);
                    return;
                }
            }
        }
    }

    /// Consume as much whitespace as possible.
    fn consume_whitespace(&mut self) {
        while self.cursor.peek(0).is_some_and(is_whitespace) {
            let _ = self.cursor.advance();
        }
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    fn consume_string_token(&mut self, ending_code_point: char) -> CSSToken {
        // "Initially create a <string-token> with its value set to the empty string."
        let mut value = String::new();

        loop {
            match self.cursor.advance() {
                // "ending code point"
                // "Return the <string-token>."
                Some(c) if c == ending_code_point => {
                    return CSSToken::String(value);
                }

                // "EOF"
                // "This is a parse error. Return the <string-token>."
                None => {
                    self.parse_error(ErrorCode::EofInString);
                    return CSSToken::String(value);
                }

                // "newline"
                // "This is a parse error. Reconsume the current input code point,
                // create a <bad-string-token>, and return it."
                Some('\n') => {
                    self.parse_error(ErrorCode::NewlineInString);
                    self.cursor.retreat();
                    return CSSToken::BadString;
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => match self.cursor.peek(0) {
                    // "If the next input code point is EOF, do nothing."
                    None => {}
                    // "Otherwise, if the next input code point is a newline,
                    // consume it."
                    Some('\n') => {
                        let _ = self.cursor.advance();
                    }
                    // "Otherwise, (the stream starts with a valid escape)
                    // consume an escaped code point and append the returned
                    // code point to the <string-token>'s value."
                    Some(_) => {
                        let c = self.consume_escaped_code_point();
                        value.push(c);
                    }
                },

                // "anything else"
                // "Append the current input code point to the <string-token>'s value."
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.3 Consume a numeric token](https://www.w3.org/TR/css-syntax-3/#consume-numeric-token)
    fn consume_numeric_token(&mut self) -> CSSToken {
        // "Consume a number and let number be the result."
        let number = self.consume_number();

        // "If the next 3 input code points would start an ident sequence, then:"
        if self.next_would_start_ident_sequence() {
            // "Create a <dimension-token> with the same value, type flag, and sign
            // character as number, and a unit set initially to the empty string."
            // "Consume an ident sequence. Set the <dimension-token>'s unit to the
            // returned value."
            let unit = self.consume_ident_sequence();
            CSSToken::Dimension {
                value: number.value,
                int_value: number.int_value,
                numeric_type: number.numeric_type,
                sign: number.sign,
                unit,
            }
        }
        // "Otherwise, if the next input code point is U+0025 PERCENTAGE SIGN (%),
        // consume it. Create a <percentage-token> with the same value and sign
        // character as number, and return it."
        else if self.cursor.peek(0) == Some('%') {
            let _ = self.cursor.advance();
            CSSToken::Percentage {
                value: number.value,
                sign: number.sign,
            }
        }
        // "Otherwise, create a <number-token> with the same value, type flag, and
        // sign character as number, and return it."
        else {
            CSSToken::Number {
                value: number.value,
                int_value: number.int_value,
                numeric_type: number.numeric_type,
                sign: number.sign,
            }
        }
    }

    /// [§ 4.3.4 Consume an ident-like token](https://www.w3.org/TR/css-syntax-3/#consume-ident-like-token)
    fn consume_ident_like_token(&mut self) -> CSSToken {
        // "Consume an ident sequence, and let string be the result."
        let string = self.consume_ident_sequence();

        // "If string's value is an ASCII case-insensitive match for 'url', and the
        // next input code point is U+0028 LEFT PARENTHESIS ((), consume it."
        if string.eq_ignore_ascii_case("url") && self.cursor.peek(0) == Some('(') {
            let _ = self.cursor.advance();

            // "While the next two input code points are whitespace, consume the
            // next input code point."
            while self.cursor.peek(0).is_some_and(is_whitespace)
                && self.cursor.peek(1).is_some_and(is_whitespace)
            {
                let _ = self.cursor.advance();
            }

            // "If the next one or two input code points are U+0022 QUOTATION MARK ("),
            // U+0027 APOSTROPHE ('), or whitespace followed by U+0022 QUOTATION MARK (")
            // or U+0027 APOSTROPHE ('), then create a <function-token> with its value
            // set to string and return it."
            let is_quote = |c: Option<char>| matches!(c, Some('"' | '\''));
            if is_quote(self.cursor.peek(0))
                || (self.cursor.peek(0).is_some_and(is_whitespace) && is_quote(self.cursor.peek(1)))
            {
                return CSSToken::Function(string);
            }

            // "Otherwise, consume a url token, and return it."
            return self.consume_url_token();
        }

        // "Otherwise, if the next input code point is U+0028 LEFT PARENTHESIS ((),
        // consume it. Create a <function-token> with its value set to string and
        // return it."
        if self.cursor.peek(0) == Some('(') {
            let _ = self.cursor.advance();
            return CSSToken::Function(string);
        }

        // "Otherwise, create an <ident-token> with its value set to string and return it."
        CSSToken::Ident(string)
    }

    /// [§ 4.3.6 Consume a url token](https://www.w3.org/TR/css-syntax-3/#consume-url-token)
    ///
    /// "Note: This algorithm assumes that the initial "url(" has already been
    /// consumed."
    fn consume_url_token(&mut self) -> CSSToken {
        // "Initially create a <url-token> with its value set to the empty string."
        let mut value = String::new();

        // "Consume as much whitespace as possible."
        self.consume_whitespace();

        loop {
            match self.cursor.advance() {
                // "U+0029 RIGHT PARENTHESIS ())"
                // "Return the <url-token>."
                Some(')') => return CSSToken::Url(value),

                // "EOF"
                // "This is a parse error. Return the <url-token>."
                None => {
                    self.parse_error(ErrorCode::EofInUrl);
                    return CSSToken::Url(value);
                }

                // "whitespace"
                Some(c) if is_whitespace(c) => {
                    // "Consume as much whitespace as possible."
                    self.consume_whitespace();
                    match self.cursor.peek(0) {
                        // "If the next input code point is U+0029 RIGHT PARENTHESIS ())
                        // or EOF, consume it and return the <url-token> (if EOF was
                        // encountered, this is a parse error)"
                        Some(')') => {
                            let _ = self.cursor.advance();
                            return CSSToken::Url(value);
                        }
                        None => {
                            let _ = self.cursor.advance();
                            self.parse_error(ErrorCode::EofInUrl);
                            return CSSToken::Url(value);
                        }
                        // "otherwise, consume the remnants of a bad url, create a
                        // <bad-url-token>, and return it."
                        Some(_) => {
                            self.consume_bad_url_remnants();
                            return CSSToken::BadUrl;
                        }
                    }
                }

                // "U+0022 QUOTATION MARK (")", "U+0027 APOSTROPHE (')",
                // "U+0028 LEFT PARENTHESIS (()", "non-printable code point"
                // "This is a parse error. Consume the remnants of a bad url, create a
                // <bad-url-token>, and return it."
                Some(c) if matches!(c, '"' | '\'' | '(') || is_non_printable(c) => {
                    self.parse_error(ErrorCode::InvalidCharacterInUrl);
                    self.consume_bad_url_remnants();
                    return CSSToken::BadUrl;
                }

                // "U+005C REVERSE SOLIDUS (\)"
                Some('\\') => {
                    // "If the stream starts with a valid escape, consume an escaped
                    // code point and append the returned code point to the
                    // <url-token>'s value."
                    if is_valid_escape(Some('\\'), self.cursor.peek(0)) {
                        let c = self.consume_escaped_code_point();
                        value.push(c);
                    } else {
                        // "Otherwise, this is a parse error. Consume the remnants of a
                        // bad url, create a <bad-url-token>, and return it."
                        self.parse_error(ErrorCode::InvalidEscape);
                        self.consume_bad_url_remnants();
                        return CSSToken::BadUrl;
                    }
                }

                // "anything else"
                // "Append the current input code point to the <url-token>'s value."
                Some(c) => value.push(c),
            }
        }
    }

    /// [§ 4.3.7 Consume a unicode-range token](https://www.w3.org/TR/css-syntax-3/#consume-unicode-range-token)
    ///
    /// "This section describes how to consume a unicode-range token. It returns
    /// a <unicode-range-token>."
    ///
    /// Only called when the input starts with `U+` or `u+` followed by a hex
    /// digit or `?`.
    fn consume_unicode_range_token(&mut self) -> CSSToken {
        // "Consume the next two input code points and discard them."
        self.cursor.skip(2);

        // "Consume as many hex digits as possible, but no more than 6."
        let mut first_segment = self.consume_hex_digits(6);

        // "If less than 6 hex digits were consumed, consume as many U+003F QUESTION
        // MARK (?) code points as possible, but no more than enough to make the
        // total of hex digits and U+003F QUESTION MARK (?) code points equal to 6."
        let mut has_question_marks = false;
        while first_segment.len() < 6 && self.cursor.peek(0) == Some('?') {
            let _ = self.cursor.advance();
            first_segment.push('?');
            has_question_marks = true;
        }

        // "If any U+003F QUESTION MARK (?) code points were consumed, then:"
        if has_question_marks {
            // "Interpret the consumed code points as a hexadecimal number, with the
            // U+003F QUESTION MARK (?) code points replaced by U+0030 DIGIT ZERO (0)
            // code points. This is the start value."
            let start = parse_hex(&first_segment.replace('?', "0"));
            // "Interpret the consumed code points as a hexadecimal number again, with
            // the U+003F QUESTION MARK (?) code points replaced by U+0046 LATIN
            // CAPITAL LETTER F (F) code points. This is the end value."
            let end = parse_hex(&first_segment.replace('?', "F"));
            // "Return a new <unicode-range-token> both starting and ending code points
            // set to the start value and end value."
            return CSSToken::UnicodeRange { start, end };
        }

        // "Otherwise, interpret the digits as a hexadecimal number. This is the
        // start value."
        let start = parse_hex(&first_segment);

        // "If the next 2 input code points are U+002D HYPHEN-MINUS (-) followed by
        // a hex digit, then:"
        if self.cursor.peek(0) == Some('-') && self.cursor.peek(1).is_some_and(is_hex_digit) {
            // "Consume the next input code point."
            let _ = self.cursor.advance();
            // "Consume as many hex digits as possible, but no more than 6. Interpret
            // the digits as a hexadecimal number. This is the end value."
            let end = parse_hex(&self.consume_hex_digits(6));
            return CSSToken::UnicodeRange { start, end };
        }

        // "Otherwise, return a new <unicode-range-token> with both its starting and
        // ending code points set to the start value."
        CSSToken::UnicodeRange { start, end: start }
    }

    /// [§ 4.3.14 Consume the remnants of a bad url](https://www.w3.org/TR/css-syntax-3/#consume-remnants-of-bad-url)
    ///
    /// "Its sole use is to consume enough of the input stream to reach a recovery
    /// point where normal tokenizing can resume."
    fn consume_bad_url_remnants(&mut self) {
        loop {
            match self.cursor.advance() {
                // "U+0029 RIGHT PARENTHESIS ())" / "EOF"
                Some(')') | None => return,
                // "the input stream starts with a valid escape"
                Some('\\') if is_valid_escape(Some('\\'), self.cursor.peek(0)) => {
                    let _ = self.consume_escaped_code_point();
                }
                // "anything else: Do nothing."
                Some(_) => {}
            }
        }
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    ///
    /// "Note: This algorithm does not do the verification of the first few code
    /// points that are necessary to ensure the returned code points would
    /// constitute an <ident-token>."
    fn consume_ident_sequence(&mut self) -> String {
        // "Let result initially be an empty string."
        let mut result = String::new();

        loop {
            match self.cursor.advance() {
                // "ident code point"
                // "Append the code point to result."
                Some(c) if is_ident_continue(c) => result.push(c),

                // "the stream starts with a valid escape"
                // "Consume an escaped code point. Append the returned code point to result."
                Some('\\') if is_valid_escape(Some('\\'), self.cursor.peek(0)) => {
                    let c = self.consume_escaped_code_point();
                    result.push(c);
                }

                // "anything else"
                // "Reconsume the current input code point. Return result."
                _ => {
                    self.cursor.retreat();
                    return result;
                }
            }
        }
    }

    /// [§ 4.3.12 Consume a number](https://www.w3.org/TR/css-syntax-3/#consume-number)
    ///
    /// The value is computed from the decimal digits as written: all mantissa
    /// digits scaled by a single power of ten, converted to `f64` once with
    /// correct rounding. `0.42` and `4.2e-1` therefore produce the same value.
    fn consume_number(&mut self) -> ConsumedNumber {
        // "Initially set type to 'integer'. Let repr be the empty string."
        let mut numeric_type = NumericType::Integer;
        let mut sign = None;
        let mut mantissa = String::new();
        let mut fraction_digits: i64 = 0;

        // "If the next input code point is U+002B PLUS SIGN (+) or U+002D
        // HYPHEN-MINUS (-), consume it and append it to repr."
        if let Some(s) = self.cursor.peek(0).and_then(Sign::from_char) {
            let _ = self.cursor.advance();
            sign = Some(s);
        }

        // "While the next input code point is a digit, consume it and append it to repr."
        self.consume_digits_into(&mut mantissa);

        // "If the next 2 input code points are U+002E FULL STOP (.) followed by a
        // digit, then: Consume them. Append them to repr. Set type to 'number'.
        // While the next input code point is a digit, consume it and append it to repr."
        if self.cursor.peek(0) == Some('.') && self.cursor.peek(1).is_some_and(is_digit) {
            let _ = self.cursor.advance();
            let before = mantissa.len();
            self.consume_digits_into(&mut mantissa);
            fraction_digits = i64::try_from(mantissa.len() - before).unwrap_or(i64::MAX);
            numeric_type = NumericType::Number;
        }

        // "If the next 2 or 3 input code points are U+0045 LATIN CAPITAL LETTER E (E)
        // or U+0065 LATIN SMALL LETTER E (e), optionally followed by U+002D
        // HYPHEN-MINUS (-) or U+002B PLUS SIGN (+), followed by a digit, then:
        // Consume them. Append them to repr. Set type to 'number'."
        let mut exponent: i64 = 0;
        if matches!(self.cursor.peek(0), Some('e' | 'E')) {
            let exponent_sign = self.cursor.peek(1).and_then(Sign::from_char);
            let digit_offset = if exponent_sign.is_some() { 2 } else { 1 };

            if self.cursor.peek(digit_offset).is_some_and(is_digit) {
                self.cursor.skip(digit_offset);
                let mut digits = String::new();
                self.consume_digits_into(&mut digits);
                // Exponents too long for i64 saturate; the value overflows either way.
                let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
                exponent = if exponent_sign == Some(Sign::Minus) {
                    -magnitude
                } else {
                    magnitude
                };
                numeric_type = NumericType::Number;
            }
        }

        // "Convert repr to a number, and set the value to the returned value."
        if mantissa.is_empty() {
            mantissa.push('0');
        }
        let scale = exponent.saturating_sub(fraction_digits);
        let magnitude = format!("{mantissa}e{scale}")
            .parse::<f64>()
            .unwrap_or(0.0)
            .min(f64::MAX);
        let value = if sign == Some(Sign::Minus) {
            -magnitude
        } else {
            magnitude
        };

        let int_value = if numeric_type == NumericType::Integer {
            mantissa.parse::<i64>().ok().map(|n| {
                if sign == Some(Sign::Minus) { -n } else { n }
            })
        } else {
            None
        };

        ConsumedNumber {
            value,
            int_value,
            numeric_type,
            sign,
        }
    }

    /// [§ 4.3.8 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// "It assumes that the U+005C REVERSE SOLIDUS (\) has already been consumed
    /// and that the next input code point has already been verified to be part
    /// of a valid escape."
    fn consume_escaped_code_point(&mut self) -> char {
        match self.cursor.advance() {
            // "hex digit"
            Some(c) if is_hex_digit(c) => {
                // "Consume as many hex digits as possible, but no more than 5.
                // Note that this means 1-6 hex digits have been consumed in total."
                let mut hex = String::from(c);
                hex.push_str(&self.consume_hex_digits(5));

                // "If the next input code point is whitespace, consume it as well."
                if self.cursor.peek(0).is_some_and(is_whitespace) {
                    let _ = self.cursor.advance();
                }

                // "Interpret the hex digits as a hexadecimal number. If this number is
                // zero, or is for a surrogate, or is greater than the maximum allowed
                // code point, return U+FFFD REPLACEMENT CHARACTER (�). Otherwise,
                // return the code point with that value."
                let code_point = parse_hex(&hex);
                if code_point == 0 || code_point > MAX_CODE_POINT {
                    '\u{FFFD}'
                } else {
                    // Surrogates are the only other values `from_u32` rejects.
                    char::from_u32(code_point).unwrap_or('\u{FFFD}')
                }
            }

            // "EOF"
            // "This is a parse error. Return U+FFFD REPLACEMENT CHARACTER (�)."
            None => {
                self.parse_error(ErrorCode::EofInEscape);
                '\u{FFFD}'
            }

            // "anything else"
            // "Return the current input code point."
            Some(c) => c,
        }
    }

    /// Consume up to `limit` hex digits.
    fn consume_hex_digits(&mut self, limit: usize) -> String {
        let mut hex = String::new();
        while hex.len() < limit && self.cursor.peek(0).is_some_and(is_hex_digit) {
            if let Some(c) = self.cursor.advance() {
                hex.push(c);
            }
        }
        hex
    }

    /// Consume a run of digits, appending them to `out`.
    fn consume_digits_into(&mut self, out: &mut String) {
        while self.cursor.peek(0).is_some_and(is_digit) {
            if let Some(c) = self.cursor.advance() {
                out.push(c);
            }
        }
    }

    /// "the next 3 input code points would start an ident sequence"
    fn next_would_start_ident_sequence(&self) -> bool {
        would_start_ident_sequence(self.cursor.peek(0), self.cursor.peek(1), self.cursor.peek(2))
    }

    /// "the input stream starts with a number", where `current` has just been
    /// consumed.
    fn current_would_start_number(&self, current: char) -> bool {
        would_start_number(Some(current), self.cursor.peek(0), self.cursor.peek(1))
    }

    /// Record a parse error at the current position.
    fn parse_error(&mut self, code: ErrorCode) {
        let position = self.cursor.position().min(self.cursor.len());
        let error = CssParseError::new(code, position);
        error.report("CSS Tokenizer");
        self.errors.push(error);
    }
}

impl Iterator for CSSTokenizer {
    type Item = CSSToken;

    fn next(&mut self) -> Option<CSSToken> {
        self.consume_token()
    }
}

/// Tokenize `input` with default options.
///
/// The returned sequence holds no trailing [`CSSToken::EOF`]; its end is the
/// end of input.
#[must_use]
pub fn tokenize(input: &str) -> Vec<CSSToken> {
    CSSTokenizer::new(input).collect()
}

/// Result of "consume a number".
struct ConsumedNumber {
    value: f64,
    int_value: Option<i64>,
    numeric_type: NumericType,
    sign: Option<Sign>,
}

/// Interpret up to six hex digits. Callers only pass validated digits.
fn parse_hex(digits: &str) -> u32 {
    u32::from_str_radix(digits, 16).unwrap_or(0)
}

/// [§ 4.3.8 Check if two code points are a valid escape](https://www.w3.org/TR/css-syntax-3/#starts-with-a-valid-escape)
fn is_valid_escape(first: Option<char>, second: Option<char>) -> bool {
    // "If the first code point is not U+005C REVERSE SOLIDUS (\), return false."
    // "Otherwise, if the second code point is a newline, return false."
    // "Otherwise, return true."
    first == Some('\\') && second != Some('\n')
}

/// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
fn would_start_ident_sequence(
    first: Option<char>,
    second: Option<char>,
    third: Option<char>,
) -> bool {
    match first {
        // "U+002D HYPHEN-MINUS"
        // "If the second code point is an ident-start code point or a U+002D
        // HYPHEN-MINUS, or the second and third code points are a valid escape,
        // return true. Otherwise, return false."
        Some('-') => {
            second.is_some_and(is_ident_start)
                || second == Some('-')
                || is_valid_escape(second, third)
        }
        // "ident-start code point"
        Some(c) if is_ident_start(c) => true,
        // "U+005C REVERSE SOLIDUS (\)"
        // "If the first and second code points are a valid escape, return true."
        Some('\\') => is_valid_escape(first, second),
        // "anything else"
        _ => false,
    }
}

/// [§ 4.3.10 Check if three code points would start a number](https://www.w3.org/TR/css-syntax-3/#starts-with-a-number)
fn would_start_number(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    match first {
        // "U+002B PLUS SIGN (+)" / "U+002D HYPHEN-MINUS (-)"
        // "If the second code point is a digit, return true. Otherwise, if the second
        // code point is a U+002E FULL STOP (.) and the third code point is a digit,
        // return true. Otherwise, return false."
        Some('+' | '-') => {
            second.is_some_and(is_digit) || (second == Some('.') && third.is_some_and(is_digit))
        }
        // "U+002E FULL STOP (.)"
        // "If the second code point is a digit, return true. Otherwise, return false."
        Some('.') => second.is_some_and(is_digit),
        // "digit"
        Some(c) => is_digit(c),
        // "anything else"
        None => false,
    }
}

/// [§ 4.3.15 Check if three code points would start a unicode-range](https://www.w3.org/TR/css-syntax-3/#starts-a-unicode-range)
///
/// "If all of the following are true: The first code point is either U+0055
/// LATIN CAPITAL LETTER U (U) or U+0075 LATIN SMALL LETTER U (u). The second
/// code point is U+002B PLUS SIGN (+). The third code point is either U+003F
/// QUESTION MARK (?) or a hex digit, then return true."
fn would_start_unicode_range(first: Option<char>, second: Option<char>, third: Option<char>) -> bool {
    matches!(first, Some('U' | 'u'))
        && second == Some('+')
        && (third == Some('?') || third.is_some_and(is_hex_digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_escape() {
        assert!(is_valid_escape(Some('\\'), Some('a')));
        assert!(is_valid_escape(Some('\\'), None));
        assert!(!is_valid_escape(Some('\\'), Some('\n')));
        assert!(!is_valid_escape(Some('a'), Some('b')));
    }

    #[test]
    fn test_would_start_number() {
        assert!(would_start_number(Some('+'), Some('1'), None));
        assert!(would_start_number(Some('-'), Some('.'), Some('5')));
        assert!(!would_start_number(Some('+'), Some('-'), Some('5')));
        assert!(would_start_number(Some('.'), Some('5'), None));
        assert!(!would_start_number(Some('.'), Some('a'), None));
        assert!(!would_start_number(None, None, None));
    }

    #[test]
    fn test_would_start_ident_sequence() {
        assert!(would_start_ident_sequence(Some('-'), Some('-'), None));
        assert!(would_start_ident_sequence(Some('-'), Some('a'), None));
        assert!(would_start_ident_sequence(Some('-'), Some('\\'), Some('x')));
        assert!(!would_start_ident_sequence(Some('-'), Some('1'), None));
        assert!(would_start_ident_sequence(Some('\\'), Some('x'), None));
        assert!(!would_start_ident_sequence(Some('\\'), Some('\n'), None));
        assert!(!would_start_ident_sequence(None, None, None));
    }

    #[test]
    fn test_would_start_unicode_range() {
        assert!(would_start_unicode_range(Some('u'), Some('+'), Some('?')));
        assert!(would_start_unicode_range(Some('U'), Some('+'), Some('f')));
        assert!(!would_start_unicode_range(Some('u'), Some('+'), Some('g')));
        assert!(!would_start_unicode_range(Some('u'), Some('-'), Some('1')));
    }
}
