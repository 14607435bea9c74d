//! CSS tokenizer parse errors.
//!
//! [§ 3 Tokenizing and Parsing CSS](https://www.w3.org/TR/css-syntax-3/#tokenizing-and-parsing)
//!
//! "Parse errors ... are never fatal." The syntax specification does not name
//! its errors, so the codes below name the construct that went wrong.

use quill_common::ParseError;
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Named CSS tokenizer parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorCode {
    /// A `/*` comment ran to the end of input.
    UnterminatedComment,
    /// A string token ran to the end of input.
    EofInString,
    /// An unescaped newline inside a string token.
    NewlineInString,
    /// A url token ran to the end of input.
    EofInUrl,
    /// A quote, `(` or non-printable code point inside an unquoted url.
    InvalidCharacterInUrl,
    /// A `\` that does not start a valid escape.
    InvalidEscape,
    /// A `\` immediately followed by the end of input.
    EofInEscape,
}

/// A CSS tokenizer parse error.
pub type CssParseError = ParseError<ErrorCode>;
