//! CSS tokenizer module.

/// The tokenizer state machine per [CSS Syntax Level 3 § 4.3](https://www.w3.org/TR/css-syntax-3/#tokenizer-algorithms).
pub mod core;
/// Parse error codes reported while tokenizing.
pub mod error;
/// Input stream preprocessing.
pub mod preprocess;
/// CSS token types per [CSS Syntax Level 3 § 4](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod token;

pub use self::core::{CSSTokenizer, tokenize};
pub use error::{CssParseError, ErrorCode};
pub use preprocess::preprocess;
pub use token::{CSSToken, HashType, NumericType, Sign};
