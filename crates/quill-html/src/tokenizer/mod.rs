//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference states per § 13.2.5.72 to § 13.2.5.80.
pub mod character_reference;
/// The tokenizer state machine: text, tag and attribute states.
pub mod core;
mod doctype;
/// Parse error codes of § 13.2.2.
pub mod error;
/// Helper methods for tokenizer state transitions.
pub mod helpers;
mod markup_declaration;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerState, tokenize};
pub use error::{ErrorCode, HtmlParseError};
pub use helpers::normalize_newlines;
pub use token::{Attribute, CommentBuilder, DoctypeBuilder, TagBuilder, TagKind, Token};
