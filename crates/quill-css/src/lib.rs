//! CSS tokenizer for Quill.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - Input preprocessing (newline normalization, NULL replacement)
//!   - All token types: ident, function, at-keyword, hash, string, url, number,
//!     percentage, dimension, unicode-range, etc.
//!   - Comment handling
//!   - Escape sequences
//!   - Named, non-fatal parse errors
//!
//! # Not Implemented
//!
//! - Parsing tokens into rules and declarations
//! - Selector matching

/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;

pub use tokenizer::{CSSToken, CSSTokenizer, tokenize};
