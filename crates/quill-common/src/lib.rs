//! Shared infrastructure for the Quill tokenizers.
//!
//! This crate provides the pieces both scanners are built from:
//! - **Code-point classification** - the predicates of
//!   [CSS Syntax § 4.2](https://www.w3.org/TR/css-syntax-3/#tokenizer-definitions)
//!   and [Infra § 4.6](https://infra.spec.whatwg.org/#code-points)
//! - **Cursor** - an owned code-point position with lookahead and reconsume
//! - **Parse errors** - a non-fatal `(code, position)` record
//! - **Warning System** - colored, deduplicated terminal output

/// Code-point predicates shared by the CSS and HTML tokenizers.
pub mod codepoint;
/// Owned scanner position over a preprocessed code-point buffer.
pub mod cursor;
/// Non-fatal parse error record.
pub mod error;
/// Deduplicated diagnostic output.
pub mod warning;

pub use cursor::Cursor;
pub use error::ParseError;
