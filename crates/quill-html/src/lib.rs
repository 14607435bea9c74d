//! HTML tokenizer and tree builder for Quill.
//!
//! # Scope
//!
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - All 80 tokenizer states, including script data escapes and CDATA sections
//!   - Named and numeric character references
//!   - Parse errors with source positions
//!
//! - **Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Insertion modes: Initial, BeforeHtml, BeforeHead, InHead, AfterHead, InBody, Text, AfterBody, AfterAfterBody
//!   - Quirks mode from the DOCTYPE
//!
//! # Not Implemented
//!
//! - Table, form, template and frameset insertion modes
//! - Adoption agency algorithm and foster parenting
//! - Foreign content (SVG, MathML)

/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{HTMLParser, InsertionMode, ParseIssue, ParseOutcome, parse, print_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState, tokenize};
