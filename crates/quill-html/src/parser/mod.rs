//! HTML parser module for tree construction.

/// Tree construction: insertion modes and the stack of open elements.
pub mod core;
/// Document mode selection from the DOCTYPE token.
pub mod quirks;

pub use self::core::{
    HTMLParser, InsertionMode, ParseIssue, ParseOutcome, parse, print_tree, render_tree,
};
pub use quirks::quirks_mode_for_doctype;
