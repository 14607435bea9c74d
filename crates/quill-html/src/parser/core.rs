use std::fmt::Write as _;

use quill_common::codepoint::is_whitespace;
use quill_common::warning::{clear_warnings, warn_once};
use quill_dom::{DocumentTypeData, DomTree, ElementData, NodeId, NodeType, QuirksMode};
use strum_macros::Display;

use super::quirks::quirks_mode_for_doctype;
use crate::tokenizer::{Attribute, HTMLTokenizer, HtmlParseError, Token, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
///
/// Only the modes needed for documents without tables, forms, templates or
/// framesets are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
}

/// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
///
/// A tree construction problem. Parse errors never stop the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Description of the parse error.
    pub message: String,
    /// Index of the token, counted from the start of the stream, that caused it.
    pub token_index: usize,
    /// False for situations that are merely unsupported rather than errors.
    pub is_error: bool,
}

/// Everything a parse produces.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The document tree.
    pub tree: DomTree,
    /// Tree construction issues.
    pub issues: Vec<ParseIssue>,
    /// Parse errors reported by the tokenizer.
    pub tokenizer_errors: Vec<HtmlParseError>,
}

/// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// "The stack of open elements is said to have an element target node in scope
/// when it has that element in the following list of element types"
const SCOPE_MARKERS: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// Start tags the "in body" mode hands to the "in head" rules.
const HEAD_CONTENT: &[&str] = &[
    "base", "basefont", "bgsound", "link", "meta", "noframes", "script", "style", "title",
];

/// Start tags that "close a p element" if one is in button scope, then insert.
const BLOCK_START_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "search",
    "section",
    "summary",
    "ul",
];

/// End tags closed by "generate implied end tags" and "pop until".
const BLOCK_END_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "button",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "pre",
    "search",
    "section",
    "summary",
    "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "embed", "img", "keygen", "wbr", "input", "hr", "param", "source", "track",
];

/// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#special)
/// "The following elements have varying levels of special parsing rules"
const SPECIAL_ELEMENTS: &[&str] = &[
    "address",
    "applet",
    "area",
    "article",
    "aside",
    "base",
    "basefont",
    "bgsound",
    "blockquote",
    "body",
    "br",
    "button",
    "caption",
    "center",
    "col",
    "colgroup",
    "dd",
    "details",
    "dir",
    "div",
    "dl",
    "dt",
    "embed",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "frame",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hgroup",
    "hr",
    "html",
    "iframe",
    "img",
    "input",
    "keygen",
    "li",
    "link",
    "listing",
    "main",
    "marquee",
    "menu",
    "meta",
    "nav",
    "noembed",
    "noframes",
    "noscript",
    "object",
    "ol",
    "p",
    "param",
    "plaintext",
    "pre",
    "script",
    "search",
    "section",
    "select",
    "source",
    "style",
    "summary",
    "table",
    "tbody",
    "td",
    "template",
    "textarea",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "track",
    "ul",
    "wbr",
    "xmp",
];

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser builds a DOM tree from the tokens of an [`HTMLTokenizer`].
///
/// Tokens are pulled one at a time, so that the parser can switch the
/// tokenizer into RCDATA, RAWTEXT, script data or PLAINTEXT right after the
/// start tag that calls for it.
pub struct HTMLParser {
    tokenizer: HTMLTokenizer,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    insertion_mode: InsertionMode,

    /// [§ 13.2.4.2 The original insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    head_element_pointer: Option<NodeId>,

    /// `NodeId::ROOT` is the Document node.
    tree: DomTree,

    /// Number of tokens processed so far.
    token_index: usize,

    /// "If the next token is a U+000A LINE FEED (LF) character token, then
    /// ignore that token" after `<pre>`, `<listing>` and `<textarea>`.
    ignore_next_line_feed: bool,

    /// Whether we've stopped parsing.
    stopped: bool,

    issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a parser for `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self::from_tokenizer(HTMLTokenizer::new(input))
    }

    /// Create a parser that pulls tokens from an existing tokenizer.
    #[must_use]
    pub fn from_tokenizer(tokenizer: HTMLTokenizer) -> Self {
        Self {
            tokenizer,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            stack_of_open_elements: Vec::new(),
            head_element_pointer: None,
            tree: DomTree::new(),
            token_index: 0,
            ignore_next_line_feed: false,
            stopped: false,
            issues: Vec::new(),
        }
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// Get all parse issues encountered so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Run the parser and return the DOM tree.
    #[must_use]
    pub fn run(mut self) -> DomTree {
        self.parse_tokens();
        self.tree
    }

    /// Run the parser and return the tree together with every issue found by
    /// the tokenizer and the tree builder.
    #[must_use]
    pub fn run_with_issues(mut self) -> ParseOutcome {
        self.parse_tokens();
        ParseOutcome {
            tree: self.tree,
            issues: self.issues,
            tokenizer_errors: self.tokenizer.errors().to_vec(),
        }
    }

    fn parse_tokens(&mut self) {
        while !self.stopped {
            let Some(token) = self.tokenizer.next_token() else {
                break;
            };
            if self.ignore_next_line_feed {
                self.ignore_next_line_feed = false;
                if matches!(token, Token::Character { data: '\n' }) {
                    self.token_index += 1;
                    continue;
                }
            }
            self.process_token(&token);
            self.token_index += 1;
        }
    }

    /// Record a parse error and report it.
    fn parse_error(&mut self, message: &str) {
        warn_once("HTML Parser", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
            is_error: true,
        });
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    fn process_token(&mut self, token: &Token) {
        match self.insertion_mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
        }
    }

    /// "Reprocess the token" - process the same token again in a new insertion mode.
    fn reprocess_token(&mut self, token: &Token) {
        self.process_token(token);
    }
}

// =============================================================================
// Tree helpers
// =============================================================================

impl HTMLParser {
    /// "The current node is the bottommost node in this stack of open elements."
    fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// The local name of an element node.
    fn get_tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|data| data.tag_name.as_str())
    }

    fn current_node_is(&self, names: &[&str]) -> bool {
        self.current_node()
            .and_then(|id| self.get_tag_name(id))
            .is_some_and(|name| names.contains(&name))
    }

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    fn create_element(&mut self, tag_name: &str, attributes: &[Attribute]) -> NodeId {
        let mut data = ElementData::new(tag_name);
        data.attrs = attributes
            .iter()
            .map(|attr| (attr.name.clone(), attr.value.clone()))
            .collect();
        self.tree.alloc(NodeType::Element(data))
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// Append a new element to the current node and push it onto the stack of
    /// open elements.
    fn insert_html_element(&mut self, tag_name: &str, attributes: &[Attribute]) -> NodeId {
        let element_id = self.create_element(tag_name, attributes);
        let parent_id = self.current_node().unwrap_or(NodeId::ROOT);
        self.tree.append_child(parent_id, element_id);
        self.stack_of_open_elements.push(element_id);
        element_id
    }

    /// Insert an element for a start tag token.
    fn insert_element_for(&mut self, token: &Token) -> Option<NodeId> {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => Some(self.insert_html_element(name, attributes)),
            _ => None,
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data."
    fn insert_character(&mut self, c: char) {
        let parent_id = self.current_node().unwrap_or(NodeId::ROOT);
        if let Some(last_id) = self.tree.last_child(parent_id)
            && let Some(node) = self.tree.get_mut(last_id)
            && let NodeType::Text(ref mut text) = node.node_type
        {
            text.push(c);
            return;
        }
        let text_id = self.tree.alloc(NodeType::Text(String::from(c)));
        self.tree.append_child(parent_id, text_id);
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    fn insert_comment(&mut self, data: &str) {
        let parent_id = self.current_node().unwrap_or(NodeId::ROOT);
        self.insert_comment_into(parent_id, data);
    }

    fn insert_comment_into(&mut self, parent_id: NodeId, data: &str) {
        let comment_id = self.tree.alloc(NodeType::Comment(data.to_string()));
        self.tree.append_child(parent_id, comment_id);
    }

    /// Copy attributes from a repeated `<html>` or `<body>` start tag onto
    /// the existing element: "for each attribute on the token, check to see if
    /// the attribute is already present on the element. If it is not, add the
    /// attribute and its corresponding value to that element."
    fn merge_attributes(&mut self, element_id: NodeId, attributes: &[Attribute]) {
        if let Some(element) = self.tree.as_element_mut(element_id) {
            for attr in attributes {
                let _ = element.add_attribute_if_missing(&attr.name, &attr.value);
            }
        }
    }

    /// Pop elements until one named `tag_name` has been popped.
    fn pop_until_tag(&mut self, tag_name: &str) {
        self.pop_until_one_of(&[tag_name]);
    }

    /// Pop elements until one whose name is in `tag_names` has been popped.
    fn pop_until_one_of(&mut self, tag_names: &[&str]) {
        while let Some(id) = self.stack_of_open_elements.pop() {
            if self
                .get_tag_name(id)
                .is_some_and(|name| tag_names.contains(&name))
            {
                break;
            }
        }
    }

    /// [§ 13.2.4.3 has an element in the specific scope](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    fn has_element_in_specific_scope(&self, tag_names: &[&str], extra_markers: &[&str]) -> bool {
        for &id in self.stack_of_open_elements.iter().rev() {
            let Some(name) = self.get_tag_name(id) else {
                continue;
            };
            if tag_names.contains(&name) {
                return true;
            }
            if SCOPE_MARKERS.contains(&name) || extra_markers.contains(&name) {
                return false;
            }
        }
        false
    }

    fn has_element_in_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], &[])
    }

    fn has_element_in_button_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], &["button"])
    }

    fn has_element_in_list_item_scope(&self, tag_name: &str) -> bool {
        self.has_element_in_specific_scope(&[tag_name], &["ol", "ul"])
    }

    /// [§ 13.2.6.3 Generate implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// ... the UA must pop the current node off the stack of open elements."
    fn generate_implied_end_tags_excluding(&mut self, exclude: Option<&str>) {
        while let Some(id) = self.current_node() {
            let Some(name) = self.get_tag_name(id) else {
                break;
            };
            if exclude == Some(name) || !IMPLIED_END_TAGS.contains(&name) {
                break;
            }
            let _ = self.stack_of_open_elements.pop();
        }
    }

    /// [§ 13.2.6.4.7 close a p element](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    fn close_p_element(&mut self) {
        self.generate_implied_end_tags_excluding(Some("p"));
        if !self.current_node_is(&["p"]) {
            self.parse_error("unexpected open element while closing p");
        }
        self.pop_until_tag("p");
    }

    /// "If the stack of open elements has a p element in button scope, then
    /// close a p element."
    fn close_p_if_in_button_scope(&mut self) {
        if self.has_element_in_button_scope("p") {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// "Insert an HTML element for the token. If the algorithm that was invoked
    /// is the generic raw text element parsing algorithm, switch the tokenizer
    /// to the RAWTEXT state; otherwise the algorithm invoked was the generic
    /// RCDATA element parsing algorithm, switch the tokenizer to the RCDATA
    /// state. Let the original insertion mode be the current insertion mode.
    /// Then, switch the insertion mode to "text"."
    fn parse_text_only_element(&mut self, token: &Token, state: TokenizerState) {
        let _ = self.insert_element_for(token);
        self.tokenizer.set_state(state);
        self.original_insertion_mode = Some(self.insertion_mode);
        self.insertion_mode = InsertionMode::Text;
    }

    /// [§ 13.2.6.4.7 "in body" - any other end tag](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    fn any_other_end_tag(&mut self, tag_name: &str) {
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node_id = self.stack_of_open_elements[index];
            let Some(node_name) = self.get_tag_name(node_id) else {
                continue;
            };
            // "If node is an HTML element with the same tag name as the token, then:"
            if node_name == tag_name {
                // "Generate implied end tags, except for HTML elements with the
                // same tag name as the token."
                self.generate_implied_end_tags_excluding(Some(tag_name));
                // "If node is not the current node, then this is a parse error."
                if self.current_node() != Some(node_id) {
                    self.parse_error("end tag does not match the current node");
                }
                // "Pop all the nodes from the current node up to node, including node"
                self.stack_of_open_elements.truncate(index);
                return;
            }
            // "Otherwise, if node is in the special category, then this is a parse
            // error; ignore the token, and return."
            if SPECIAL_ELEMENTS.contains(&node_name) {
                self.parse_error("unexpected end tag");
                return;
            }
        }
    }
}

// =============================================================================
// Insertion modes
// =============================================================================

impl HTMLParser {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    fn handle_initial_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF),
            // U+000C FORM FEED (FF), U+000D CARRIAGE RETURN (CR), or U+0020 SPACE"
            // "Ignore the token."
            Token::Character { data } if is_whitespace(*data) => {}

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_into(NodeId::ROOT, data),

            // "A DOCTYPE token"
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                // "If the DOCTYPE token's name is not "html", or the token's public
                // identifier is not missing, or the token's system identifier is neither
                // missing nor "about:legacy-compat", then there is a parse error."
                if name.as_deref() != Some("html")
                    || public_identifier.is_some()
                    || system_identifier
                        .as_deref()
                        .is_some_and(|id| id != "about:legacy-compat")
                {
                    self.parse_error("unexpected DOCTYPE");
                }

                // "Append a DocumentType node to the Document node, with its name set to
                // the name given in the DOCTYPE token, or the empty string if the name was
                // missing; its public ID set to the public identifier given in the DOCTYPE
                // token, or the empty string if the public identifier was missing; and its
                // system ID set to the system identifier given in the DOCTYPE token, or
                // the empty string if the system identifier was missing."
                let doctype = DocumentTypeData {
                    name: name.clone().unwrap_or_default(),
                    public_id: public_identifier.clone().unwrap_or_default(),
                    system_id: system_identifier.clone().unwrap_or_default(),
                };
                let doctype_id = self.tree.alloc(NodeType::DocumentType(doctype));
                self.tree.append_child(NodeId::ROOT, doctype_id);

                // "Then, if the document is not an iframe srcdoc document, and the parser
                // cannot change the mode flag is false, and the DOCTYPE token matches one
                // of the conditions in the following list, then set the Document to quirks
                // mode" (or limited-quirks mode).
                self.tree.set_quirks_mode(quirks_mode_for_doctype(
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                    *force_quirks,
                ));

                // "Then, switch the insertion mode to "before html"."
                self.insertion_mode = InsertionMode::BeforeHtml;
            }

            // "Anything else"
            // "If the document is not an iframe srcdoc document, then this is a parse
            // error; if the parser cannot change the mode flag is false, set the Document
            // to quirks mode."
            // "In any case, switch the insertion mode to "before html", then reprocess
            // the token."
            _ => {
                self.parse_error("missing DOCTYPE");
                self.tree.set_quirks_mode(QuirksMode::Quirks);
                self.insertion_mode = InsertionMode::BeforeHtml;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    fn handle_before_html_mode(&mut self, token: &Token) {
        match token {
            // "An end tag whose tag name is one of: "head", "body", "html", "br""
            // "Act as described in the "anything else" entry below."
            Token::EndTag { name, .. }
                if matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.handle_before_html_anything_else(token);
            }

            // "A DOCTYPE token" / "Any other end tag"
            // "Parse error. Ignore the token."
            Token::Doctype { .. } | Token::EndTag { .. } => {
                self.parse_error("unexpected token before html");
            }

            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_into(NodeId::ROOT, data),

            // "Ignore the token."
            Token::Character { data } if is_whitespace(*data) => {}

            // "A start tag whose tag name is "html""
            // "Create an element for the token in the HTML namespace, with the Document as the
            // intended parent. Append it to the Document object. Put this element in the stack
            // of open elements."
            // "Switch the insertion mode to "before head"."
            Token::StartTag {
                name, attributes, ..
            } if name == "html" => {
                let _ = self.insert_html_element(name, attributes);
                self.insertion_mode = InsertionMode::BeforeHead;
            }

            // "Anything else"
            _ => self.handle_before_html_anything_else(token),
        }
    }

    /// "Create an html element whose node document is the Document object.
    /// Append it to the Document object. Put this element in the stack of
    /// open elements. Switch the insertion mode to "before head", then
    /// reprocess the token."
    fn handle_before_html_anything_else(&mut self, token: &Token) {
        let _ = self.insert_html_element("html", &[]);
        self.insertion_mode = InsertionMode::BeforeHead;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    fn handle_before_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => {}

            Token::Comment { data } => self.insert_comment(data),

            // "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "head""
            // "Insert an HTML element for the token."
            // "Set the head element pointer to the newly created head element."
            // "Switch the insertion mode to "in head"."
            Token::StartTag { name, .. } if name == "head" => {
                self.head_element_pointer = self.insert_element_for(token);
                self.insertion_mode = InsertionMode::InHead;
            }

            Token::EndTag { name, .. }
                if matches!(name.as_str(), "head" | "body" | "html" | "br") =>
            {
                self.handle_before_head_anything_else(token);
            }

            Token::Doctype { .. } | Token::EndTag { .. } => {
                self.parse_error("unexpected token before head");
            }

            // "Anything else"
            _ => self.handle_before_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "head" start tag token with no attributes.
    /// Set the head element pointer to the newly created head element.
    /// Switch the insertion mode to "in head". Reprocess the current token."
    fn handle_before_head_anything_else(&mut self, token: &Token) {
        self.head_element_pointer = Some(self.insert_html_element("head", &[]));
        self.insertion_mode = InsertionMode::InHead;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    fn handle_in_head_mode(&mut self, token: &Token) {
        match token {
            // "Insert the character."
            Token::Character { data } if is_whitespace(*data) => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in head"),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound", "link""
            // "A start tag whose tag name is "meta""
            // "Insert an HTML element for the token. Immediately pop the current node off the
            // stack of open elements."
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "base" | "basefont" | "bgsound" | "link" | "meta"
                ) =>
            {
                let _ = self.insert_element_for(token);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is "title""
            // "Follow the generic RCDATA element parsing algorithm."
            Token::StartTag { name, .. } if name == "title" => {
                self.parse_text_only_element(token, TokenizerState::RCDATA);
            }

            // "A start tag whose tag name is one of: "noframes", "style""
            // "Follow the generic raw text element parsing algorithm."
            Token::StartTag { name, .. } if matches!(name.as_str(), "noframes" | "style") => {
                self.parse_text_only_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "script""
            // "Switch the tokenizer to the script data state."
            // "Let the original insertion mode be the current insertion mode."
            // "Switch the insertion mode to "text"."
            Token::StartTag { name, .. } if name == "script" => {
                self.parse_text_only_element(token, TokenizerState::ScriptData);
            }

            // "An end tag whose tag name is "head""
            // "Pop the current node (which will be the head element) off the stack of open
            // elements."
            // "Switch the insertion mode to "after head"."
            Token::EndTag { name, .. } if name == "head" => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = InsertionMode::AfterHead;
            }

            Token::EndTag { name, .. } if matches!(name.as_str(), "body" | "html" | "br") => {
                self.handle_in_head_anything_else(token);
            }

            // "A start tag whose tag name is "head"" / "Any other end tag"
            // "Parse error. Ignore the token."
            Token::StartTag { name, .. } if name == "head" => {
                self.parse_error("unexpected head start tag");
            }
            Token::EndTag { .. } => self.parse_error("unexpected end tag in head"),

            // "Anything else"
            _ => self.handle_in_head_anything_else(token),
        }
    }

    /// "Pop the current node (which will be the head element) off the stack of
    /// open elements. Switch the insertion mode to "after head". Reprocess the
    /// token."
    fn handle_in_head_anything_else(&mut self, token: &Token) {
        let _ = self.stack_of_open_elements.pop();
        self.insertion_mode = InsertionMode::AfterHead;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    fn handle_after_head_mode(&mut self, token: &Token) {
        match token {
            Token::Character { data } if is_whitespace(*data) => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE after head"),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "A start tag whose tag name is "body""
            // "Insert an HTML element for the token."
            // "Switch the insertion mode to "in body"."
            Token::StartTag { name, .. } if name == "body" => {
                let _ = self.insert_element_for(token);
                self.insertion_mode = InsertionMode::InBody;
            }

            // "A start tag whose tag name is one of: "base", "basefont", "bgsound", "link",
            // "meta", "noframes", "script", "style", "template", "title""
            // "Parse error."
            // "Push the node pointed to by the head element pointer onto the stack of open
            // elements."
            // "Process the token using the rules for the "in head" insertion mode."
            // "Remove the node pointed to by the head element pointer from the stack of open
            // elements. (It might not be the current node at this point.)"
            Token::StartTag { name, .. } if HEAD_CONTENT.contains(&name.as_str()) => {
                self.parse_error("head content after head");
                if let Some(head_id) = self.head_element_pointer {
                    self.stack_of_open_elements.push(head_id);
                    self.handle_in_head_mode(token);
                    self.stack_of_open_elements.retain(|&id| id != head_id);
                }
            }

            Token::StartTag { name, .. } if name == "head" => {
                self.parse_error("unexpected head start tag");
            }

            Token::EndTag { name, .. } if matches!(name.as_str(), "body" | "html" | "br") => {
                self.handle_after_head_anything_else(token);
            }

            Token::EndTag { .. } => self.parse_error("unexpected end tag after head"),

            // "Anything else"
            _ => self.handle_after_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "body" start tag token with no attributes."
    /// "Switch the insertion mode to "in body"."
    /// "Reprocess the current token."
    fn handle_after_head_anything_else(&mut self, token: &Token) {
        let _ = self.insert_html_element("body", &[]);
        self.insertion_mode = InsertionMode::InBody;
        self.reprocess_token(token);
    }

    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// Handles flow content without the list of active formatting elements:
    /// formatting elements are ordinary elements closed by the "any other end
    /// tag" steps.
    fn handle_in_body_mode(&mut self, token: &Token) {
        match token {
            // "A character token that is U+0000 NULL"
            // "Parse error. Ignore the token."
            Token::Character { data: '\0' } => self.parse_error("unexpected null character"),

            // "Insert the character."
            Token::Character { data } => self.insert_character(*data),

            Token::Comment { data } => self.insert_comment(data),

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE in body"),

            Token::StartTag { .. } => self.handle_in_body_start_tag(token),

            Token::EndTag { name, .. } => self.handle_in_body_end_tag(token, name),

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => self.stopped = true,
        }
    }

    fn handle_in_body_start_tag(&mut self, token: &Token) {
        let Token::StartTag {
            name, attributes, ..
        } = token
        else {
            return;
        };
        match name.as_str() {
            // "A start tag whose tag name is "html""
            // "Parse error."
            // "Otherwise, for each attribute on the token, check to see if the attribute is
            // already present on the top element of the stack of open elements. If it is not,
            // add the attribute and its corresponding value to that element."
            "html" => {
                self.parse_error("unexpected html start tag");
                if let Some(&html_id) = self.stack_of_open_elements.first() {
                    self.merge_attributes(html_id, attributes);
                }
            }

            // "Process the token using the rules for the "in head" insertion mode."
            tag if HEAD_CONTENT.contains(&tag) => self.handle_in_head_mode(token),

            // "A start tag whose tag name is "body""
            // "Parse error."
            // "If the second element on the stack of open elements is not a body element, if
            // the stack of open elements has only one node on it, or if there is a template
            // element on the stack of open elements, then ignore the token."
            // "Otherwise, ... for each attribute on the token, check to see if the attribute
            // is already present on the body element (the second element) on the stack of
            // open elements, and if it is not, add the attribute and its corresponding value
            // to that element."
            "body" => {
                self.parse_error("unexpected body start tag");
                if let Some(&body_id) = self.stack_of_open_elements.get(1)
                    && self.get_tag_name(body_id) == Some("body")
                {
                    self.merge_attributes(body_id, attributes);
                }
            }

            "head" | "frameset" => self.parse_error("unexpected start tag in body"),

            tag if BLOCK_START_TAGS.contains(&tag) => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
            }

            // "If the current node is an HTML element whose tag name is one of "h1", "h2",
            // "h3", "h4", "h5", or "h6", then this is a parse error; pop the current node
            // off the stack of open elements."
            tag if HEADINGS.contains(&tag) => {
                self.close_p_if_in_button_scope();
                if self.current_node_is(HEADINGS) {
                    self.parse_error("nested heading");
                    let _ = self.stack_of_open_elements.pop();
                }
                let _ = self.insert_html_element(name, attributes);
            }

            // "If the next token is a U+000A LINE FEED (LF) character token, then ignore
            // that token and move on to the next one. (Newlines at the start of pre blocks
            // are ignored as an authoring convenience.)"
            "pre" | "listing" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                self.ignore_next_line_feed = true;
            }

            "li" => self.handle_list_item_start_tag(token, &["li"]),
            "dd" | "dt" => self.handle_list_item_start_tag(token, &["dd", "dt"]),

            // "A start tag whose tag name is "plaintext""
            // "Insert an HTML element for the token."
            // "Switch the tokenizer to the PLAINTEXT state."
            "plaintext" => {
                self.close_p_if_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                self.tokenizer.set_state(TokenizerState::PLAINTEXT);
            }

            // "Insert an HTML element for the token. Immediately pop the current node off
            // the stack of open elements. Acknowledge the token's self-closing flag, if it
            // is set."
            tag if VOID_ELEMENTS.contains(&tag) => {
                if tag == "hr" {
                    self.close_p_if_in_button_scope();
                }
                let _ = self.insert_html_element(name, attributes);
                let _ = self.stack_of_open_elements.pop();
            }

            // "A start tag whose tag name is "textarea""
            // "Insert an HTML element for the token."
            // "If the next token is a U+000A LINE FEED (LF) character token, then ignore
            // that token and move on to the next one."
            // "Switch the tokenizer to the RCDATA state."
            "textarea" => {
                self.parse_text_only_element(token, TokenizerState::RCDATA);
                self.ignore_next_line_feed = true;
            }

            // "A start tag whose tag name is "xmp""
            // "If the stack of open elements has a p element in button scope, then close a
            // p element."
            // "Follow the generic raw text element parsing algorithm."
            "xmp" => {
                self.close_p_if_in_button_scope();
                self.parse_text_only_element(token, TokenizerState::RAWTEXT);
            }

            // "A start tag whose tag name is "iframe"" / "noembed""
            // "Follow the generic raw text element parsing algorithm."
            "iframe" | "noembed" => self.parse_text_only_element(token, TokenizerState::RAWTEXT),

            // "Any other start tag"
            // "Insert an HTML element for the token."
            _ => {
                let _ = self.insert_html_element(name, attributes);
            }
        }
    }

    /// "A start tag whose tag name is "li"" and "A start tag whose tag name is
    /// one of: "dd", "dt"".
    fn handle_list_item_start_tag(&mut self, token: &Token, closes: &[&str]) {
        // "Initialize node to be the current node (the bottommost node of the stack)."
        // "Loop: If node is an li element, then run these substeps: ..."
        for index in (0..self.stack_of_open_elements.len()).rev() {
            let node_id = self.stack_of_open_elements[index];
            let Some(node_name) = self.get_tag_name(node_id) else {
                continue;
            };
            if closes.contains(&node_name) {
                let node_name = node_name.to_string();
                // "Generate implied end tags, except for li elements."
                self.generate_implied_end_tags_excluding(Some(&node_name));
                // "If the current node is not an li element, then this is a parse error."
                if !self.current_node_is(&[node_name.as_str()]) {
                    self.parse_error("unclosed element inside list item");
                }
                // "Pop elements from the stack of open elements until an li element has
                // been popped from the stack."
                self.pop_until_tag(&node_name);
                break;
            }
            // "If node is in the special category, but is not an address, div, or p
            // element, then jump to the step labeled done below."
            if SPECIAL_ELEMENTS.contains(&node_name)
                && !matches!(node_name, "address" | "div" | "p")
            {
                break;
            }
        }
        // "Done: If the stack of open elements has a p element in button scope, then
        // close a p element."
        self.close_p_if_in_button_scope();
        // "Finally, insert an HTML element for the token."
        let _ = self.insert_element_for(token);
    }

    fn handle_in_body_end_tag(&mut self, token: &Token, name: &str) {
        match name {
            // "An end tag whose tag name is "body""
            // "If the stack of open elements does not have a body element in scope, this is
            // a parse error; ignore the token."
            // "Switch the insertion mode to "after body"."
            "body" => {
                if self.has_element_in_scope("body") {
                    self.insertion_mode = InsertionMode::AfterBody;
                } else {
                    self.parse_error("body end tag without body in scope");
                }
            }

            // "An end tag whose tag name is "html""
            // "Act as described in the "body" entry, then reprocess the token."
            "html" => {
                if self.has_element_in_scope("body") {
                    self.insertion_mode = InsertionMode::AfterBody;
                    self.reprocess_token(token);
                } else {
                    self.parse_error("html end tag without body in scope");
                }
            }

            // "An end tag whose tag name is "p""
            // "If the stack of open elements does not have a p element in button scope, then
            // this is a parse error; insert an HTML element for a "p" start tag token with
            // no attributes."
            // "Close a p element."
            "p" => {
                if !self.has_element_in_button_scope("p") {
                    self.parse_error("p end tag without open p");
                    let _ = self.insert_html_element("p", &[]);
                }
                self.close_p_element();
            }

            // "An end tag whose tag name is "li""
            "li" => {
                if self.has_element_in_list_item_scope("li") {
                    self.generate_implied_end_tags_excluding(Some("li"));
                    if !self.current_node_is(&["li"]) {
                        self.parse_error("li end tag with open children");
                    }
                    self.pop_until_tag("li");
                } else {
                    self.parse_error("li end tag without open li");
                }
            }

            // "An end tag whose tag name is one of: "dd", "dt""
            "dd" | "dt" => {
                if self.has_element_in_scope(name) {
                    self.generate_implied_end_tags_excluding(Some(name));
                    if !self.current_node_is(&[name]) {
                        self.parse_error("definition end tag with open children");
                    }
                    self.pop_until_tag(name);
                } else {
                    self.parse_error("definition end tag without open element");
                }
            }

            // "An end tag whose tag name is one of: "h1", "h2", "h3", "h4", "h5", "h6""
            // "If the stack of open elements does not have an element in scope that is an
            // HTML element and whose tag name is one of "h1", "h2", "h3", "h4", "h5", or
            // "h6", then this is a parse error; ignore the token."
            tag if HEADINGS.contains(&tag) => {
                if self.has_element_in_specific_scope(HEADINGS, &[]) {
                    self.generate_implied_end_tags_excluding(None);
                    if !self.current_node_is(&[tag]) {
                        self.parse_error("heading end tag does not match");
                    }
                    self.pop_until_one_of(HEADINGS);
                } else {
                    self.parse_error("heading end tag without open heading");
                }
            }

            // "If the stack of open elements does not have an element in scope that is an
            // HTML element with the same tag name as that of the token, then this is a parse
            // error; ignore the token."
            // "Generate implied end tags."
            // "Pop elements from the stack of open elements until an HTML element with the
            // same tag name as the token has been popped from the stack."
            tag if BLOCK_END_TAGS.contains(&tag) => {
                if self.has_element_in_scope(tag) {
                    self.generate_implied_end_tags_excluding(None);
                    if !self.current_node_is(&[tag]) {
                        self.parse_error("end tag does not match the current node");
                    }
                    self.pop_until_tag(tag);
                } else {
                    self.parse_error("end tag without matching open element");
                }
            }

            // "An end tag whose tag name is "br""
            // "Parse error. Drop the attributes from the token, and act as described in the
            // next entry; i.e. act as if this was a "br" start tag token with no attributes."
            "br" => {
                self.parse_error("br end tag");
                let _ = self.insert_html_element("br", &[]);
                let _ = self.stack_of_open_elements.pop();
            }

            // "Any other end tag"
            _ => self.any_other_end_tag(name),
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    fn handle_text_mode(&mut self, token: &Token) {
        match token {
            // "A character token"
            // "Insert the character."
            Token::Character { data } => self.insert_character(*data),

            // "An end-of-file token"
            // "Parse error."
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode and reprocess the token."
            Token::EndOfFile => {
                self.parse_error("end of file in text element");
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);
                self.reprocess_token(token);
            }

            // "Any other end tag"
            // "Pop the current node off the stack of open elements."
            // "Switch the insertion mode to the original insertion mode."
            Token::EndTag { .. } => {
                let _ = self.stack_of_open_elements.pop();
                self.insertion_mode = self
                    .original_insertion_mode
                    .take()
                    .unwrap_or(InsertionMode::InBody);
            }

            // The tokenizer only produces characters and the matching end tag in
            // the text-only states.
            Token::StartTag { .. } | Token::Comment { .. } | Token::Doctype { .. } => {
                self.parse_error("unexpected token in text element");
            }
        }
    }

    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    fn handle_after_body_mode(&mut self, token: &Token) {
        match token {
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Character { data } if is_whitespace(*data) => self.handle_in_body_mode(token),

            // "A comment token"
            // "Insert a comment as the last child of the first element in the stack of open
            // elements (the html element)."
            Token::Comment { data } => {
                if let Some(&html_id) = self.stack_of_open_elements.first() {
                    self.insert_comment_into(html_id, data);
                }
            }

            Token::Doctype { .. } => self.parse_error("unexpected DOCTYPE after body"),

            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            // "An end tag whose tag name is "html""
            // "Switch the insertion mode to "after after body"."
            Token::EndTag { name, .. } if name == "html" => {
                self.insertion_mode = InsertionMode::AfterAfterBody;
            }

            // "An end-of-file token"
            // "Stop parsing."
            Token::EndOfFile => self.stopped = true,

            // "Anything else"
            // "Parse error. Switch the insertion mode to "in body" and reprocess the token."
            _ => {
                self.parse_error("content after body");
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    fn handle_after_after_body_mode(&mut self, token: &Token) {
        match token {
            // "A comment token"
            // "Insert a comment as the last child of the Document object."
            Token::Comment { data } => self.insert_comment_into(NodeId::ROOT, data),

            // "A DOCTYPE token", whitespace, "A start tag whose tag name is "html""
            // "Process the token using the rules for the "in body" insertion mode."
            Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::Character { data } if is_whitespace(*data) => self.handle_in_body_mode(token),
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),

            Token::EndOfFile => self.stopped = true,

            _ => {
                self.parse_error("content after html");
                self.insertion_mode = InsertionMode::InBody;
                self.reprocess_token(token);
            }
        }
    }
}

/// Parse `input` as a whole HTML document.
///
/// Starts a fresh warning set, so errors already reported for an earlier
/// document are reported again.
#[must_use]
pub fn parse(input: &str) -> DomTree {
    clear_warnings();
    HTMLParser::new(input).run()
}

/// Render a DOM tree as an indented outline, one node per line.
#[must_use]
pub fn render_tree(tree: &DomTree) -> String {
    let mut out = String::new();
    render_node(tree, tree.root(), 0, &mut out);
    out
}

/// Print a DOM tree for debugging.
pub fn print_tree(tree: &DomTree) {
    print!("{}", render_tree(tree));
}

fn render_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let _ = match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}Document"),
        NodeType::DocumentType(doctype) => {
            let mut line = format!("{prefix}<!DOCTYPE {}", doctype.name);
            if !doctype.public_id.is_empty() || !doctype.system_id.is_empty() {
                let _ = write!(
                    line,
                    " \"{}\" \"{}\"",
                    doctype.public_id, doctype.system_id
                );
            }
            writeln!(out, "{line}>")
        }
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                writeln!(out, "{prefix}<{}>", data.tag_name)
            } else {
                let attrs: Vec<String> = data
                    .attrs
                    .iter()
                    .map(|(k, v)| {
                        if v.is_empty() {
                            k.clone()
                        } else {
                            format!("{k}=\"{v}\"")
                        }
                    })
                    .collect();
                writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "))
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->"),
    };
    for &child_id in tree.children(id) {
        render_node(tree, child_id, indent + 1, out);
    }
}
