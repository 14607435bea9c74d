use core::fmt;

use serde::Serialize;

/// An attribute on a start or end tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
///
/// Serialized with an internal `"type"` tag, e.g.
/// `{"type":"start-tag","name":"p","self_closing":false,"attributes":[]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag. When a DOCTYPE token is created, its name,
    /// public identifier, and system identifier must be marked as missing
    /// (which is a distinct state from the empty string), and the force-quirks
    /// flag must be set to off (its other state is on)."
    Doctype {
        /// "a name"
        name: Option<String>,
        /// "a public identifier"
        public_identifier: Option<String>,
        /// "a system identifier"
        system_identifier: Option<String>,
        /// "a force-quirks flag"
        force_quirks: bool,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes, each of which has a name and a value."
    StartTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
    },

    /// End tag token. Same structure as a start tag.
    EndTag {
        /// "a tag name"
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes"
        attributes: Vec<Attribute>,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
    },

    /// "Comment and character tokens have data."
    Character {
        /// "data"
        data: char,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// Create a start tag token with no attributes.
    #[must_use]
    pub fn start_tag(name: impl Into<String>) -> Self {
        Self::StartTag {
            name: name.into(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// Create an end tag token with no attributes.
    #[must_use]
    pub fn end_tag(name: impl Into<String>) -> Self {
        Self::EndTag {
            name: name.into(),
            self_closing: false,
            attributes: Vec::new(),
        }
    }

    /// Create a comment token.
    #[must_use]
    pub fn comment(data: impl Into<String>) -> Self {
        Self::Comment { data: data.into() }
    }

    /// Create a character token with the given character.
    #[must_use]
    pub const fn character(c: char) -> Self {
        Self::Character { data: c }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// The tag name of a start or end tag token.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::StartTag { name, .. } | Self::EndTag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether this is a start tag with one of the given names.
    #[must_use]
    pub fn is_start_tag_named(&self, names: &[&str]) -> bool {
        matches!(self, Self::StartTag { name, .. } if names.contains(&name.as_str()))
    }

    /// Whether this is an end tag with one of the given names.
    #[must_use]
    pub fn is_end_tag_named(&self, names: &[&str]) -> bool {
        matches!(self, Self::EndTag { name, .. } if names.contains(&name.as_str()))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = public_identifier {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = system_identifier {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name, .. } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => {
                // Show whitespace characters explicitly
                match data {
                    '\n' => write!(f, "Character(\\n)"),
                    '\t' => write!(f, "Character(\\t)"),
                    ' ' => write!(f, "Character(SPACE)"),
                    c => write!(f, "Character({c})"),
                }
            }
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// Start or end tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Start,
    /// `</name ...>`
    End,
}

/// A start or end tag token under construction.
///
/// Attributes are built one at a time. The attribute being built is kept
/// apart from the finished list so that a duplicate name can be detected
/// when the name is complete and the attribute dropped when it is committed.
#[derive(Debug, Clone)]
pub struct TagBuilder {
    kind: TagKind,
    name: String,
    self_closing: bool,
    attributes: Vec<Attribute>,
    current_attribute: Option<Attribute>,
    current_is_duplicate: bool,
}

impl TagBuilder {
    /// "Create a new start tag token, set its tag name to the empty string."
    #[must_use]
    pub const fn new(kind: TagKind) -> Self {
        Self {
            kind,
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
            current_attribute: None,
            current_is_duplicate: false,
        }
    }

    /// Whether this is a start or end tag.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        self.kind
    }

    /// The tag name accumulated so far.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// "Append the current input character to the current tag token's tag name."
    pub fn push_name(&mut self, c: char) {
        self.name.push(c);
    }

    /// "Set the self-closing flag of the current tag token."
    pub const fn set_self_closing(&mut self) {
        self.self_closing = true;
    }

    /// "Start a new attribute in the current tag token."
    ///
    /// The previous attribute, if any, is committed first.
    pub fn start_attribute(&mut self) {
        self.commit_attribute();
        self.current_attribute = Some(Attribute::default());
    }

    /// "Append the current input character to the current attribute's name."
    pub fn push_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.name.push(c);
        }
    }

    /// "Append the current input character to the current attribute's value."
    pub fn push_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.value.push(c);
        }
    }

    /// Append several characters to the current attribute's value.
    pub fn push_attribute_value_str(&mut self, s: &str) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.value.push_str(s);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before emitting
    /// the tag token, if appropriate), the complete attribute's name must be
    /// compared to the other attributes on the same token; if there is already an
    /// attribute on the token with the exact same name, then this is a
    /// duplicate-attribute parse error and the new attribute must be removed from
    /// the token."
    ///
    /// Returns true when the name is a duplicate. The attribute keeps collecting
    /// its value but is dropped when committed.
    pub fn finish_attribute_name(&mut self) -> bool {
        self.current_is_duplicate = self.current_attribute.as_ref().is_some_and(|current| {
            self.attributes
                .iter()
                .any(|attr| attr.name == current.name)
        });
        self.current_is_duplicate
    }

    /// Whether any attribute has been started on this tag.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty() || self.current_attribute.is_some()
    }

    fn commit_attribute(&mut self) {
        if let Some(attr) = self.current_attribute.take()
            && !self.current_is_duplicate
        {
            self.attributes.push(attr);
        }
        self.current_is_duplicate = false;
    }

    /// Finish the tag and turn it into a token.
    #[must_use]
    pub fn build(mut self) -> Token {
        self.commit_attribute();
        match self.kind {
            TagKind::Start => Token::StartTag {
                name: self.name,
                self_closing: self.self_closing,
                attributes: self.attributes,
            },
            TagKind::End => Token::EndTag {
                name: self.name,
                self_closing: self.self_closing,
                attributes: self.attributes,
            },
        }
    }
}

/// A DOCTYPE token under construction.
#[derive(Debug, Clone, Default)]
pub struct DoctypeBuilder {
    name: Option<String>,
    public_identifier: Option<String>,
    system_identifier: Option<String>,
    force_quirks: bool,
}

impl DoctypeBuilder {
    /// A DOCTYPE token with every identifier missing and force-quirks off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A DOCTYPE token with its force-quirks flag already on.
    #[must_use]
    pub fn quirky() -> Self {
        Self {
            force_quirks: true,
            ..Self::default()
        }
    }

    /// "Append the current input character to the current DOCTYPE token's name."
    pub fn push_name(&mut self, c: char) {
        self.name.get_or_insert_with(String::new).push(c);
    }

    /// "Set the current DOCTYPE token's public identifier to the empty string
    /// (not missing)"
    pub fn begin_public_identifier(&mut self) {
        self.public_identifier = Some(String::new());
    }

    /// "Append the current input character to the current DOCTYPE token's
    /// public identifier."
    pub fn push_public_identifier(&mut self, c: char) {
        self.public_identifier.get_or_insert_with(String::new).push(c);
    }

    /// "Set the current DOCTYPE token's system identifier to the empty string
    /// (not missing)"
    pub fn begin_system_identifier(&mut self) {
        self.system_identifier = Some(String::new());
    }

    /// "Append the current input character to the current DOCTYPE token's
    /// system identifier."
    pub fn push_system_identifier(&mut self, c: char) {
        self.system_identifier.get_or_insert_with(String::new).push(c);
    }

    /// "Set the current DOCTYPE token's force-quirks flag to on."
    pub const fn set_force_quirks(&mut self) {
        self.force_quirks = true;
    }

    /// Finish the DOCTYPE and turn it into a token.
    #[must_use]
    pub fn build(self) -> Token {
        Token::Doctype {
            name: self.name,
            public_identifier: self.public_identifier,
            system_identifier: self.system_identifier,
            force_quirks: self.force_quirks,
        }
    }
}

/// A comment token under construction.
#[derive(Debug, Clone, Default)]
pub struct CommentBuilder {
    data: String,
}

impl CommentBuilder {
    /// "Create a comment token whose data is the empty string."
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// "Append the current input character to the comment token's data."
    pub fn push(&mut self, c: char) {
        self.data.push(c);
    }

    /// Append several characters to the comment token's data.
    pub fn push_str(&mut self, s: &str) {
        self.data.push_str(s);
    }

    /// Finish the comment and turn it into a token.
    #[must_use]
    pub fn build(self) -> Token {
        Token::Comment { data: self.data }
    }
}
