//! Integration tests for the HTML tokenizer.

use quill_html::tokenizer::ErrorCode;
use quill_html::{HTMLTokenizer, Token, TokenizerState};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Helper to tokenize the content of a text-only element whose start tag has
/// already been seen, the way tree construction drives the tokenizer
fn tokenize_text_element(tag: &str, state: TokenizerState, input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.set_last_start_tag(Some(tag.to_string()));
    tokenizer.set_state(state);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Helper to collect the character tokens of a stream into a string
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| {
            if let Token::Character { data } = t {
                Some(*data)
            } else {
                None
            }
        })
        .collect()
}

/// Helper to tokenize a string and return the parse error codes
fn error_codes(input: &str) -> Vec<ErrorCode> {
    let mut tokenizer = HTMLTokenizer::new(input);
    tokenizer.run();
    tokenizer.errors().iter().map(|e| e.code).collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens.len(), 6); // 5 chars + EOF
    assert!(matches!(tokens[0], Token::Character { data: 'H' }));
    assert!(matches!(tokens[4], Token::Character { data: 'o' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            assert_eq!(name, "div");
            assert!(!self_closing);
            assert!(attributes.is_empty());
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::EndTag { name, .. } => {
            assert_eq!(name, "div");
        }
        _ => panic!("Expected EndTag token"),
    }
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::StartTag {
            name, self_closing, ..
        } => {
            assert_eq!(name, "br");
            assert!(self_closing);
        }
        _ => panic!("Expected self-closing StartTag token"),
    }
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens.len(), 2);
    match &tokens[0] {
        Token::Comment { data } => {
            assert_eq!(data, " hello ");
        }
        _ => panic!("Expected Comment token"),
    }
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="foo">"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "foo");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "bar");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=baz>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "baz");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "disabled");
            assert_eq!(attributes[0].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_multiple_attributes() {
    let tokens = tokenize(r#"<input type="text" id="name" disabled>"#);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "input");
            assert_eq!(attributes.len(), 3);
            assert_eq!(attributes[0].name, "type");
            assert_eq!(attributes[0].value, "text");
            assert_eq!(attributes[1].name, "id");
            assert_eq!(attributes[1].value, "name");
            assert_eq!(attributes[2].name, "disabled");
            assert_eq!(attributes[2].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_tag_with_text_content() {
    let tokens = tokenize("<p>Hi</p>");
    assert_eq!(tokens.len(), 5); // <p>, H, i, </p>, EOF
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
    assert!(matches!(tokens[1], Token::Character { data: 'H' }));
    assert!(matches!(tokens[2], Token::Character { data: 'i' }));
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(matches!(tokens[4], Token::EndOfFile));
}

#[test]
fn test_simple_html_document() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Test</title></head>
<body>Hello</body>
</html>"#;
    let tokens = tokenize(html);

    // Should have DOCTYPE as first token
    assert!(matches!(&tokens[0], Token::Doctype { name: Some(n), .. } if n == "html"));

    // Should end with EOF
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));

    // Count tag tokens
    let start_tags: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t, Token::StartTag { .. }))
        .collect();
    let end_tags: Vec<_> = tokens
        .iter()
        .filter(|t| matches!(t, Token::EndTag { .. }))
        .collect();

    assert_eq!(start_tags.len(), 4); // html, head, title, body
    assert_eq!(end_tags.len(), 4); // /title, /head, /body, /html
}


#[test]
fn test_basic_tag_with_single_quoted_attribute() {
    let tokens = tokenize("<p class='x'>hi</p>");
    assert_eq!(tokens.len(), 5);
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "p");
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "x");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(matches!(tokens[1], Token::Character { data: 'h' }));
    assert!(matches!(tokens[2], Token::Character { data: 'i' }));
    assert!(matches!(&tokens[3], Token::EndTag { name, .. } if name == "p"));
    assert!(matches!(tokens[4], Token::EndOfFile));
}

#[test]
fn test_uppercase_tag_and_attribute_names_are_lowercased() {
    let tokens = tokenize("<DIV ID=X>");
    match &tokens[0] {
        Token::StartTag {
            name, attributes, ..
        } => {
            assert_eq!(name, "div");
            assert_eq!(attributes[0].name, "id");
            // Values keep their case
            assert_eq!(attributes[0].value, "X");
        }
        _ => panic!("Expected StartTag token"),
    }
}

// ========== Attribute error recovery ==========

#[test]
fn test_duplicate_attribute_first_wins() {
    let tokens = tokenize("<a x=1 x=2>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 1);
            assert_eq!(attributes[0].name, "x");
            assert_eq!(attributes[0].value, "1");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(error_codes("<a x=1 x=2>"), vec![ErrorCode::DuplicateAttribute]);
}

#[test]
fn test_missing_whitespace_between_attributes() {
    let input = r#"<a x="1"y="2">"#;
    let tokens = tokenize(input);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes.len(), 2);
            assert_eq!(attributes[1].name, "y");
            assert_eq!(attributes[1].value, "2");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(
        error_codes(input),
        vec![ErrorCode::MissingWhitespaceBetweenAttributes]
    );
}

#[test]
fn test_equals_sign_before_attribute_name() {
    let tokens = tokenize("<a =x>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].name, "=x");
            assert_eq!(attributes[0].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(
        error_codes("<a =x>"),
        vec![ErrorCode::UnexpectedEqualsSignBeforeAttributeName]
    );
}

#[test]
fn test_missing_attribute_value() {
    let tokens = tokenize("<a x=>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].name, "x");
            assert_eq!(attributes[0].value, "");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(error_codes("<a x=>"), vec![ErrorCode::MissingAttributeValue]);
}

#[test]
fn test_quote_in_unquoted_attribute_value() {
    let tokens = tokenize(r#"<a x=a"b>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => assert_eq!(attributes[0].value, "a\"b"),
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(
        error_codes(r#"<a x=a"b>"#),
        vec![ErrorCode::UnexpectedCharacterInUnquotedAttributeValue]
    );
}

#[test]
fn test_end_tag_errors() {
    assert_eq!(
        error_codes("</p class=x>"),
        vec![ErrorCode::EndTagWithAttributes]
    );
    assert_eq!(
        error_codes("</br/>"),
        vec![ErrorCode::EndTagWithTrailingSolidus]
    );
}

// ========== Tag open errors and EOF ==========

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize("<div class");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(tokens[0], Token::EndOfFile));

    let mut tokenizer = HTMLTokenizer::new("<div class");
    tokenizer.run();
    assert_eq!(tokenizer.errors().len(), 1);
    assert_eq!(tokenizer.errors()[0].code, ErrorCode::EofInTag);
    assert_eq!(tokenizer.errors()[0].position, 10);
}

#[test]
fn test_eof_before_tag_name() {
    let tokens = tokenize("<");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(tokens[0], Token::Character { data: '<' }));
    assert_eq!(error_codes("<"), vec![ErrorCode::EofBeforeTagName]);

    let tokens = tokenize("</");
    assert_eq!(text_of(&tokens), "</");
}

#[test]
fn test_invalid_first_character_of_tag_name() {
    let tokens = tokenize("a<1");
    assert_eq!(text_of(&tokens), "a<1");
    assert_eq!(
        error_codes("a<1"),
        vec![ErrorCode::InvalidFirstCharacterOfTagName]
    );
}

#[test]
fn test_missing_end_tag_name_emits_nothing() {
    let tokens = tokenize("</>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(error_codes("</>"), vec![ErrorCode::MissingEndTagName]);
}

#[test]
fn test_question_mark_opens_bogus_comment() {
    let tokens = tokenize("<?xml version?>");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, "?xml version?"),
        _ => panic!("Expected Comment token"),
    }
    assert_eq!(
        error_codes("<?xml?>"),
        vec![ErrorCode::UnexpectedQuestionMarkInsteadOfTagName]
    );
}

// ========== Comments ==========

#[test]
fn test_empty_comment() {
    let tokens = tokenize("<!---->");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::Comment { data } if data.is_empty()));
}

#[test]
fn test_abrupt_closing_of_empty_comment() {
    let tokens = tokenize("<!-->");
    assert!(matches!(&tokens[0], Token::Comment { data } if data.is_empty()));
    assert_eq!(
        error_codes("<!-->"),
        vec![ErrorCode::AbruptClosingOfEmptyComment]
    );
}

#[test]
fn test_incorrectly_closed_comment() {
    let tokens = tokenize("<!--a--!>");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "a"));
    assert_eq!(
        error_codes("<!--a--!>"),
        vec![ErrorCode::IncorrectlyClosedComment]
    );
}

#[test]
fn test_nested_comment() {
    let tokens = tokenize("<!--<!--a-->");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "<!--a"));
    assert_eq!(error_codes("<!--<!--a-->"), vec![ErrorCode::NestedComment]);
}

#[test]
fn test_eof_in_comment_emits_comment() {
    let tokens = tokenize("<!--abc");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "abc"));
    assert!(matches!(tokens[1], Token::EndOfFile));
    assert_eq!(error_codes("<!--abc"), vec![ErrorCode::EofInComment]);
}

#[test]
fn test_incorrectly_opened_comment() {
    let tokens = tokenize("<!x>");
    assert!(matches!(&tokens[0], Token::Comment { data } if data == "x"));
    assert_eq!(
        error_codes("<!x>"),
        vec![ErrorCode::IncorrectlyOpenedComment]
    );
}

// ========== CDATA sections ==========

#[test]
fn test_cdata_in_html_content_is_bogus_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    match &tokens[0] {
        Token::Comment { data } => assert_eq!(data, "[CDATA[x]]"),
        _ => panic!("Expected Comment token"),
    }
    assert_eq!(
        error_codes("<![CDATA[x]]>"),
        vec![ErrorCode::CdataInHtmlContent]
    );
}

#[test]
fn test_cdata_section_when_allowed() {
    let mut tokenizer = HTMLTokenizer::new("<![CDATA[a]b<c>]]>");
    tokenizer.set_cdata_allowed(true);
    tokenizer.run();
    assert!(tokenizer.errors().is_empty());
    let tokens = tokenizer.into_tokens();
    assert_eq!(text_of(&tokens), "a]b<c>");
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

// ========== DOCTYPE ==========

#[test]
fn test_doctype_public_and_system_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#,
    );
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_system_keyword_is_case_insensitive() {
    let tokens = tokenize("<!doctype HTML system 'about:legacy-compat'>");
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(public_identifier.is_none());
            assert_eq!(system_identifier.as_deref(), Some("about:legacy-compat"));
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert!(name.is_none());
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
    assert_eq!(error_codes("<!DOCTYPE>"), vec![ErrorCode::MissingDoctypeName]);
}

#[test]
fn test_doctype_with_garbage_after_name() {
    let tokens = tokenize("<!DOCTYPE html bogus>");
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
    assert_eq!(
        error_codes("<!DOCTYPE html bogus>"),
        vec![ErrorCode::InvalidCharacterSequenceAfterDoctypeName]
    );
}

#[test]
fn test_eof_in_doctype() {
    let tokens = tokenize("<!DOCTYPE html");
    assert!(matches!(&tokens[0], Token::Doctype { force_quirks: true, .. }));
    assert!(matches!(tokens[1], Token::EndOfFile));
    assert_eq!(error_codes("<!DOCTYPE html"), vec![ErrorCode::EofInDoctype]);
}

// ========== Text-only content (RCDATA/RAWTEXT/script data/PLAINTEXT) ==========

#[test]
fn test_style_element_rawtext() {
    // Style content should be treated as raw text, not parsed as tags
    let tokens = tokenize_text_element(
        "style",
        TokenizerState::RAWTEXT,
        "body { color: red; }</style>",
    );
    assert_eq!(text_of(&tokens), "body { color: red; }");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_style_with_fake_tags() {
    let tokens = tokenize_text_element(
        "style",
        TokenizerState::RAWTEXT,
        "<div>not a tag</div></style>",
    );
    // The <div> and </div> should appear as literal text, not as tags
    assert_eq!(text_of(&tokens), "<div>not a tag</div>");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "style"));
}

#[test]
fn test_rawtext_ignores_character_references() {
    let tokens = tokenize_text_element("style", TokenizerState::RAWTEXT, "&amp;</style>");
    assert_eq!(text_of(&tokens), "&amp;");
}

#[test]
fn test_rcdata_decodes_character_references() {
    let tokens = tokenize_text_element("title", TokenizerState::RCDATA, "a &amp; b</title>");
    assert_eq!(text_of(&tokens), "a & b");
}

#[test]
fn test_title_with_less_than() {
    let tokens = tokenize_text_element("title", TokenizerState::RCDATA, "a < b</title>");
    assert_eq!(text_of(&tokens), "a < b");
}

#[test]
fn test_rcdata_inappropriate_end_tag_unwinds() {
    // The start tag comes from the tokenizer itself; tree construction then
    // switches it to RCDATA.
    let mut tokenizer = HTMLTokenizer::new("<title></not-title></title>");
    let first = tokenizer.next_token();
    assert!(matches!(&first, Some(Token::StartTag { name, .. }) if name == "title"));
    assert_eq!(tokenizer.last_start_tag(), Some("title"));
    tokenizer.set_state(TokenizerState::RCDATA);

    let rest: Vec<Token> = tokenizer.collect();
    assert_eq!(rest.len(), 14);
    let expected = ['<', '/', 'n', 'o', 't', '-', 't', 'i', 't', 'l', 'e', '>'];
    for (token, c) in rest.iter().zip(expected) {
        match token {
            Token::Character { data } => assert_eq!(*data, c),
            _ => panic!("Expected Character token"),
        }
    }
    assert!(matches!(&rest[12], Token::EndTag { name, .. } if name == "title"));
    assert!(matches!(rest[13], Token::EndOfFile));
}

#[test]
fn test_end_tag_without_last_start_tag_is_text() {
    let mut tokenizer = HTMLTokenizer::new("</title>");
    tokenizer.set_state(TokenizerState::RCDATA);
    tokenizer.run();
    let tokens = tokenizer.into_tokens();
    assert_eq!(text_of(&tokens), "</title>");
    assert_eq!(tokens.len(), 9);
}

#[test]
fn test_rcdata_eof_without_end_tag() {
    let tokens = tokenize_text_element("textarea", TokenizerState::RCDATA, "<b>bold?</b>");
    assert_eq!(text_of(&tokens), "<b>bold?</b>");
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn test_script_data_less_than() {
    let tokens = tokenize_text_element(
        "script",
        TokenizerState::ScriptData,
        "if (a < b) {}</script>",
    );
    assert_eq!(text_of(&tokens), "if (a < b) {}");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_script_data_double_escaped() {
    // Inside "<!--<script>", a "</script>" does not end the script element.
    let tokens = tokenize_text_element(
        "script",
        TokenizerState::ScriptData,
        "<!--<script>x</script>--></script>",
    );
    assert_eq!(text_of(&tokens), "<!--<script>x</script>-->");
    assert!(matches!(&tokens[tokens.len() - 2], Token::EndTag { name, .. } if name == "script"));
}

#[test]
fn test_script_data_escaped_end_tag() {
    let tokens = tokenize_text_element(
        "script",
        TokenizerState::ScriptData,
        "<!-- a </script> b",
    );
    let end = tokens
        .iter()
        .position(|t| matches!(t, Token::EndTag { name, .. } if name == "script"))
        .expect("script end tag");
    assert_eq!(text_of(&tokens[..end]), "<!-- a ");
    assert_eq!(text_of(&tokens[end..]), " b");
}

#[test]
fn test_eof_in_escaped_script() {
    let tokens = tokenize_text_element("script", TokenizerState::ScriptData, "<!--<script>");
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
    let mut tokenizer = HTMLTokenizer::new("<!--<script>");
    tokenizer.set_state(TokenizerState::ScriptData);
    tokenizer.run();
    assert_eq!(
        tokenizer.errors()[0].code,
        ErrorCode::EofInScriptHtmlCommentLikeText
    );
}

#[test]
fn test_plaintext_never_ends() {
    let tokens = tokenize_text_element(
        "plaintext",
        TokenizerState::PLAINTEXT,
        "</plaintext><b>",
    );
    assert_eq!(tokens.len(), 16);
    assert_eq!(text_of(&tokens), "</plaintext><b>");
}

// ========== Character references ==========

#[test]
fn test_character_reference_bare_ampersand() {
    // Bare ampersand followed by non-alphanumeric should flush as literal '&'
    let tokens = tokenize("a & b");
    assert_eq!(tokens.len(), 6);
    assert!(matches!(tokens[2], Token::Character { data: '&' }));
    assert!(matches!(tokens[5], Token::EndOfFile));
}

#[test]
fn test_named_character_reference_amp() {
    assert_eq!(text_of(&tokenize("a &amp; b")), "a & b");
    assert_eq!(text_of(&tokenize("&lt;div&gt;")), "<div>");
}

#[test]
fn test_named_character_reference_without_semicolon() {
    // Legacy entities without semicolon should still work
    assert_eq!(text_of(&tokenize("&amp is ok")), "& is ok");
    assert_eq!(
        error_codes("&amp is ok"),
        vec![ErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_named_character_reference_longest_legacy_prefix() {
    // "&notit;" matches the legacy "not" and leaves "it;"
    assert_eq!(text_of(&tokenize("&notit;")), "\u{00AC}it;");
    assert_eq!(text_of(&tokenize("&notin;")), "\u{2209}");
}

#[test]
fn test_named_character_reference_unknown() {
    assert_eq!(text_of(&tokenize("&zzz;")), "&zzz;");
    assert_eq!(
        error_codes("&zzz;"),
        vec![ErrorCode::UnknownNamedCharacterReference]
    );
}

#[test]
fn test_named_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "?a=1&b=2");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_legacy_reference_in_attribute_is_left_alone() {
    let input = r#"<a href="?x=1&notit=2">"#;
    let tokens = tokenize(input);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].value, "?x=1&notit=2");
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(error_codes(input).is_empty());
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text_of(&tokenize("&#65;&#x42;&#X63;")), "ABc");
    assert_eq!(text_of(&tokenize("&#65")), "A");
    assert_eq!(
        error_codes("&#65"),
        vec![ErrorCode::MissingSemicolonAfterCharacterReference]
    );
}

#[test]
fn test_numeric_character_reference_replacements() {
    assert_eq!(text_of(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(
        error_codes("&#x80;"),
        vec![ErrorCode::ControlCharacterReference]
    );

    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(error_codes("&#0;"), vec![ErrorCode::NullCharacterReference]);

    assert_eq!(text_of(&tokenize("&#xD800;")), "\u{FFFD}");
    assert_eq!(
        error_codes("&#xD800;"),
        vec![ErrorCode::SurrogateCharacterReference]
    );

    assert_eq!(text_of(&tokenize("&#x110000;")), "\u{FFFD}");
    assert_eq!(
        error_codes("&#99999999999999999999;"),
        vec![ErrorCode::CharacterReferenceOutsideUnicodeRange]
    );
}

#[test]
fn test_numeric_character_reference_without_digits() {
    assert_eq!(text_of(&tokenize("&#;")), "&#;");
    assert_eq!(
        error_codes("&#x;"),
        vec![ErrorCode::AbsenceOfDigitsInNumericCharacterReference]
    );
}

// ========== Input stream preprocessing ==========

#[test]
fn test_null_character_in_data_is_replaced() {
    let tokens = tokenize("a\0b");
    assert_eq!(tokens.len(), 4);
    assert!(matches!(tokens[1], Token::Character { data: '\u{FFFD}' }));
    assert_eq!(error_codes("a\0b"), vec![ErrorCode::UnexpectedNullCharacter]);
}

#[test]
fn test_null_character_in_tag_name() {
    let tokens = tokenize("<a\0>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "a\u{FFFD}"));
}

#[test]
fn test_newlines_are_normalized() {
    assert_eq!(text_of(&tokenize("a\r\nb\rc")), "a\nb\nc");
}

#[test]
fn test_control_and_noncharacter_in_input_stream() {
    assert_eq!(
        error_codes("\u{1}"),
        vec![ErrorCode::ControlCharacterInInputStream]
    );
    assert_eq!(
        error_codes("\u{FDD0}"),
        vec![ErrorCode::NoncharacterInInputStream]
    );
    // Reconsumed characters are only reported once
    assert_eq!(
        error_codes("<\u{1}"),
        vec![
            ErrorCode::ControlCharacterInInputStream,
            ErrorCode::InvalidFirstCharacterOfTagName
        ]
    );
}

// ========== Pull interface ==========

#[test]
fn test_iterator_matches_run() {
    let input = "<!DOCTYPE html><p id=a>x &amp; y<!-- c --></p>";
    let pulled: Vec<Token> = HTMLTokenizer::new(input).collect();
    assert_eq!(pulled, tokenize(input));
    assert_eq!(pulled, quill_html::tokenize(input));
}

#[test]
fn test_stream_ends_after_one_eof() {
    let mut tokenizer = HTMLTokenizer::new("");
    assert_eq!(tokenizer.next_token(), Some(Token::EndOfFile));
    assert_eq!(tokenizer.next_token(), None);
    assert_eq!(tokenizer.next_token(), None);
}
