//! Tests for DOM tree construction and traversal.

use quill_dom::{DocumentTypeData, DomTree, ElementData, NodeId, NodeType, QuirksMode};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag)))
}

// ========== append_child ==========

#[test]
fn test_append_child_links_siblings() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.first_child(parent), Some(a));
    assert_eq!(tree.last_child(parent), Some(c));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.next_sibling(c), None);
    assert_eq!(tree.parent(b), Some(parent));
}

#[test]
fn test_append_child_ignores_unknown_ids() {
    let mut tree = DomTree::new();
    tree.append_child(NodeId::ROOT, NodeId(42));
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_alloc_does_not_attach() {
    let mut tree = DomTree::new();
    let orphan = alloc_element(&mut tree, "p");
    assert_eq!(tree.parent(orphan), None);
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert_eq!(tree.len(), 2);
    assert!(!tree.is_empty());
}

// ========== traversal ==========

#[test]
fn test_ancestors_and_descendants() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, p);

    let chain: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(chain, vec![body, html, NodeId::ROOT]);
    assert!(tree.is_descendant_of(p, html));
    assert!(!tree.is_descendant_of(html, p));
    assert!(!tree.is_descendant_of(p, p));
}

#[test]
fn test_document_element_skips_doctype() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::DocumentType(DocumentTypeData {
        name: "html".to_string(),
        ..DocumentTypeData::default()
    }));
    tree.append_child(NodeId::ROOT, doctype);
    let html = alloc_element(&mut tree, "html");
    tree.append_child(NodeId::ROOT, html);

    assert_eq!(tree.doctype(), Some(doctype));
    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.as_doctype(doctype).map(|d| d.name.as_str()), Some("html"));
}

#[test]
fn test_body_lookup() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let head = alloc_element(&mut tree, "head");
    let body = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(html, body);

    assert_eq!(tree.body(), Some(body));
}

#[test]
fn test_text_content_concatenates_in_tree_order() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);
    let hello = tree.alloc(NodeType::Text("Hello, ".to_string()));
    let span = alloc_element(&mut tree, "span");
    let world = tree.alloc(NodeType::Text("world".to_string()));
    let comment = tree.alloc(NodeType::Comment("ignored".to_string()));
    tree.append_child(div, hello);
    tree.append_child(div, span);
    tree.append_child(span, world);
    tree.append_child(div, comment);

    assert_eq!(tree.text_content(div), "Hello, world");
    assert_eq!(tree.as_text(world), Some("world"));
}

// ========== attributes ==========

#[test]
fn test_attributes_keep_insertion_order() {
    let mut element = ElementData::new("a");
    assert!(element.add_attribute_if_missing("href", "/"));
    assert!(element.add_attribute_if_missing("id", "home"));
    assert!(!element.add_attribute_if_missing("href", "/other"));

    assert_eq!(
        element.attrs,
        vec![
            ("href".to_string(), "/".to_string()),
            ("id".to_string(), "home".to_string()),
        ]
    );
    assert_eq!(element.get_attribute("href"), Some("/"));
    assert_eq!(element.id(), Some("home"));
    assert!(!element.has_attribute("class"));
}

#[test]
fn test_as_element_mut() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    if let Some(data) = tree.as_element_mut(div) {
        let _ = data.add_attribute_if_missing("class", "box");
    }
    assert_eq!(
        tree.as_element(div).and_then(|e| e.get_attribute("class")),
        Some("box")
    );
}

// ========== quirks mode ==========

#[test]
fn test_quirks_mode_defaults_to_no_quirks() {
    let mut tree = DomTree::new();
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
    tree.set_quirks_mode(QuirksMode::Quirks);
    assert_eq!(tree.quirks_mode(), QuirksMode::Quirks);
    assert_eq!(QuirksMode::LimitedQuirks.to_string(), "limited-quirks");
}
