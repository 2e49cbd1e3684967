// Copyright 2025 Janek Bevendorff
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Thin helpers over `kuchiki::NodeRef` for tag names, attributes and the
//! block/inline element distinction.
//!
//! The `matches!`-over-a-tag-list style for [`is_block_element`] mirrors
//! `examples/other_examples/29c720c2_hansmrtn-pulp-os__src-formats-html_strip.rs.rs`,
//! which takes the same approach rather than building a `phf::Set`.

use kuchiki::NodeRef;

/// Returns the lowercase tag name of an element node, or `None` for non-elements.
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element().map(|e| e.name.local.as_ref().to_ascii_lowercase())
}

pub fn has_tag(node: &NodeRef, tag: &str) -> bool {
    tag_name(node).map_or(false, |t| t == tag)
}

/// Looks up an attribute by name, case-sensitively (HTML attribute names are
/// already lowercase by the time html5ever hands them to us).
pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.as_element()
        .and_then(|e| e.attributes.borrow().get(name).map(|v| v.to_string()))
}

pub fn has_attr(node: &NodeRef, name: &str) -> bool {
    attr(node, name).is_some()
}

/// A stable identity key for an element node, usable as a `HashSet` key for
/// O(1) membership tests. Backed by the address of the node's `ElementData`
/// allocation, which `kuchiki::NodeRef::as_element` always derefs to the same
/// place for every clone of a given node. `None` for non-element nodes; CSS
/// selector matches (the only thing callers key by) are always elements.
pub fn element_identity(node: &NodeRef) -> Option<usize> {
    node.as_element().map(|e| e as *const _ as usize)
}

/// Concatenation of `class` and `id` attribute values, space-joined, for
/// regex classification against.
pub fn class_and_id(node: &NodeRef) -> String {
    let class = attr(node, "class").unwrap_or_default();
    let id = attr(node, "id").unwrap_or_default();
    if id.is_empty() {
        class
    } else if class.is_empty() {
        id
    } else {
        format!("{class} {id}")
    }
}

/// Tags whose content should start on its own line and be visually separated
/// from surrounding content.
pub fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "li"
            | "ul"
            | "ol"
            | "dl"
            | "dt"
            | "dd"
            | "tr"
            | "td"
            | "th"
            | "table"
            | "blockquote"
            | "section"
            | "article"
            | "aside"
            | "figure"
            | "figcaption"
            | "header"
            | "footer"
            | "nav"
            | "pre"
            | "hr"
            | "br"
            | "main"
            | "form"
    )
}

pub fn is_big_block(tag: &str) -> bool {
    matches!(tag, "p" | "h1" | "h2" | "h3" | "h4")
}

/// Depth of `node` above the nearest ancestor `<body>`, or `node`'s full
/// ancestor count if no `<body>` is found (treated as "deep" by callers).
pub fn length_to_body(node: &NodeRef) -> u32 {
    let mut depth = 0;
    let mut cur = node.parent();
    while let Some(n) = cur {
        if has_tag(&n, "body") {
            return depth;
        }
        depth += 1;
        cur = n.parent();
    }
    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    fn parse(html: &str) -> NodeRef {
        kuchiki::parse_html().one(html)
    }

    #[test]
    fn block_tags_are_recognized() {
        assert!(is_block_element("p"));
        assert!(is_block_element("div"));
        assert!(!is_block_element("span"));
        assert!(!is_block_element("b"));
    }

    #[test]
    fn class_and_id_join_with_space() {
        let doc = parse(r#"<div class="foo" id="bar"></div>"#);
        let div = doc.select("div").unwrap().next().unwrap();
        assert_eq!(class_and_id(div.as_node()), "foo bar");
    }

    #[test]
    fn tag_name_is_lowercased() {
        let doc = parse("<P>hi</P>");
        let p = doc.select("p").unwrap().next().unwrap();
        assert_eq!(tag_name(p.as_node()).as_deref(), Some("p"));
    }
}
