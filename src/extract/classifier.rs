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

//! Heuristic "is this node part of the main content" predicate.
//!
//! The three-section cascade (intrinsic element rules, generic class/id
//! rules, block-only class/id rules) and the normative `article`/`nav`/
//! `recommended` regular expressions come from the distilled specification.
//! The remaining pattern families could not be recovered from original
//! source material in this environment (see `DESIGN.md`, Open Question 3)
//! and are reconstructed here in the same anchored-alternation idiom.

use once_cell::sync::Lazy;
use regex::Regex;

use super::dom;
use kuchiki::NodeRef;

macro_rules! lazy_re {
    ($name:ident, $pat:expr) => {
        static $name: Lazy<Regex> = Lazy::new(|| Regex::new($pat).unwrap());
    };
}

lazy_re!(ARTICLE_RE, r"(?i)(?:^|[\s_-])(?:article|entry|post|story|single[_-]?post|main)(?:content|body|text|page)?(?:$|[\s_-])");
lazy_re!(NAV_RE, r"(?i)(?:^|\s)(?:[a-z]-)?(?:(?:main|site|page|sub|article)[_-]*)?(?:nav(?:bar|igation|box)?|menu(?:[_-]item)?|dropdown|bread[_-]?crumbs?)|(?:link[_-]?(?:list|container))(?:$|[\s_-])");
lazy_re!(RECOMMENDED_RE, r"(?i)(?:^|[\s_-])(?:trends|trending|recommended|popular|editorial|editors?[_-]picks|(?:related|more)[_-]?(?:links|articles|posts|guides|stories))(?:$|[\s_-])");
lazy_re!(HEADER_RE, r"(?i)(?:^|[\s_-])(?:global|site|page|main|masthead)[_-]?header(?:$|[\s_-])");
lazy_re!(FOOTER_RE, r"(?i)(?:^|[\s_-])(?:global|site|page|main)?[_-]?footer(?:$|[\s_-])");
lazy_re!(POSTMETA_RE, r"(?i)(?:^|[\s_-])(?:post|entry|article)?[_-]?meta(?:$|[\s_-])|(?:^|[\s_-])byline(?:$|[\s_-])");
lazy_re!(SIDEBAR_RE, r"(?i)(?:^|[\s_-])(?:sidebar|side[_-]bar|widget[_-]area|secondary[_-]content)(?:$|[\s_-])");
lazy_re!(SEARCH_RE, r"(?i)(?:^|[\s_-])search(?:box|bar|form|field)?(?:$|[\s_-])");
lazy_re!(SKIP_LINK_RE, r"(?i)(?:^|[\s_-])(?:skip-to|skip-link|scroll-up|scroll-down|next|prev|permalink|pagination)(?:$|[\s_-])");
lazy_re!(DISPLAY_RE, r"(?i)(?:^|[\s_-])(?:display-none|hidden|invisible|collapsed|h-0|nocontent|expandable)(?:$|[\s_-])");
lazy_re!(DISPLAY_CSS_RE, r"(?i)display\s*:\s*none|visibility\s*:\s*hidden");
lazy_re!(MODAL_RE, r"(?i)(?:^|[\s_-])(?:modal|popup|lightbox|overlay)(?:$|[\s_-])");
lazy_re!(SIGNIN_RE, r"(?i)(?:^|[\s_-])(?:sign[_-]?in|log[_-]?in|log[_-]?out|member[_-]?login|account[_-]?nav|user[_-]?menu)(?:$|[\s_-])");
lazy_re!(ADS_RE, r"(?i)(?:^|[\s_-])(?:ad|ads|advert(?:isement)?|sponsored|promoted|banner|donate)(?:$|[\s_-])");
lazy_re!(SOCIAL_RE, r"(?i)(?:^|[\s_-])(?:social(?:[_-]?media|[_-]?share|[_-]?icons|[_-]?links)?|share[_-]?buttons|feedback)(?:$|[\s_-])");
lazy_re!(COMMENTS_RE, r"(?i)(?:^|[\s_-])comments?(?:[_-]?(?:list|section|area|wrap(?:per)?))?(?:$|[\s_-])");
lazy_re!(LOGO_RE, r"(?i)(?:^|[\s_-])(?:brand-)?logo(?:$|[\s_-])");

const AD_ATTRS: [&str; 3] = ["data-ad", "data-advertisement", "data-text-ad"];
const SKIP_REL: [&str; 6] = ["bookmark", "author", "icon", "search", "prev", "next"];
const SKIP_ITEMPROP: [&str; 3] = ["datePublished", "author", "url"];
const SKIP_ROLE: [&str; 11] = [
    "contentinfo",
    "img",
    "menu",
    "menubar",
    "navigation",
    "menuitem",
    "alert",
    "dialog",
    "checkbox",
    "radio",
    "complementary",
];

/// Decides whether `node` (an element) may be included in extracted text.
pub struct ContentClassifier;

impl ContentClassifier {
    pub fn is_main_content(node: &NodeRef, allow_comments: bool) -> bool {
        let Some(tag) = dom::tag_name(node) else {
            return true;
        };

        if !Self::section_a(node, &tag) {
            return false;
        }
        if !Self::section_b(node) {
            return false;
        }
        if dom::is_block_element(&tag) && !Self::section_c(node, allow_comments) {
            return false;
        }
        true
    }

    fn section_a(node: &NodeRef, tag: &str) -> bool {
        if is_pua_or_pilcrow_only(node) && !dom::is_block_element(tag) {
            return false;
        }
        if dom::has_attr(node, "hidden") {
            return false;
        }
        if let Some(rel) = dom::attr(node, "rel") {
            if SKIP_REL.contains(&rel.as_str()) {
                return false;
            }
        }
        if let Some(ip) = dom::attr(node, "itemprop") {
            if SKIP_ITEMPROP.contains(&ip.as_str()) {
                return false;
            }
        }
        if dom::attr(node, "aria-hidden").as_deref() == Some("true") {
            return false;
        }
        if dom::attr(node, "aria-expanded").as_deref() == Some("false") {
            return false;
        }
        if let Some(role) = dom::attr(node, "role") {
            if SKIP_ROLE.contains(&role.as_str()) {
                return false;
            }
        }

        if tag == "iframe" {
            return false;
        }

        if dom::is_block_element(tag) {
            let depth = dom::length_to_body(node);
            match tag {
                "main" => return true,
                "footer" if depth >= 3 && is_global_footer(node) => return false,
                "ul" | "nav" if depth < 8 => return false,
                "aside" if depth < 8 => return false,
                _ => {}
            }
        }
        true
    }

    fn section_b(node: &NodeRef) -> bool {
        let class_id = dom::class_and_id(node);
        if DISPLAY_RE.is_match(&class_id) {
            return false;
        }
        if let Some(style) = dom::attr(node, "style") {
            if DISPLAY_CSS_RE.is_match(&style) {
                return false;
            }
        }
        let tag = dom::tag_name(node).unwrap_or_default();
        if matches!(tag.as_str(), "a" | "div" | "li") && SKIP_LINK_RE.is_match(&class_id) {
            return false;
        }
        let depth = dom::length_to_body(node);
        if depth > 2 && (SIGNIN_RE.is_match(&class_id) || POSTMETA_RE.is_match(&class_id) || SOCIAL_RE.is_match(&class_id)) {
            return false;
        }
        if LOGO_RE.is_match(&class_id) {
            return false;
        }
        if ADS_RE.is_match(&class_id) || AD_ATTRS.iter().any(|a| dom::has_attr(node, a)) {
            return false;
        }
        true
    }

    fn section_c(node: &NodeRef, allow_comments: bool) -> bool {
        let class_id = dom::class_and_id(node);
        if ARTICLE_RE.is_match(&class_id) {
            return true;
        }
        if HEADER_RE.is_match(&class_id) {
            return false;
        }
        if FOOTER_RE.is_match(&class_id) {
            return false;
        }
        if NAV_RE.is_match(&class_id) {
            return false;
        }
        if RECOMMENDED_RE.is_match(&class_id) {
            return false;
        }
        if !allow_comments && COMMENTS_RE.is_match(&class_id) {
            return false;
        }
        if SEARCH_RE.is_match(&class_id) {
            return false;
        }
        if SIDEBAR_RE.is_match(&class_id) {
            return false;
        }
        if MODAL_RE.is_match(&class_id) {
            return false;
        }
        true
    }
}

/// True if `node` has exactly one child, a text node whose content is the
/// pilcrow (U+00B6) or a single Private Use Area code point (U+E000..U+F8FF).
fn is_pua_or_pilcrow_only(node: &NodeRef) -> bool {
    let mut children = node.children();
    let Some(only) = children.next() else {
        return false;
    };
    if children.next().is_some() {
        return false;
    }
    let Some(text) = only.as_text() else {
        return false;
    };
    let text = text.borrow();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c == '\u{00B6}' || ('\u{E000}'..='\u{F8FF}').contains(&c),
        _ => false,
    }
}

/// A `<footer>` is "global" if no element sibling follows it (skipping text
/// nodes) at any level on the way up to `<body>`.
fn is_global_footer(node: &NodeRef) -> bool {
    let mut cur = node.clone();
    loop {
        let mut sib = cur.next_sibling();
        while let Some(s) = sib {
            if s.as_element().is_some() {
                return false;
            }
            sib = s.next_sibling();
        }
        match cur.parent() {
            Some(p) if !dom::has_tag(&p, "body") => cur = p,
            _ => return true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    fn parse(html: &str) -> NodeRef {
        kuchiki::parse_html().one(html)
    }

    #[test]
    fn article_body_is_whitelisted() {
        let doc = parse(r#"<html><body><div class="article-body">x</div></body></html>"#);
        let div = doc.select("div").unwrap().next().unwrap();
        assert!(ContentClassifier::is_main_content(div.as_node(), true));
    }

    #[test]
    fn global_footer_rejected_by_class() {
        let doc = parse(r#"<html><body><footer class="site-footer">x</footer></body></html>"#);
        let footer = doc.select("footer").unwrap().next().unwrap();
        assert!(!ContentClassifier::is_main_content(footer.as_node(), true));
    }

    #[test]
    fn comments_respect_allow_flag() {
        let doc = parse(r#"<html><body><div class="comments-section">x</div></body></html>"#);
        let div = doc.select("div").unwrap().next().unwrap();
        assert!(!ContentClassifier::is_main_content(div.as_node(), false));
        assert!(ContentClassifier::is_main_content(div.as_node(), true));
    }

    #[test]
    fn hidden_attribute_rejects() {
        let doc = parse(r#"<html><body><div hidden>x</div></body></html>"#);
        let div = doc.select("div").unwrap().next().unwrap();
        assert!(!ContentClassifier::is_main_content(div.as_node(), true));
    }
}
