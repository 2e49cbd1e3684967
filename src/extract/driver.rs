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

//! Public entry point: composes the skip-selector prefilter, main-content
//! preselection, [`super::walker::ExtractWalker`] and [`super::serializer::Serializer`].

use std::collections::HashSet;

use kuchiki::NodeRef;
use tracing::debug;

use super::dom;
use super::serializer::Serializer;
use super::walker::{ExtractWalker, WalkContext};

/// Tunable behavior for [`extract_plain_text`].
#[derive(Debug, Clone)]
pub struct ExtractOpts {
    pub preserve_formatting: bool,
    pub list_bullets: bool,
    pub links: bool,
    pub alt_texts: bool,
    pub form_fields: bool,
    pub noscript: bool,
    pub main_content: bool,
    pub comments: bool,
    pub skip_elements: Vec<String>,
}

impl Default for ExtractOpts {
    fn default() -> Self {
        Self {
            preserve_formatting: true,
            list_bullets: true,
            links: false,
            alt_texts: true,
            form_fields: false,
            noscript: false,
            main_content: false,
            comments: true,
            skip_elements: Vec::new(),
        }
    }
}

const MAIN_CONTENT_SELECTOR: &str = ".article-body, .articleBody, .contentBody, .article-text, .main-content, .postcontent, .post-content, .single-post, [role=\"main\"]";

pub struct ExtractDriver;

impl ExtractDriver {
    fn skip_selector(opts: &ExtractOpts) -> String {
        let mut parts: Vec<String> = vec!["script".into(), "style".into()];
        if !opts.alt_texts {
            parts.extend(
                ["object", "video", "audio", "embed", "img", "area", "svg", "figcaption", "figure"]
                    .iter()
                    .map(|s| s.to_string()),
            );
        }
        if !opts.noscript {
            parts.push("noscript".into());
        }
        if !opts.form_fields {
            parts.extend(
                ["textarea", "input", "button", "select", "option", "label"]
                    .iter()
                    .map(|s| s.to_string()),
            );
        }
        parts.extend(opts.skip_elements.iter().cloned());
        parts.join(", ")
    }

    fn effective_root(root: &NodeRef) -> NodeRef {
        if root.as_document().is_some() {
            root.children()
                .find(|c| c.as_element().is_some())
                .unwrap_or_else(|| root.clone())
        } else {
            root.clone()
        }
    }

    fn preselect_main_content(root: &NodeRef) -> NodeRef {
        match root.select(MAIN_CONTENT_SELECTOR) {
            Ok(mut matches) => {
                let first = matches.next();
                let second_exists = matches.next().is_some();
                match (first, second_exists) {
                    (Some(only), false) => only.as_node().clone(),
                    (Some(_), true) => {
                        debug!("main-content preselection matched more than one node, using original root");
                        root.clone()
                    }
                    (None, _) => {
                        debug!("main-content preselection matched no node, using original root");
                        root.clone()
                    }
                }
            }
            Err(_) => root.clone(),
        }
    }

    pub fn extract(root: &NodeRef, opts: &ExtractOpts) -> String {
        let effective = Self::effective_root(root);

        let preselected = if opts.main_content {
            Self::preselect_main_content(&effective)
        } else {
            effective
        };

        let skip_selector = Self::skip_selector(opts);
        let skip_set: HashSet<usize> = if skip_selector.is_empty() {
            HashSet::new()
        } else {
            preselected
                .select(&skip_selector)
                .map(|it| it.filter_map(|n| dom::element_identity(n.as_node())).collect())
                .unwrap_or_default()
        };

        let ctx = WalkContext {
            opts,
            skip_set: &skip_set,
        };

        let nodes = ExtractWalker::walk(&preselected, &ctx);
        Serializer::new(opts).serialize(&nodes)
    }
}

/// Converts the subtree rooted at `root` into readable plain text.
///
/// Returns an empty string for a detached or otherwise degenerate node
/// rather than erroring — malformed input HTML never propagates as a
/// crate error here (the DOM itself is assumed well-formed by the time it
/// reaches this crate; see `SPEC_FULL.md` §7).
pub fn extract_plain_text(root: &NodeRef, opts: &ExtractOpts) -> String {
    ExtractDriver::extract(root, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuchiki::traits::TendrilSink;

    fn parse(html: &str) -> NodeRef {
        kuchiki::parse_html().one(html)
    }

    #[test]
    fn plain_extraction_strips_tags() {
        let doc = parse("<html><body><p>Hello <b>world</b>!</p></body></html>");
        let out = extract_plain_text(&doc, &ExtractOpts::default());
        assert_eq!(out, "Hello world!");
    }

    #[test]
    fn links_option_appends_href() {
        let doc = parse(r#"<html><body><a href="https://x.example">click</a></body></html>"#);
        let opts = ExtractOpts {
            links: true,
            ..Default::default()
        };
        let out = extract_plain_text(&doc, &opts);
        assert_eq!(out, "click (https://x.example)");
    }

    #[test]
    fn main_content_filters_out_footer() {
        let doc = parse(
            r#"<html><body>
                <div class="article-body">Good</div>
                <div class="site-footer">Bad</div>
            </body></html>"#,
        );
        let opts = ExtractOpts {
            main_content: true,
            ..Default::default()
        };
        let out = extract_plain_text(&doc, &opts);
        assert_eq!(out, "Good");
    }

    #[test]
    fn empty_document_yields_empty_string() {
        let doc = parse("");
        let out = extract_plain_text(&doc, &ExtractOpts::default());
        assert!(out.is_empty() || out.chars().all(char::is_whitespace));
    }
}
