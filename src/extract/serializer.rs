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

//! Folds a sequence of [`ExtractNode`]s into the final plain-text string,
//! handling paragraph margins, list bullets/numbering, and list indentation.

use super::driver::ExtractOpts;
use super::walker::ExtractNode;
use crate::strops::indent_newlines;

enum ListKind {
    Ul,
    Ol(u32),
}

pub struct Serializer<'a> {
    opts: &'a ExtractOpts,
    output: String,
    list_stack: Vec<ListKind>,
    bullet_deferred: bool,
}

impl<'a> Serializer<'a> {
    pub fn new(opts: &'a ExtractOpts) -> Self {
        Self {
            opts,
            output: String::new(),
            list_stack: Vec::new(),
            bullet_deferred: false,
        }
    }

    pub fn serialize(mut self, nodes: &[ExtractNode]) -> String {
        for node in nodes {
            self.fold(node);
        }
        self.output.truncate(self.output.trim_end().len());
        self.output
    }

    fn fold(&mut self, node: &ExtractNode) {
        let tag = node.reference_tag.as_deref();

        if self.opts.preserve_formatting {
            self.track_list_state(tag, node.is_end_tag);
        }

        if tag != Some("textarea") {
            self.make_margin(node);
        }

        if node.text_contents.is_empty() {
            return;
        }

        let mut text = if node.is_pre {
            node.text_contents.clone()
        } else {
            node.text_contents.trim_end().to_string()
        };
        if text.is_empty() {
            return;
        }

        let list_depth = self.list_stack.len();
        if list_depth > 0 {
            let deferred = self.bullet_deferred;
            let extra = if self.opts.list_bullets && !deferred { 1 } else { 0 };

            if node.is_pre {
                text = indent_newlines(&text, list_depth + if self.opts.list_bullets { 1 } else { 0 });
            }

            let indent_width = 2 * list_depth + 2 * extra;
            let indent = " ".repeat(indent_width);

            if deferred {
                let prefix = match self.list_stack.last_mut() {
                    Some(ListKind::Ul) => "• ".to_string(),
                    Some(ListKind::Ol(n)) => {
                        *n += 1;
                        format!("{n}. ", n = *n)
                    }
                    None => String::new(),
                };
                text = format!("{prefix}{text}");
                self.bullet_deferred = false;
            }

            text = format!("{indent}{text}");
        }

        if self.opts.preserve_formatting
            && matches!(tag, Some("td") | Some("th"))
            && !self.output.ends_with('\n')
        {
            self.output.push_str("\t\t");
        }

        self.output.push_str(&text);
    }

    fn track_list_state(&mut self, tag: Option<&str>, is_end: bool) {
        match tag {
            Some("ul") => {
                if !is_end {
                    self.list_stack.push(ListKind::Ul);
                } else {
                    self.list_stack.pop();
                }
            }
            Some("ol") => {
                if !is_end {
                    self.list_stack.push(ListKind::Ol(0));
                } else {
                    self.list_stack.pop();
                }
            }
            Some("li") => {
                if !is_end {
                    if self.list_stack.is_empty() {
                        self.list_stack.push(ListKind::Ul);
                    }
                    self.bullet_deferred = true;
                }
            }
            _ => {}
        }
    }

    fn make_margin(&mut self, node: &ExtractNode) {
        if self.opts.preserve_formatting {
            let needs_break = !node.collapse_margins || !self.output.ends_with('\n');
            if needs_break && !self.output.is_empty() {
                if !self.output.ends_with('\n') {
                    self.output.push('\n');
                }
                if node.is_big_block && !self.bullet_deferred {
                    let second_to_last = self.output.as_bytes().len() >= 2
                        && self.output.as_bytes()[self.output.len() - 2] != b'\n';
                    if second_to_last {
                        self.output.push('\n');
                    }
                }
            }
        } else if !self.output.is_empty() && !self.output.ends_with(' ') {
            self.output.push(' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(tag: &str, depth: u32, text: &str, is_end: bool) -> ExtractNode {
        ExtractNode {
            reference_tag: Some(tag.to_string()),
            depth,
            collapse_margins: true,
            is_big_block: matches!(tag, "p" | "h1" | "h2" | "h3" | "h4"),
            is_pre: false,
            is_end_tag: is_end,
            text_contents: text.to_string(),
        }
    }

    #[test]
    fn plain_text_joins_with_space() {
        let opts = ExtractOpts {
            preserve_formatting: false,
            ..Default::default()
        };
        let nodes = vec![node("p", 0, "Hello", false), node("p", 0, "world", true)];
        let out = Serializer::new(&opts).serialize(&nodes);
        assert_eq!(out, "Hello world");
    }

    #[test]
    fn list_items_get_bullets_and_indent() {
        let opts = ExtractOpts::default();
        let mut ul_open = node("ul", 0, "", false);
        ul_open.text_contents.clear();
        let li_a = node("li", 1, "a", false);
        let li_b = node("li", 1, "b", false);
        let ul_close = node("ul", 0, "", true);
        let nodes = vec![ul_open, li_a, li_b, ul_close];
        let out = Serializer::new(&opts).serialize(&nodes);
        assert_eq!(out, "  \u{2022} a\n  \u{2022} b");
    }
}
