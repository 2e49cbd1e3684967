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

//! Byte-level string helpers shared by the WARC and extraction subsystems.
//!
//! These operate on raw bytes rather than `str` because header values and
//! text-node content are not guaranteed to be valid UTF-8 at this layer.

/// Trims leading and trailing ASCII whitespace.
pub fn strip(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(s.len());
    let end = s.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &s[start..end]
}

/// Collapses every maximal run of ASCII whitespace into a single space.
pub fn collapse_ws(s: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut in_ws = false;
    for &b in s {
        if b.is_ascii_whitespace() {
            if !in_ws {
                out.push(b' ');
                in_ws = true;
            }
        } else {
            out.push(b);
            in_ws = false;
        }
    }
    out
}

/// Lowercases ASCII letters, leaving all other bytes untouched.
pub fn to_lower_ascii(s: &[u8]) -> Vec<u8> {
    s.iter().map(|b| b.to_ascii_lowercase()).collect()
}

/// Inserts `2 * depth` spaces after every `\n` in `s`.
pub fn indent_newlines(s: &str, depth: usize) -> String {
    if depth == 0 {
        return s.to_string();
    }
    let pad = " ".repeat(depth * 2);
    let mut out = String::with_capacity(s.len());
    for (i, line) in s.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&pad);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_trims_both_ends() {
        assert_eq!(strip(b"  hi \t\r\n"), b"hi");
        assert_eq!(strip(b""), b"");
        assert_eq!(strip(b"   "), b"");
    }

    #[test]
    fn collapse_ws_merges_runs() {
        assert_eq!(collapse_ws(b"a   b\t\nc"), b"a b c");
        assert_eq!(collapse_ws(b""), b"");
        assert_eq!(collapse_ws(b"no_ws_here"), b"no_ws_here");
    }

    #[test]
    fn collapse_ws_is_idempotent() {
        let once = collapse_ws(b"  a   b  ");
        let twice = collapse_ws(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn to_lower_ascii_only_affects_letters() {
        assert_eq!(to_lower_ascii(b"HeLLo-123"), b"hello-123");
    }

    #[test]
    fn indent_newlines_pads_continuation_lines() {
        assert_eq!(indent_newlines("a\nb\nc", 1), "a\n  b\n  c");
        assert_eq!(indent_newlines("a\nb", 0), "a\nb");
    }
}
