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

//! WARC and HTTP header block parsing.
//!
//! Grounded on the teacher's commented-out `parse_header_block` (continuation
//! detection via leading whitespace), restructured so continuations join with
//! `\n` rather than a space, and so the parser can also consume a leading
//! status line for inner HTTP blocks.

use std::io::{self, BufRead};

/// An ordered sequence of name/value byte-string pairs.
///
/// Names are preserved verbatim but compared case-insensitively by [`Header::get`].
/// Duplicate names are permitted and preserved in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: Vec<u8>, value: Vec<u8>) {
        self.entries.push((name, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Vec<u8>, Vec<u8>)> {
        self.entries.iter()
    }

    /// Returns the first value matching `name`, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name.as_bytes()))
            .map(|(_, v)| v.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Result of parsing one header block.
pub struct ParsedBlock {
    pub header: Header,
    /// First line, stripped, when `has_status_line` was requested.
    pub status_line: Vec<u8>,
    /// Total bytes consumed from the stream, including the terminating blank line.
    pub bytes_consumed: u64,
}

/// Reads a CRLF-terminated header block from `r`, stopping at the first
/// blank line. When `has_status_line` is set, the first non-continuation
/// line is captured separately as [`ParsedBlock::status_line`] instead of
/// being parsed as a `name: value` pair.
pub fn parse_header_block<R: BufRead>(r: &mut R, has_status_line: bool) -> io::Result<ParsedBlock> {
    let mut header = Header::new();
    let mut status_line = Vec::new();
    let mut bytes_consumed: u64 = 0;
    let mut seen_status_line = !has_status_line;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = r.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended before header block terminator",
            ));
        }
        bytes_consumed += n as u64;

        let line = crate::strops::strip(&buf);
        if line.is_empty() {
            break;
        }

        if !seen_status_line {
            status_line = line.to_vec();
            seen_status_line = true;
            continue;
        }

        let is_continuation = buf.first().map_or(false, |b| b.is_ascii_whitespace());
        if is_continuation {
            if let Some((_, last_value)) = header.entries.last_mut() {
                last_value.push(b'\n');
                last_value.extend_from_slice(line);
            }
            continue;
        }

        match line.iter().position(|&b| b == b':') {
            Some(idx) => {
                let name = crate::strops::strip(&line[..idx]).to_vec();
                let value = crate::strops::strip(&line[idx + 1..]).to_vec();
                header.push(name, value);
            }
            None => {
                header.push(line.to_vec(), Vec::new());
            }
        }
    }

    Ok(ParsedBlock {
        header,
        status_line,
        bytes_consumed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_simple_headers() {
        let data = b"Content-Length: 5\r\nWARC-Type: response\r\n\r\n";
        let mut c = Cursor::new(&data[..]);
        let block = parse_header_block(&mut c, false).unwrap();
        assert_eq!(block.header.get("content-length"), Some(&b"5"[..]));
        assert_eq!(block.header.get("WARC-Type"), Some(&b"response"[..]));
        assert_eq!(block.bytes_consumed, data.len() as u64);
    }

    #[test]
    fn joins_continuation_with_newline() {
        let data = b"X-Foo: bar\r\n baz\r\n\r\n";
        let mut c = Cursor::new(&data[..]);
        let block = parse_header_block(&mut c, false).unwrap();
        assert_eq!(block.header.get("X-Foo"), Some(&b"bar\nbaz"[..]));
    }

    #[test]
    fn leading_continuation_is_ignored() {
        let data = b" orphan\r\nX-Foo: bar\r\n\r\n";
        let mut c = Cursor::new(&data[..]);
        let block = parse_header_block(&mut c, false).unwrap();
        assert_eq!(block.header.len(), 1);
        assert_eq!(block.header.get("X-Foo"), Some(&b"bar"[..]));
    }

    #[test]
    fn captures_status_line_separately() {
        let data = b"HTTP/1.1 200 OK\r\nContent-Type: text/html\r\n\r\n";
        let mut c = Cursor::new(&data[..]);
        let block = parse_header_block(&mut c, true).unwrap();
        assert_eq!(block.status_line, b"HTTP/1.1 200 OK");
        assert_eq!(block.header.get("Content-Type"), Some(&b"text/html"[..]));
    }

    #[test]
    fn eof_before_terminator_is_error() {
        let data = b"X-Foo: bar\r\n";
        let mut c = Cursor::new(&data[..]);
        let err = parse_header_block(&mut c, false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
