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

//! Streaming WARC record iterator.
//!
//! Grounded on the teacher's commented-out `ArchiveIterator::read_next`
//! (version-line scan, header block, exact-length payload), reworked so the
//! payload is exposed as a bounded reader rather than eagerly buffered into a
//! `Vec<u8>`. This is not a true `std::iter::Iterator` — items borrow the
//! iterator's stream — so `next` is an inherent method, the idiom the corpus
//! uses whenever item lifetimes are tied to the source (cf. `BufRead::lines`
//! vs. a hand-rolled streaming reader).

use std::io::{self, BufRead, Read};

use tracing::{trace, warn};

use super::header::parse_header_block;
use super::record::{WarcRecord, WarcRecordType};
use crate::error::Error;

/// Parses WARC/1.0 and WARC/1.1 records out of a buffered byte stream.
pub struct WarcIterator<R> {
    reader: R,
    /// Payload bytes not yet consumed from the current record, if any.
    remaining: u64,
}

impl<R: BufRead> WarcIterator<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, remaining: 0 }
    }

    /// Parses and returns the next record, or `None` at a clean end of
    /// archive (including a missing/garbled version line, which this parser
    /// treats as the end of usable data rather than a hard error).
    pub fn next(&mut self) -> Option<Result<WarcRecord, Error>> {
        if let Err(e) = self.drain_payload() {
            return Some(Err(e.into()));
        }

        match self.seek_version_line() {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e.into())),
        }

        let block = match parse_header_block(&mut self.reader, false) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return None,
            Err(e) => return Some(Err(e.into())),
        };

        let content_length = match block.header.get("content-length") {
            Some(v) => match std::str::from_utf8(v).ok().and_then(|s| s.parse::<u64>().ok()) {
                Some(n) => n,
                None => {
                    warn!(value = ?v, "malformed Content-Length header");
                    return Some(Err(Error::MalformedHeader(format!(
                        "non-numeric Content-Length: {:?}",
                        String::from_utf8_lossy(v)
                    ))));
                }
            },
            None => return None,
        };

        let record_type = block
            .header
            .get("WARC-Type")
            .map(WarcRecordType::from_header_value)
            .unwrap_or_default();

        let is_http = block
            .header
            .get("Content-Type")
            .map(|v| v.starts_with(b"application/http"))
            .unwrap_or(false);

        let (http_status_line, http_headers, http_content_length) = if is_http {
            match parse_header_block(&mut self.reader, true) {
                Ok(http_block) => {
                    let http_content_length = content_length.saturating_sub(http_block.bytes_consumed);
                    (http_block.status_line, http_block.header, http_content_length)
                }
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return None,
                Err(e) => return Some(Err(e.into())),
            }
        } else {
            (Vec::new(), super::header::Header::new(), content_length)
        };

        self.remaining = http_content_length;

        trace!(
            record_type = record_type.as_str(),
            content_length,
            http_content_length,
            "parsed WARC record"
        );

        Some(Ok(WarcRecord {
            record_type,
            headers: block.header,
            is_http,
            http_status_line,
            http_headers,
            content_length,
            http_content_length,
        }))
    }

    /// Returns a reader bounded to the current record's remaining payload
    /// bytes. Borrows `self` mutably, so the borrow checker prevents calling
    /// `next` again while a payload reader from the previous record is alive.
    pub fn payload_reader(&mut self) -> BoundedReader<'_, R> {
        BoundedReader {
            inner: &mut self.reader,
            remaining: &mut self.remaining,
        }
    }

    fn drain_payload(&mut self) -> io::Result<()> {
        if self.remaining > 0 {
            let mut sink = io::sink();
            io::copy(&mut (&mut self.reader).take(self.remaining), &mut sink)?;
            self.remaining = 0;
        }
        Ok(())
    }

    /// Reads lines, skipping blanks, until a WARC version line or EOF.
    /// Returns `Ok(false)` on EOF or on an unrecognized non-blank line.
    fn seek_version_line(&mut self) -> io::Result<bool> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = self.reader.read_until(b'\n', &mut buf)?;
            if n == 0 {
                return Ok(false);
            }
            let line = crate::strops::strip(&buf);
            if line.is_empty() {
                continue;
            }
            return Ok(line == b"WARC/1.0" || line == b"WARC/1.1");
        }
    }
}

/// A `Read` view bounded to a WARC record's remaining payload bytes.
pub struct BoundedReader<'a, R> {
    inner: &'a mut R,
    remaining: &'a mut u64,
}

impl<'a, R: Read> Read for BoundedReader<'a, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if *self.remaining == 0 {
            return Ok(0);
        }
        let cap = (*self.remaining).min(buf.len() as u64) as usize;
        let n = self.inner.read(&mut buf[..cap])?;
        *self.remaining -= n as u64;
        Ok(n)
    }
}
