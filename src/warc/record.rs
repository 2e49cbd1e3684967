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

//! Record kind enum and the per-record data holder.
//!
//! `WarcRecordType` mirrors the teacher's enum shape, minus the bitmask
//! representation the teacher used for writer-side filtering (no counterpart
//! in this crate's read-only scope).

use super::header::Header;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WarcRecordType {
    WarcInfo,
    Response,
    Resource,
    Request,
    Metadata,
    Revisit,
    Conversion,
    Continuation,
    #[default]
    Unknown,
}

impl WarcRecordType {
    /// Matches a `WARC-Type` header value case-insensitively.
    pub fn from_header_value(s: &[u8]) -> Self {
        let lower = crate::strops::to_lower_ascii(s);
        match lower.as_slice() {
            b"warcinfo" => Self::WarcInfo,
            b"response" => Self::Response,
            b"resource" => Self::Resource,
            b"request" => Self::Request,
            b"metadata" => Self::Metadata,
            b"revisit" => Self::Revisit,
            b"conversion" => Self::Conversion,
            b"continuation" => Self::Continuation,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WarcInfo => "warcinfo",
            Self::Response => "response",
            Self::Resource => "resource",
            Self::Request => "request",
            Self::Metadata => "metadata",
            Self::Revisit => "revisit",
            Self::Conversion => "conversion",
            Self::Continuation => "continuation",
            Self::Unknown => "unknown",
        }
    }
}

/// One parsed WARC record, excluding its payload bytes.
///
/// The payload itself is exposed separately by [`super::iterator::WarcIterator`]
/// as a bounded reader, since holding it here would force eager buffering.
#[derive(Debug, Clone, Default)]
pub struct WarcRecord {
    pub record_type: WarcRecordType,
    pub headers: Header,
    pub is_http: bool,
    pub http_status_line: Vec<u8>,
    pub http_headers: Header,
    pub content_length: u64,
    pub http_content_length: u64,
}

impl WarcRecord {
    pub fn record_id(&self) -> Option<&[u8]> {
        self.headers.get("WARC-Record-ID")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_matches_known_spellings() {
        assert_eq!(WarcRecordType::from_header_value(b"Response"), WarcRecordType::Response);
        assert_eq!(WarcRecordType::from_header_value(b"WARCINFO"), WarcRecordType::WarcInfo);
        assert_eq!(WarcRecordType::from_header_value(b"bogus"), WarcRecordType::Unknown);
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(WarcRecordType::default(), WarcRecordType::Unknown);
    }
}
