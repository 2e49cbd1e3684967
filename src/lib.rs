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

//! Streaming WARC record iteration and heuristic HTML-to-plain-text extraction.
//!
//! [`warc`] parses WARC/1.0 and WARC/1.1 archives record by record, bounding
//! each record's payload to a reader that borrows the underlying stream.
//! [`extract`] walks a parsed HTML DOM and serializes it to readable plain
//! text, optionally filtering out navigation, ads and other boilerplate.

pub mod error;
pub mod extract;
pub mod strops;
pub mod warc;

pub use error::Error;
pub use extract::{extract_plain_text, ExtractOpts};
pub use warc::{WarcIterator, WarcRecord, WarcRecordType};
