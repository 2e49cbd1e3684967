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

//! Crate-wide error type.

/// Errors that can terminate WARC iteration.
///
/// Clean end-of-stream and "record header incomplete" conditions are *not*
/// represented here — they surface as `None` from [`crate::warc::WarcIterator`]
/// so that a truncated-but-not-corrupt archive isn't confused with a hard
/// parse failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error reading archive stream")]
    Io(#[from] std::io::Error),

    #[error("malformed WARC header: {0}")]
    MalformedHeader(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
