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

//! The crate's unified error taxonomy.
//!
//! Parser and allocator failures are hard errors that abort the current
//! operation; an unresolved symbol lookup is deliberately *not* a variant
//! here; it is a soft condition reported via a `tracing::warn!` event and
//! the evaluator carries on with `nil`, matching the reference interpreter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpError {
    #[error("not matched '(' at byte {0}")]
    UnmatchedParen(usize),

    #[error("trailing input at byte {0}")]
    TrailingInput(usize),

    #[error("heap exhausted: no free slots remain after garbage collection")]
    HeapExhausted,

    #[error("{0}")]
    Usage(String),

    #[error("can't open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, InterpError>;
