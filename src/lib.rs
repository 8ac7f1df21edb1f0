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

//! A minimal Lisp interpreter over a fixed-size, mark-and-sweep cell heap,
//! with two evaluators over the same representation: a classic tree-walker
//! and a continuation-passing trampoline.
//!
//! ```
//! use littlelisp::{context, eval, heap::Heap, printer, reader};
//!
//! let mut heap = Heap::new();
//! let ctx = context::reset_global_ctx(&mut heap).unwrap();
//! let expr = reader::parse(&mut heap, "(+ 1 2)").unwrap();
//! let result = eval::classic::eval(&mut heap, ctx, expr).unwrap();
//! assert_eq!(printer::format(&heap, result), "3");
//! ```

pub mod builtins;
pub mod cli;
pub mod context;
pub mod error;
pub mod eval;
pub mod gc;
pub mod heap;
pub mod printer;
pub mod reader;
pub mod selftest;
pub mod value;

pub use error::{InterpError, Result};
pub use heap::Heap;
pub use value::Value;
