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

//! Two evaluators over the same heap and context representation: [`classic`]
//! recurses the way a tree-walking interpreter ordinarily would, and [`cps`]
//! runs a simpler object language already rewritten into continuation-passing
//! form, as a single trampoline with no native call stack growth at all.

pub mod classic;
pub mod cps;

use crate::heap::Heap;
use crate::value::Value;

/// The two components of a binary builtin call `(op a b ...)`.
pub(crate) fn binary_args(heap: &Heap, call: Value) -> (Value, Value) {
    let rest = heap.tail(call);
    let a = heap.head(rest);
    let b = heap.head(heap.tail(rest));
    (a, b)
}

fn trace_step(heap: &Heap, ctx: Value, expr: Value) {
    if !tracing::enabled!(target: "littlelisp::eval", tracing::Level::TRACE) {
        return;
    }
    let mut c = ctx;
    while !c.is_nil() {
        let binding = heap.head(c);
        tracing::trace!(
            target: "littlelisp::eval",
            "{} = {}",
            crate::printer::format(heap, heap.head(binding)),
            crate::printer::format(heap, heap.tail(binding)),
        );
        c = heap.tail(c);
    }
    tracing::trace!(target: "littlelisp::eval", "f: {}", crate::printer::format(heap, expr));
}
