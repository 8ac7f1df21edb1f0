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

//! Lexical environments are plain association lists: `ctx` is a chain of
//! `((name . value) . rest)` pairs, searched front to back. `let` and
//! `letrec` extend it by consing a new binding on; closures capture it by
//! value at creation time.

use crate::builtins::NAMES;
use crate::error::Result;
use crate::heap::Heap;
use crate::value::Value;

/// Reset the heap and build a fresh global context with the thirteen
/// built-ins bound to themselves.
pub fn reset_global_ctx(heap: &mut Heap) -> Result<Value> {
    heap.reset();
    let mut ctx = Value::NIL;
    for name in NAMES {
        let id = heap.intern(name)?;
        let binding = heap.mk_pair(id, id)?;
        ctx = heap.mk_pair(binding, ctx)?;
    }
    Ok(ctx)
}

/// Walk `ctx` for a binding of `symbol`. An unresolved symbol is not an
/// error: it is logged and treated as `nil`, so a typo in the middle of a
/// long-running evaluation doesn't abort it.
pub fn lookup(heap: &Heap, symbol: Value, ctx: Value) -> Value {
    let mut c = ctx;
    while !c.is_nil() {
        let binding = heap.head(c);
        if heap.head(binding) == symbol {
            return heap.tail(binding);
        }
        c = heap.tail(c);
    }
    tracing::warn!(
        symbol = heap.try_symbol(symbol).unwrap_or("?"),
        "unknown symbol"
    );
    Value::NIL
}
