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

//! The `-t` self-test suite: a sequence of small scenario checks run against
//! the public API, one per subsystem, mirroring the reference's own
//! `allocator_test`/`gc_test`/... sequence. Each returns `Err` with a
//! message describing the mismatch rather than panicking, so a caller can
//! report a failure without aborting the process via an unwind.

use crate::{context, eval, gc, heap::Heap, printer, reader};

fn check(label: &str, cond: bool) -> Result<(), String> {
    if cond {
        Ok(())
    } else {
        Err(format!("{label} failed"))
    }
}

fn allocator_test() -> Result<(), String> {
    let mut heap = Heap::with_capacity(16, 4);
    let a = heap.mk_int(1).map_err(|e| e.to_string())?;
    let before = heap.allocated_count();
    heap.free(a);
    let b = heap.mk_int(2).map_err(|e| e.to_string())?;
    check("allocator_test: free-list reuse", a == b)?;
    check(
        "allocator_test: allocated_count stable across reuse",
        heap.allocated_count() == before,
    )?;
    let n = heap.intern("foo").map_err(|e| e.to_string())?;
    let n2 = heap.intern("foo").map_err(|e| e.to_string())?;
    check("allocator_test: intern is idempotent", n == n2)
}

fn gc_test() -> Result<(), String> {
    let mut heap = Heap::with_capacity(64, 20);
    let kept = heap.mk_int(1).map_err(|e| e.to_string())?;
    let _garbage = heap.mk_int(2).map_err(|e| e.to_string())?;
    let freed = gc::collect(&mut heap, &[kept]);
    check("gc_test: one cell freed", freed == 1)?;
    check("gc_test: root survives", !heap.is_free(kept))
}

fn global_ctx_test() -> Result<(), String> {
    let mut heap = Heap::new();
    let ctx = context::reset_global_ctx(&mut heap).map_err(|e| e.to_string())?;
    let plus = heap.intern("+").map_err(|e| e.to_string())?;
    check(
        "global_ctx_test: builtins bind to themselves",
        context::lookup(&heap, plus, ctx) == plus,
    )
}

fn visualization_test() -> Result<(), String> {
    let mut heap = Heap::new();
    check("visualization_test: nil", printer::format(&heap, crate::Value::NIL) == ".")?;

    let one = heap.mk_int(1).map_err(|e| e.to_string())?;
    let two = heap.mk_int(2).map_err(|e| e.to_string())?;
    let a = heap.mk_pair(one, two).map_err(|e| e.to_string())?;
    let root = heap.mk_pair(a, a).map_err(|e| e.to_string())?;
    check(
        "visualization_test: shared pair",
        printer::format(&heap, root) == "(d:(1 2) #d)",
    )
}

fn parsing_test() -> Result<(), String> {
    let mut heap = Heap::new();
    let v = reader::parse(&mut heap, "(+ 1 (+ 2 3))").map_err(|e| e.to_string())?;
    check("parsing_test: parses nested lists", heap.is_pair(v))
}

fn eval_test() -> Result<(), String> {
    let mut heap = Heap::new();
    let ctx = context::reset_global_ctx(&mut heap).map_err(|e| e.to_string())?;
    let expr = reader::parse(&mut heap, "(let x (- 3 1) (+ x x))").map_err(|e| e.to_string())?;
    let result = eval::classic::eval(&mut heap, ctx, expr).map_err(|e| e.to_string())?;
    check("eval_test: let-binding arithmetic", heap.as_int(result) == 4)
}

fn cont_eval_test() -> Result<(), String> {
    let mut heap = Heap::new();
    let ctx = context::reset_global_ctx(&mut heap).map_err(|e| e.to_string())?;
    let expr = reader::parse(&mut heap, "(- 3 1 ((x) + x x))").map_err(|e| e.to_string())?;
    let result = eval::cps::eval(&mut heap, ctx, expr).map_err(|e| e.to_string())?;
    check("cont_eval_test: continuation chaining", heap.as_int(result) == 4)
}

/// Run every scenario, stopping at the first failure.
pub fn run_all() -> Result<(), String> {
    allocator_test()?;
    gc_test()?;
    global_ctx_test()?;
    visualization_test()?;
    parsing_test()?;
    eval_test()?;
    cont_eval_test()?;
    Ok(())
}
