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

//! The continuation-passing evaluator.
//!
//! This is a simpler object language than the classic evaluator's: there is
//! no `lambda`, `let`, or `letrec`. Every operation that produces a value
//! takes an explicit extra argument, an inline lambda literal shaped
//! `((param) delegate . rest)`, and *jumps* into it by binding `param` to the
//! result and continuing with `delegate . rest` as the next call. The whole
//! evaluation is one loop with exactly two roots live at the top of each
//! pass: the current expression `n` and the current environment `ctx`.

use crate::builtins::BuiltinId;
use crate::context;
use crate::error::Result;
use crate::eval::{binary_args, trace_step};
use crate::gc;
use crate::heap::Heap;
use crate::value::Value;

/// Evaluate a parameter position: literals pass through, symbols resolve
/// against `ctx`, a `(' x)` literal yields `x` unevaluated, and any other
/// pair -- an inline lambda -- is captured into a closure over `ctx`.
fn eval_param(heap: &mut Heap, ctx: Value, n: Value) -> Result<Value> {
    if n.is_nil() || heap.try_int(n).is_some() {
        return Ok(n);
    }
    if heap.try_symbol(n).is_some() {
        return Ok(context::lookup(heap, n, ctx));
    }
    if BuiltinId::try_from(heap.head(n).index()) == Ok(BuiltinId::Quote) {
        return Ok(heap.tail(n));
    }
    heap.mk_pair(ctx, n)
}

/// Bind `val` to `cont`'s parameter and rewrite `n`/`ctx` to its body. `cont`
/// must already have been evaluated (captured into a closure, or resolved
/// from a bare symbol) via [`eval_param`].
fn enter_continuation(heap: &mut Heap, n: &mut Value, ctx: &mut Value, cont: Value, val: Value) -> Result<()> {
    let captured_ctx = heap.head(cont);
    let cont_body = heap.tail(cont); // ((param) . (delegate . rest))
    let param = heap.head(heap.head(cont_body));
    let binding = heap.mk_pair(param, val)?;
    *ctx = heap.mk_pair(binding, captured_ctx)?;
    *n = heap.tail(cont_body);
    Ok(())
}

/// Install `val` into the continuation in the third argument position of a
/// binary call `(op a b cont)`, rewriting `n` and `ctx` to its body.
fn jmp(heap: &mut Heap, n: &mut Value, ctx: &mut Value, val: Value) -> Result<()> {
    let cont_raw = heap.head(heap.tail(heap.tail(heap.tail(*n))));
    let cont = eval_param(heap, *ctx, cont_raw)?;
    enter_continuation(heap, n, ctx, cont, val)
}

pub fn eval(heap: &mut Heap, ctx: Value, n: Value) -> Result<Value> {
    heap.guard_push();
    let result = eval_loop(heap, n, ctx);
    heap.guard_pop();
    result
}

fn eval_loop(heap: &mut Heap, mut n: Value, mut ctx: Value) -> Result<Value> {
    loop {
        heap.guard_set(n, ctx);
        gc::maybe_collect(heap);
        trace_step(heap, ctx, n);

        let fn_val = eval_param(heap, ctx, heap.head(n))?;
        heap.guard_set_temp(fn_val);

        if fn_val.is_nil() {
            let args = heap.tail(n);
            return if !args.is_nil() {
                eval_param(heap, ctx, heap.head(args))
            } else {
                Ok(heap.tail(heap.head(ctx)))
            };
        }

        match BuiltinId::try_from(fn_val.index()) {
            Ok(BuiltinId::If) => {
                let cond = eval_param(heap, ctx, heap.head(heap.tail(n)))?;
                let rest = heap.tail(heap.tail(n));
                let chosen_raw = if !cond.is_nil() {
                    heap.head(rest)
                } else {
                    heap.head(heap.tail(rest))
                };
                let chosen = eval_param(heap, ctx, chosen_raw)?;
                ctx = heap.head(chosen);
                n = heap.tail(heap.tail(chosen));
                if n.is_nil() {
                    return Ok(chosen);
                }
                continue;
            }

            Ok(BuiltinId::Add) => {
                let (a, b) = binary_args(heap, n);
                let a = heap.as_int(eval_param(heap, ctx, a)?);
                let b = heap.as_int(eval_param(heap, ctx, b)?);
                let v = heap.mk_int(a + b)?;
                jmp(heap, &mut n, &mut ctx, v)?;
            }
            Ok(BuiltinId::Sub) => {
                let (a, b) = binary_args(heap, n);
                let a = heap.as_int(eval_param(heap, ctx, a)?);
                let b = heap.as_int(eval_param(heap, ctx, b)?);
                let v = heap.mk_int(a - b)?;
                jmp(heap, &mut n, &mut ctx, v)?;
            }
            Ok(BuiltinId::Mul) => {
                let (a, b) = binary_args(heap, n);
                let a = heap.as_int(eval_param(heap, ctx, a)?);
                let b = heap.as_int(eval_param(heap, ctx, b)?);
                let v = heap.mk_int(a * b)?;
                jmp(heap, &mut n, &mut ctx, v)?;
            }
            Ok(BuiltinId::Lt) => {
                let (a, b) = binary_args(heap, n);
                let a = heap.as_int(eval_param(heap, ctx, a)?);
                let b = heap.as_int(eval_param(heap, ctx, b)?);
                let v = if a < b { n } else { Value::NIL };
                jmp(heap, &mut n, &mut ctx, v)?;
            }
            Ok(BuiltinId::Eq) => {
                let (a, b) = binary_args(heap, n);
                let a = heap.as_int(eval_param(heap, ctx, a)?);
                let b = heap.as_int(eval_param(heap, ctx, b)?);
                let v = if a == b { n } else { Value::NIL };
                jmp(heap, &mut n, &mut ctx, v)?;
            }
            Ok(BuiltinId::Cons) => {
                let (a, b) = binary_args(heap, n);
                let a_val = eval_param(heap, ctx, a)?;
                heap.guard_set_temp(a_val);
                let b_val = eval_param(heap, ctx, b)?;
                let v = heap.mk_pair(a_val, b_val)?;
                jmp(heap, &mut n, &mut ctx, v)?;
            }
            // `head`/`tail` only take one operand plus a continuation (not
            // two, like the arithmetic and `cons` ops above), so the
            // continuation sits one cell closer and is handled inline
            // rather than through `jmp`.
            Ok(BuiltinId::Head) => {
                let x = heap.head(heap.tail(n));
                let cont_raw = heap.head(heap.tail(heap.tail(n)));
                let cont = eval_param(heap, ctx, cont_raw)?;
                let x_val = eval_param(heap, ctx, x)?;
                let projected = heap.head(x_val);
                enter_continuation(heap, &mut n, &mut ctx, cont, projected)?;
            }
            Ok(BuiltinId::Tail) => {
                let x = heap.head(heap.tail(n));
                let cont_raw = heap.head(heap.tail(heap.tail(n)));
                let cont = eval_param(heap, ctx, cont_raw)?;
                let x_val = eval_param(heap, ctx, x)?;
                let projected = heap.tail(x_val);
                enter_continuation(heap, &mut n, &mut ctx, cont, projected)?;
            }

            _ => {
                // Quote, lambda, let, letrec, and anything else aren't
                // dispatchable here; fall through to application, which
                // degrades gracefully for anything that isn't really a
                // closure.
                if heap.try_int(fn_val).is_some() {
                    return Ok(fn_val);
                }
                let captured_ctx = heap.head(fn_val);
                let raw_lambda = heap.tail(fn_val);
                let params = heap.head(raw_lambda);

                let mut new_ctx = captured_ctx;
                let mut actual = heap.tail(n);
                let mut formal = params;
                while !actual.is_nil() && !formal.is_nil() {
                    let arg_val = eval_param(heap, ctx, heap.head(actual))?;
                    let binding = heap.mk_pair(heap.head(formal), arg_val)?;
                    new_ctx = heap.mk_pair(binding, new_ctx)?;
                    actual = heap.tail(actual);
                    formal = heap.tail(formal);
                }
                ctx = new_ctx;
                n = heap.tail(raw_lambda);
            }
        }
    }
}
