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

//! The classic tree-walking evaluator.
//!
//! Tail positions -- the body of a `let`/`letrec`, the chosen branch of an
//! `if`, the body of an applied closure -- are rewritten in place and looped
//! over rather than recursed into, so a long chain of tail calls doesn't
//! grow the native stack. Every other sub-evaluation (operands, conditions,
//! the callee itself) is a genuine recursive call to [`eval`], which pushes
//! its own root frame on the heap's guard stack for the duration.

use crate::builtins::BuiltinId;
use crate::context;
use crate::error::Result;
use crate::eval::{binary_args, trace_step};
use crate::gc;
use crate::heap::Heap;
use crate::value::Value;

/// Evaluate `expr` in `ctx`. Registers one root frame for the duration of
/// this call, covering every intermediate value the loop below produces.
pub fn eval(heap: &mut Heap, ctx: Value, expr: Value) -> Result<Value> {
    heap.guard_push();
    let result = eval_loop(heap, ctx, expr);
    heap.guard_pop();
    result
}

fn eval_loop(heap: &mut Heap, mut ctx: Value, mut expr: Value) -> Result<Value> {
    loop {
        heap.guard_set(expr, ctx);
        gc::maybe_collect(heap);
        trace_step(heap, ctx, expr);

        if expr.is_nil() || heap.try_int(expr).is_some() {
            return Ok(expr);
        }
        if heap.try_symbol(expr).is_some() {
            return Ok(context::lookup(heap, expr, ctx));
        }

        let fn_val = eval(heap, ctx, heap.head(expr))?;
        heap.guard_set_temp(fn_val);

        match BuiltinId::try_from(fn_val.index()) {
            Ok(BuiltinId::Quote) => return Ok(heap.tail(expr)),

            Ok(BuiltinId::If) => {
                let cond = eval(heap, ctx, heap.head(heap.tail(expr)))?;
                let rest = heap.tail(heap.tail(expr));
                expr = if !cond.is_nil() {
                    heap.head(rest)
                } else {
                    heap.head(heap.tail(rest))
                };
                continue;
            }

            Ok(BuiltinId::Add) => {
                let (a, b) = binary_args(heap, expr);
                let a = heap.as_int(eval(heap, ctx, a)?);
                let b = heap.as_int(eval(heap, ctx, b)?);
                return heap.mk_int(a + b);
            }
            Ok(BuiltinId::Sub) => {
                let (a, b) = binary_args(heap, expr);
                let a = heap.as_int(eval(heap, ctx, a)?);
                let b = heap.as_int(eval(heap, ctx, b)?);
                return heap.mk_int(a - b);
            }
            Ok(BuiltinId::Mul) => {
                let (a, b) = binary_args(heap, expr);
                let a = heap.as_int(eval(heap, ctx, a)?);
                let b = heap.as_int(eval(heap, ctx, b)?);
                return heap.mk_int(a * b);
            }
            Ok(BuiltinId::Lt) => {
                let (a, b) = binary_args(heap, expr);
                let a = heap.as_int(eval(heap, ctx, a)?);
                let b = heap.as_int(eval(heap, ctx, b)?);
                return Ok(if a < b { expr } else { Value::NIL });
            }
            Ok(BuiltinId::Eq) => {
                let (a, b) = binary_args(heap, expr);
                let a = heap.as_int(eval(heap, ctx, a)?);
                let b = heap.as_int(eval(heap, ctx, b)?);
                return Ok(if a == b { expr } else { Value::NIL });
            }

            Ok(BuiltinId::Cons) => {
                let (a, b) = binary_args(heap, expr);
                let a = eval(heap, ctx, a)?;
                heap.guard_set_temp(a);
                let b = eval(heap, ctx, b)?;
                return heap.mk_pair(a, b);
            }
            Ok(BuiltinId::Head) => {
                let x = heap.head(heap.tail(expr));
                let x = eval(heap, ctx, x)?;
                return Ok(heap.head(x));
            }
            Ok(BuiltinId::Tail) => {
                let x = heap.head(heap.tail(expr));
                let x = eval(heap, ctx, x)?;
                return Ok(heap.tail(x));
            }

            Ok(BuiltinId::Lambda) => return heap.mk_pair(ctx, heap.tail(expr)),

            Ok(BuiltinId::Let) => {
                let name = heap.head(heap.tail(expr));
                let init = heap.head(heap.tail(heap.tail(expr)));
                let value = eval(heap, ctx, init)?;
                heap.guard_set_temp(value);
                let binding = heap.mk_pair(name, value)?;
                heap.guard_set_temp(binding);
                ctx = heap.mk_pair(binding, ctx)?;
                expr = heap.head(heap.tail(heap.tail(heap.tail(expr))));
                continue;
            }
            Ok(BuiltinId::LetRec) => {
                let name = heap.head(heap.tail(expr));
                let init = heap.head(heap.tail(heap.tail(expr)));
                let binding = heap.mk_pair(name, Value::NIL)?;
                heap.guard_set_temp(binding);
                let extended = heap.mk_pair(binding, ctx)?;
                heap.guard_set_temp1(extended);
                ctx = extended;
                let value = eval(heap, ctx, init)?;
                heap.set_tail(binding, value);
                expr = heap.head(heap.tail(heap.tail(heap.tail(expr))));
                continue;
            }

            Err(()) => {
                // Not a builtin: apply `fn_val` as a closure. If it isn't
                // one either, `head`/`tail`'s lenient defaults unwind this
                // to an empty parameter list and a `nil` body, so calling a
                // non-function quietly evaluates to `nil`.
                let captured_ctx = heap.head(fn_val);
                let params = heap.head(heap.tail(fn_val));
                let body = heap.head(heap.tail(heap.tail(fn_val)));

                let mut new_ctx = captured_ctx;
                let mut actual = heap.tail(expr);
                let mut formal = params;
                while !actual.is_nil() && !formal.is_nil() {
                    let arg_val = eval(heap, ctx, heap.head(actual))?;
                    let binding = heap.mk_pair(heap.head(formal), arg_val)?;
                    new_ctx = heap.mk_pair(binding, new_ctx)?;
                    heap.guard_set_temp1(new_ctx);
                    actual = heap.tail(actual);
                    formal = heap.tail(formal);
                }
                ctx = new_ctx;
                expr = body;
                continue;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::reset_global_ctx, reader::parse};

    fn run(source: &str) -> Value {
        let mut heap = Heap::new();
        let ctx = reset_global_ctx(&mut heap).unwrap();
        let expr = parse(&mut heap, source).unwrap();
        eval(&mut heap, ctx, expr).unwrap()
    }

    fn run_int(source: &str) -> i64 {
        let mut heap = Heap::new();
        let ctx = reset_global_ctx(&mut heap).unwrap();
        let expr = parse(&mut heap, source).unwrap();
        let result = eval(&mut heap, ctx, expr).unwrap();
        heap.as_int(result)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(run_int("(+ 1 2)"), 3);
        assert_eq!(run_int("(* (+ 1 2) (- 5 1))"), 12);
    }

    #[test]
    fn quote_returns_the_literal_unevaluated() {
        let mut heap = Heap::new();
        let ctx = reset_global_ctx(&mut heap).unwrap();
        let expr = parse(&mut heap, "(' (1 2))").unwrap();
        let result = eval(&mut heap, ctx, expr).unwrap();
        assert_eq!(crate::printer::format(&heap, result), "(1 2 .)");
    }

    #[test]
    fn if_picks_the_right_branch() {
        assert_eq!(run_int("(? (< 1 2) 10 20)"), 10);
        assert_eq!(run_int("(? (< 2 1) 10 20)"), 20);
    }

    #[test]
    fn let_binds_a_name_in_the_body() {
        assert_eq!(run_int("(let x 5 (+ x 1))"), 6);
    }

    #[test]
    fn letrec_supports_self_recursion() {
        let src = "(letrec fact (lambda (n) (? (= n 0) 1 (* n (fact (- n 1))))) (fact 5))";
        assert_eq!(run_int(src), 120);
    }

    #[test]
    fn lambda_closes_over_its_defining_context() {
        assert_eq!(run_int("(let x 10 ((lambda (y) (+ x y)) 5))"), 15);
    }

    #[test]
    fn cons_head_tail() {
        assert_eq!(run_int("(head (. 7 8))"), 7);
        assert_eq!(run_int("(tail (. 7 8))"), 8);
    }

    #[test]
    fn calling_a_non_function_yields_nil() {
        let result = run("(5 1 2)");
        assert!(result.is_nil());
    }

    #[test]
    fn deep_tail_recursion_does_not_blow_the_stack() {
        let src = "(letrec loop (lambda (n acc) (? (= n 0) acc (loop (- n 1) (+ acc 1)))) (loop 100000 0))";
        assert_eq!(run_int(src), 100000);
    }
}
