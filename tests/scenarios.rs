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

//! End-to-end expression scenarios, driven entirely through the public
//! parse/eval/format surface -- no reaching into heap internals.

use littlelisp::{context, eval, heap::Heap, printer, reader};

fn classic_int(source: &str) -> i64 {
    let mut heap = Heap::new();
    let ctx = context::reset_global_ctx(&mut heap).unwrap();
    let expr = reader::parse(&mut heap, source).unwrap();
    let result = eval::classic::eval(&mut heap, ctx, expr).unwrap();
    heap.as_int(result)
}

fn cps_int(source: &str) -> i64 {
    let mut heap = Heap::new();
    let ctx = context::reset_global_ctx(&mut heap).unwrap();
    let expr = reader::parse(&mut heap, source).unwrap();
    let result = eval::cps::eval(&mut heap, ctx, expr).unwrap();
    heap.as_int(result)
}

#[test]
fn subtraction_agrees_in_both_modes() {
    assert_eq!(classic_int("(- 3 1)"), 2);
    assert_eq!(cps_int("(- 3 1)"), 2);
}

#[test]
fn cps_continuation_receives_the_result() {
    assert_eq!(cps_int("(- 3 1 ((x) + x x))"), 4);
}

#[test]
fn cps_inline_lambda_application() {
    assert_eq!(cps_int("(((a b) + a b) 2 3)"), 5);
}

#[test]
fn cps_if_chooses_a_continuation() {
    assert_eq!(cps_int("(< 3 1 ((a) ? a 2 5))"), 5);
}

#[test]
fn classic_let_binds_the_body() {
    assert_eq!(classic_int("(let x (- 3 1) (+ x x))"), 4);
}

#[test]
fn classic_lambda_application() {
    assert_eq!(classic_int("((lambda (a b) (+ a b)) 2 3)"), 5);
}

#[test]
fn classic_if_picks_a_branch() {
    assert_eq!(classic_int("(? (< 3 1) 2 5)"), 5);
}

#[test]
fn classic_letrec_recurses_over_a_list() {
    let src = "(letrec len (lambda (l) (? l (+ 1 (len (tail l))) 0)) (len (' 1 2 3 4)))";
    assert_eq!(classic_int(src), 4);
}

#[test]
fn printer_round_trips_a_flat_list() {
    let mut heap = Heap::new();
    let expr = reader::parse(&mut heap, "(1 2 3)").unwrap();
    assert_eq!(printer::format(&heap, expr), "(1 2 3 .)");
}

#[test]
fn unmatched_paren_is_reported_before_evaluation() {
    let mut heap = Heap::new();
    assert!(reader::parse(&mut heap, "(+ 1 2").is_err());
}
