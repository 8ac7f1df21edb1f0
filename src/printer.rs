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

//! A two-pass pretty-printer that shares structure back out again: a first
//! pass over the value finds every pair reachable more than once, and a
//! second pass prints each such pair exactly once, behind a generated name,
//! with every later reference replaced by `#name`.
//!
//! Both bitvecs are local to a single `format` call; there is nothing to
//! reset between calls or between a collection and a print.

use bitvec::vec::BitVec;

use crate::heap::Heap;
use crate::value::Value;

fn mark_refs(heap: &Heap, seen: &mut BitVec, shared: &mut BitVec, mut i: Value) {
    loop {
        if i.is_nil() || !heap.is_pair(i) {
            return;
        }
        if seen[i.index()] {
            shared.set(i.index(), true);
            return;
        }
        seen.set(i.index(), true);
        mark_refs(heap, seen, shared, heap.head(i));
        i = heap.tail(i);
    }
}

/// Base-25 name generator (`a`..`y`), least-significant digit first, so
/// slot 0 is `a`, slot 25 is `ba`, and so on.
fn name_of(mut i: usize) -> String {
    let mut s = String::new();
    loop {
        let digit = (i % 25) as u8;
        s.push((b'a' + digit) as char);
        i /= 25;
        if i == 0 {
            break;
        }
    }
    s
}

fn emit(heap: &Heap, seen: &mut BitVec, shared: &BitVec, i: Value) -> String {
    if i.is_nil() {
        return ".".to_string();
    }
    if let Some(n) = heap.try_int(i) {
        return n.to_string();
    }
    if let Some(s) = heap.try_symbol(i) {
        return s.to_string();
    }
    if !seen[i.index()] {
        return format!("#{}", name_of(i.index()));
    }

    let mut out = String::new();
    if shared[i.index()] {
        out.push_str(&name_of(i.index()));
        out.push(':');
    }
    out.push('(');
    let mut cur = i;
    loop {
        seen.set(cur.index(), false);
        out.push_str(&emit(heap, seen, shared, heap.head(cur)));
        out.push(' ');
        let next = heap.tail(cur);
        let continue_chain =
            !next.is_nil() && heap.is_pair(next) && seen[next.index()] && !shared[next.index()];
        if !continue_chain {
            out.push_str(&emit(heap, seen, shared, next));
            out.push(')');
            return out;
        }
        cur = next;
    }
}

/// Render `root` as an S-expression, introducing `name:(...)` / `#name`
/// notation wherever the structure is shared or cyclic.
pub fn format(heap: &Heap, root: Value) -> String {
    let n = heap.cell_count();
    let mut seen = BitVec::repeat(false, n);
    let mut shared = BitVec::repeat(false, n);
    mark_refs(heap, &mut seen, &mut shared, root);
    emit(heap, &mut seen, &shared, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_prints_as_dot() {
        let heap = Heap::new();
        assert_eq!(format(&heap, Value::NIL), ".");
    }

    #[test]
    fn atoms_print_plainly() {
        let mut heap = Heap::new();
        let n = heap.mk_int(42).unwrap();
        assert_eq!(format(&heap, n), "42");
        let s = heap.intern("foo").unwrap();
        assert_eq!(format(&heap, s), "foo");
    }

    #[test]
    fn proper_list_prints_flat() {
        let mut heap = Heap::new();
        let c = heap.mk_int(3).unwrap();
        let b = heap.mk_int(2).unwrap();
        let a = heap.mk_int(1).unwrap();
        let l = heap.mk_pair(c, Value::NIL).unwrap();
        let l = heap.mk_pair(b, l).unwrap();
        let l = heap.mk_pair(a, l).unwrap();
        assert_eq!(format(&heap, l), "(1 2 3 .)");
    }

    #[test]
    fn shared_pair_gets_named_and_back_referenced() {
        let mut heap = Heap::new();
        let one = heap.mk_int(1).unwrap();
        let two = heap.mk_int(2).unwrap();
        let a = heap.mk_pair(one, two).unwrap();
        let root = heap.mk_pair(a, a).unwrap();
        assert_eq!(format(&heap, root), "(d:(1 2) #d)");
    }

    #[test]
    fn self_referencing_pair_prints_with_back_reference() {
        let mut heap = Heap::new();
        let one = heap.mk_int(1).unwrap();
        let two = heap.mk_int(2).unwrap();
        let a = heap.mk_pair(one, two).unwrap();
        // Burn a slot the same way the reference scenario does, so `a`
        // lands on the same index and yields the same canonical name.
        let _unused = heap.mk_pair(a, a).unwrap();
        heap.set_tail(a, a);
        let root = heap.mk_pair(Value::NIL, a).unwrap();
        assert_eq!(format(&heap, root), "(. d:(1 #d))");
    }
}
