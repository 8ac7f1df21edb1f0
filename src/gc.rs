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

//! Two-colour mark-and-sweep over the cell heap.
//!
//! Mark bits never outlive a single collection: each call allocates its own
//! [`BitVec`], marks from the given roots, sweeps, and lets the bitvec drop.
//! There is nothing to leak or to zero out afterwards.

use bitvec::vec::BitVec;

use crate::heap::Heap;
use crate::value::Value;

fn mark(heap: &Heap, marks: &mut BitVec, mut i: Value) {
    loop {
        if i.is_nil() || marks[i.index()] {
            return;
        }
        marks.set(i.index(), true);
        if !heap.is_pair(i) {
            return;
        }
        mark(heap, marks, heap.head(i));
        i = heap.tail(i);
    }
}

/// Mark from `roots` and reclaim every unreached cell. Returns the number of
/// cells freed.
pub fn collect(heap: &mut Heap, roots: &[Value]) -> usize {
    let mut marks = BitVec::repeat(false, heap.cell_count());
    for &root in roots {
        mark(heap, &mut marks, root);
    }
    let mut freed = 0;
    for idx in 1..heap.cell_count() {
        let v = Value::from(idx);
        if marks[idx] || heap.is_free(v) {
            continue;
        }
        heap.free(v);
        freed += 1;
    }
    freed
}

/// Collect if the heap's free margin has been breached, rooting the current
/// evaluator activations. A no-op otherwise. Called once per reduction step,
/// never mid-step, so that values an evaluator hasn't rooted yet are never
/// live across a collection.
pub fn maybe_collect(heap: &mut Heap) {
    if !heap.should_collect() {
        return;
    }
    let roots = heap.guard_roots();
    let freed = collect(heap, &roots);
    tracing::debug!(target: "littlelisp::gc", freed, "sweep");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_reclaims_unreachable_cells() {
        let mut heap = Heap::with_capacity(64, 20);
        let kept = heap.mk_int(1).unwrap();
        let _garbage = heap.mk_int(2).unwrap();
        let before = heap.allocated_count();
        let freed = collect(&mut heap, &[kept]);
        assert_eq!(freed, 1);
        assert_eq!(heap.allocated_count(), before - 1);
    }

    #[test]
    fn collect_follows_pairs_and_survives_cycles() {
        let mut heap = Heap::with_capacity(64, 20);
        let a = heap.mk_pair(Value::NIL, Value::NIL).unwrap();
        heap.set_tail(a, a);
        let freed = collect(&mut heap, &[a]);
        assert_eq!(freed, 0);
        assert!(!heap.is_free(a));
    }
}
