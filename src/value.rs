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

//! A `Value` is an index into a [`Heap`](crate::heap::Heap)'s cell array.
//! Index 0 is reserved and always denotes `nil`, the empty list.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(pub(crate) usize);

impl Value {
    pub const NIL: Value = Value(0);

    pub fn is_nil(self) -> bool {
        self == Value::NIL
    }

    /// The raw slot index this value occupies in the heap.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value(i)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
