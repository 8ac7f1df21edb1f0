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

//! A small recursive-descent reader for S-expressions: lists, decimal
//! integers, and everything else read as a symbol (interned on the spot).

use crate::error::{InterpError, Result};
use crate::heap::Heap;
use crate::value::Value;

/// Parse a single expression from `source`, erroring if anything but
/// trailing whitespace follows it.
pub fn parse(heap: &mut Heap, source: &str) -> Result<Value> {
    let bytes = source.as_bytes();
    let mut pos = 0usize;
    let value = parse_expr(heap, bytes, &mut pos)?;
    skip_ws(bytes, &mut pos);
    if pos < bytes.len() {
        return Err(InterpError::TrailingInput(pos));
    }
    Ok(value)
}

fn skip_ws(bytes: &[u8], pos: &mut usize) {
    while matches!(bytes.get(*pos), Some(c) if c.is_ascii_whitespace()) {
        *pos += 1;
    }
}

fn is_token_byte(c: u8) -> bool {
    c > b' ' && c != b'(' && c != b')'
}

fn parse_expr(heap: &mut Heap, bytes: &[u8], pos: &mut usize) -> Result<Value> {
    skip_ws(bytes, pos);
    match bytes.get(*pos) {
        Some(b'(') => parse_list(heap, bytes, pos),
        Some(c) if c.is_ascii_digit() => Ok(parse_int(heap, bytes, pos)?),
        _ => parse_symbol(heap, bytes, pos),
    }
}

fn parse_list(heap: &mut Heap, bytes: &[u8], pos: &mut usize) -> Result<Value> {
    let open = *pos;
    *pos += 1;
    let mut result = Value::NIL;
    let mut last: Option<Value> = None;
    loop {
        skip_ws(bytes, pos);
        match bytes.get(*pos) {
            None => return Err(InterpError::UnmatchedParen(open)),
            Some(b')') => {
                *pos += 1;
                return Ok(result);
            }
            Some(_) => {
                let elem = parse_expr(heap, bytes, pos)?;
                let cell = heap.mk_pair(elem, Value::NIL)?;
                match last {
                    None => result = cell,
                    Some(prev) => heap.set_tail(prev, cell),
                }
                last = Some(cell);
            }
        }
    }
}

fn parse_int(heap: &mut Heap, bytes: &[u8], pos: &mut usize) -> Result<Value> {
    let start = *pos;
    while matches!(bytes.get(*pos), Some(c) if c.is_ascii_digit()) {
        *pos += 1;
    }
    let text = std::str::from_utf8(&bytes[start..*pos]).expect("digits are ascii");
    let n: i64 = text.parse().expect("scanned only ascii digits");
    heap.mk_int(n)
}

fn parse_symbol(heap: &mut Heap, bytes: &[u8], pos: &mut usize) -> Result<Value> {
    let start = *pos;
    while matches!(bytes.get(*pos), Some(&c) if is_token_byte(c)) {
        *pos += 1;
    }
    let name = std::str::from_utf8(&bytes[start..*pos]).expect("source is valid utf-8");
    heap.intern(name)
}
