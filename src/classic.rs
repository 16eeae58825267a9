//! Classic (per-file, one-shot) Huffman codec.
//!
//! Builds a tree from the actual frequencies of the input using a
//! binary min-heap (`std::collections::BinaryHeap`), and boxed
//! arena-free tree nodes since the tree here is build-once/read-only
//! (unlike the adaptive tree, nothing ever needs to rewire a parent
//! pointer after the fact). [`build_tree`] and [`Node`] are also
//! reused by `static_codec`, which builds the very same kind of
//! one-shot tree from a fixed weight table instead of counted
//! frequencies.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use bit_vec::BitVec;
use log::debug;

use crate::bitstream::BitCursor;
use crate::literal;
use crate::Error;

pub(crate) struct Node {
    weight: u64,
    symbol: Option<char>,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(symbol: char, weight: u64) -> Self {
        Self { weight, symbol, left: None, right: None }
    }
    fn internal(left: Node, right: Node) -> Self {
        Self {
            weight: left.weight + right.weight,
            symbol: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none()
    }
    pub(crate) fn symbol(&self) -> Option<char> {
        self.symbol
    }
    pub(crate) fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }
    pub(crate) fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }
}

/// Min-heap wrapper: `BinaryHeap` is a max-heap, so ordering is
/// reversed on `weight`.
struct HeapEntry(Node, u64);

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.1.cmp(&self.1) // reversed: smaller weight = higher priority
    }
}

pub(crate) fn build_tree(freqs: &HashMap<char, u64>) -> Node {
    let mut heap: BinaryHeap<HeapEntry> = freqs
        .iter()
        .map(|(&c, &w)| {
            let n = Node::leaf(c, w);
            HeapEntry(n, w)
        })
        .collect();
    while heap.len() > 1 {
        let HeapEntry(a, wa) = heap.pop().unwrap();
        let HeapEntry(b, wb) = heap.pop().unwrap();
        let merged = Node::internal(a, b);
        let w = wa + wb;
        heap.push(HeapEntry(merged, w));
    }
    heap.pop().expect("freqs was non-empty").0
}

/// Preorder serialization: `"1" ++ len8 ++ utf8_bytes` for a leaf,
/// `"0" ++ serialize(left) ++ serialize(right)` for an internal node.
fn serialize_tree(node: &Node, out: &mut BitVec) {
    match node.symbol {
        Some(c) => {
            out.push(true);
            literal::serialize(c, out);
        }
        None => {
            out.push(false);
            serialize_tree(node.left.as_ref().unwrap(), out);
            serialize_tree(node.right.as_ref().unwrap(), out);
        }
    }
}

fn deserialize_tree(cur: &mut BitCursor) -> Result<Node, Error> {
    let is_leaf = cur.next_bit().ok_or(Error::TruncatedStream)?;
    if is_leaf {
        let c = literal::deserialize(cur)?;
        Ok(Node::leaf(c, 0))
    } else {
        let left = deserialize_tree(cur)?;
        let right = deserialize_tree(cur)?;
        Ok(Node::internal(left, right))
    }
}

fn build_codes(node: &Node) -> HashMap<char, BitVec> {
    let mut table = HashMap::new();
    if let Some(c) = node.symbol {
        // single-symbol tree: the lone leaf's code word is still one
        // bit — there is no shorter valid code for a root with no
        // parent of its own.
        let mut bits = BitVec::new();
        bits.push(false);
        table.insert(c, bits);
        return table;
    }
    let mut stack: Vec<(&Node, BitVec)> = vec![(node, BitVec::new())];
    while let Some((n, path)) = stack.pop() {
        if let Some(c) = n.symbol {
            table.insert(c, path);
            continue;
        }
        let mut left_path = path.clone();
        left_path.push(false);
        stack.push((n.left.as_ref().unwrap(), left_path));
        let mut right_path = path;
        right_path.push(true);
        stack.push((n.right.as_ref().unwrap(), right_path));
    }
    table
}

fn count_frequencies(text: &str) -> HashMap<char, u64> {
    let mut freqs = HashMap::new();
    for c in text.chars() {
        *freqs.entry(c).or_insert(0) += 1;
    }
    freqs
}

/// Encode `text`: frequency table -> tree -> serialized tree ++ coded data.
pub fn encode_stream(text: &str) -> BitVec {
    let mut out = BitVec::new();
    if text.is_empty() {
        return out;
    }
    let freqs = count_frequencies(text);
    debug!("classic codec: {} distinct symbols", freqs.len());
    let root = build_tree(&freqs);
    serialize_tree(&root, &mut out);
    let codes = build_codes(&root);
    for c in text.chars() {
        out.extend(codes[&c].iter());
    }
    out
}

/// Decode a bit string produced by [`encode_stream`].
pub fn decode_stream(bits: &BitVec) -> Result<String, Error> {
    if bits.is_empty() {
        return Ok(String::new());
    }
    let mut cur = BitCursor::new(bits);
    let root = deserialize_tree(&mut cur)?;
    let mut out = String::new();
    if root.is_leaf() {
        // single-symbol tree: every remaining "0" bit is one more
        // occurrence of the lone symbol.
        let c = root.symbol.unwrap();
        while !cur.at_end() {
            cur.next_bit();
            out.push(c);
        }
        return Ok(out);
    }
    while !cur.at_end() {
        let mut node = &root;
        while !node.is_leaf() {
            let bit = cur.next_bit().ok_or(Error::TruncatedStream)?;
            node = if bit {
                node.right.as_ref().unwrap()
            } else {
                node.left.as_ref().unwrap()
            };
        }
        out.push(node.symbol.unwrap());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str) {
        let bits = encode_stream(text);
        assert_eq!(decode_stream(&bits).unwrap(), text);
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode_stream("").len(), 0);
        assert_eq!(decode_stream(&BitVec::new()).unwrap(), "");
    }

    #[test]
    fn single_symbol_repeated() {
        round_trip("aaa");
    }

    #[test]
    fn mixed_text() {
        round_trip("I am Sam. Sam I am.");
    }

    #[test]
    fn multibyte_scalars() {
        round_trip("café 🙂 au lait");
    }

    #[test]
    fn tree_header_present_for_nonempty_input() {
        let bits = encode_stream("aaa");
        // single-symbol header: "1" + len8 + utf8 byte = 10 bits, then
        // 3 data bits ("000")
        assert_eq!(bits.len(), 10 + 3);
    }
}
