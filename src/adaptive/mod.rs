//! Adaptive (FGK) Huffman codec.
//!
//! This is the core of the crate: a true streaming algorithm where
//! encoder and decoder each keep their own copy of [`tree::Tree`] and
//! apply the identical `update` sequence, so the two trees stay
//! bit-for-bit synchronized without ever exchanging a header.

pub mod tree;

use bit_vec::BitVec;
use log::trace;

use crate::bitstream::BitCursor;
use crate::literal;
use crate::Error;
use tree::Tree;

/// Encode `text` with a fresh adaptive tree.
///
/// Each character either walks the path to its existing leaf, or (on
/// first occurrence) walks the path to NYT followed by the UTF-8
/// literal encoding of the character. Either way `update` runs
/// afterwards, so the first occurrence of a symbol is always
/// transmitted via NYT, never via its own leaf.
pub fn encode_stream(text: &str) -> BitVec {
    let mut tree = Tree::new();
    let mut out = BitVec::new();
    for c in text.chars() {
        match tree.leaf_for(c) {
            Some(leaf) => {
                out.extend(tree.path_to(leaf).iter());
            }
            None => {
                out.extend(tree.path_to(tree.nyt()).iter());
                literal::serialize(c, &mut out);
            }
        }
        tree.update(c);
        debug_assert!(tree.check_invariants().is_ok());
        trace!("encoded {:?}, {} bits so far", c, out.len());
    }
    out
}

/// Decode a bit string produced by [`encode_stream`] back into text.
///
/// Walks from the root on each iteration, consuming one bit per
/// internal node visited; on reaching NYT reads a literal, otherwise
/// takes the leaf's stored symbol. Fails with `TruncatedStream` if the
/// bits run out mid-descent or mid-literal.
pub fn decode_stream(bits: &BitVec) -> Result<String, Error> {
    let mut tree = Tree::new();
    let mut cur = BitCursor::new(bits);
    let mut out = String::new();
    while !cur.at_end() {
        let mut node = tree.root();
        while !tree.is_leaf(node) {
            let bit = match cur.next_bit() {
                Some(b) => b,
                None => return Err(Error::TruncatedStream),
            };
            node = if bit {
                tree.right(node).expect("internal node has both children")
            } else {
                tree.left(node).expect("internal node has both children")
            };
        }
        let symbol = if tree.is_nyt(node) {
            literal::deserialize(&mut cur)?
        } else {
            tree.symbol_of(node).expect("non-NYT leaf always has a symbol")
        };
        out.push(symbol);
        tree.update(symbol);
        debug_assert!(tree.check_invariants().is_ok());
    }
    Ok(out)
}
