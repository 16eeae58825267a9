//! Static Huffman codec: a frequency table baked into the binary, no
//! header ever transmitted. Reuses `classic::Node`/`classic::build_tree`
//! since both variants are one-shot, non-adaptive trees built from a
//! known weight table — only the table's origin (baked-in vs.
//! counted) and the escape path differ.

use std::collections::HashMap;
use std::sync::OnceLock;

use bit_vec::BitVec;
use log::debug;

use crate::bitstream::BitCursor;
use crate::classic::{build_tree, Node};
use crate::literal;
use crate::Error;

/// The symbol used in-band to introduce a character with no entry (or
/// a zero-weight entry) in the static table. A private-use scalar, so
/// it can never collide with a real character the baked-in table (or
/// any input text) assigns meaning to.
const ESCAPE: char = '\u{F8FF}';
/// The escape's nominal weight, an `ε` scaled into integer units so
/// the tree stays on the same `u64` weight type the rest of the crate
/// uses, keeping it far below any real entry and thus at maximum
/// tree depth.
const ESCAPE_WEIGHT: u64 = 1;
const WEIGHT_SCALE: u64 = 1_000_000;

/// The space character is rewritten to this token before table lookup
/// (static variant only — adaptive and classic leave space alone). A
/// private-use scalar standing in for an explicit `<sp>` table entry.
const SPACE_TOKEN: char = '\u{F8FE}';

/// Baked-in frequency table.
const ENTRIES: &[(char, u64)] = &[
    ('a', 7), ('b', 1), ('c', 3), ('d', 4), ('e', 12), ('f', 1),
    ('g', 1), ('h', 1), ('i', 6), ('j', 0), ('k', 0), ('l', 5),
    ('m', 3), ('n', 6), ('o', 5), ('p', 2), ('q', 0), ('r', 6),
    ('s', 6), ('t', 6), ('u', 4), ('v', 1), ('w', 0), ('x', 0),
    ('y', 0), ('z', 0), ('à', 0), ('é', 2), ('è', 0), (',', 2),
    ('-', 0), ('.', 1), (';', 0), ('!', 0), ('?', 0), ('\n', 0),
];
const SPACE_WEIGHT: u64 = 15;

fn weights() -> HashMap<char, u64> {
    let mut table = HashMap::new();
    for &(c, w) in ENTRIES {
        // Characters with a 0-frequency entry build no leaf of their
        // own and fall through to the escape path.
        if w > 0 {
            table.insert(c, w * WEIGHT_SCALE);
        }
    }
    table.insert(SPACE_TOKEN, SPACE_WEIGHT * WEIGHT_SCALE);
    table.insert(ESCAPE, ESCAPE_WEIGHT);
    table
}

fn rewrite(c: char) -> char {
    if c == ' ' {
        SPACE_TOKEN
    } else {
        c
    }
}

struct StaticTable {
    root: Node,
    codes: HashMap<char, BitVec>,
}

fn code_table(root: &Node) -> HashMap<char, BitVec> {
    let mut table = HashMap::new();
    let mut stack: Vec<(&Node, BitVec)> = vec![(root, BitVec::new())];
    while let Some((n, path)) = stack.pop() {
        if let Some(c) = n.symbol() {
            table.insert(c, path);
            continue;
        }
        let mut left_path = path.clone();
        left_path.push(false);
        stack.push((n.left().unwrap(), left_path));
        let mut right_path = path;
        right_path.push(true);
        stack.push((n.right().unwrap(), right_path));
    }
    table
}

fn static_table() -> &'static StaticTable {
    static CELL: OnceLock<StaticTable> = OnceLock::new();
    CELL.get_or_init(|| {
        let root = build_tree(&weights());
        let codes = code_table(&root);
        StaticTable { root, codes }
    })
}

/// Encode `text` against the baked-in table. Unknown or zero-weight
/// characters escape as `code(<ESC>) ++ len8 ++ utf8_bytes`.
pub fn encode_stream(text: &str) -> BitVec {
    let table = static_table();
    let mut out = BitVec::new();
    for raw in text.chars() {
        let c = rewrite(raw);
        match table.codes.get(&c) {
            Some(code) => out.extend(code.iter()),
            None => {
                out.extend(table.codes[&ESCAPE].iter());
                literal::serialize(raw, &mut out);
            }
        }
    }
    debug!(
        "static codec: encoded {} chars into {} bits",
        text.chars().count(),
        out.len()
    );
    out
}

/// Decode a bit string produced by [`encode_stream`].
pub fn decode_stream(bits: &BitVec) -> Result<String, Error> {
    let table = static_table();
    let mut cur = BitCursor::new(bits);
    let mut out = String::new();
    while !cur.at_end() {
        let mut node = &table.root;
        while !node.is_leaf() {
            let bit = cur.next_bit().ok_or(Error::TruncatedStream)?;
            node = if bit { node.right().unwrap() } else { node.left().unwrap() };
        }
        let symbol = node.symbol().expect("leaf always carries a symbol");
        if symbol == ESCAPE {
            out.push(literal::deserialize(&mut cur)?);
        } else if symbol == SPACE_TOKEN {
            out.push(' ');
        } else {
            out.push(symbol);
        }
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
    fn single_space() {
        round_trip(" ");
    }

    #[test]
    fn known_letters() {
        round_trip("the case");
    }

    #[test]
    fn zero_weight_letter_escapes() {
        // 'z' carries weight 0 in the baked-in table, so it must
        // round-trip via the escape path rather than a direct code.
        round_trip("zzz");
    }

    #[test]
    fn unknown_scalar_escapes() {
        round_trip("héllo 🙂");
    }

    #[test]
    fn empty_input() {
        assert_eq!(encode_stream("").len(), 0);
        assert_eq!(decode_stream(&BitVec::new()).unwrap(), "");
    }
}
