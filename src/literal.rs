//! In-band encoding for a Unicode scalar that has no assigned code yet.
//!
//! `serialize` emits an 8-bit length field followed by that many UTF-8
//! bytes, each 8 bits MSB-first; `deserialize` is the inverse, reading
//! through a `BitCursor` so it composes with any of the three decoders.

use bit_vec::BitVec;

use crate::bitstream::BitCursor;
use crate::Error;

/// Append the literal encoding of `c` to `out`.
pub fn serialize(c: char, out: &mut BitVec) {
    let mut buf = [0u8; 4];
    let encoded = c.encode_utf8(&mut buf);
    let bytes = encoded.as_bytes();
    push_byte(out, bytes.len() as u8);
    for &b in bytes {
        push_byte(out, b);
    }
}

fn push_byte(out: &mut BitVec, byte: u8) {
    for i in (0..8).rev() {
        out.push((byte >> i) & 1 == 1);
    }
}

/// Read one literal scalar from `cur`.
///
/// `TruncatedStream` if the length byte or the UTF-8 bytes run past
/// the end of the stream; `CorruptLiteral` if the bytes read are not
/// valid UTF-8.
pub fn deserialize(cur: &mut BitCursor) -> Result<char, Error> {
    let len = cur.next_bits(8)? as usize;
    let mut bytes = Vec::with_capacity(len);
    for _ in 0..len {
        bytes.push(cur.next_bits(8)? as u8);
    }
    let s = std::str::from_utf8(&bytes).map_err(|_| Error::CorruptLiteral)?;
    s.chars().next().ok_or(Error::CorruptLiteral)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(c: char) {
        let mut out = BitVec::new();
        serialize(c, &mut out);
        let mut cur = BitCursor::new(&out);
        assert_eq!(deserialize(&mut cur).unwrap(), c);
        assert!(cur.at_end());
    }

    #[test]
    fn ascii_scalar() {
        round_trip('a');
    }

    #[test]
    fn two_byte_scalar() {
        round_trip('é');
    }

    #[test]
    fn four_byte_scalar() {
        round_trip('🙂');
    }

    #[test]
    fn truncated_length_byte() {
        let bits = BitVec::from_elem(3, true);
        let mut cur = BitCursor::new(&bits);
        assert!(matches!(deserialize(&mut cur), Err(Error::TruncatedStream)));
    }

    #[test]
    fn truncated_payload() {
        let mut out = BitVec::new();
        serialize('é', &mut out);
        out.truncate(out.len() - 4);
        let mut cur = BitCursor::new(&out);
        assert!(matches!(deserialize(&mut cur), Err(Error::TruncatedStream)));
    }

    #[test]
    fn invalid_utf8_rejected() {
        let mut out = BitVec::new();
        push_byte(&mut out, 1);
        push_byte(&mut out, 0xff);
        let mut cur = BitCursor::new(&out);
        assert!(matches!(deserialize(&mut cur), Err(Error::CorruptLiteral)));
    }
}
