//! Bit buffer and byte framer shared by all three codecs.
//!
//! Bits accumulate in a `bit_vec::BitVec` rather than a string of
//! `'0'`/`'1'` characters. The framer then prefixes a single
//! pad-length byte and packs everything MSB-first.

use bit_vec::BitVec;

use crate::Error;

/// Frame a bit string: prepend a pad-length byte, pad the tail to a
/// byte boundary with zeros, and pack MSB-first.
///
/// Empty input frames to the single byte `0x00`.
pub fn frame(bits: &BitVec) -> Vec<u8> {
    let len = bits.len();
    let pad = (8 - len % 8) % 8;
    let mut out = BitVec::from_bytes(&[pad as u8]);
    out.extend(bits.iter());
    for _ in 0..pad {
        out.push(false);
    }
    out.to_bytes()
}

/// Undo `frame`: read the pad-length byte, unpack the rest, and drop
/// the trailing padding bits.
pub fn unframe(bytes: &[u8]) -> Result<BitVec, Error> {
    if bytes.is_empty() {
        return Ok(BitVec::new());
    }
    let pad = bytes[0];
    if pad >= 8 {
        return Err(Error::CorruptHeader(pad));
    }
    let mut bits = BitVec::from_bytes(&bytes[1..]);
    let keep = bits.len().saturating_sub(pad as usize);
    bits.truncate(keep);
    Ok(bits)
}

/// Cursor-based bit reader shared by the literal codec and all three
/// decoders.
pub struct BitCursor<'a> {
    bits: &'a BitVec,
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bits: &'a BitVec) -> Self {
        Self { bits, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.bits.len()
    }

    /// Read one bit, advancing the cursor. `None` on exhaustion.
    pub fn next_bit(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.pos)?;
        self.pos += 1;
        Some(bit)
    }

    /// Read `n` bits MSB-first into a `u32`. Fails `TruncatedStream`
    /// if fewer than `n` bits remain.
    pub fn next_bits(&mut self, n: usize) -> Result<u32, Error> {
        let mut value: u32 = 0;
        for _ in 0..n {
            let bit = self.next_bit().ok_or(Error::TruncatedStream)?;
            value = (value << 1) | bit as u32;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frames_to_single_zero_byte() {
        let bits = BitVec::new();
        assert_eq!(frame(&bits), vec![0x00]);
        assert_eq!(unframe(&[0x00]).unwrap().len(), 0);
    }

    #[test]
    fn round_trip_arbitrary_lengths() {
        for len in 0..40 {
            let mut bits = BitVec::new();
            for i in 0..len {
                bits.push(i % 3 == 0);
            }
            let framed = frame(&bits);
            let recovered = unframe(&framed).unwrap();
            assert_eq!(recovered, bits);
        }
    }

    #[test]
    fn corrupt_header_rejected() {
        assert!(matches!(unframe(&[0x08, 0xff]), Err(Error::CorruptHeader(8))));
    }

    #[test]
    fn cursor_reads_bits_and_multi_bit_fields() {
        let mut bits = BitVec::new();
        for b in [true, false, true, true, false, false, false, true] {
            bits.push(b);
        }
        let mut cur = BitCursor::new(&bits);
        assert_eq!(cur.next_bits(8).unwrap(), 0b10110001);
        assert!(cur.at_end());
        assert!(cur.next_bit().is_none());
    }

    #[test]
    fn cursor_truncated_stream() {
        let bits = BitVec::from_elem(3, true);
        let mut cur = BitCursor::new(&bits);
        assert!(matches!(cur.next_bits(8), Err(Error::TruncatedStream)));
    }
}
