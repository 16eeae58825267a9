//! # huffcodec
//!
//! Three Huffman-based text codecs, each a different trade-off between
//! decoder state and header overhead:
//!
//! * `static_codec` bakes a fixed frequency table into the binary; no
//!   header is ever written, unknown characters escape through an
//!   in-band `<ESC>` leaf.
//! * `classic` computes frequencies over the whole input, builds a
//!   one-shot tree, and prefixes the coded data with a serialized copy
//!   of that tree.
//! * `adaptive` rebuilds its tree incrementally (the FGK algorithm) as
//!   symbols flow by; encoder and decoder never exchange a tree, only
//!   data, and must stay bit-for-bit synchronized.
//!
//! All three share the same outer bit-stream framing (`bitstream`) and
//! the same in-band scheme for transmitting a Unicode scalar that has
//! no assigned code yet (`literal`).
//!
//! ## Buffer Example
//!
//! ```rs
//! use huffcodec::adaptive;
//! let bits = adaptive::encode_stream("mississippi");
//! let text = adaptive::decode_stream(&bits).expect("decode failed");
//! assert_eq!(text, "mississippi");
//! ```

pub mod bitstream;
pub mod literal;
pub mod adaptive;
pub mod classic;
pub mod static_codec;

/// `Box<dyn Error>` alias used at the CLI boundary.
pub type DYNERR = Box<dyn std::error::Error>;
pub type STDRESULT = Result<(), DYNERR>;

/// Codec errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("pad length byte ({0}) is not less than 8")]
    CorruptHeader(u8),
    #[error("bit stream ended before a symbol could be fully decoded")]
    TruncatedStream,
    #[error("literal bytes did not form valid UTF-8")]
    CorruptLiteral,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Which of the three codecs a call selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Static,
    Classic,
    Adaptive,
}

impl std::str::FromStr for Variant {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "static" => Ok(Variant::Static),
            "classic" => Ok(Variant::Classic),
            "adaptive" => Ok(Variant::Adaptive),
            other => Err(format!("unknown variant '{other}'")),
        }
    }
}

/// Compress `text` with the given variant, producing a framed byte stream.
pub fn compress(text: &str, variant: Variant) -> Result<Vec<u8>, Error> {
    let bits = match variant {
        Variant::Static => static_codec::encode_stream(text),
        Variant::Classic => classic::encode_stream(text),
        Variant::Adaptive => adaptive::encode_stream(text),
    };
    Ok(bitstream::frame(&bits))
}

/// Expand a framed byte stream back into text, using the given variant.
pub fn expand(bytes: &[u8], variant: Variant) -> Result<String, Error> {
    let bits = bitstream::unframe(bytes)?;
    match variant {
        Variant::Static => static_codec::decode_stream(&bits),
        Variant::Classic => classic::decode_stream(&bits),
        Variant::Adaptive => adaptive::decode_stream(&bits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_variants() {
        for v in [Variant::Static, Variant::Classic, Variant::Adaptive] {
            let framed = compress("hello, world", v).expect("compress failed");
            let text = expand(&framed, v).expect("expand failed");
            assert_eq!(text, "hello, world");
        }
    }

    #[test]
    fn variant_from_str() {
        assert_eq!("static".parse::<Variant>().unwrap(), Variant::Static);
        assert_eq!("classic".parse::<Variant>().unwrap(), Variant::Classic);
        assert_eq!("adaptive".parse::<Variant>().unwrap(), Variant::Adaptive);
        assert!("bogus".parse::<Variant>().is_err());
    }
}
