//! Conversion between recovered field elements and byte strings.

use std::io::Write;

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Encodes `value` as a big-endian byte string of exactly `width` bytes,
/// padded with leading zeros.
pub fn to_fixed_bytes(value: &BigUint, width: usize) -> Result<Vec<u8>> {
    let bytes = if value.bits() == 0 { Vec::new() } else { value.to_bytes_be() };
    if bytes.len() > width {
        return Err(Error::Overflow { needed: bytes.len(), width });
    }

    let mut out = vec![0u8; width - bytes.len()];
    out.extend_from_slice(&bytes);
    Ok(out)
}

/// Splits `message` into chunks of `width` bytes (the last one may be
/// shorter) and reads each chunk as a big-endian integer.
pub fn from_chunks(message: &[u8], width: usize) -> Vec<BigUint> {
    assert!(width > 0, "chunk width must be positive");
    message.chunks(width).map(BigUint::from_bytes_be).collect()
}

/// Writes every fragment on its own line as a byte string literal, e.g.
/// `b"\x00\x00flag"`.
pub fn write_fragments<W: Write, B: AsRef<[u8]>>(w: &mut W, fragments: &[B]) -> Result<()> {
    for fragment in fragments {
        writeln!(w, "b\"{}\"", fragment.as_ref().escape_ascii())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_padding() {
        let v = BigUint::from(0x0102u32);
        assert_eq!(to_fixed_bytes(&v, 4).unwrap(), [0, 0, 1, 2]);
        assert_eq!(to_fixed_bytes(&BigUint::from(0u32), 3).unwrap(), [0, 0, 0]);
        assert_eq!(to_fixed_bytes(&BigUint::from(0u32), 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn too_wide_values_overflow() {
        let v = BigUint::from(0x010203u32);
        assert!(matches!(
            to_fixed_bytes(&v, 2),
            Err(Error::Overflow { needed: 3, width: 2 })
        ));
    }

    #[test]
    fn chunks_round_trip() {
        let message = b"flag{this_is_split_into_chunks}";
        let chunks = from_chunks(message, 8);
        assert_eq!(chunks.len(), 4);

        let mut joined = Vec::new();
        for (i, c) in chunks.iter().enumerate() {
            let width = if i + 1 == chunks.len() { message.len() % 8 } else { 8 };
            joined.extend(to_fixed_bytes(c, width).unwrap());
        }
        assert_eq!(joined, message);
    }

    #[test]
    fn fragments_are_escaped() {
        let mut out = Vec::new();
        write_fragments(&mut out, &[b"\x00ab".to_vec(), b"c\"d\n".to_vec()]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "b\"\\x00ab\"\nb\"c\\\"d\\n\"\n");
    }
}
