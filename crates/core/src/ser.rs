//! A simple trait for binary serialization using the std `Write` trait, plus
//! the FIO wire primitives: compact (varint) integers and length-prefixed
//! strings.

use std::io::{Error as IoError, Read, Write};

use thiserror::Error;

/// Errors related to serialization of wire types.
#[derive(Debug, Error)]
pub enum SerError {
    /// IoError bubbled up from a `Write` passed to a `Ser::serialize` implementation.
    #[error("Serialization error")]
    Io(#[from] IoError),

    /// A compact integer ran past its maximum width of 10 bytes.
    #[error("VarInt longer than 10 bytes")]
    VarIntTooLong,
}

/// Type alias for serialization results.
pub type SerResult<T> = Result<T, SerError>;

/// The serialized byte-length of `n` as a compact integer.
pub fn var_uint_len(n: u64) -> usize {
    let mut len = 1;
    let mut n = n >> 7;
    while n != 0 {
        len += 1;
        n >>= 7;
    }
    len
}

/// Writes `n` as an EOSIO compact integer: little-endian base-128 groups,
/// high bit set on every byte except the last.
pub fn write_var_uint<W: Write>(writer: &mut W, n: u64) -> SerResult<usize> {
    let mut n = n;
    let mut written = 0;
    loop {
        let mut byte = (n & 0x7f) as u8;
        n >>= 7;
        if n != 0 {
            byte |= 0x80;
        }
        written += writer.write(&[byte])?;
        if n == 0 {
            return Ok(written);
        }
    }
}

/// Reads a compact integer. The inverse of `write_var_uint` for any value
/// it produces.
pub fn read_var_uint<R: Read>(reader: &mut R) -> SerResult<u64> {
    let mut n = 0u64;
    let mut shift = 0;
    loop {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        if shift >= 70 {
            return Err(SerError::VarIntTooLong);
        }
        n |= u64::from(buf[0] & 0x7f) << shift;
        if buf[0] & 0x80 == 0 {
            return Ok(n);
        }
        shift += 7;
    }
}

/// Writes a compact-length-prefixed string: `write_var_uint(s.len())`
/// followed by the raw bytes. No terminator.
pub fn write_string<W: Write>(writer: &mut W, s: &str) -> SerResult<usize> {
    let mut written = write_var_uint(writer, s.len() as u64)?;
    written += writer.write(s.as_bytes())?;
    Ok(written)
}

/// The serialized byte-length of `s` as a length-prefixed string.
pub fn string_len(s: &str) -> usize {
    var_uint_len(s.len() as u64) + s.len()
}

/// A simple trait for serializing to `std::io::Write`.
///
/// `Ser` is used for payload encoding, action and transaction serialization,
/// and signing-digest construction. Implementers define the binary wire
/// format of the type. Integers are fixed-width little-endian.
pub trait Ser {
    /// Returns the byte-length of the serialized data structure.
    fn serialized_length(&self) -> usize;

    /// Serializes `Self` to a `std::io::Write`. Following `Write` trait
    /// conventions, its `Ok` type is a `usize` denoting the number of bytes
    /// written.
    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize>;

    /// Serializes `self` to a vector, returns the lowercase-hex-encoded
    /// vector.
    fn serialize_hex(&self) -> SerResult<String> {
        let mut v: Vec<u8> = vec![];
        self.serialize(&mut v)?;
        Ok(hex::encode(v))
    }
}

impl Ser for u8 {
    fn serialized_length(&self) -> usize {
        1
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        Ok(writer.write(&self.to_le_bytes())?)
    }
}

impl Ser for u16 {
    fn serialized_length(&self) -> usize {
        2
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        Ok(writer.write(&self.to_le_bytes())?)
    }
}

impl Ser for u32 {
    fn serialized_length(&self) -> usize {
        4
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        Ok(writer.write(&self.to_le_bytes())?)
    }
}

impl Ser for u64 {
    fn serialized_length(&self) -> usize {
        8
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        Ok(writer.write(&self.to_le_bytes())?)
    }
}

impl<A: Ser> Ser for Vec<A> {
    fn serialized_length(&self) -> usize {
        self.iter().map(|v| v.serialized_length()).sum()
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        let writes: SerResult<Vec<usize>> = self.iter().map(|v| v.serialize(writer)).collect();
        Ok(writes?.iter().sum())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn it_encodes_compact_ints() {
        let cases: &[(u64, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (0x7f, &[0x7f]),
            (0x80, &[0x80, 0x01]),
            (101, &[0x65]),
            (189, &[0xbd, 0x01]),
            (0x3fff, &[0xff, 0x7f]),
            (0x4000, &[0x80, 0x80, 0x01]),
        ];
        for (n, expected) in cases {
            let mut buf = vec![];
            let written = write_var_uint(&mut buf, *n).unwrap();
            assert_eq!(&buf[..], *expected);
            assert_eq!(written, expected.len());
            assert_eq!(var_uint_len(*n), expected.len());
        }
    }

    #[test]
    fn it_round_trips_compact_ints() {
        let mut n = 0u64;
        while n < (1 << 32) {
            let mut buf = vec![];
            write_var_uint(&mut buf, n).unwrap();
            let mut cursor = Cursor::new(buf);
            assert_eq!(read_var_uint(&mut cursor).unwrap(), n);
            n = n * 3 + 1;
        }
    }

    #[test]
    fn it_rejects_overlong_varints() {
        let mut cursor = Cursor::new(vec![0x80u8; 11]);
        assert!(matches!(
            read_var_uint(&mut cursor),
            Err(SerError::VarIntTooLong)
        ));
    }

    #[test]
    fn it_encodes_strings_without_terminator() {
        let mut buf = vec![];
        write_string(&mut buf, "adam@fiotestnet").unwrap();
        assert_eq!(hex::encode(&buf), "0f6164616d4066696f746573746e6574");
        assert_eq!(string_len("adam@fiotestnet"), buf.len());

        let mut buf = vec![];
        write_string(&mut buf, "").unwrap();
        assert_eq!(buf, vec![0x00]);
    }

    #[test]
    fn it_writes_le_integers() {
        let mut buf = vec![];
        5000000000u64.serialize(&mut buf).unwrap();
        assert_eq!(hex::encode(&buf), "00f2052a01000000");

        let mut buf = vec![];
        39881u16.serialize(&mut buf).unwrap();
        4279583376u32.serialize(&mut buf).unwrap();
        assert_eq!(hex::encode(&buf), "c99b904215ff");
    }
}
