//! Checksummed base58 encoding as used by the FIO textual key and signature
//! formats. Unlike Bitcoin's base58check, the checksum is the first four
//! bytes of a single RIPEMD-160 over the payload, optionally suffixed with a
//! curve tag (`K1` for signatures).

use ripemd::{Digest, Ripemd160};
use thiserror::Error;

/// Errors related to checksummed-base58 text.
#[derive(Debug, Error)]
pub enum EncError {
    /// The string is not valid base58.
    #[error(transparent)]
    InvalidBase58(#[from] bs58::decode::Error),

    /// The trailing four checksum bytes do not match the payload.
    #[error("Bad base58 checksum")]
    BadChecksum,

    /// The decoded payload is not the expected size.
    #[error("Bad payload length. Got {got}. Expected {expected}.")]
    BadPayloadLength {
        /// Decoded payload length, checksum excluded.
        got: usize,
        /// The length the caller required.
        expected: usize,
    },
}

fn checksum(payload: &[u8], suffix: &[u8]) -> [u8; 4] {
    let mut hasher = Ripemd160::new();
    hasher.update(payload);
    hasher.update(suffix);
    let digest = hasher.finalize();
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Encode a payload into a base58 string with a 4-byte RIPEMD-160 checksum.
/// The suffix is mixed into the checksum but not encoded.
pub fn encode_check(payload: &[u8], suffix: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&checksum(payload, suffix));
    bs58::encode(data).into_string()
}

/// Decode a checksummed base58 string, verifying the trailing checksum.
pub fn decode_check(s: &str, suffix: &[u8]) -> Result<Vec<u8>, EncError> {
    let data: Vec<u8> = bs58::decode(s).into_vec()?;
    if data.len() < 4 {
        return Err(EncError::BadChecksum);
    }
    let idx = data.len() - 4;
    let (payload, expected) = data.split_at(idx);
    if checksum(payload, suffix) != expected {
        return Err(EncError::BadChecksum);
    }
    Ok(payload.to_vec())
}
