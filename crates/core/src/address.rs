//! The FIO public-key address: a compressed secp256k1 public key with a
//! `FIO`-prefixed checksummed-base58 text form, and the derivation of the
//! chain account name ("actor") that belongs to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::enc::{decode_check, encode_check, EncError};
use crate::name::Name;

/// The textual prefix of FIO public keys.
const ADDRESS_PREFIX: &str = "FIO";

/// Errors raised when parsing an address from text.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The string does not start with `FIO`.
    #[error("Missing FIO address prefix")]
    MissingPrefix,

    /// The base58 body is malformed or fails its checksum.
    #[error(transparent)]
    Enc(#[from] EncError),
}

/// A FIO address, wrapping a 33-byte compressed public key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    key: [u8; 33],
}

impl Address {
    /// Wrap a compressed public key.
    pub fn from_public_key(key: [u8; 33]) -> Self {
        Self { key }
    }

    /// The compressed public key bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.key
    }

    /// Derives the chain account name controlled by this key.
    ///
    /// Scans the key bytes after the SEC1 tag, packing the low 5 bits of
    /// each nonzero byte into the first 12 name slots. Zero groups are
    /// skipped so the result never contains the terminator symbol; the
    /// low 4-bit slot is left empty.
    pub fn actor(&self) -> Name {
        let mut value = 0u64;
        let mut i = 1; // skip the SEC1 tag byte
        let mut len = 0;
        while len < 12 && i < self.key.len() {
            let trimmed = u64::from(self.key[i]) & 0x1f;
            i += 1;
            if trimmed == 0 {
                continue;
            }
            value |= trimmed << (5 * (12 - len) - 1);
            len += 1;
        }
        Name(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, encode_check(&self.key, b""))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix(ADDRESS_PREFIX)
            .ok_or(AddressError::MissingPrefix)?;
        let payload = decode_check(body, b"")?;
        if payload.len() != 33 {
            return Err(EncError::BadPayloadLength {
                got: payload.len(),
                expected: 33,
            }
            .into());
        }
        let mut key = [0u8; 33];
        key.copy_from_slice(&payload);
        Ok(Self { key })
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Ser;

    const PUBKEY_6M: &str = "FIO6m1fMdTpRkRBnedvYshXCxLFiC5suRU8KDfx8xxtXp2hntxpnf";

    #[test]
    fn it_round_trips_address_text() {
        let addr: Address = PUBKEY_6M.parse().unwrap();
        assert_eq!(addr.to_string(), PUBKEY_6M);
    }

    #[test]
    fn it_derives_the_actor_name() {
        let addr: Address = PUBKEY_6M.parse().unwrap();
        let actor = addr.actor();
        assert_eq!(actor.to_string(), "qdfejz2a5wpl");
        // Exactly 12 slots are filled; the 4-bit tail stays zero.
        assert_eq!(actor.serialize_hex().unwrap(), "102b2f46fca756b2");
        assert_eq!(actor.value() & 0x0f, 0);
    }

    #[test]
    fn it_rejects_malformed_text() {
        assert!(matches!(
            "EOS6m1fMdTpRkRBnedvYshXCxLFiC5suRU8KDfx8xxtXp2hntxpnf".parse::<Address>(),
            Err(AddressError::MissingPrefix)
        ));
        assert!(matches!(
            "FIO6m1fMdTpRkRBnedvYshXCxLFiC5suRU8KDfx8xxtXp2hntxpng".parse::<Address>(),
            Err(AddressError::Enc(EncError::BadChecksum))
        ));
    }
}
