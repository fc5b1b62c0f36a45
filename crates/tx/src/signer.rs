//! Digest construction and canonical recoverable signing.
//!
//! The signing digest is `sha256(chain_id ++ transaction ++ [0u8; 32])`.
//! Nonces are deterministic (RFC 6979); the chain additionally requires
//! *canonical* signatures, so candidates are pulled from a single
//! HMAC-DRBG stream until one passes the canonicality test. Retries must
//! continue that stream, not reseed it.

use std::fmt;

use k256::elliptic_curve::bigint::U256;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::scalar::IsHigh;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, ProjectivePoint, Scalar, SecretKey};
use rfc6979::HmacDrbg;
use sha2::{Digest, Sha256};

use fio_core::enc::encode_check;
use fio_core::{Address, Ser};

use crate::types::transaction::Transaction;
use crate::{TxError, TxResult};

/// Candidate nonces tried before signing is declared failed.
const MAX_NONCE_CANDIDATES: usize = 100;

/// A secp256k1 signing key.
pub struct PrivateKey {
    key: SecretKey,
}

impl PrivateKey {
    /// Instantiate from 32 raw scalar bytes.
    pub fn from_slice(bytes: &[u8]) -> TxResult<Self> {
        let key = SecretKey::from_slice(bytes)
            .map_err(|_| TxError::InvalidInput("private key must be a valid 32-byte scalar"))?;
        Ok(Self { key })
    }

    /// The address of the corresponding public key.
    pub fn public_key(&self) -> Address {
        let point = self.key.public_key().to_encoded_point(true);
        let mut key = [0u8; 33];
        key.copy_from_slice(point.as_bytes());
        Address::from_public_key(key)
    }

    /// Produce a canonical recoverable signature over a 32-byte digest.
    pub fn sign_digest_canonical(&self, digest: &[u8; 32]) -> TxResult<Signature> {
        let d = *self.key.to_nonzero_scalar();
        let z = <Scalar as Reduce<U256>>::reduce_bytes(FieldBytes::from_slice(digest));

        let mut drbg =
            HmacDrbg::<Sha256>::new(d.to_bytes().as_slice(), z.to_bytes().as_slice(), &[]);

        for _ in 0..MAX_NONCE_CANDIDATES {
            let mut k_bytes = FieldBytes::default();
            drbg.fill_bytes(k_bytes.as_mut_slice());
            let k = match Option::<Scalar>::from(Scalar::from_repr(k_bytes)) {
                Some(k) if !bool::from(k.is_zero()) => k,
                _ => continue,
            };

            let big_r = (ProjectivePoint::GENERATOR * k).to_affine();
            let x = big_r.x();
            let r = <Scalar as Reduce<U256>>::reduce_bytes(&x);
            if bool::from(r.is_zero()) {
                continue;
            }

            let k_inv = match Option::<Scalar>::from(k.invert()) {
                Some(inv) => inv,
                None => continue,
            };
            let mut s = k_inv * (z + r * d);
            if bool::from(s.is_zero()) {
                continue;
            }

            let mut recovery = big_r.y_is_odd().unwrap_u8();
            if r.to_bytes() != x {
                // r wrapped past the curve order
                recovery |= 2;
            }
            if bool::from(s.is_high()) {
                s = -s;
                recovery ^= 1;
            }

            let mut sig = [0u8; 65];
            sig[0] = 27 + 4 + recovery; // compressed-key convention
            sig[1..33].copy_from_slice(&r.to_bytes());
            sig[33..].copy_from_slice(&s.to_bytes());
            if is_canonical(&sig) {
                return Ok(Signature(sig));
            }
        }

        Err(TxError::Signing(
            "exhausted deterministic nonce candidates".to_owned(),
        ))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key().to_string())
            .finish()
    }
}

/// The chain's canonicality rule: neither component may have its top bit
/// set, nor start with a zero byte followed by a clear top bit.
fn is_canonical(sig: &[u8; 65]) -> bool {
    let r = &sig[1..33];
    let s = &sig[33..65];
    r[0] & 0x80 == 0
        && !(r[0] == 0 && r[1] & 0x80 == 0)
        && s[0] & 0x80 == 0
        && !(s[0] == 0 && s[1] & 0x80 == 0)
}

/// A 65-byte recoverable signature: one recovery byte, then `r` and `s`.
/// Displays in the chain's `SIG_K1_...` text form.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Signature(pub [u8; 65]);

impl Signature {
    /// The raw recoverable signature bytes.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIG_K1_{}", encode_check(&self.0, b"K1"))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

/// Signs a fully-assembled transaction: builds the chain-id-prefixed,
/// zero-padded preimage, hashes it, and produces the canonical recoverable
/// signature. Called exactly once per transaction build.
pub fn sign(tx: &Transaction, chain_id: &[u8; 32], key: &PrivateKey) -> TxResult<Signature> {
    let mut preimage = Vec::with_capacity(64 + tx.serialized_length());
    tx.write_signing_preimage(&mut preimage, chain_id)?;
    let digest: [u8; 32] = Sha256::digest(&preimage).into();
    key.sign_digest_canonical(&digest)
}
