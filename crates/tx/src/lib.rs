//! # fio-tx
//!
//! FIO transaction construction: action payload encoding, the action and
//! authorization envelope, transaction assembly, canonical recoverable
//! ECDSA signing, and a builder façade that turns user intents into the
//! JSON envelope a node's submission API accepts.
//!
//! ## Crate Layout
//!
//! ### Types
//!
//! `types` holds the wire structures: the closed set of action payloads
//! (`ActionData`), the `Action` envelope with its per-kind length-field
//! layout, and the `Transaction` assembler with the chain's fixed
//! resource-limit header.
//!
//! ### Signer
//!
//! `signer` builds the chain-id-prefixed signing digest and produces
//! EOSIO-canonical recoverable signatures with deterministic (RFC 6979)
//! nonces, rendered in the `SIG_K1_...` text form.
//!
//! ### Builder
//!
//! `TransactionBuilder` is the façade: one entry point per supported
//! intent. It owns the mapping from intent to contract account, action
//! name, and wire layout.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

use thiserror::Error;

use fio_core::{EncError, InvalidNameError, SerError};

pub mod builder;
pub mod signer;
pub mod types;

pub use builder::TransactionBuilder;
pub use signer::{PrivateKey, Signature};
pub use types::action::{Action, Authorization, DataLayout};
pub use types::data::{ActionData, AddPubAddressData, PublicAddress, RegFioAddressData};
pub use types::transaction::{ChainParams, SignedTransaction, Transaction};

/// An error type for transaction construction and signing.
#[derive(Debug, Error)]
pub enum TxError {
    /// Serialization failure bubbled up from a wire type.
    #[error(transparent)]
    Ser(#[from] SerError),

    /// A supplied account/permission/action string cannot be represented
    /// as a chain name.
    #[error(transparent)]
    Name(#[from] InvalidNameError),

    /// A textual key or signature failed to decode.
    #[error(transparent)]
    Enc(#[from] EncError),

    /// Caller-supplied structural input is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// The signing capability failed or returned malformed output. Fatal
    /// to the current build call; nothing is retried internally.
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Type alias for results with `TxError`.
pub type TxResult<T> = Result<T, TxError>;
