//! # fio-core
//!
//! `fio-core` contains the serialization primitives and text encodings
//! shared by the FIO transaction-construction crates.
//!
//! ## Crate Layout
//!
//! ### Ser trait
//!
//! The `Ser` trait is a simple serialization API using `std::io::Write`.
//! Implementers define the binary wire format of the type. The module also
//! provides the FIO wire primitives: compact (varint) integers and
//! length-prefixed strings.
//!
//! ### Names and addresses
//!
//! `Name` packs chain account/action/permission strings into their
//! canonical 64-bit form. `Address` wraps a compressed secp256k1 public
//! key, renders the `FIO...` text form, and derives the actor account name
//! the chain associates with the key.
//!
//! ### Checksummed base58
//!
//! `enc` implements the RIPEMD-160-checksummed base58 used by FIO key and
//! signature text.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod address;
pub mod enc;
pub mod name;
pub mod ser;

pub use address::{Address, AddressError};
pub use enc::EncError;
pub use name::{InvalidNameError, Name};
pub use ser::{Ser, SerError, SerResult};
