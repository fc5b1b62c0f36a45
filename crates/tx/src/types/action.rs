//! The action envelope: an account/action-name pair, an ordered
//! authorization list, and the pre-encoded payload bytes with their
//! kind-specific length-field layout.

use std::io::Write;

use fio_core::ser::{var_uint_len, write_var_uint, Ser, SerResult};
use fio_core::Name;

/// An (actor, permission) authorization entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Authorization {
    /// The authorizing account.
    pub actor: Name,
    /// The permission level, typically `active`.
    pub permission: Name,
}

impl Ser for Authorization {
    fn serialized_length(&self) -> usize {
        16
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        let mut len = self.actor.serialize(writer)?;
        len += self.permission.serialize(writer)?;
        Ok(len)
    }
}

/// The wire layout of the payload length field. A property of the action
/// kind, never a caller choice: `regaddress` uses the compact form,
/// `addaddress` the extra-01 form.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DataLayout {
    /// Minimal compact integer.
    Compact,
    /// The length field carries an 0x01 continuation byte before the
    /// payload. For payloads of 128 bytes and up this is the minimal
    /// compact encoding; below that, the first byte keeps its
    /// continuation bit set and the 0x01 marker follows.
    Extra01,
}

impl DataLayout {
    fn write_len<W: Write>(&self, writer: &mut W, len: usize) -> SerResult<usize> {
        match self {
            DataLayout::Compact => write_var_uint(writer, len as u64),
            DataLayout::Extra01 if len < 0x80 => {
                Ok(writer.write(&[len as u8 | 0x80, 0x01])?)
            }
            DataLayout::Extra01 => write_var_uint(writer, len as u64),
        }
    }

    fn len_len(&self, len: usize) -> usize {
        match self {
            DataLayout::Compact => var_uint_len(len as u64),
            DataLayout::Extra01 if len < 0x80 => 2,
            DataLayout::Extra01 => var_uint_len(len as u64),
        }
    }
}

/// A single action. Owns its payload as an opaque, already-encoded byte
/// buffer; the authorization list is order-preserving and must never be
/// reordered once serialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    /// The contract account the action targets.
    pub account: Name,
    /// The action name within the contract.
    pub name: Name,
    /// The authorizations, in wire order. At least one entry.
    pub auth: Vec<Authorization>,
    /// The serialized action payload.
    pub data: Vec<u8>,
    /// The length-field layout of the payload, fixed by the action kind.
    pub layout: DataLayout,
}

impl Ser for Action {
    fn serialized_length(&self) -> usize {
        let mut len = 16; // account ++ name
        len += var_uint_len(self.auth.len() as u64);
        len += self.auth.serialized_length();
        len += self.layout.len_len(self.data.len());
        len += self.data.len();
        len + 1 // trailing zero byte
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        let mut len = self.account.serialize(writer)?;
        len += self.name.serialize(writer)?;
        len += write_var_uint(writer, self.auth.len() as u64)?;
        len += self.auth.serialize(writer)?;
        len += self.layout.write_len(writer, self.data.len())?;
        len += writer.write(&self.data)?;
        // every reference action envelope closes with a zero byte
        len += writer.write(&[0u8])?;
        Ok(len)
    }
}
