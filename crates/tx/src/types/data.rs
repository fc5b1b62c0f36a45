//! The closed set of action payloads. Each kind serializes its own wire
//! form and knows the contract account, action name, and length-field
//! layout that go with it, so call sites cannot mismatch them.

use std::io::Write;

use fio_core::ser::{string_len, var_uint_len, write_string, write_var_uint, Ser, SerResult};
use fio_core::Name;

use super::action::DataLayout;

/// The account hosting the address contract: `fio.address`.
pub const CONTRACT_ADDRESS: Name = Name(0x5ba8032537563000);

/// The `regaddress` action name.
const NAME_REG_ADDRESS: Name = Name(0xba9864a6eac60000);

/// The `addaddress` action name.
const NAME_ADD_ADDRESS: Name = Name(0x325264a6eac60000);

/// Payload of the `regaddress` action: registers a FIO address for the
/// holder of a public key.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegFioAddressData {
    /// The FIO address being registered, e.g. `adam@fiotestnet`.
    pub fio_address: String,
    /// Textual public key of the new owner.
    pub owner_public_key: String,
    /// Maximum fee the signer will pay, in SUF. Zero is legal.
    pub fee: u64,
    /// The signing account.
    pub actor: Name,
    /// Wallet-attribution (referrer) FIO address for fee sharing.
    pub tpid: String,
}

impl Ser for RegFioAddressData {
    fn serialized_length(&self) -> usize {
        string_len(&self.fio_address)
            + string_len(&self.owner_public_key)
            + 8
            + 8
            + string_len(&self.tpid)
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        let mut len = write_string(writer, &self.fio_address)?;
        len += write_string(writer, &self.owner_public_key)?;
        len += self.fee.serialize(writer)?;
        len += self.actor.serialize(writer)?;
        len += write_string(writer, &self.tpid)?;
        Ok(len)
    }
}

/// A (token symbol, public address) pair bound to a FIO address.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublicAddress {
    /// Token symbol, e.g. `BTC`.
    pub token_code: String,
    /// The public address on that token's chain.
    pub public_address: String,
}

impl Ser for PublicAddress {
    fn serialized_length(&self) -> usize {
        string_len(&self.token_code) + string_len(&self.public_address)
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        let mut len = write_string(writer, &self.token_code)?;
        len += write_string(writer, &self.public_address)?;
        Ok(len)
    }
}

/// Payload of the `addaddress` action: binds public addresses of other
/// chains to a FIO address. Pair order is wire-significant and preserved.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddPubAddressData {
    /// The FIO address the bindings attach to.
    pub fio_address: String,
    /// The bindings, in insertion order. May be empty.
    pub public_addresses: Vec<PublicAddress>,
    /// Maximum fee the signer will pay, in SUF. Zero is legal.
    pub fee: u64,
    /// The signing account.
    pub actor: Name,
    /// Wallet-attribution (referrer) FIO address for fee sharing.
    pub tpid: String,
}

impl Ser for AddPubAddressData {
    fn serialized_length(&self) -> usize {
        string_len(&self.fio_address)
            + var_uint_len(self.public_addresses.len() as u64)
            + self.public_addresses.serialized_length()
            + 8
            + 8
            + string_len(&self.tpid)
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        let mut len = write_string(writer, &self.fio_address)?;
        len += write_var_uint(writer, self.public_addresses.len() as u64)?;
        len += self.public_addresses.serialize(writer)?;
        len += self.fee.serialize(writer)?;
        len += self.actor.serialize(writer)?;
        len += write_string(writer, &self.tpid)?;
        Ok(len)
    }
}

/// The closed set of supported action kinds, tagged with everything the
/// action envelope needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionData {
    /// `fio.address::regaddress`
    RegFioAddress(RegFioAddressData),
    /// `fio.address::addaddress`
    AddPubAddress(AddPubAddressData),
}

impl ActionData {
    /// The contract account this kind targets.
    pub fn account(&self) -> Name {
        CONTRACT_ADDRESS
    }

    /// The on-chain action name for this kind.
    pub fn name(&self) -> Name {
        match self {
            ActionData::RegFioAddress(_) => NAME_REG_ADDRESS,
            ActionData::AddPubAddress(_) => NAME_ADD_ADDRESS,
        }
    }

    /// The length-field layout this kind uses on the wire.
    pub fn layout(&self) -> DataLayout {
        match self {
            ActionData::RegFioAddress(_) => DataLayout::Compact,
            ActionData::AddPubAddress(_) => DataLayout::Extra01,
        }
    }
}

impl Ser for ActionData {
    fn serialized_length(&self) -> usize {
        match self {
            ActionData::RegFioAddress(d) => d.serialized_length(),
            ActionData::AddPubAddress(d) => d.serialized_length(),
        }
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        match self {
            ActionData::RegFioAddress(d) => d.serialize(writer),
            ActionData::AddPubAddress(d) => d.serialize(writer),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use fio_core::Ser;

    fn pairs() -> Vec<PublicAddress> {
        vec![
            PublicAddress {
                token_code: "BTC".to_owned(),
                public_address: "bc1qvy4074rggkdr2pzw5vpnn62eg0smzlxwp70d7v".to_owned(),
            },
            PublicAddress {
                token_code: "ETH".to_owned(),
                public_address: "0xce5cB6c92Da37bbBa91Bd40D4C9D4D724A3a8F51".to_owned(),
            },
            PublicAddress {
                token_code: "BNB".to_owned(),
                public_address: "bnb1ts3dg54apwlvr9hupv2n0j6e46q54znnusjk9s".to_owned(),
            },
        ]
    }

    fn add_data(addresses: Vec<PublicAddress>) -> AddPubAddressData {
        AddPubAddressData {
            fio_address: "adam@fiotestnet".to_owned(),
            public_addresses: addresses,
            fee: 0,
            actor: "qdfejz2a5wpl".parse().unwrap(),
            tpid: "rewards@wallet".to_owned(),
        }
    }

    #[test]
    fn it_has_the_right_name_constants() {
        assert_eq!("fio.address".parse::<Name>().unwrap(), CONTRACT_ADDRESS);
        assert_eq!("regaddress".parse::<Name>().unwrap(), NAME_REG_ADDRESS);
        assert_eq!("addaddress".parse::<Name>().unwrap(), NAME_ADD_ADDRESS);
    }

    #[test]
    fn it_serializes_add_pub_address_data() {
        let data = add_data(pairs());
        assert_eq!(
            data.serialize_hex().unwrap(),
            "0f6164616d4066696f746573746e657403034254432a626331717679343037347267676b647232707a773576706e6e3632656730736d7a6c7877703730643776034554482a30786365356342366339324461333762624261393142643430443443394434443732344133613846353103424e422a626e6231747333646735346170776c76723968757076326e306a366534367135347a6e6e75736a6b39730000000000000000102b2f46fca756b20e726577617264734077616c6c6574"
        );
        assert_eq!(data.serialized_length(), 189);
    }

    #[test]
    fn it_preserves_pair_order() {
        let forward = add_data(pairs()).serialize_hex().unwrap();
        let mut reversed_pairs = pairs();
        reversed_pairs.reverse();
        let reversed = add_data(reversed_pairs).serialize_hex().unwrap();
        assert_ne!(forward, reversed);
        // count byte is 03 and the first pair follows immediately
        assert_eq!(&forward[32..42], "0303425443");
        assert_eq!(&reversed[32..42], "0303424e42");
    }

    #[test]
    fn it_serializes_an_empty_pair_list() {
        let data = add_data(vec![]);
        let hex = data.serialize_hex().unwrap();
        // count 00 followed immediately by fee, actor, tpid
        assert_eq!(
            hex,
            "0f6164616d4066696f746573746e6574000000000000000000102b2f46fca756b20e726577617264734077616c6c6574"
        );
        assert_eq!(data.serialized_length(), hex.len() / 2);
    }
}
