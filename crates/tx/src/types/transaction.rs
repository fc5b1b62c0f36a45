//! Transaction assembly: the chain header fields, the fixed zero
//! resource-limit constants, the ordered action list, and the signed JSON
//! envelope.

use std::io::Write;

use fio_core::ser::{var_uint_len, write_var_uint, Ser, SerResult};

use super::action::Action;

/// Per-transaction chain parameters, derived by the caller from a recent
/// block. How they are fetched is out of scope here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChainParams {
    /// The 32-byte chain identifier.
    pub chain_id: [u8; 32],
    /// Low 16 bits of the reference block number.
    pub ref_block_number: u16,
    /// Prefix derived from the reference block id.
    pub ref_block_prefix: u32,
}

/// An unsigned transaction. Built once per submission; treated as
/// immutable after signing, since any later mutation invalidates the
/// signature.
///
/// The resource-limit header fields (`max_net_usage_words`,
/// `max_cpu_usage_ms`, `delay_sec`) and the context-free-action list are
/// fixed at zero: this engine does not expose them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Expiration, unix seconds. Caller-supplied, never wall-clock-derived.
    pub expiration: u32,
    /// Low 16 bits of the reference block number.
    pub ref_block_number: u16,
    /// Prefix derived from the reference block id.
    pub ref_block_prefix: u32,
    /// The actions, in wire order. Order is part of the signed digest.
    pub actions: Vec<Action>,
}

impl Transaction {
    /// Writes the signing preimage: the chain id, the serialized
    /// transaction body, and the 32-zero-byte digest placeholder for the
    /// (always empty) context-free data.
    pub fn write_signing_preimage<W: Write>(
        &self,
        writer: &mut W,
        chain_id: &[u8; 32],
    ) -> SerResult<usize> {
        let mut len = writer.write(chain_id)?;
        len += self.serialize(writer)?;
        len += writer.write(&[0u8; 32])?;
        Ok(len)
    }
}

impl Ser for Transaction {
    fn serialized_length(&self) -> usize {
        let mut len = 4 + 2 + 4; // expiration, ref block number, ref block prefix
        len += 4; // zero resource limits and zero context-free actions
        len += var_uint_len(self.actions.len() as u64);
        len += self.actions.serialized_length();
        len
    }

    fn serialize<W: Write>(&self, writer: &mut W) -> SerResult<usize> {
        let mut len = self.expiration.serialize(writer)?;
        len += self.ref_block_number.serialize(writer)?;
        len += self.ref_block_prefix.serialize(writer)?;
        len += write_var_uint(writer, 0)?; // max_net_usage_words
        len += 0u8.serialize(writer)?; // max_cpu_usage_ms
        len += write_var_uint(writer, 0)?; // delay_sec
        len += write_var_uint(writer, 0)?; // context-free actions
        len += write_var_uint(writer, self.actions.len() as u64)?;
        len += self.actions.serialize(writer)?;
        Ok(len)
    }
}

/// The signed-transaction envelope submitted to a node. Key order is part
/// of the wire contract.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SignedTransaction {
    /// Signature texts. Always a single element in this engine.
    pub signatures: Vec<String>,
    /// Always the literal `none`.
    pub compression: String,
    /// Always empty.
    pub packed_context_free_data: String,
    /// Lowercase hex of the serialized transaction body.
    pub packed_trx: String,
}

impl SignedTransaction {
    /// Wrap a packed transaction and its signature in the envelope.
    pub fn new(signature: String, packed_trx: String) -> Self {
        Self {
            signatures: vec![signature],
            compression: "none".to_owned(),
            packed_context_free_data: String::new(),
            packed_trx,
        }
    }

    /// Renders the envelope in the node submission layout: one key per
    /// line, keys in wire order, no indentation.
    pub fn to_json(&self) -> String {
        let sigs: Vec<String> = self.signatures.iter().map(|s| format!("\"{}\"", s)).collect();
        format!(
            "{{\n\"signatures\": [{}],\n\"compression\": \"{}\",\n\"packed_context_free_data\": \"{}\",\n\"packed_trx\": \"{}\"\n}}",
            sigs.join(", "),
            self.compression,
            self.packed_context_free_data,
            self.packed_trx,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::action::Authorization;
    use crate::types::data::{ActionData, RegFioAddressData};
    use fio_core::Ser;

    fn reg_action() -> Action {
        let data = ActionData::RegFioAddress(RegFioAddressData {
            fio_address: "adam@fiotestnet".to_owned(),
            owner_public_key: "FIO6m1fMdTpRkRBnedvYshXCxLFiC5suRU8KDfx8xxtXp2hntxpnf"
                .to_owned(),
            fee: 5000000000,
            actor: "qdfejz2a5wpl".parse().unwrap(),
            tpid: "rewards@wallet".to_owned(),
        });
        let mut payload = vec![];
        data.serialize(&mut payload).unwrap();
        Action {
            account: data.account(),
            name: data.name(),
            auth: vec![Authorization {
                actor: "qdfejz2a5wpl".parse().unwrap(),
                permission: "active".parse().unwrap(),
            }],
            data: payload,
            layout: data.layout(),
        }
    }

    #[test]
    fn it_serializes_the_reg_address_transaction() {
        let tx = Transaction {
            expiration: 1579784511,
            ref_block_number: 39881,
            ref_block_prefix: 4279583376,
            actions: vec![reg_action()],
        };
        assert_eq!(
            tx.serialize_hex().unwrap(),
            "3f99295ec99b904215ff0000000001003056372503a85b0000c6eaa66498ba01102b2f46fca756b200000000a8ed3232650f6164616d4066696f746573746e65743546494f366d31664d645470526b52426e6564765973685843784c4669433573755255384b44667838787874587032686e7478706e6600f2052a01000000102b2f46fca756b20e726577617264734077616c6c657400"
        );
        assert_eq!(tx.serialized_length(), tx.serialize_hex().unwrap().len() / 2);
    }

    #[test]
    fn it_prefixes_and_pads_the_signing_preimage() {
        let tx = Transaction {
            expiration: 1579784511,
            ref_block_number: 39881,
            ref_block_prefix: 4279583376,
            actions: vec![reg_action()],
        };
        let chain_id = [0x11u8; 32];
        let mut preimage = vec![];
        tx.write_signing_preimage(&mut preimage, &chain_id).unwrap();
        assert_eq!(preimage.len(), 32 + tx.serialized_length() + 32);
        assert_eq!(&preimage[..32], &chain_id[..]);
        assert_eq!(&preimage[preimage.len() - 32..], &[0u8; 32][..]);
    }

    #[test]
    fn it_renders_the_envelope_layout() {
        let st = SignedTransaction::new("SIG_K1_x".to_owned(), "00aa".to_owned());
        assert_eq!(
            st.to_json(),
            "{\n\"signatures\": [\"SIG_K1_x\"],\n\"compression\": \"none\",\n\"packed_context_free_data\": \"\",\n\"packed_trx\": \"00aa\"\n}"
        );
    }
}
