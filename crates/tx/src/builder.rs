//! The transaction-building façade: one entry point per supported user
//! intent. This is the only module that knows which action kind serves
//! which intent.

use fio_core::{Address, Name, Ser};

use crate::signer::{sign, PrivateKey};
use crate::types::action::{Action, Authorization};
use crate::types::data::{ActionData, AddPubAddressData, PublicAddress, RegFioAddressData};
use crate::types::transaction::{ChainParams, SignedTransaction, Transaction};
use crate::{TxError, TxResult};

/// The `active` permission name.
const PERMISSION_ACTIVE: Name = Name(0x3232eda800000000);

/// The chain caps a FIO address at 64 characters.
const MAX_FIO_ADDRESS_LEN: usize = 64;

/// The chain caps an `addaddress` call at five bindings.
const MAX_PUB_ADDRESSES: usize = 5;

/// Builds, signs, and renders transactions for the supported intents.
/// Every entry point is pure: expiration is caller-supplied, and fixed
/// inputs produce byte-identical output.
pub struct TransactionBuilder;

impl TransactionBuilder {
    /// Default wallet-attribution (tpid) FIO address.
    pub const WALLET_FIO_NAME: &'static str = "rewards@wallet";

    /// Builds and signs a `regaddress` transaction registering `fio_name`
    /// to the holder of `owner_public_key`. Returns the JSON envelope.
    #[allow(clippy::too_many_arguments)]
    pub fn create_reg_fio_address(
        address: &Address,
        key: &PrivateKey,
        fio_name: &str,
        owner_public_key: &str,
        chain_params: &ChainParams,
        fee: u64,
        tpid: &str,
        expiration: u32,
    ) -> TxResult<String> {
        check_fio_address(fio_name)?;
        if owner_public_key.is_empty() {
            return Err(TxError::InvalidInput("owner public key must not be empty"));
        }
        let data = ActionData::RegFioAddress(RegFioAddressData {
            fio_address: fio_name.to_owned(),
            owner_public_key: owner_public_key.to_owned(),
            fee,
            actor: address.actor(),
            tpid: tpid.to_owned(),
        });
        Self::build_and_sign(data, address, key, chain_params, expiration)
    }

    /// Builds and signs an `addaddress` transaction binding public
    /// addresses of other chains to `fio_name`, preserving pair order.
    /// Returns the JSON envelope.
    #[allow(clippy::too_many_arguments)]
    pub fn create_add_pub_address(
        address: &Address,
        key: &PrivateKey,
        fio_name: &str,
        pub_addresses: &[PublicAddress],
        chain_params: &ChainParams,
        fee: u64,
        tpid: &str,
        expiration: u32,
    ) -> TxResult<String> {
        check_fio_address(fio_name)?;
        if pub_addresses.len() > MAX_PUB_ADDRESSES {
            return Err(TxError::InvalidInput(
                "at most five public addresses per call",
            ));
        }
        let data = ActionData::AddPubAddress(AddPubAddressData {
            fio_address: fio_name.to_owned(),
            public_addresses: pub_addresses.to_vec(),
            fee,
            actor: address.actor(),
            tpid: tpid.to_owned(),
        });
        Self::build_and_sign(data, address, key, chain_params, expiration)
    }

    /// The shared pipeline: payload -> action envelope -> single-action
    /// transaction -> signature -> JSON envelope. Any failure aborts the
    /// call; no partial output is ever produced.
    fn build_and_sign(
        data: ActionData,
        address: &Address,
        key: &PrivateKey,
        chain_params: &ChainParams,
        expiration: u32,
    ) -> TxResult<String> {
        let mut payload = vec![];
        data.serialize(&mut payload)?;

        let action = Action {
            account: data.account(),
            name: data.name(),
            auth: vec![Authorization {
                actor: address.actor(),
                permission: PERMISSION_ACTIVE,
            }],
            data: payload,
            layout: data.layout(),
        };

        let tx = Transaction {
            expiration,
            ref_block_number: chain_params.ref_block_number,
            ref_block_prefix: chain_params.ref_block_prefix,
            actions: vec![action],
        };

        let signature = sign(&tx, &chain_params.chain_id, key)?;
        let packed_trx = tx.serialize_hex()?;
        Ok(SignedTransaction::new(signature.to_string(), packed_trx).to_json())
    }
}

fn check_fio_address(fio_name: &str) -> TxResult<()> {
    if fio_name.is_empty() {
        return Err(TxError::InvalidInput("fio address must not be empty"));
    }
    if fio_name.len() > MAX_FIO_ADDRESS_LEN {
        return Err(TxError::InvalidInput("fio address longer than 64 characters"));
    }
    Ok(())
}
