use lucidity::utils::{bytes_to_hex_str, hex_str_to_bytes};
use lucidity::{Address, Transaction};
use num256::Uint256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;

/// Serializes a slice of data as the "UNFORMATTED DATA" form the
/// JSONRPC API requires, 0x prefixed hex.
pub fn data_serialize<S>(x: &[u8], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format!("0x{}", bytes_to_hex_str(x)))
}

pub fn data_deserialize<'de, D>(d: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    hex_str_to_bytes(&s).map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq, Hash)]
pub struct Data(
    #[serde(
        serialize_with = "data_serialize",
        deserialize_with = "data_deserialize"
    )]
    pub Vec<u8>,
);

impl Deref for Data {
    type Target = Vec<u8>;
    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl From<Vec<u8>> for Data {
    fn from(v: Vec<u8>) -> Self {
        Data(v)
    }
}

/// A Uint256 serialized as minimal `0x` hex, the integer quantity form
/// of the JSONRPC API.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UnpaddedHex(pub Uint256);

impl Serialize for UnpaddedHex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:#x}", self.0))
    }
}

impl From<Uint256> for UnpaddedHex {
    fn from(v: Uint256) -> Self {
        UnpaddedHex(v)
    }
}

impl From<u64> for UnpaddedHex {
    fn from(v: u64) -> Self {
        UnpaddedHex(v.into())
    }
}

/// The transaction shape eth_call, eth_estimateGas and
/// eth_sendTransaction accept. The node understands the Ethereum
/// compatible `gas`/`gasPrice` aliases for nrg, which is what the
/// reference client sends.
#[derive(Serialize, Clone, Eq, PartialEq, Debug)]
pub struct TransactionRequest {
    /// The address the transaction is sent from
    pub from: Address,
    /// The address the transaction is directed to, absent when deploying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    /// Energy provided for execution, unused energy is returned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<UnpaddedHex>,
    /// Price paid per unit of energy
    #[serde(rename = "gasPrice")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<UnpaddedHex>,
    /// Value sent with this transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<UnpaddedHex>,
    /// Compiled contract code or an ABI encoded call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<UnpaddedHex>,
}

impl TransactionRequest {
    /// The minimal request for simulating a contract call.
    pub fn quick_call(from: Address, to: Address, payload: Vec<u8>) -> TransactionRequest {
        TransactionRequest {
            from,
            to: Some(to),
            gas: None,
            gas_price: None,
            value: None,
            data: Some(Data(payload)),
            nonce: None,
        }
    }

    pub fn from_transaction(input: &Transaction, from: Address) -> TransactionRequest {
        TransactionRequest {
            from,
            to: input.to,
            gas: Some(input.nrg.into()),
            gas_price: Some(input.nrg_price.into()),
            value: Some(input.value.into()),
            data: Some(input.data.clone().into()),
            nonce: Some(input.nonce.into()),
        }
    }
}

/// As received by getTransactionByHash
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionResponse {
    /// hash of the block containing this transaction, null when pending
    #[serde(rename = "blockHash")]
    pub block_hash: Option<Data>,
    /// number of the block containing this transaction, null when pending
    #[serde(rename = "blockNumber")]
    pub block_number: Option<Uint256>,
    pub from: Address,
    /// energy provided by the sender
    pub gas: Uint256,
    /// energy price provided by the sender
    #[serde(rename = "gasPrice")]
    pub gas_price: Uint256,
    /// the nrg aliases some kernels report alongside the gas names
    pub nrg: Option<Uint256>,
    #[serde(rename = "nrgPrice")]
    pub nrg_price: Option<Uint256>,
    pub hash: Data,
    /// the data sent along with the transaction
    pub input: Data,
    pub nonce: Uint256,
    /// null for a contract creation transaction
    pub to: Option<Address>,
    /// microsecond timestamp signed into the transaction
    pub timestamp: Option<Uint256>,
    #[serde(rename = "transactionIndex")]
    pub transaction_index: Option<Uint256>,
    pub value: Uint256,
}

impl TransactionResponse {
    pub fn get_block_number(&self) -> Option<Uint256> {
        self.block_number
    }

    pub fn get_nonce(&self) -> Uint256 {
        self.nonce
    }
}

/// As received by getTransactionReceipt
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    #[serde(rename = "transactionHash")]
    pub transaction_hash: Data,
    #[serde(rename = "transactionIndex")]
    pub transaction_index: Option<Uint256>,
    #[serde(rename = "blockHash")]
    pub block_hash: Option<Data>,
    #[serde(rename = "blockNumber")]
    pub block_number: Option<Uint256>,
    pub from: Address,
    pub to: Option<Address>,
    #[serde(rename = "cumulativeGasUsed")]
    pub cumulative_gas_used: Uint256,
    #[serde(rename = "gasUsed")]
    pub gas_used: Uint256,
    /// The created contract address for a deployment, otherwise null
    #[serde(rename = "contractAddress")]
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
    /// 1 for success, 0 for failure
    pub status: Option<Uint256>,
}

impl TransactionReceipt {
    pub fn success(&self) -> bool {
        matches!(&self.status, Some(status) if *status == 1u8.into())
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Eq, PartialEq)]
pub struct Log {
    /// true when the log was removed due to a chain reorganization
    pub removed: Option<bool>,
    #[serde(rename = "logIndex")]
    pub log_index: Option<Uint256>,
    #[serde(rename = "transactionIndex")]
    pub transaction_index: Option<Uint256>,
    #[serde(rename = "transactionHash")]
    pub transaction_hash: Option<Data>,
    #[serde(rename = "blockHash")]
    pub block_hash: Option<Data>,
    #[serde(rename = "blockNumber")]
    pub block_number: Option<Uint256>,
    /// address this log originated from
    pub address: Address,
    /// the non-indexed arguments of the log
    pub data: Data,
    /// indexed arguments; the first topic is the event's signature hash
    pub topics: Vec<Data>,
}

/// eth_syncing returns false when idle or an object while catching up
#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SyncingStatus {
    NotSyncing(bool),
    #[serde(rename_all = "camelCase")]
    Syncing {
        starting_block: Uint256,
        current_block: Uint256,
        highest_block: Uint256,
    },
}

/// Used to configure send_transaction
#[derive(Debug, Clone, PartialEq)]
pub enum SendTxOption {
    NrgPrice(Uint256),
    NrgPriceMultiplier(f32),
    NrgLimitMultiplier(f32),
    NrgLimit(Uint256),
    Nonce(Uint256),
    /// Microseconds since the epoch, in place of the system clock
    Timestamp(Uint256),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_request_skips_empty_fields() {
        let from: Address = "0xa05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687"
            .parse()
            .unwrap();
        let to: Address = "0xa07c95cc8729a0503c5ad50eb37ec8a27cd22d65de3bb225982ec55201366920"
            .parse()
            .unwrap();
        let req = TransactionRequest::quick_call(from, to, vec![0xde, 0xad]);
        let s = serde_json::to_string(&req).unwrap();
        assert!(s.contains(r#""data":"0xdead""#));
        assert!(!s.contains("gasPrice"));
        assert!(!s.contains("nonce"));
    }

    #[test]
    fn unpadded_hex_is_minimal() {
        let v = UnpaddedHex(Uint256::from(21_000u32));
        assert_eq!(serde_json::to_string(&v).unwrap(), r#""0x5208""#);
    }

    #[test]
    fn deserialize_receipt() {
        let receipt = r#"{
            "transactionHash": "0x5ab2",
            "transactionIndex": "0x0",
            "blockHash": "0x1d59",
            "blockNumber": "0x100",
            "from": "0xa05a3889b106e75baa621b8cc719679a3dbdd799afac1ca6b42d03dc93a23687",
            "to": null,
            "cumulativeGasUsed": "0x5208",
            "gasUsed": "0x5208",
            "contractAddress": "0xa07c95cc8729a0503c5ad50eb37ec8a27cd22d65de3bb225982ec55201366920",
            "logs": [],
            "status": "0x1"
        }"#;
        let parsed: TransactionReceipt = serde_json::from_str(receipt).unwrap();
        assert!(parsed.success());
        assert!(parsed.to.is_none());
        assert!(parsed.contract_address.is_some());
        assert_eq!(parsed.gas_used, 21_000u32.into());
    }

    #[test]
    fn deserialize_syncing_status() {
        let idle: SyncingStatus = serde_json::from_str("false").unwrap();
        assert_eq!(idle, SyncingStatus::NotSyncing(false));
        let busy: SyncingStatus = serde_json::from_str(
            r#"{"startingBlock": "0x1", "currentBlock": "0x2", "highestBlock": "0x3"}"#,
        )
        .unwrap();
        match busy {
            SyncingStatus::Syncing { current_block, .. } => {
                assert_eq!(current_block, 2u8.into());
            }
            _ => panic!(),
        }
    }
}
