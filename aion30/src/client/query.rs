use crate::jsonrpc::error::Web3Error;
use crate::types::{
    Data, SyncingStatus, TransactionReceipt, TransactionRequest, TransactionResponse,
};
use lucidity::Address;
use num256::Uint256;

use super::core::Aion;

// The query-only part of the "eth" namespace

impl Aion {
    /// The network id, 256 for the Aion mainnet.
    pub async fn net_version(&self) -> Result<u64, Web3Error> {
        let ret: String = self
            .jsonrpc_client
            .request_method("net_version", Vec::<String>::new(), self.timeout)
            .await?;
        Ok(ret.parse()?)
    }

    pub async fn eth_syncing(&self) -> Result<bool, Web3Error> {
        let status: SyncingStatus = self
            .jsonrpc_client
            .request_method("eth_syncing", Vec::<String>::new(), self.timeout)
            .await?;
        Ok(!matches!(status, SyncingStatus::NotSyncing(_)))
    }

    pub async fn eth_block_number(&self) -> Result<Uint256, Web3Error> {
        self.jsonrpc_client
            .request_method("eth_blockNumber", Vec::<String>::new(), self.timeout)
            .await
    }

    pub async fn eth_get_balance(&self, address: Address) -> Result<Uint256, Web3Error> {
        // a syncing node reports stale balances
        match self.eth_syncing().await? {
            false => {
                self.jsonrpc_client
                    .request_method(
                        "eth_getBalance",
                        vec![address.to_string(), "latest".to_string()],
                        self.timeout,
                    )
                    .await
            }
            true => Err(Web3Error::SyncingNode(
                "Cannot perform eth_getBalance".to_string(),
            )),
        }
    }

    pub async fn eth_get_transaction_count(&self, address: Address) -> Result<Uint256, Web3Error> {
        match self.eth_syncing().await? {
            false => {
                self.jsonrpc_client
                    .request_method(
                        "eth_getTransactionCount",
                        vec![address.to_string(), "latest".to_string()],
                        self.timeout,
                    )
                    .await
            }
            true => Err(Web3Error::SyncingNode(
                "Cannot perform eth_getTransactionCount".to_string(),
            )),
        }
    }

    /// The node's current energy price.
    pub async fn eth_gas_price(&self) -> Result<Uint256, Web3Error> {
        match self.eth_syncing().await? {
            false => {
                self.jsonrpc_client
                    .request_method("eth_gasPrice", Vec::<String>::new(), self.timeout)
                    .await
            }
            true => Err(Web3Error::SyncingNode(
                "Cannot perform eth_gas_price".to_string(),
            )),
        }
    }

    pub async fn eth_get_code(&self, address: Address) -> Result<Data, Web3Error> {
        self.jsonrpc_client
            .request_method(
                "eth_getCode",
                vec![address.to_string(), "latest".to_string()],
                self.timeout,
            )
            .await
    }

    /// Run a read only contract call against the latest state.
    pub async fn eth_call(&self, transaction: TransactionRequest) -> Result<Data, Web3Error> {
        match self.eth_syncing().await? {
            false => {
                self.jsonrpc_client
                    .request_method("eth_call", (transaction, "latest"), self.timeout)
                    .await
            }
            true => Err(Web3Error::SyncingNode(
                "Cannot perform eth_call".to_string(),
            )),
        }
    }

    pub async fn eth_estimate_gas(
        &self,
        transaction: TransactionRequest,
    ) -> Result<Uint256, Web3Error> {
        if let Ok(true) = self.eth_syncing().await {
            warn!("Aion node is still syncing, estimate may be based on stale state");
        }
        self.jsonrpc_client
            .request_method("eth_estimateGas", vec![transaction], self.timeout)
            .await
    }

    pub async fn eth_get_transaction_by_hash(
        &self,
        hash: Uint256,
    ) -> Result<Option<TransactionResponse>, Web3Error> {
        self.jsonrpc_client
            .request_method(
                "eth_getTransactionByHash",
                // This call takes a 32 byte hash, "{:#066x}" prints it
                // left padded with zeroes
                vec![format!("{hash:#066x}")],
                self.timeout,
            )
            .await
    }

    pub async fn eth_get_transaction_receipt(
        &self,
        hash: Uint256,
    ) -> Result<Option<TransactionReceipt>, Web3Error> {
        self.jsonrpc_client
            .request_method(
                "eth_getTransactionReceipt",
                vec![format!("{hash:#066x}")],
                self.timeout,
            )
            .await
    }

    /// Checks if an address has contract code deployed at it.
    pub async fn check_if_address_is_contract(&self, address: Address) -> Result<bool, Web3Error> {
        let code = self.eth_get_code(address).await?;
        Ok(!code.is_empty())
    }
}
