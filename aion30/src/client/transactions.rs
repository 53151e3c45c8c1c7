use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use super::{core::Aion, AION_INTRINSIC_NRG};
use crate::{
    jsonrpc::error::Web3Error,
    types::{SendTxOption, TransactionRequest},
};
use lucidity::constants::TRANSACTION_TYPE;
use lucidity::utils::bytes_to_hex_str;
use lucidity::{Address, PrivateKey, Transaction};
use futures::future::join3;
use num256::Uint256;
use num_traits::ToPrimitive;
use tokio::time::sleep;

// The state altering part of the "eth" namespace, and convenience
// functions for transaction generation

/// Scale an energy or price value by a float multiplier, saturating
/// rather than wrapping.
fn apply_multiplier(value: Uint256, multiplier: f32) -> Uint256 {
    let scaled = value.to_u128().map_or(u128::MAX as f64, |v| v as f64) * multiplier as f64;
    Uint256::from(scaled as u128)
}

/// Microseconds since the epoch, the timestamp format signed into
/// transactions.
fn timestamp_now() -> Uint256 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    Uint256::from(elapsed.as_micros())
}

impl Aion {
    pub async fn eth_send_raw_transaction(&self, data: Vec<u8>) -> Result<Uint256, Web3Error> {
        self.jsonrpc_client
            .request_method(
                "eth_sendRawTransaction",
                vec![format!("0x{}", bytes_to_hex_str(&data))],
                self.timeout,
            )
            .await
    }

    /// Publishes a locally signed transaction and returns the txhash on
    /// success. To wait until it actually executes on chain use
    /// `wait_for_transaction()`.
    pub async fn send_prepared_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<Uint256, Web3Error> {
        self.eth_send_raw_transaction(transaction.to_bytes()?).await
    }

    /// Builds and signs a transaction, filling in the nonce, energy
    /// price, energy limit and timestamp from the node and system clock
    /// unless overridden through `options`. The result can be published
    /// with `send_prepared_transaction()`.
    pub async fn prepare_transaction(
        &self,
        to: Option<Address>,
        data: Vec<u8>,
        value: Uint256,
        secret: PrivateKey,
        options: Vec<SendTxOption>,
    ) -> Result<Transaction, Web3Error> {
        let mut nrg_price = None;
        let mut nrg_price_multiplier = 1f32;
        let mut nrg_limit_multiplier = 1f32;
        let mut nrg_limit = None;
        let mut nonce = None;
        let mut timestamp = None;

        for option in options {
            match option {
                SendTxOption::NrgPrice(np) => nrg_price = Some(np),
                SendTxOption::NrgPriceMultiplier(npm) => nrg_price_multiplier = npm,
                SendTxOption::NrgLimitMultiplier(nlm) => nrg_limit_multiplier = nlm,
                SendTxOption::NrgLimit(nl) => nrg_limit = Some(nl),
                SendTxOption::Nonce(n) => nonce = Some(n),
                SendTxOption::Timestamp(t) => timestamp = Some(t),
            }
        }

        let own_address = secret.to_address();
        let (chain_nonce, chain_price, balance) = join3(
            self.eth_get_transaction_count(own_address),
            self.eth_gas_price(),
            self.eth_get_balance(own_address),
        )
        .await;
        let balance = balance?;

        if balance < AION_INTRINSIC_NRG.into() {
            // the balance cannot even pay for intrinsic energy
            return Err(Web3Error::InsufficientNrg {
                balance,
                base_nrg: AION_INTRINSIC_NRG.into(),
                nrg_required: AION_INTRINSIC_NRG.into(),
            });
        }

        let nonce = match nonce {
            Some(n) => n,
            None => chain_nonce?,
        };
        let nrg_price = match nrg_price {
            Some(np) => np,
            None => apply_multiplier(chain_price?, nrg_price_multiplier),
        };

        let nrg = match nrg_limit {
            Some(nl) => nl,
            None => {
                let estimate = self
                    .eth_estimate_gas(TransactionRequest {
                        from: own_address,
                        to,
                        gas: None,
                        gas_price: None,
                        value: Some(value.into()),
                        data: Some(data.clone().into()),
                        nonce: Some(nonce.into()),
                    })
                    .await?;
                apply_multiplier(estimate, nrg_limit_multiplier)
            }
        };

        let required = value + nrg * nrg_price;
        if balance < required {
            return Err(Web3Error::InsufficientNrg {
                balance,
                base_nrg: nrg_price,
                nrg_required: required,
            });
        }

        let transaction = Transaction {
            nonce,
            to,
            value,
            data,
            timestamp: timestamp.unwrap_or_else(timestamp_now),
            nrg,
            nrg_price,
            transaction_type: TRANSACTION_TYPE,
            signature: None,
        };

        Ok(transaction.sign(&secret))
    }

    /// Sends a transaction which changes blockchain state, abstracting
    /// away nonce, energy and timestamp details.
    pub async fn send_transaction(
        &self,
        to: Address,
        data: Vec<u8>,
        value: Uint256,
        secret: PrivateKey,
        options: Vec<SendTxOption>,
    ) -> Result<Uint256, Web3Error> {
        let transaction = self
            .prepare_transaction(Some(to), data, value, secret, options)
            .await?;
        self.send_prepared_transaction(transaction).await
    }

    /// Runs a contract call against the node without committing anything
    /// to the chain, returning the raw return data.
    pub async fn simulate_transaction(
        &self,
        contract: Address,
        payload: Vec<u8>,
        own_address: Address,
    ) -> Result<Vec<u8>, Web3Error> {
        let response = self
            .eth_call(TransactionRequest::quick_call(
                own_address,
                contract,
                payload,
            ))
            .await?;
        Ok(response.0)
    }

    /// Polls for the receipt of a published transaction until it enters
    /// the chain or the timeout elapses.
    pub async fn wait_for_transaction(
        &self,
        txid: Uint256,
        timeout: Duration,
    ) -> Result<crate::types::TransactionReceipt, Web3Error> {
        const POLL_INTERVAL: Duration = Duration::from_secs(1);
        let start = Instant::now();
        loop {
            if let Some(receipt) = self.eth_get_transaction_receipt(txid).await? {
                return Ok(receipt);
            }
            if Instant::now() - start > timeout {
                return Err(Web3Error::TransactionTimeout);
            }
            trace!("still waiting for transaction {txid:#x}");
            sleep(POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_scales_and_saturates() {
        assert_eq!(
            apply_multiplier(10_000_000_000u64.into(), 1.5),
            15_000_000_000u64.into()
        );
        assert_eq!(apply_multiplier(21_000u32.into(), 1.0), 21_000u32.into());
    }

    #[test]
    fn timestamps_are_microseconds() {
        let ts = timestamp_now();
        // between 2001 and 2286 in microseconds
        assert!(ts > 1_000_000_000_000_000u64.into());
        assert!(ts < 10_000_000_000_000_000_000u128.into());
    }
}
