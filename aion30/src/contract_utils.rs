//! Typed contract interaction helpers built on the ABI codec: encode the
//! call on the way out, decode the return data on the way back.
use crate::client::Aion;
use crate::jsonrpc::error::Web3Error;
use crate::types::SendTxOption;
use lucidity::abi::{decode_parameters, encode_call, Token};
use lucidity::utils::bytes_to_hex_str;
use lucidity::{Address, PrivateKey, Uint256};

impl Aion {
    /// Simulate a read only contract function and decode its return data
    /// against `return_types`.
    ///
    /// ```no_run
    /// # use aion30::client::Aion;
    /// # use std::time::Duration;
    /// # async fn example(token: lucidity::Address, owner: lucidity::Address) {
    /// let aion = Aion::new("http://127.0.0.1:8545", Duration::from_secs(5));
    /// let decoded = aion
    ///     .contract_query(token, "balanceOf(address)", &[owner.into()], owner, &["uint128"])
    ///     .await
    ///     .unwrap();
    /// # }
    /// ```
    pub async fn contract_query(
        &self,
        contract: Address,
        signature: &str,
        params: &[Token],
        own_address: Address,
        return_types: &[&str],
    ) -> Result<Vec<Token>, Web3Error> {
        let payload = encode_call(signature, params)?;
        let data = self
            .simulate_transaction(contract, payload, own_address)
            .await?;
        let decoded =
            decode_parameters(return_types, &format!("0x{}", bytes_to_hex_str(&data)))?;
        Ok(decoded)
    }

    /// Call a state changing contract function and return the txhash.
    pub async fn contract_send(
        &self,
        contract: Address,
        signature: &str,
        params: &[Token],
        value: Uint256,
        secret: PrivateKey,
        options: Vec<SendTxOption>,
    ) -> Result<Uint256, Web3Error> {
        let payload = encode_call(signature, params)?;
        self.send_transaction(contract, payload, value, secret, options)
            .await
    }

    /// The ATS token balance of an account.
    pub async fn get_token_balance(
        &self,
        token: Address,
        owner: Address,
    ) -> Result<Uint256, Web3Error> {
        let decoded = self
            .contract_query(token, "balanceOf(address)", &[owner.into()], owner, &["uint128"])
            .await?;
        match decoded.first() {
            Some(Token::Uint(balance)) => Ok(*balance),
            _ => Err(Web3Error::ContractCallError(
                "balanceOf(address) returned no balance".to_string(),
            )),
        }
    }

    /// Send an ATS token to the target address, returning the txhash.
    pub async fn send_token(
        &self,
        token: Address,
        to: Address,
        amount: Uint256,
        secret: PrivateKey,
        options: Vec<SendTxOption>,
    ) -> Result<Uint256, Web3Error> {
        self.contract_send(
            token,
            "send(address,uint128,bytes)",
            &[to.into(), amount.into(), Token::Bytes(Vec::new())],
            0u8.into(),
            secret,
            options,
        )
        .await
    }
}
