//! Byte-order safe and lightweight Aion web3 client.
//!
//! The node keeps Ethereum's JSONRPC method names, so the methods here
//! read like any web3 library even though transactions are signed with
//! Ed25519 and hashed with blake2b.

/// Base energy cost of a value transfer, used for balance sanity checks.
const AION_INTRINSIC_NRG: u32 = 21_000;

pub mod core;
pub mod query;
pub mod transactions;

// The actual client is defined in core.rs, export here
pub use core::Aion;

#[test]
#[ignore]
fn test_net_version() {
    use actix::System;
    use std::time::Duration;
    env_logger::init();
    let runner = System::new();
    let aion = Aion::new(
        "https://aion.api.nodesmith.io/v1/mainnet/jsonrpc",
        Duration::from_secs(30),
    );
    runner.block_on(async move {
        // the Aion mainnet network id
        assert_eq!(256u64, aion.net_version().await.unwrap());
    })
}
