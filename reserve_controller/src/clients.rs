//! Client interfaces for the out-of-contract collaborators.
//!
//! The controller talks to its collaborators through narrow interfaces
//! rather than importing the implementing contracts: a two-price feed and a
//! restricted mint/burn ledger. Both reserve ledgers and the backed token
//! ledger satisfy the same ledger interface.

use soroban_sdk::{contractclient, Address, Env};

/// Two-asset price feed, both prices at 8-decimal fixed precision.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    fn get_prices(env: Env) -> (i128, i128);
}

/// Restricted fungible ledger: mint, burn-from and balance query only.
#[contractclient(name = "TokenLedgerClient")]
pub trait TokenLedger {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn_from(env: Env, from: Address, amount: i128);
    fn balance_of(env: Env, account: Address) -> i128;
}
