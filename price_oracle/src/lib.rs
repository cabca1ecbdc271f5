#![no_std]

//! # Reserve Asset Price Feed
//!
//! A minimal trusted price source for the two reserve assets backing the IC
//! token. An admin posts both prices at a fixed 8-decimal precision; the
//! reserve controller reads them when allocating or valuing reserves.
//!
//! A stored price of zero means "unavailable" - dependent operations in the
//! controller reject it with their own oracle error. This contract does no
//! aggregation or staleness tracking; it is a single trusted value source.

use soroban_sdk::{contract, contracterror, contractevent, contractimpl, contracttype, Address, Env};

/// Fixed fractional precision of both published prices.
pub const PRICE_DECIMALS: u32 = 8;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum OracleError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// A published price is negative
    InvalidPrice = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Admin,
    PriceA,
    PriceB,
}

#[contractevent(topics = ["IcOracle", "PRICES"])]
pub struct PricesUpdated {
    pub price_a: i128,
    pub price_b: i128,
    pub timestamp: u64,
}

#[contract]
pub struct PriceOracle;

#[contractimpl]
impl PriceOracle {
    /// Initialize the oracle with the admin allowed to post prices.
    pub fn initialize(env: Env, admin: Address) -> Result<(), OracleError> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(OracleError::AlreadyInitialized);
        }
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &admin);
        Ok(())
    }

    /// Publish both asset prices at 8-decimal precision.
    ///
    /// Zero is accepted and marks the price as unavailable; negative values
    /// are rejected.
    pub fn set_prices(env: Env, price_a: i128, price_b: i128) -> Result<(), OracleError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(OracleError::NotInitialized)?;
        admin.require_auth();

        if price_a < 0 || price_b < 0 {
            return Err(OracleError::InvalidPrice);
        }

        env.storage().instance().set(&DataKey::PriceA, &price_a);
        env.storage().instance().set(&DataKey::PriceB, &price_b);

        PricesUpdated {
            price_a,
            price_b,
            timestamp: env.ledger().timestamp(),
        }
        .publish(&env);

        Ok(())
    }

    /// Current prices for (asset A, asset B). Unset prices read as zero.
    pub fn get_prices(env: Env) -> (i128, i128) {
        (Self::get_price_a(env.clone()), Self::get_price_b(env))
    }

    pub fn get_price_a(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::PriceA)
            .unwrap_or(0)
    }

    pub fn get_price_b(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::PriceB)
            .unwrap_or(0)
    }

    pub fn decimals(_env: Env) -> u32 {
        PRICE_DECIMALS
    }
}
