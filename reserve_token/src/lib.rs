#![no_std]

//! # Reserve Asset Ledger
//!
//! A restricted fungible balance ledger for one reserve asset backing the IC
//! token. Two instances of this contract are deployed: one for the
//! BTC-backed reserve, one for the gold-backed reserve.
//!
//! ## Features
//! - Mint and burn restricted to a single privileged minter (the reserve
//!   controller), wired after deployment
//! - Holder-to-holder transfers gated by the external KYC registry on both
//!   legs
//! - 18-decimal fixed-point amounts
//!
//! ## Security
//! - Minting authority is a single address; the controller authorizes calls
//!   as the direct contract invoker
//! - Mint and burn are not transfers and bypass the KYC gate by construction

use soroban_sdk::{contract, contractclient, contractevent, contractimpl, Address, Env, String};

mod error;
mod storage;

pub use error::TokenError;

/// Fixed-point precision shared by all ledgers in the system.
pub const TOKEN_DECIMALS: u32 = 18;

/// KYC predicate exposed by the reserve controller.
#[contractclient(name = "KycRegistryClient")]
pub trait KycRegistry {
    fn is_approved(env: Env, account: Address) -> bool;
}

// ============================================================================
// Events
// ============================================================================

#[contractevent(topics = ["IcReserveToken", "MINT"])]
pub struct Minted {
    pub to: Address,
    pub amount: i128,
}

#[contractevent(topics = ["IcReserveToken", "BURN"])]
pub struct Burned {
    pub from: Address,
    pub amount: i128,
}

#[contractevent(topics = ["IcReserveToken", "TRANSFER"])]
pub struct Transferred {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct ReserveToken;

#[contractimpl]
impl ReserveToken {
    /// Initialize the ledger with its admin and token metadata.
    pub fn initialize(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
    ) -> Result<(), TokenError> {
        if storage::has_admin(&env) {
            return Err(TokenError::AlreadyInitialized);
        }
        admin.require_auth();

        storage::set_admin(&env, &admin);
        storage::set_name(&env, &name);
        storage::set_symbol(&env, &symbol);

        Ok(())
    }

    /// Wire the privileged minter (the reserve controller). Admin only.
    ///
    /// Set after deployment to break the ledger/controller reference cycle.
    pub fn set_minter(env: Env, minter: Address) -> Result<(), TokenError> {
        let admin = storage::get_admin(&env).ok_or(TokenError::NotInitialized)?;
        admin.require_auth();
        storage::set_minter(&env, &minter);
        Ok(())
    }

    /// Wire the KYC registry read on every transfer. Admin only.
    pub fn set_kyc_registry(env: Env, registry: Address) -> Result<(), TokenError> {
        let admin = storage::get_admin(&env).ok_or(TokenError::NotInitialized)?;
        admin.require_auth();
        storage::set_kyc_registry(&env, &registry);
        Ok(())
    }

    /// Mint new units to an account. Minter only.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        let minter = storage::get_minter(&env).ok_or(TokenError::Unauthorized)?;
        minter.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let balance = storage::get_balance(&env, &to);
        storage::set_balance(&env, &to, balance + amount);
        storage::set_total_supply(&env, storage::get_total_supply(&env) + amount);

        Minted { to, amount }.publish(&env);

        Ok(())
    }

    /// Burn units from an account. Minter only.
    pub fn burn_from(env: Env, from: Address, amount: i128) -> Result<(), TokenError> {
        let minter = storage::get_minter(&env).ok_or(TokenError::Unauthorized)?;
        minter.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let balance = storage::get_balance(&env, &from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        storage::set_balance(&env, &from, balance - amount);
        storage::set_total_supply(&env, storage::get_total_supply(&env) - amount);

        Burned { from, amount }.publish(&env);

        Ok(())
    }

    /// Transfer between two holders. Both legs must be KYC approved.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let registry = storage::get_kyc_registry(&env).ok_or(TokenError::RegistryNotSet)?;
        let kyc = KycRegistryClient::new(&env, &registry);
        if !kyc.is_approved(&from) || !kyc.is_approved(&to) {
            return Err(TokenError::NotApproved);
        }

        let from_balance = storage::get_balance(&env, &from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        storage::set_balance(&env, &from, from_balance - amount);
        let to_balance = storage::get_balance(&env, &to);
        storage::set_balance(&env, &to, to_balance + amount);

        Transferred { from, to, amount }.publish(&env);

        Ok(())
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    pub fn balance_of(env: Env, account: Address) -> i128 {
        storage::get_balance(&env, &account)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::get_total_supply(&env)
    }

    pub fn name(env: Env) -> String {
        storage::get_name(&env)
    }

    pub fn symbol(env: Env) -> String {
        storage::get_symbol(&env)
    }

    pub fn decimals(_env: Env) -> u32 {
        TOKEN_DECIMALS
    }
}
