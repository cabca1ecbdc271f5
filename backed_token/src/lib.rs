#![no_std]

//! # Backed Token Ledger & Emergency Multisig Gate
//!
//! The fungible balance ledger for the IC primary currency, plus the 2-of-N
//! emergency control plane attached to it.
//!
//! ## Features
//! - Mint and burn restricted to a single privileged minter (the reserve
//!   controller); minting additionally blocked by a freeze flag
//! - Transfers gated by the external KYC registry on both legs and by a
//!   global pause flag
//! - 2-of-N signature-counting gate over pause/unpause, freeze/unfreeze and
//!   forced burn, keyed by a hash of (kind, params, nonce, network id)
//!
//! ## Security
//! - One shared strictly-incrementing nonce across all emergency operation
//!   kinds enforces a single linear history of emergency actions
//! - Each signer signs a given operation hash at most once; the effect fires
//!   exactly once, on the signature that crosses the threshold
//! - Signatures on an already-resolved hash are still recorded but have no
//!   further effect

use soroban_sdk::{
    contract, contractclient, contractevent, contractimpl, xdr::ToXdr, Address, BytesN, Env,
    String, Vec,
};

mod error;
mod storage;
mod types;

pub use error::TokenError;
pub use types::{EmergencyAction, EmergencyOp, OpKind};

/// Fixed-point precision shared by all ledgers in the system.
pub const TOKEN_DECIMALS: u32 = 18;

/// Signatures required before an emergency operation executes.
pub const EMERGENCY_THRESHOLD: u32 = 2;

/// KYC predicate exposed by the reserve controller.
#[contractclient(name = "KycRegistryClient")]
pub trait KycRegistry {
    fn is_approved(env: Env, account: Address) -> bool;
}

// ============================================================================
// Events
// ============================================================================

#[contractevent(topics = ["IcToken", "MINT"])]
pub struct Minted {
    pub to: Address,
    pub amount: i128,
}

#[contractevent(topics = ["IcToken", "BURN"])]
pub struct Burned {
    pub from: Address,
    pub amount: i128,
}

#[contractevent(topics = ["IcToken", "TRANSFER"])]
pub struct Transferred {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

#[contractevent(topics = ["IcToken", "PAUSE"])]
pub struct PauseChanged {
    pub paused: bool,
}

#[contractevent(topics = ["IcToken", "FREEZE"])]
pub struct MintFreezeChanged {
    pub frozen: bool,
}

#[contractevent(topics = ["IcToken", "EMG_SIGN"])]
pub struct EmergencySigned {
    pub op_hash: BytesN<32>,
    pub signer: Address,
    pub signature_count: u32,
}

#[contractevent(topics = ["IcToken", "EMG_EXEC"])]
pub struct EmergencyExecuted {
    pub op_hash: BytesN<32>,
    pub kind: u32,
    pub nonce: u64,
}

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct BackedToken;

#[contractimpl]
impl BackedToken {
    // ========================================================================
    // Initialization & Wiring
    // ========================================================================

    /// Initialize the ledger with its admin and the fixed emergency signer
    /// set (at least 2 pairwise-distinct addresses).
    pub fn initialize(
        env: Env,
        admin: Address,
        emergency_signers: Vec<Address>,
    ) -> Result<(), TokenError> {
        if storage::has_admin(&env) {
            return Err(TokenError::AlreadyInitialized);
        }
        admin.require_auth();

        if emergency_signers.len() < EMERGENCY_THRESHOLD {
            return Err(TokenError::InvalidSignerSet);
        }
        for i in 0..emergency_signers.len() {
            for j in (i + 1)..emergency_signers.len() {
                if emergency_signers.get_unchecked(i) == emergency_signers.get_unchecked(j) {
                    return Err(TokenError::InvalidSignerSet);
                }
            }
        }

        storage::set_admin(&env, &admin);
        storage::set_emergency_signers(&env, &emergency_signers);

        Ok(())
    }

    /// Wire the privileged minter (the reserve controller). Admin only.
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

    // ========================================================================
    // Ledger Functions
    // ========================================================================

    /// Mint new units to an account. Minter only; blocked while frozen.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        let minter = storage::get_minter(&env).ok_or(TokenError::Unauthorized)?;
        minter.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }
        if storage::is_minting_frozen(&env) {
            return Err(TokenError::MintingFrozen);
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
        Self::burn_internal(&env, &from, amount)
    }

    /// Transfer between two holders. Fails while paused; both legs must be
    /// KYC approved.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        from.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }
        if storage::is_paused(&env) {
            return Err(TokenError::Paused);
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

    pub fn balance_of(env: Env, account: Address) -> i128 {
        storage::get_balance(&env, &account)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::get_total_supply(&env)
    }

    pub fn paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn minting_frozen(env: Env) -> bool {
        storage::is_minting_frozen(&env)
    }

    pub fn name(env: Env) -> String {
        String::from_str(&env, "IC Token")
    }

    pub fn symbol(env: Env) -> String {
        String::from_str(&env, "IC")
    }

    pub fn decimals(_env: Env) -> u32 {
        TOKEN_DECIMALS
    }

    // ========================================================================
    // Emergency Gate
    // ========================================================================

    /// Sign the pause operation for the given nonce.
    pub fn sign_pause(env: Env, signer: Address, nonce: u64) -> Result<(), TokenError> {
        Self::sign(&env, signer, OpKind::Pause, None, None, nonce)
    }

    /// Sign the unpause operation for the given nonce.
    pub fn sign_unpause(env: Env, signer: Address, nonce: u64) -> Result<(), TokenError> {
        Self::sign(&env, signer, OpKind::Unpause, None, None, nonce)
    }

    /// Sign the freeze-minting operation for the given nonce.
    pub fn sign_freeze_minting(env: Env, signer: Address, nonce: u64) -> Result<(), TokenError> {
        Self::sign(&env, signer, OpKind::FreezeMinting, None, None, nonce)
    }

    /// Sign the unfreeze-minting operation for the given nonce.
    pub fn sign_unfreeze_minting(env: Env, signer: Address, nonce: u64) -> Result<(), TokenError> {
        Self::sign(&env, signer, OpKind::UnfreezeMinting, None, None, nonce)
    }

    /// Sign a forced burn of `amount` from `account` for the given nonce.
    pub fn sign_forced_burn(
        env: Env,
        signer: Address,
        account: Address,
        amount: i128,
        nonce: u64,
    ) -> Result<(), TokenError> {
        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }
        Self::sign(
            &env,
            signer,
            OpKind::ForcedBurn,
            Some(account),
            Some(amount),
            nonce,
        )
    }

    /// Last consumed emergency nonce; the next operation must carry this + 1.
    pub fn get_emergency_nonce(env: Env) -> u64 {
        storage::get_emergency_nonce(&env)
    }

    pub fn get_emergency_signers(env: Env) -> Vec<Address> {
        storage::get_emergency_signers(&env)
    }

    /// Signature-tracking record for an operation hash, if any.
    pub fn get_operation(env: Env, op_hash: BytesN<32>) -> Option<EmergencyOp> {
        storage::get_operation(&env, &op_hash)
    }

    /// Compute the operation hash a signer set converges on for an action.
    pub fn operation_hash(
        env: Env,
        kind: OpKind,
        account: Option<Address>,
        amount: Option<i128>,
        nonce: u64,
    ) -> BytesN<32> {
        Self::action_hash(
            &env,
            &EmergencyAction {
                kind: kind as u32,
                account,
                amount,
                nonce,
                network: env.ledger().network_id(),
            },
        )
    }

    // ========================================================================
    // Internal Helper Functions
    // ========================================================================

    fn sign(
        env: &Env,
        signer: Address,
        kind: OpKind,
        account: Option<Address>,
        amount: Option<i128>,
        nonce: u64,
    ) -> Result<(), TokenError> {
        if !storage::has_admin(env) {
            return Err(TokenError::NotInitialized);
        }
        signer.require_auth();

        if !storage::is_emergency_signer(env, &signer) {
            return Err(TokenError::NotASigner);
        }

        let action = EmergencyAction {
            kind: kind as u32,
            account: account.clone(),
            amount,
            nonce,
            network: env.ledger().network_id(),
        };
        let op_hash = Self::action_hash(env, &action);

        let mut op = match storage::get_operation(env, &op_hash) {
            Some(op) => op,
            None => {
                // First signature on a fresh hash consumes the next nonce
                let expected = storage::get_emergency_nonce(env) + 1;
                if nonce != expected {
                    return Err(TokenError::InvalidNonce);
                }
                storage::set_emergency_nonce(env, expected);

                EmergencyOp {
                    hash: op_hash.clone(),
                    kind: kind as u32,
                    account,
                    amount,
                    nonce,
                    signature_count: 0,
                    executed: false,
                    created_at: env.ledger().timestamp(),
                }
            }
        };

        if storage::has_signed(env, &op_hash, &signer) {
            return Err(TokenError::AlreadySigned);
        }
        storage::set_signed(env, &op_hash, &signer);
        op.signature_count += 1;

        EmergencySigned {
            op_hash: op_hash.clone(),
            signer,
            signature_count: op.signature_count,
        }
        .publish(env);

        // Execute exactly once, on the signature that crosses the threshold.
        // Later signers may keep signing a resolved hash; the count grows
        // with no further effect.
        if !op.executed && op.signature_count >= EMERGENCY_THRESHOLD {
            op.executed = true;
            Self::execute(env, &op)?;

            EmergencyExecuted {
                op_hash: op_hash.clone(),
                kind: op.kind,
                nonce: op.nonce,
            }
            .publish(env);
        }

        storage::set_operation(env, &op);

        Ok(())
    }

    fn execute(env: &Env, op: &EmergencyOp) -> Result<(), TokenError> {
        match op.kind {
            k if k == OpKind::Pause as u32 => {
                storage::set_paused(env, true);
                PauseChanged { paused: true }.publish(env);
            }
            k if k == OpKind::Unpause as u32 => {
                storage::set_paused(env, false);
                PauseChanged { paused: false }.publish(env);
            }
            k if k == OpKind::FreezeMinting as u32 => {
                storage::set_minting_frozen(env, true);
                MintFreezeChanged { frozen: true }.publish(env);
            }
            k if k == OpKind::UnfreezeMinting as u32 => {
                storage::set_minting_frozen(env, false);
                MintFreezeChanged { frozen: false }.publish(env);
            }
            _ => {
                // ForcedBurn carries its target in the record
                let account = op.account.clone().ok_or(TokenError::InvalidAmount)?;
                let amount = op.amount.ok_or(TokenError::InvalidAmount)?;
                Self::burn_internal(env, &account, amount)?;
            }
        }
        Ok(())
    }

    fn burn_internal(env: &Env, from: &Address, amount: i128) -> Result<(), TokenError> {
        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let balance = storage::get_balance(env, from);
        if balance < amount {
            return Err(TokenError::InsufficientBalance);
        }

        storage::set_balance(env, from, balance - amount);
        storage::set_total_supply(env, storage::get_total_supply(env) - amount);

        Burned {
            from: from.clone(),
            amount,
        }
        .publish(env);

        Ok(())
    }

    fn action_hash(env: &Env, action: &EmergencyAction) -> BytesN<32> {
        let preimage = action.clone().to_xdr(env);
        env.crypto().sha256(&preimage).to_bytes()
    }
}
