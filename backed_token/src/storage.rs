//! Storage keys and helpers for the backed token ledger

use soroban_sdk::{contracttype, Address, BytesN, Env, Vec};

use crate::types::EmergencyOp;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Admin address (instance storage)
    Admin,
    /// Privileged minter address, normally the reserve controller (instance storage)
    Minter,
    /// KYC registry address, read on every transfer (instance storage)
    KycRegistry,
    /// Transfer pause flag (instance storage)
    Paused,
    /// Minting freeze flag (instance storage)
    MintingFrozen,
    /// Total outstanding supply (instance storage)
    TotalSupply,
    /// Per-account balance (persistent storage)
    Balance(Address),
    /// Emergency signer set (instance storage)
    EmergencySigners,
    /// Last consumed emergency nonce (instance storage)
    EmergencyNonce,
    /// Signature-tracking record per operation hash (persistent storage)
    Operation(BytesN<32>),
    /// Per-hash per-signer signed flag (persistent storage)
    OpSigned(BytesN<32>, Address),
}

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

pub fn get_minter(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Minter)
}

pub fn set_minter(env: &Env, minter: &Address) {
    env.storage().instance().set(&DataKey::Minter, minter);
}

pub fn get_kyc_registry(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::KycRegistry)
}

pub fn set_kyc_registry(env: &Env, registry: &Address) {
    env.storage().instance().set(&DataKey::KycRegistry, registry);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn is_minting_frozen(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::MintingFrozen)
        .unwrap_or(false)
}

pub fn set_minting_frozen(env: &Env, frozen: bool) {
    env.storage()
        .instance()
        .set(&DataKey::MintingFrozen, &frozen);
}

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn get_balance(env: &Env, account: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(account.clone()))
        .unwrap_or(0)
}

pub fn set_balance(env: &Env, account: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(account.clone()), &amount);
}

// ============================================================================
// Emergency Gate Helpers
// ============================================================================

pub fn get_emergency_signers(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::EmergencySigners)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_emergency_signers(env: &Env, signers: &Vec<Address>) {
    env.storage()
        .instance()
        .set(&DataKey::EmergencySigners, signers);
}

pub fn is_emergency_signer(env: &Env, address: &Address) -> bool {
    get_emergency_signers(env).contains(address)
}

pub fn get_emergency_nonce(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::EmergencyNonce)
        .unwrap_or(0)
}

pub fn set_emergency_nonce(env: &Env, nonce: u64) {
    env.storage()
        .instance()
        .set(&DataKey::EmergencyNonce, &nonce);
}

pub fn get_operation(env: &Env, hash: &BytesN<32>) -> Option<EmergencyOp> {
    env.storage()
        .persistent()
        .get(&DataKey::Operation(hash.clone()))
}

pub fn set_operation(env: &Env, op: &EmergencyOp) {
    env.storage()
        .persistent()
        .set(&DataKey::Operation(op.hash.clone()), op);
}

pub fn has_signed(env: &Env, hash: &BytesN<32>, signer: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::OpSigned(hash.clone(), signer.clone()))
        .unwrap_or(false)
}

pub fn set_signed(env: &Env, hash: &BytesN<32>, signer: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::OpSigned(hash.clone(), signer.clone()), &true);
}
