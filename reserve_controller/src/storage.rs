//! Storage keys and helpers for the reserve controller

use soroban_sdk::{contracttype, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Admin address (instance storage)
    Admin,
    /// Price feed contract address (instance storage)
    Oracle,
    /// Reserve asset A ledger address (instance storage)
    ReserveA,
    /// Reserve asset B ledger address (instance storage)
    ReserveB,
    /// Backed token ledger address (instance storage)
    BackedToken,
    /// Reserve-manager capability flag (persistent storage)
    Manager(Address),
    /// KYC approval flag (persistent storage)
    Kyc(Address),
    /// Reserve A allocated to back outstanding supply (instance storage)
    TotalReserveA,
    /// Reserve B allocated to back outstanding supply (instance storage)
    TotalReserveB,
    /// Backed currency minted through the controller (instance storage)
    TotalMinted,
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

pub fn get_oracle(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Oracle)
        .expect("oracle not set")
}

pub fn set_oracle(env: &Env, oracle: &Address) {
    env.storage().instance().set(&DataKey::Oracle, oracle);
}

pub fn get_reserve_a(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::ReserveA)
        .expect("reserve A ledger not set")
}

pub fn set_reserve_a(env: &Env, ledger: &Address) {
    env.storage().instance().set(&DataKey::ReserveA, ledger);
}

pub fn get_reserve_b(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::ReserveB)
        .expect("reserve B ledger not set")
}

pub fn set_reserve_b(env: &Env, ledger: &Address) {
    env.storage().instance().set(&DataKey::ReserveB, ledger);
}

pub fn get_backed_token(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::BackedToken)
        .expect("backed token not set")
}

pub fn set_backed_token(env: &Env, ledger: &Address) {
    env.storage().instance().set(&DataKey::BackedToken, ledger);
}

pub fn is_manager(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Manager(account.clone()))
        .unwrap_or(false)
}

pub fn set_manager(env: &Env, account: &Address, granted: bool) {
    if granted {
        env.storage()
            .persistent()
            .set(&DataKey::Manager(account.clone()), &true);
    } else {
        env.storage()
            .persistent()
            .remove(&DataKey::Manager(account.clone()));
    }
}

pub fn is_kyc_approved(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Kyc(account.clone()))
        .unwrap_or(false)
}

pub fn set_kyc_approved(env: &Env, account: &Address, approved: bool) {
    if approved {
        env.storage()
            .persistent()
            .set(&DataKey::Kyc(account.clone()), &true);
    } else {
        env.storage()
            .persistent()
            .remove(&DataKey::Kyc(account.clone()));
    }
}

pub fn get_total_reserve_a(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalReserveA)
        .unwrap_or(0)
}

pub fn set_total_reserve_a(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalReserveA, &amount);
}

pub fn get_total_reserve_b(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalReserveB)
        .unwrap_or(0)
}

pub fn set_total_reserve_b(env: &Env, amount: i128) {
    env.storage()
        .instance()
        .set(&DataKey::TotalReserveB, &amount);
}

pub fn get_total_minted(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalMinted)
        .unwrap_or(0)
}

pub fn set_total_minted(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalMinted, &amount);
}
