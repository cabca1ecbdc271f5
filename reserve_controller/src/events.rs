use soroban_sdk::{contractevent, Address};

#[contractevent(topics = ["IcController", "INIT"])]
struct ControllerInitialized {
    admin: Address,
    timestamp: u64,
}

#[contractevent(topics = ["IcController", "MANAGER_ADDED"])]
struct ManagerAdded {
    account: Address,
    timestamp: u64,
}

#[contractevent(topics = ["IcController", "MANAGER_REMOVED"])]
struct ManagerRemoved {
    account: Address,
    timestamp: u64,
}

#[contractevent(topics = ["IcController", "KYC_GRANTED"])]
struct KycGranted {
    account: Address,
    timestamp: u64,
}

#[contractevent(topics = ["IcController", "KYC_REVOKED"])]
struct KycRevoked {
    account: Address,
    timestamp: u64,
}

#[contractevent(topics = ["IcController", "PRE_MINTED"])]
struct ReservesPreMinted {
    amount_a: i128,
    amount_b: i128,
}

#[contractevent(topics = ["IcController", "MINTED"])]
struct BackedMinted {
    recipient: Address,
    amount: i128,
    reserve_a_amount: i128,
    reserve_b_amount: i128,
}

#[contractevent(topics = ["IcController", "BURNED"])]
struct BackedBurned {
    account: Address,
    amount: i128,
    returned_a: i128,
    returned_b: i128,
}

pub fn emit_initialized(env: &soroban_sdk::Env, admin: &Address, timestamp: u64) {
    ControllerInitialized {
        admin: admin.clone(),
        timestamp,
    }
    .publish(env);
}

pub fn emit_manager_added(env: &soroban_sdk::Env, account: &Address, timestamp: u64) {
    ManagerAdded {
        account: account.clone(),
        timestamp,
    }
    .publish(env);
}

pub fn emit_manager_removed(env: &soroban_sdk::Env, account: &Address, timestamp: u64) {
    ManagerRemoved {
        account: account.clone(),
        timestamp,
    }
    .publish(env);
}

pub fn emit_kyc_granted(env: &soroban_sdk::Env, account: &Address, timestamp: u64) {
    KycGranted {
        account: account.clone(),
        timestamp,
    }
    .publish(env);
}

pub fn emit_kyc_revoked(env: &soroban_sdk::Env, account: &Address, timestamp: u64) {
    KycRevoked {
        account: account.clone(),
        timestamp,
    }
    .publish(env);
}

pub fn emit_reserves_pre_minted(env: &soroban_sdk::Env, amount_a: i128, amount_b: i128) {
    ReservesPreMinted { amount_a, amount_b }.publish(env);
}

pub fn emit_backed_minted(
    env: &soroban_sdk::Env,
    recipient: &Address,
    amount: i128,
    reserve_a_amount: i128,
    reserve_b_amount: i128,
) {
    BackedMinted {
        recipient: recipient.clone(),
        amount,
        reserve_a_amount,
        reserve_b_amount,
    }
    .publish(env);
}

pub fn emit_backed_burned(
    env: &soroban_sdk::Env,
    account: &Address,
    amount: i128,
    returned_a: i128,
    returned_b: i128,
) {
    BackedBurned {
        account: account.clone(),
        amount,
        returned_a,
        returned_b,
    }
    .publish(env);
}
