//! Data types for the backed token's emergency multisig gate

use soroban_sdk::{contracttype, Address, BytesN};

/// Kind of an emergency operation (stored as u32 inside records).
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OpKind {
    Pause = 0,
    Unpause = 1,
    FreezeMinting = 2,
    UnfreezeMinting = 3,
    ForcedBurn = 4,
}

/// The preimage of an emergency operation hash.
///
/// The network id binds the hash to one chain; the nonce binds it to one
/// position in the linear emergency history. Two signers signing the same
/// action therefore converge on the same hash.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyAction {
    pub kind: u32,
    pub account: Option<Address>,
    pub amount: Option<i128>,
    pub nonce: u64,
    pub network: BytesN<32>,
}

/// Signature-tracking record for one emergency operation hash.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyOp {
    /// Hash of the action preimage
    pub hash: BytesN<32>,
    /// Operation kind (OpKind as u32)
    pub kind: u32,
    /// Target account, forced burn only
    pub account: Option<Address>,
    /// Burn amount, forced burn only
    pub amount: Option<i128>,
    /// Nonce the action was created with
    pub nonce: u64,
    /// Running signature count; may exceed the threshold
    pub signature_count: u32,
    /// Whether the effect has fired (fires once, at the threshold crossing)
    pub executed: bool,
    /// Timestamp of the first signature
    pub created_at: u64,
}
