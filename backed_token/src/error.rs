//! Error types for the backed token ledger and its emergency gate

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Caller is not authorized for this operation
    Unauthorized = 3,
    /// A required positive amount is zero or negative
    InvalidAmount = 4,
    /// Account balance is below the requested amount
    InsufficientBalance = 5,
    /// One of the transfer legs is not KYC approved
    NotApproved = 6,
    /// The KYC registry address has not been wired yet
    RegistryNotSet = 7,
    /// Mint attempted while the minting freeze flag is set
    MintingFrozen = 8,
    /// Transfer attempted while the ledger is paused
    Paused = 9,
    /// Caller is not an emergency signer
    NotASigner = 10,
    /// Signer already signed this emergency operation
    AlreadySigned = 11,
    /// Nonce does not extend the emergency operation history
    InvalidNonce = 12,
    /// Emergency signer set is too small or contains duplicates
    InvalidSignerSet = 13,
}
