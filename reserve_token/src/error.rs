//! Error types for the reserve token ledger

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
}
