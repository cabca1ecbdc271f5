//! Error types for the reserve controller

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ControllerError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Caller lacks the reserve-manager capability
    Unauthorized = 3,
    /// Account is not KYC approved (or a revoke targets an unapproved account)
    NotApproved = 4,
    /// A required positive amount is zero or negative, or a batch is empty
    InvalidAmount = 5,
    /// Required reserve-A quantity exceeds available headroom or balance
    InsufficientReserveA = 6,
    /// Required reserve-B quantity exceeds available headroom or balance
    InsufficientReserveB = 7,
    /// Account holds less backed currency than the burn amount
    InsufficientBalance = 8,
    /// A price feed reading is non-positive
    InvalidOracleData = 9,
    /// Intermediate allocation math overflowed i128
    ArithmeticOverflow = 10,
}
