#![no_std]

//! # Reserve Controller
//!
//! The accounting engine of the IC reserve-backed currency. The controller
//! owns the KYC registry, allocates reserve-ledger balances to back issuance
//! at a fixed 40/60 basis-point split, redeems outstanding supply pro rata
//! against the current backing, and computes system valuation from the price
//! feed.
//!
//! ## Features
//! - KYC grant/revoke/batch-grant, exposed as the `is_approved` predicate the
//!   token ledgers read on every transfer
//! - Pre-minting of raw reserve to the controller's own ledger balances,
//!   separate from the allocation counters
//! - Backed issuance: USD face value split 40/60 across the two reserve
//!   assets, converted to quantities at the current feed prices
//! - Pro-rata redemption against the current (possibly drifted) backing
//!   ratio, not the original split
//!
//! ## Security
//! - All percentage and price math is integer division truncating toward
//!   zero; allocation outputs are bit-for-bit reproducible
//! - Allocation counters never exceed the controller's actual ledger
//!   balances; headroom is floored at zero
//! - Counters are written before any external mint call
//! - The host's ban on reentrant invocation covers the money-movement paths

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Vec};

mod clients;
mod error;
mod events;
mod storage;

pub use error::ControllerError;

use clients::{PriceFeedClient, TokenLedgerClient};

/// Share of backed value held in reserve asset A, in basis points.
pub const RATIO_A_BPS: i128 = 4_000;
/// Share of backed value held in reserve asset B, in basis points.
pub const RATIO_B_BPS: i128 = 6_000;
/// Basis-point denominator; the two ratios sum to this.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Scale factor of the 8-decimal price feed.
pub const PRICE_SCALE: i128 = 100_000_000;

/// Fixed-point precision shared by the backed and reserve ledgers.
pub const TOKEN_DECIMALS: u32 = 18;

/// Snapshot of the controller's allocation state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReserveInfo {
    /// Reserve A allocated to back outstanding supply
    pub total_reserve_a: i128,
    /// Reserve B allocated to back outstanding supply
    pub total_reserve_b: i128,
    /// Backed currency minted through the controller
    pub total_minted: i128,
    /// Reserve A share in basis points
    pub ratio_a_bps: u32,
    /// Reserve B share in basis points
    pub ratio_b_bps: u32,
}

#[contract]
pub struct ReserveController;

#[contractimpl]
impl ReserveController {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the controller and wire its collaborators.
    ///
    /// The admin holds the reserve-manager capability implicitly and may
    /// grant it to further accounts. Allocation counters start at zero.
    pub fn initialize(
        env: Env,
        admin: Address,
        oracle: Address,
        reserve_a: Address,
        reserve_b: Address,
        backed_token: Address,
    ) -> Result<(), ControllerError> {
        if storage::has_admin(&env) {
            return Err(ControllerError::AlreadyInitialized);
        }
        admin.require_auth();

        storage::set_admin(&env, &admin);
        storage::set_oracle(&env, &oracle);
        storage::set_reserve_a(&env, &reserve_a);
        storage::set_reserve_b(&env, &reserve_b);
        storage::set_backed_token(&env, &backed_token);
        storage::set_total_reserve_a(&env, 0);
        storage::set_total_reserve_b(&env, 0);
        storage::set_total_minted(&env, 0);

        events::emit_initialized(&env, &admin, env.ledger().timestamp());

        Ok(())
    }

    /// Grant the reserve-manager capability. Admin only.
    pub fn add_reserve_manager(env: Env, account: Address) -> Result<(), ControllerError> {
        let admin = storage::get_admin(&env).ok_or(ControllerError::NotInitialized)?;
        admin.require_auth();
        storage::set_manager(&env, &account, true);
        events::emit_manager_added(&env, &account, env.ledger().timestamp());
        Ok(())
    }

    /// Revoke the reserve-manager capability. Admin only.
    pub fn remove_reserve_manager(env: Env, account: Address) -> Result<(), ControllerError> {
        let admin = storage::get_admin(&env).ok_or(ControllerError::NotInitialized)?;
        admin.require_auth();
        storage::set_manager(&env, &account, false);
        events::emit_manager_removed(&env, &account, env.ledger().timestamp());
        Ok(())
    }

    pub fn is_reserve_manager(env: Env, account: Address) -> bool {
        match storage::get_admin(&env) {
            Some(admin) => account == admin || storage::is_manager(&env, &account),
            None => false,
        }
    }

    // ========================================================================
    // KYC Registry
    // ========================================================================

    /// Mark an account as KYC approved. Reserve manager only.
    pub fn grant_kyc(env: Env, caller: Address, account: Address) -> Result<(), ControllerError> {
        Self::require_manager(&env, &caller)?;

        storage::set_kyc_approved(&env, &account, true);
        events::emit_kyc_granted(&env, &account, env.ledger().timestamp());

        Ok(())
    }

    /// Clear an account's KYC approval. Reserve manager only.
    ///
    /// Fails if the account is not currently approved.
    pub fn revoke_kyc(env: Env, caller: Address, account: Address) -> Result<(), ControllerError> {
        Self::require_manager(&env, &caller)?;

        if !storage::is_kyc_approved(&env, &account) {
            return Err(ControllerError::NotApproved);
        }

        storage::set_kyc_approved(&env, &account, false);
        events::emit_kyc_revoked(&env, &account, env.ledger().timestamp());

        Ok(())
    }

    /// Grant KYC to every account in the batch. Reserve manager only.
    ///
    /// Idempotent per entry: already-approved accounts are skipped without a
    /// duplicate event and without failing the batch. An empty batch fails.
    pub fn batch_grant_kyc(
        env: Env,
        caller: Address,
        accounts: Vec<Address>,
    ) -> Result<(), ControllerError> {
        Self::require_manager(&env, &caller)?;

        if accounts.is_empty() {
            return Err(ControllerError::InvalidAmount);
        }

        let timestamp = env.ledger().timestamp();
        for account in accounts.iter() {
            if storage::is_kyc_approved(&env, &account) {
                continue;
            }
            storage::set_kyc_approved(&env, &account, true);
            events::emit_kyc_granted(&env, &account, timestamp);
        }

        Ok(())
    }

    /// The predicate the token ledgers read on every transfer.
    pub fn is_approved(env: Env, account: Address) -> bool {
        storage::is_kyc_approved(&env, &account)
    }

    // ========================================================================
    // Reserve Provisioning
    // ========================================================================

    /// Mint raw reserve to the controller's own ledger balances.
    ///
    /// Makes reserve available for future allocation; the allocation
    /// counters are untouched. Fails if both amounts are zero.
    pub fn pre_mint_reserves(
        env: Env,
        caller: Address,
        amount_a: i128,
        amount_b: i128,
    ) -> Result<(), ControllerError> {
        Self::require_manager(&env, &caller)?;

        if amount_a < 0 || amount_b < 0 || (amount_a == 0 && amount_b == 0) {
            return Err(ControllerError::InvalidAmount);
        }

        let this = env.current_contract_address();
        if amount_a > 0 {
            TokenLedgerClient::new(&env, &storage::get_reserve_a(&env)).mint(&this, &amount_a);
        }
        if amount_b > 0 {
            TokenLedgerClient::new(&env, &storage::get_reserve_b(&env)).mint(&this, &amount_b);
        }

        events::emit_reserves_pre_minted(&env, amount_a, amount_b);

        Ok(())
    }

    // ========================================================================
    // Issuance & Redemption
    // ========================================================================

    /// Mint backed currency against the reserves. Reserve manager only.
    ///
    /// `amount` is a USD face value 1:1 in backed-token units. It is split
    /// 40/60 in basis points (truncating), each side converted to a reserve
    /// quantity at the current feed price, and allocated out of the
    /// controller's unallocated reserve headroom.
    pub fn mint_backed(
        env: Env,
        caller: Address,
        recipient: Address,
        amount: i128,
    ) -> Result<(), ControllerError> {
        Self::require_manager(&env, &caller)?;

        if !storage::is_kyc_approved(&env, &recipient) {
            return Err(ControllerError::NotApproved);
        }
        if amount <= 0 {
            return Err(ControllerError::InvalidAmount);
        }

        let (price_a, price_b) = Self::read_prices(&env)?;

        let value_a = amount
            .checked_mul(RATIO_A_BPS)
            .ok_or(ControllerError::ArithmeticOverflow)?
            / BPS_DENOMINATOR;
        let value_b = amount
            .checked_mul(RATIO_B_BPS)
            .ok_or(ControllerError::ArithmeticOverflow)?
            / BPS_DENOMINATOR;

        // USD value (18 dec) to asset quantity (18 dec): scale up by the
        // price feed's 8-decimal precision, truncating
        let quantity_a = value_a
            .checked_mul(PRICE_SCALE)
            .ok_or(ControllerError::ArithmeticOverflow)?
            / price_a;
        let quantity_b = value_b
            .checked_mul(PRICE_SCALE)
            .ok_or(ControllerError::ArithmeticOverflow)?
            / price_b;

        let total_a = storage::get_total_reserve_a(&env);
        let total_b = storage::get_total_reserve_b(&env);

        let this = env.current_contract_address();
        let ledger_a = TokenLedgerClient::new(&env, &storage::get_reserve_a(&env));
        let ledger_b = TokenLedgerClient::new(&env, &storage::get_reserve_b(&env));

        if quantity_a > Self::headroom(ledger_a.balance_of(&this), total_a) {
            return Err(ControllerError::InsufficientReserveA);
        }
        if quantity_b > Self::headroom(ledger_b.balance_of(&this), total_b) {
            return Err(ControllerError::InsufficientReserveB);
        }

        storage::set_total_reserve_a(&env, total_a + quantity_a);
        storage::set_total_reserve_b(&env, total_b + quantity_b);
        storage::set_total_minted(&env, storage::get_total_minted(&env) + amount);

        TokenLedgerClient::new(&env, &storage::get_backed_token(&env)).mint(&recipient, &amount);

        events::emit_backed_minted(&env, &recipient, amount, quantity_a, quantity_b);

        Ok(())
    }

    /// Burn backed currency and return the backing reserves. Reserve manager
    /// only.
    ///
    /// Redemption is pro rata against the CURRENT allocation, not the
    /// original 40/60 split, so returns drift with prices and intervening
    /// allocations. The reserve return is a burn from the controller
    /// followed by a mint to the account, standing in for a transfer on the
    /// restricted ledger interface.
    pub fn burn_backed(
        env: Env,
        caller: Address,
        account: Address,
        amount: i128,
    ) -> Result<(), ControllerError> {
        Self::require_manager(&env, &caller)?;

        if !storage::is_kyc_approved(&env, &account) {
            return Err(ControllerError::NotApproved);
        }
        if amount <= 0 {
            return Err(ControllerError::InvalidAmount);
        }

        let backed = TokenLedgerClient::new(&env, &storage::get_backed_token(&env));
        if backed.balance_of(&account) < amount {
            return Err(ControllerError::InsufficientBalance);
        }

        let total_minted = storage::get_total_minted(&env);
        if total_minted < amount {
            return Err(ControllerError::InvalidAmount);
        }

        let total_a = storage::get_total_reserve_a(&env);
        let total_b = storage::get_total_reserve_b(&env);

        let return_a = total_a
            .checked_mul(amount)
            .ok_or(ControllerError::ArithmeticOverflow)?
            / total_minted;
        let return_b = total_b
            .checked_mul(amount)
            .ok_or(ControllerError::ArithmeticOverflow)?
            / total_minted;

        let this = env.current_contract_address();
        let ledger_a = TokenLedgerClient::new(&env, &storage::get_reserve_a(&env));
        let ledger_b = TokenLedgerClient::new(&env, &storage::get_reserve_b(&env));

        if return_a > ledger_a.balance_of(&this) {
            return Err(ControllerError::InsufficientReserveA);
        }
        if return_b > ledger_b.balance_of(&this) {
            return Err(ControllerError::InsufficientReserveB);
        }

        storage::set_total_reserve_a(&env, total_a - return_a);
        storage::set_total_reserve_b(&env, total_b - return_b);
        storage::set_total_minted(&env, total_minted - amount);

        backed.burn_from(&account, &amount);

        if return_a > 0 {
            ledger_a.burn_from(&this, &return_a);
            ledger_a.mint(&account, &return_a);
        }
        if return_b > 0 {
            ledger_b.burn_from(&this, &return_b);
            ledger_b.mint(&account, &return_b);
        }

        events::emit_backed_burned(&env, &account, amount, return_a, return_b);

        Ok(())
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    /// Allocation counters and fixed ratios.
    pub fn get_reserve_info(env: Env) -> ReserveInfo {
        ReserveInfo {
            total_reserve_a: storage::get_total_reserve_a(&env),
            total_reserve_b: storage::get_total_reserve_b(&env),
            total_minted: storage::get_total_minted(&env),
            ratio_a_bps: RATIO_A_BPS as u32,
            ratio_b_bps: RATIO_B_BPS as u32,
        }
    }

    /// Unallocated headroom on each reserve ledger, floored at zero.
    pub fn get_available_reserves(env: Env) -> (i128, i128) {
        let this = env.current_contract_address();
        let balance_a =
            TokenLedgerClient::new(&env, &storage::get_reserve_a(&env)).balance_of(&this);
        let balance_b =
            TokenLedgerClient::new(&env, &storage::get_reserve_b(&env)).balance_of(&this);
        (
            Self::headroom(balance_a, storage::get_total_reserve_a(&env)),
            Self::headroom(balance_b, storage::get_total_reserve_b(&env)),
        )
    }

    pub fn get_reserve_ratios(_env: Env) -> (u32, u32) {
        (RATIO_A_BPS as u32, RATIO_B_BPS as u32)
    }

    /// USD value of the allocated reserves at current prices, in
    /// backed-token units.
    pub fn get_total_reserve_value(env: Env) -> Result<i128, ControllerError> {
        let (price_a, price_b) = Self::read_prices(&env)?;

        let value_a = storage::get_total_reserve_a(&env)
            .checked_mul(price_a)
            .ok_or(ControllerError::ArithmeticOverflow)?;
        let value_b = storage::get_total_reserve_b(&env)
            .checked_mul(price_b)
            .ok_or(ControllerError::ArithmeticOverflow)?;

        let total = value_a
            .checked_add(value_b)
            .ok_or(ControllerError::ArithmeticOverflow)?;
        Ok(total / PRICE_SCALE)
    }

    /// Current backing value per backed unit, at 8-decimal precision.
    ///
    /// Reads 1.0 when nothing is outstanding.
    pub fn get_current_value(env: Env) -> Result<i128, ControllerError> {
        let total_minted = storage::get_total_minted(&env);
        if total_minted == 0 {
            return Ok(PRICE_SCALE);
        }

        let total_value = Self::get_total_reserve_value(env.clone())?;
        let scaled = total_value
            .checked_mul(PRICE_SCALE)
            .ok_or(ControllerError::ArithmeticOverflow)?;
        Ok(scaled / total_minted)
    }

    // ========================================================================
    // Internal Helper Functions
    // ========================================================================

    fn require_manager(env: &Env, caller: &Address) -> Result<(), ControllerError> {
        let admin = storage::get_admin(env).ok_or(ControllerError::NotInitialized)?;
        caller.require_auth();
        if *caller != admin && !storage::is_manager(env, caller) {
            return Err(ControllerError::Unauthorized);
        }
        Ok(())
    }

    fn read_prices(env: &Env) -> Result<(i128, i128), ControllerError> {
        let oracle = PriceFeedClient::new(env, &storage::get_oracle(env));
        let (price_a, price_b) = oracle.get_prices();
        if price_a <= 0 || price_b <= 0 {
            return Err(ControllerError::InvalidOracleData);
        }
        Ok((price_a, price_b))
    }

    /// Ledger balance not yet claimed by the allocation counter, floored at
    /// zero in case the ledger balance ever falls below it.
    fn headroom(ledger_balance: i128, allocated: i128) -> i128 {
        if ledger_balance > allocated {
            ledger_balance - allocated
        } else {
            0
        }
    }
}

mod test;
