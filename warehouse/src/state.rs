//! State definitions for the CL8Y Warehouse contract
//!
//! All ledger maps are keyed by owner/spender address and the 32-byte token
//! id. They are only mutated through the helpers in `ledger.rs`.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Bank denom treated as the native asset (e.g. "uluna")
    pub native_denom: String,
    /// Upper bound on an owner's withdrawal incentive (None = unrestricted)
    pub max_incentive_bps: Option<u32>,
}

/// Per-owner settings for delegated withdrawals
#[cw_serde]
#[derive(Default)]
pub struct WithdrawConfig {
    /// Share of a delegated withdrawal paid to the withdrawer, over `PERCENTAGE_SCALE`
    pub incentive_bps: u32,
    /// Blocks delegated withdrawals (self-withdrawals still work)
    pub paused: bool,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:cl8y-warehouse";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Denominator for incentive fractions (10000 = 100%)
pub const PERCENTAGE_SCALE: u128 = 10_000;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Key: (owner, token id), Value: wrapped balance
pub const BALANCES: Map<(&Addr, &[u8]), Uint128> = Map::new("balances");

/// Key: token id, Value: sum of all balances of that token
pub const TOTAL_SUPPLY: Map<&[u8], Uint128> = Map::new("total_supply");

/// Key: (owner, spender, token id), Value: remaining allowance
pub const ALLOWANCES: Map<(&Addr, &Addr, &[u8]), Uint128> = Map::new("allowances");

/// Key: (owner, operator), Value: blanket approval
pub const OPERATORS: Map<(&Addr, &Addr), bool> = Map::new("operators");

/// Key: owner, Value: delegated withdrawal settings
pub const WITHDRAW_CONFIGS: Map<&Addr, WithdrawConfig> = Map::new("withdraw_configs");

/// CW20 contracts seen by the warehouse
/// Key: token id, Value: CW20 contract address
pub const TOKEN_CONTRACTS: Map<&[u8], Addr> = Map::new("token_contracts");

/// Set while a deposit or withdrawal is dispatching its outbound messages
pub const REENTRANCY_LOCK: Item<bool> = Item::new("reentrancy_lock");
