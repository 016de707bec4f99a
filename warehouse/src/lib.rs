//! CL8Y Warehouse Contract - Multi-Token Custodial Ledger for TerraClassic
//!
//! The warehouse holds native and CW20 tokens on behalf of owners and keeps
//! an internal balance per `(owner, token id)`. Owners can move those
//! balances without touching the underlying tokens, approve spenders and
//! operators, and withdraw at any time.
//!
//! # Deposits
//! - `Deposit` / `DepositBatch`: attach native funds, or let the warehouse
//!   pull CW20 tokens with `TransferFrom`
//! - `DepositAfterTransfer`: claim CW20 tokens already sent in
//! - `Receive`: CW20 `Send` hook
//!
//! # Withdrawals
//! - `Withdraw`: owner withdraws their own balance
//! - `WithdrawFor`: anyone withdraws for an owner and earns the owner's
//!   incentive (`incentive_bps / PERCENTAGE_SCALE` of the amount), unless the
//!   owner paused delegated withdrawals
//!
//! # Security
//! - Deposits and withdrawals run under a reentrancy lock that stays held
//!   until their outbound messages have executed
//! - `TotalSupply(id)` always equals the sum of all balances of `id`

pub mod contract;
pub mod error;
mod execute;
pub mod guard;
pub mod ledger;
pub mod msg;
mod query;
pub mod state;
pub mod token_id;

pub use crate::error::ContractError;
pub use crate::execute::calculate_reward;
pub use crate::token_id::{TokenAddress, TokenId, NATIVE_TOKEN_ADDRESS, NATIVE_TOKEN_ID};
