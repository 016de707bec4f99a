//! Error types for the CL8Y Warehouse contract

use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Parameter Errors
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    #[error("Invalid deposit params: owners and amounts length mismatch")]
    InvalidDepositParams,

    #[error("Invalid withdraw params: tokens and amounts length mismatch")]
    InvalidWithdrawParams,

    #[error("Invalid transfer params: receivers and amounts length mismatch")]
    InvalidTransferParams,

    #[error("Token not supported: {token}")]
    TokenNotSupported { token: String },

    #[error("Invalid token id: {reason}")]
    InvalidTokenId { reason: String },

    #[error("Owner address is empty")]
    ZeroOwner,

    // ========================================================================
    // Ledger Errors
    // ========================================================================

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        available: Uint128,
        requested: Uint128,
    },

    #[error("Insufficient allowance: available {available}, requested {requested}")]
    InsufficientAllowance {
        available: Uint128,
        requested: Uint128,
    },

    // ========================================================================
    // Withdraw Errors
    // ========================================================================

    #[error("Withdrawal paused for owner {owner}")]
    WithdrawalPaused { owner: String },

    #[error("Incentive too high: {incentive_bps} bps exceeds max {max} bps")]
    IncentiveTooHigh { incentive_bps: u32, max: u32 },

    // ========================================================================
    // Reentrancy Errors
    // ========================================================================

    #[error("Reentrant call: another deposit or withdrawal is in flight")]
    ReentrantCall,

    #[error("Unknown reply id: {id}")]
    UnknownReplyId { id: u64 },
}
