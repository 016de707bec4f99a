//! Execute handlers for the CL8Y Warehouse contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `deposit` - Deposit, batch deposit, deposit-after-transfer and CW20 Receive
//! - `withdraw` - Self and delegated withdrawals
//! - `transfer` - Transfers, allowances, operators and withdraw config

mod deposit;
mod transfer;
mod withdraw;

pub use deposit::*;
pub use transfer::*;
pub use withdraw::*;

use cosmwasm_std::MessageInfo;

use crate::error::ContractError;

/// Reject native funds attached to a handler that never credits them.
pub fn nonpayable(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::InvalidAmount {
            reason: "Native funds are only accepted by native deposits".to_string(),
        });
    }
    Ok(())
}
