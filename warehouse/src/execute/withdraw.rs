//! Withdrawal handlers.
//!
//! - `Withdraw` - owner withdraws their own balance (never paused)
//! - `WithdrawFor` - anyone withdraws for an owner; the withdrawer earns the
//!   owner's incentive out of the withdrawn amount
//! - `WithdrawBatchFor` - delegated withdrawal of several tokens at once
//!
//! Balances are burned before any payout message is built, and the messages
//! only run after the handler returns.

use cosmwasm_std::{Addr, CosmosMsg, DepsMut, MessageInfo, Response, Storage, Uint128};

use common::{Asset, AssetInfo};

use crate::error::ContractError;
use crate::guard::nonreentrant;
use crate::ledger::{burn, resolve_token, validate_owner, withdraw_config, ResolvedToken};
use crate::state::{WithdrawConfig, PERCENTAGE_SCALE};

// ============================================================================
// Self Withdraw
// ============================================================================

/// Withdraw `amount` of `token` from the caller's balance to the caller.
pub fn execute_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    token: AssetInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonreentrant(deps, |deps| {
        let resolved = resolve_token(deps.as_ref(), &token)?;
        burn(deps.storage, &info.sender, &resolved.id, amount)?;

        let mut response = Response::new();
        if !amount.is_zero() {
            response = response
                .add_message(Asset::new(resolved.info.clone(), amount).transfer_msg(&info.sender)?);
        }

        Ok(response
            .add_attribute("action", "withdraw")
            .add_attribute("owner", info.sender.as_str())
            .add_attribute("token", resolved.info.to_string())
            .add_attribute("token_id", resolved.id.to_hex())
            .add_attribute("amount", amount))
    })
}

// ============================================================================
// Delegated Withdraw
// ============================================================================

/// Withdraw on behalf of `owner`, paying the owner's incentive to `withdrawer`.
pub fn execute_withdraw_for(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    token: AssetInfo,
    amount: Uint128,
    withdrawer: String,
) -> Result<Response, ContractError> {
    nonreentrant(deps, |deps| {
        let owner = validate_owner(deps.api, &owner)?;
        let withdrawer = deps.api.addr_validate(&withdrawer)?;
        let config = load_unpaused_config(deps.storage, &owner)?;

        let resolved = resolve_token(deps.as_ref(), &token)?;
        let payout = burn_and_split(
            deps.storage,
            &owner,
            &withdrawer,
            &resolved,
            amount,
            config.incentive_bps,
        )?;

        Ok(Response::new()
            .add_messages(payout.messages)
            .add_attribute("action", "withdraw_for")
            .add_attribute("caller", info.sender.as_str())
            .add_attribute("owner", owner)
            .add_attribute("withdrawer", withdrawer)
            .add_attribute("token", resolved.info.to_string())
            .add_attribute("token_id", resolved.id.to_hex())
            .add_attribute("amount", amount)
            .add_attribute("reward", payout.reward))
    })
}

/// Delegated withdrawal of several tokens; one failure fails them all.
pub fn execute_withdraw_batch_for(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    tokens: Vec<AssetInfo>,
    amounts: Vec<Uint128>,
    withdrawer: String,
) -> Result<Response, ContractError> {
    nonreentrant(deps, |deps| {
        if tokens.len() != amounts.len() {
            return Err(ContractError::InvalidWithdrawParams);
        }

        let owner = validate_owner(deps.api, &owner)?;
        let withdrawer = deps.api.addr_validate(&withdrawer)?;
        let config = load_unpaused_config(deps.storage, &owner)?;

        let mut response = Response::new();
        let mut rewards = Vec::with_capacity(tokens.len());
        for (token, amount) in tokens.iter().zip(amounts) {
            let resolved = resolve_token(deps.as_ref(), token)?;
            let payout = burn_and_split(
                deps.storage,
                &owner,
                &withdrawer,
                &resolved,
                amount,
                config.incentive_bps,
            )?;
            response = response.add_messages(payout.messages);
            rewards.push(format!("{}:{}", resolved.id.to_hex(), payout.reward));
        }

        Ok(response
            .add_attribute("action", "withdraw_batch_for")
            .add_attribute("caller", info.sender.as_str())
            .add_attribute("owner", owner)
            .add_attribute("withdrawer", withdrawer)
            .add_attribute("token_count", tokens.len().to_string())
            .add_attribute("rewards", rewards.join(",")))
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Payout messages of one delegated withdrawal
struct Payout {
    messages: Vec<CosmosMsg>,
    reward: Uint128,
}

/// Incentive owed to the withdrawer (truncating)
pub fn calculate_reward(amount: Uint128, incentive_bps: u32) -> Result<Uint128, ContractError> {
    amount
        .checked_multiply_ratio(incentive_bps as u128, PERCENTAGE_SCALE)
        .map_err(|_| ContractError::InvalidAmount {
            reason: format!(
                "Reward overflow for amount {} at {} bps",
                amount, incentive_bps
            ),
        })
}

fn load_unpaused_config(
    storage: &dyn Storage,
    owner: &Addr,
) -> Result<WithdrawConfig, ContractError> {
    let config = withdraw_config(storage, owner)?;
    if config.paused {
        return Err(ContractError::WithdrawalPaused {
            owner: owner.to_string(),
        });
    }
    Ok(config)
}

/// Burn `amount` from `owner`, then pay `amount - reward` to the owner and
/// `reward` to the withdrawer. Zero payouts are skipped.
fn burn_and_split(
    storage: &mut dyn Storage,
    owner: &Addr,
    withdrawer: &Addr,
    token: &ResolvedToken,
    amount: Uint128,
    incentive_bps: u32,
) -> Result<Payout, ContractError> {
    let reward = calculate_reward(amount, incentive_bps)?;
    let net = amount
        .checked_sub(reward)
        .map_err(|_| ContractError::InvalidAmount {
            reason: format!("Reward {} exceeds withdrawal amount {}", reward, amount),
        })?;

    burn(storage, owner, &token.id, amount)?;

    let mut messages = Vec::with_capacity(2);
    if !net.is_zero() {
        messages.push(Asset::new(token.info.clone(), net).transfer_msg(owner)?);
    }
    if !reward.is_zero() {
        messages.push(Asset::new(token.info.clone(), reward).transfer_msg(withdrawer)?);
    }

    Ok(Payout { messages, reward })
}
