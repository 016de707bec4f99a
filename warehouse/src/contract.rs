//! CL8Y Warehouse Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `guard` - Reentrancy lock, released from `reply`

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_approve, execute_batch_transfer, execute_deposit, execute_deposit_after_transfer,
    execute_deposit_after_transfer_batch, execute_deposit_batch, execute_receive,
    execute_set_operator, execute_set_withdraw_config, execute_transfer, execute_transfer_from,
    execute_withdraw, execute_withdraw_batch_for, execute_withdraw_for, nonpayable,
};
use crate::guard::{release, UNLOCK_REPLY_ID};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_allowance, query_balance, query_balances, query_config, query_constants,
    query_is_operator, query_token, query_token_id, query_total_supply, query_withdraw_config,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, REENTRANCY_LOCK};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.native_denom.trim().is_empty() {
        return Err(ContractError::TokenNotSupported {
            token: "empty native denom".to_string(),
        });
    }

    let config = Config {
        native_denom: msg.native_denom,
        max_incentive_bps: msg.max_incentive_bps,
    };
    CONFIG.save(deps.storage, &config)?;
    REENTRANCY_LOCK.save(deps.storage, &false)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("creator", info.sender.as_str())
        .add_attribute("native_denom", config.native_denom)
        .add_attribute(
            "max_incentive_bps",
            config
                .max_incentive_bps
                .map(|max| max.to_string())
                .unwrap_or_else(|| "none".to_string()),
        ))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    // only native deposits credit attached funds
    match &msg {
        ExecuteMsg::Deposit { .. } | ExecuteMsg::DepositBatch { .. } => {}
        _ => nonpayable(&info)?,
    }

    match msg {
        // Deposits
        ExecuteMsg::Deposit {
            owner,
            token,
            amount,
        } => execute_deposit(deps, env, info, owner, token, amount),
        ExecuteMsg::DepositBatch {
            owners,
            token,
            amounts,
        } => execute_deposit_batch(deps, env, info, owners, token, amounts),
        ExecuteMsg::DepositAfterTransfer {
            owner,
            token,
            amount,
        } => execute_deposit_after_transfer(deps, env, owner, token, amount),
        ExecuteMsg::DepositAfterTransferBatch {
            owners,
            token,
            amounts,
        } => execute_deposit_after_transfer_batch(deps, env, owners, token, amounts),
        ExecuteMsg::Receive(msg) => execute_receive(deps, info, msg),

        // Withdrawals
        ExecuteMsg::Withdraw { token, amount } => execute_withdraw(deps, info, token, amount),
        ExecuteMsg::WithdrawFor {
            owner,
            token,
            amount,
            withdrawer,
        } => execute_withdraw_for(deps, info, owner, token, amount, withdrawer),
        ExecuteMsg::WithdrawBatchFor {
            owner,
            tokens,
            amounts,
            withdrawer,
        } => execute_withdraw_batch_for(deps, info, owner, tokens, amounts, withdrawer),

        // Transfers & approvals
        ExecuteMsg::Transfer {
            receiver,
            token_id,
            amount,
        } => execute_transfer(deps, info, receiver, token_id, amount),
        ExecuteMsg::TransferFrom {
            sender,
            receiver,
            token_id,
            amount,
        } => execute_transfer_from(deps, info, sender, receiver, token_id, amount),
        ExecuteMsg::BatchTransfer {
            receivers,
            token_id,
            amounts,
        } => execute_batch_transfer(deps, info, receivers, token_id, amounts),
        ExecuteMsg::Approve {
            spender,
            token_id,
            amount,
        } => execute_approve(deps, info, spender, token_id, amount),
        ExecuteMsg::SetOperator { operator, approved } => {
            execute_set_operator(deps, info, operator, approved)
        }
        ExecuteMsg::SetWithdrawConfig { config } => {
            execute_set_withdraw_config(deps, info, config)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Releases the reentrancy lock once the last outbound message of a guarded
/// handler has succeeded.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        UNLOCK_REPLY_ID => {
            release(deps.storage)?;
            Ok(Response::new().add_attribute("action", "release_lock"))
        }
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Constants {} => to_json_binary(&query_constants()?),

        // Ledger queries
        QueryMsg::Balance { owner, token_id } => {
            to_json_binary(&query_balance(deps, owner, token_id)?)
        }
        QueryMsg::Balances {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_balances(deps, owner, start_after, limit)?),
        QueryMsg::Allowance {
            owner,
            spender,
            token_id,
        } => to_json_binary(&query_allowance(deps, owner, spender, token_id)?),
        QueryMsg::IsOperator { owner, operator } => {
            to_json_binary(&query_is_operator(deps, owner, operator)?)
        }
        QueryMsg::TotalSupply { token_id } => {
            to_json_binary(&query_total_supply(deps, token_id)?)
        }
        QueryMsg::WithdrawConfig { owner } => to_json_binary(&query_withdraw_config(deps, owner)?),

        // Token id queries
        QueryMsg::TokenId { token } => to_json_binary(&query_token_id(deps, token)?),
        QueryMsg::Token { token_id } => to_json_binary(&query_token(deps, token_id)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
