//! Deposit handlers.
//!
//! Every deposit mints exactly the deposited amounts to the named owners.
//! Native deposits must attach the declared amount; CW20 deposits either pull
//! the tokens with `TransferFrom`, claim a surplus already transferred in, or
//! arrive through the CW20 `Send` hook.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, Api, DepsMut, Env, MessageInfo, Response, Storage, Uint128,
    WasmMsg,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, Cw20ReceiveMsg};

use common::AssetInfo;

use crate::error::ContractError;
use crate::guard::nonreentrant;
use crate::ledger::{
    mint, register_token, resolve_token, total_supply, validate_owner, ResolvedToken,
};
use crate::msg::ReceiveMsg;

/// Owners paired with the amount each one is credited
type Credits = Vec<(Addr, Uint128)>;

// ============================================================================
// Deposit (pull)
// ============================================================================

/// Deposit native funds or pull CW20 tokens for a single owner.
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    token: AssetInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonreentrant(deps, |deps| {
        let owner = validate_owner(deps.api, &owner)?;
        let credits = vec![(owner.clone(), amount)];

        let response = pull_and_mint(deps, &env, &info, &token, &credits, "deposit")?;
        Ok(response
            .add_attribute("owner", owner)
            .add_attribute("amount", amount))
    })
}

/// Deposit to several owners with one transfer of the summed amount.
pub fn execute_deposit_batch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owners: Vec<String>,
    token: AssetInfo,
    amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    nonreentrant(deps, |deps| {
        let credits = validate_credits(deps.api, &owners, &amounts)?;

        let response = pull_and_mint(deps, &env, &info, &token, &credits, "deposit_batch")?;
        Ok(response.add_attribute("owner_count", credits.len().to_string()))
    })
}

fn pull_and_mint(
    deps: DepsMut,
    env: &Env,
    info: &MessageInfo,
    token: &AssetInfo,
    credits: &Credits,
    action: &str,
) -> Result<Response, ContractError> {
    let resolved = resolve_token(deps.as_ref(), token)?;
    let total = sum_credits(credits)?;

    let mut response = Response::new();
    match (&resolved.info, &resolved.contract) {
        (AssetInfo::Native { denom }, _) => check_native_funds(info, denom, total)?,
        (_, Some(contract)) => {
            if !info.funds.is_empty() {
                return Err(ContractError::InvalidAmount {
                    reason: "Native funds cannot be attached to a CW20 deposit".to_string(),
                });
            }
            if !total.is_zero() {
                response = response.add_message(WasmMsg::Execute {
                    contract_addr: contract.to_string(),
                    msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                        owner: info.sender.to_string(),
                        recipient: env.contract.address.to_string(),
                        amount: total,
                    })?,
                    funds: vec![],
                });
            }
        }
        (AssetInfo::Cw20 { contract_addr }, None) => {
            return Err(ContractError::TokenNotSupported {
                token: contract_addr.clone(),
            })
        }
    }

    mint_credits(deps.storage, &resolved, credits)?;

    Ok(response
        .add_attribute("action", action)
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("token", resolved.info.to_string())
        .add_attribute("token_id", resolved.id.to_hex())
        .add_attribute("total_amount", total))
}

/// The attached funds must be exactly `expected` of the native denom.
fn check_native_funds(
    info: &MessageInfo,
    denom: &str,
    expected: Uint128,
) -> Result<(), ContractError> {
    let sent = match info.funds.as_slice() {
        [] => Uint128::zero(),
        [coin] if coin.denom == denom => coin.amount,
        _ => {
            return Err(ContractError::InvalidAmount {
                reason: format!("Only {} may be attached", denom),
            })
        }
    };

    if sent != expected {
        return Err(ContractError::InvalidAmount {
            reason: format!("Attached {}{}, declared {}{}", sent, denom, expected, denom),
        });
    }
    Ok(())
}

// ============================================================================
// Deposit After Transfer (claim)
// ============================================================================

/// Claim CW20 tokens already sent to the warehouse for a single owner.
pub fn execute_deposit_after_transfer(
    deps: DepsMut,
    env: Env,
    owner: String,
    token: AssetInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonreentrant(deps, |deps| {
        let owner = validate_owner(deps.api, &owner)?;
        let credits = vec![(owner.clone(), amount)];

        let response = claim_and_mint(deps, &env, &token, &credits, "deposit_after_transfer")?;
        Ok(response
            .add_attribute("owner", owner)
            .add_attribute("amount", amount))
    })
}

pub fn execute_deposit_after_transfer_batch(
    deps: DepsMut,
    env: Env,
    owners: Vec<String>,
    token: AssetInfo,
    amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    nonreentrant(deps, |deps| {
        let credits = validate_credits(deps.api, &owners, &amounts)?;

        let response = claim_and_mint(
            deps,
            &env,
            &token,
            &credits,
            "deposit_after_transfer_batch",
        )?;
        Ok(response.add_attribute("owner_count", credits.len().to_string()))
    })
}

fn claim_and_mint(
    deps: DepsMut,
    env: &Env,
    token: &AssetInfo,
    credits: &Credits,
    action: &str,
) -> Result<Response, ContractError> {
    let resolved = resolve_token(deps.as_ref(), token)?;
    let contract = resolved
        .contract
        .clone()
        .ok_or_else(|| ContractError::TokenNotSupported {
            token: resolved.info.to_string(),
        })?;
    let total = sum_credits(credits)?;

    let held: BalanceResponse = deps.querier.query_wasm_smart(
        contract.as_str(),
        &Cw20QueryMsg::Balance {
            address: env.contract.address.to_string(),
        },
    )?;
    let supply = total_supply(deps.storage, &resolved.id)?;

    let surplus = held
        .balance
        .checked_sub(supply)
        .map_err(|_| ContractError::InvalidAmount {
            reason: format!(
                "Held balance {} is below recorded supply {}",
                held.balance, supply
            ),
        })?;
    if total > surplus {
        return Err(ContractError::InvalidAmount {
            reason: format!("Claimed {} exceeds unclaimed surplus {}", total, surplus),
        });
    }

    mint_credits(deps.storage, &resolved, credits)?;

    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("token", resolved.info.to_string())
        .add_attribute("token_id", resolved.id.to_hex())
        .add_attribute("total_amount", total))
}

// ============================================================================
// CW20 Receive Hook
// ============================================================================

/// Deposit CW20 tokens delivered through `Cw20ExecuteMsg::Send`.
///
/// The caller is the token contract; the tokens are already held by the
/// warehouse when this runs.
pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    nonreentrant(deps, |deps| {
        let token = AssetInfo::cw20(info.sender.as_str());
        let resolved = resolve_token(deps.as_ref(), &token)?;
        let from = deps.api.addr_validate(&cw20_msg.sender)?;

        let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
        let credits = match receive_msg {
            ReceiveMsg::Deposit { owner } => {
                vec![(validate_owner(deps.api, &owner)?, cw20_msg.amount)]
            }
            ReceiveMsg::DepositBatch { owners, amounts } => {
                let credits = validate_credits(deps.api, &owners, &amounts)?;
                let total = sum_credits(&credits)?;
                if total != cw20_msg.amount {
                    return Err(ContractError::InvalidAmount {
                        reason: format!(
                            "Batch amounts sum to {}, received {}",
                            total, cw20_msg.amount
                        ),
                    });
                }
                credits
            }
        };

        mint_credits(deps.storage, &resolved, &credits)?;

        Ok(Response::new()
            .add_attribute("action", "deposit_cw20")
            .add_attribute("sender", from)
            .add_attribute("token", resolved.info.to_string())
            .add_attribute("token_id", resolved.id.to_hex())
            .add_attribute("owner_count", credits.len().to_string())
            .add_attribute("total_amount", cw20_msg.amount))
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Pair owners with amounts; any empty owner fails the whole batch.
fn validate_credits(
    api: &dyn Api,
    owners: &[String],
    amounts: &[Uint128],
) -> Result<Credits, ContractError> {
    if owners.len() != amounts.len() {
        return Err(ContractError::InvalidDepositParams);
    }

    owners
        .iter()
        .zip(amounts)
        .map(|(owner, amount)| Ok((validate_owner(api, owner)?, *amount)))
        .collect()
}

fn sum_credits(credits: &Credits) -> Result<Uint128, ContractError> {
    credits
        .iter()
        .try_fold(Uint128::zero(), |acc, (_, amount)| Ok(acc.checked_add(*amount)?))
}

fn mint_credits(
    storage: &mut dyn Storage,
    token: &ResolvedToken,
    credits: &Credits,
) -> Result<(), ContractError> {
    register_token(storage, token)?;
    for (owner, amount) in credits {
        mint(storage, owner, &token.id, *amount)?;
    }
    Ok(())
}
