//! Query handlers for the CL8Y Warehouse contract.

use cosmwasm_std::{Binary, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use common::AssetInfo;

use crate::ledger::{
    allowance, balance_of, is_operator, resolve_token, token_info, total_supply, withdraw_config,
};
use crate::msg::{
    AllowanceResponse, BalanceEntry, BalanceResponse, BalancesResponse, ConfigResponse,
    ConstantsResponse, IsOperatorResponse, TokenIdResponse, TokenResponse, TotalSupplyResponse,
    WithdrawConfigResponse,
};
use crate::state::{BALANCES, CONFIG, PERCENTAGE_SCALE};
use crate::token_id::{TokenId, NATIVE_TOKEN_ADDRESS, NATIVE_TOKEN_ID};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

// ============================================================================
// Config Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        native_denom: config.native_denom,
        max_incentive_bps: config.max_incentive_bps,
    })
}

pub fn query_constants() -> StdResult<ConstantsResponse> {
    Ok(ConstantsResponse {
        percentage_scale: Uint128::from(PERCENTAGE_SCALE),
        native_token_id: NATIVE_TOKEN_ID.to_binary(),
        native_token_address: NATIVE_TOKEN_ADDRESS.to_hex(),
    })
}

// ============================================================================
// Ledger Queries
// ============================================================================

pub fn query_balance(deps: Deps, owner: String, token_id: Binary) -> StdResult<BalanceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let id = TokenId::try_from(&token_id)?;
    Ok(BalanceResponse {
        balance: balance_of(deps.storage, &owner, &id)?,
        owner,
        token_id: id.to_binary(),
    })
}

/// Query one owner's balances, ordered by token id.
pub fn query_balances(
    deps: Deps,
    owner: String,
    start_after: Option<Binary>,
    limit: Option<u32>,
) -> StdResult<BalancesResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start: Option<Bound<&[u8]>> = start_after
        .as_ref()
        .map(|id| Bound::exclusive(id.as_slice()));

    let balances = BALANCES
        .prefix(&owner)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (id, balance) = item?;
            Ok(BalanceEntry {
                token_id: Binary::from(id),
                balance,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(BalancesResponse { owner, balances })
}

pub fn query_allowance(
    deps: Deps,
    owner: String,
    spender: String,
    token_id: Binary,
) -> StdResult<AllowanceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let spender = deps.api.addr_validate(&spender)?;
    let id = TokenId::try_from(&token_id)?;
    Ok(AllowanceResponse {
        amount: allowance(deps.storage, &owner, &spender, &id)?,
        owner,
        spender,
        token_id: id.to_binary(),
    })
}

pub fn query_is_operator(
    deps: Deps,
    owner: String,
    operator: String,
) -> StdResult<IsOperatorResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let operator = deps.api.addr_validate(&operator)?;
    Ok(IsOperatorResponse {
        approved: is_operator(deps.storage, &owner, &operator)?,
        owner,
        operator,
    })
}

pub fn query_total_supply(deps: Deps, token_id: Binary) -> StdResult<TotalSupplyResponse> {
    let id = TokenId::try_from(&token_id)?;
    Ok(TotalSupplyResponse {
        total_supply: total_supply(deps.storage, &id)?,
        token_id: id.to_binary(),
    })
}

pub fn query_withdraw_config(deps: Deps, owner: String) -> StdResult<WithdrawConfigResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let config = withdraw_config(deps.storage, &owner)?;
    Ok(WithdrawConfigResponse {
        owner,
        incentive_bps: config.incentive_bps,
        paused: config.paused,
    })
}

// ============================================================================
// Token Id Queries
// ============================================================================

/// Encode an asset as its token id.
pub fn query_token_id(deps: Deps, token: AssetInfo) -> StdResult<TokenIdResponse> {
    let resolved =
        resolve_token(deps, &token).map_err(|e| StdError::generic_err(e.to_string()))?;
    Ok(TokenIdResponse {
        token_id: resolved.id.to_binary(),
        token_address: resolved.id.address().to_hex(),
    })
}

/// Decode a token id back to its asset. CW20 ids are only known once deposited.
pub fn query_token(deps: Deps, token_id: Binary) -> StdResult<TokenResponse> {
    let id = TokenId::try_from(&token_id)?;
    Ok(TokenResponse {
        token: token_info(deps.storage, &id)?,
        token_id: id.to_binary(),
    })
}
