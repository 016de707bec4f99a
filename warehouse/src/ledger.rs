//! Ledger store operations.
//!
//! The only code allowed to touch the balance, supply, allowance, operator
//! and withdraw-config maps. Mint and burn adjust total supply in the same
//! call so `TOTAL_SUPPLY[id] == sum(BALANCES[(*, id)])` holds after every
//! successful operation.

use cosmwasm_std::{Addr, Api, Deps, StdResult, Storage, Uint128};

use common::AssetInfo;

use crate::error::ContractError;
use crate::state::{
    WithdrawConfig, ALLOWANCES, BALANCES, CONFIG, OPERATORS, TOKEN_CONTRACTS, TOTAL_SUPPLY,
    WITHDRAW_CONFIGS,
};
use crate::token_id::{TokenAddress, TokenId, NATIVE_TOKEN_ID};

// ============================================================================
// Token Resolution
// ============================================================================

/// A token named in a message, validated and mapped to its ledger id.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    pub id: TokenId,
    /// Normalized asset (CW20 address validated)
    pub info: AssetInfo,
    /// CW20 contract, None for the native asset
    pub contract: Option<Addr>,
}

/// Map an `AssetInfo` to its token id.
///
/// Only the configured native denom is accepted. A CW20 whose derived id is
/// already registered to a different contract is rejected so ids never
/// collide.
pub fn resolve_token(deps: Deps, token: &AssetInfo) -> Result<ResolvedToken, ContractError> {
    match token {
        AssetInfo::Native { denom } => {
            let config = CONFIG.load(deps.storage)?;
            if *denom != config.native_denom {
                return Err(ContractError::TokenNotSupported {
                    token: denom.clone(),
                });
            }
            Ok(ResolvedToken {
                id: NATIVE_TOKEN_ID,
                info: token.clone(),
                contract: None,
            })
        }
        AssetInfo::Cw20 { contract_addr } => {
            let contract = deps.api.addr_validate(contract_addr)?;
            let address = TokenAddress::from_cw20(deps.api, &contract)?;
            if address.is_native() {
                return Err(ContractError::TokenNotSupported {
                    token: contract.to_string(),
                });
            }

            let id = TokenId::from_address(&address);
            if let Some(registered) = TOKEN_CONTRACTS.may_load(deps.storage, id.as_slice())? {
                if registered != contract {
                    return Err(ContractError::TokenNotSupported {
                        token: contract.to_string(),
                    });
                }
            }

            Ok(ResolvedToken {
                id,
                info: AssetInfo::cw20(contract.as_str()),
                contract: Some(contract),
            })
        }
    }
}

/// Record the CW20 contract behind an id (no-op for the native asset).
pub fn register_token(storage: &mut dyn Storage, token: &ResolvedToken) -> StdResult<()> {
    if let Some(contract) = &token.contract {
        if !TOKEN_CONTRACTS.has(storage, token.id.as_slice()) {
            TOKEN_CONTRACTS.save(storage, token.id.as_slice(), contract)?;
        }
    }
    Ok(())
}

/// Decode an id back to the asset it stands for, if known.
pub fn token_info(storage: &dyn Storage, id: &TokenId) -> StdResult<Option<AssetInfo>> {
    if id.is_native() {
        let config = CONFIG.load(storage)?;
        return Ok(Some(AssetInfo::native(config.native_denom)));
    }
    Ok(TOKEN_CONTRACTS
        .may_load(storage, id.as_slice())?
        .map(|contract| AssetInfo::cw20(contract.as_str())))
}

/// Validate an owner address; an empty address is the "zero owner".
pub fn validate_owner(api: &dyn Api, owner: &str) -> Result<Addr, ContractError> {
    if owner.trim().is_empty() {
        return Err(ContractError::ZeroOwner);
    }
    Ok(api.addr_validate(owner)?)
}

// ============================================================================
// Reads
// ============================================================================

pub fn balance_of(storage: &dyn Storage, owner: &Addr, id: &TokenId) -> StdResult<Uint128> {
    Ok(BALANCES
        .may_load(storage, (owner, id.as_slice()))?
        .unwrap_or_default())
}

pub fn total_supply(storage: &dyn Storage, id: &TokenId) -> StdResult<Uint128> {
    Ok(TOTAL_SUPPLY
        .may_load(storage, id.as_slice())?
        .unwrap_or_default())
}

pub fn allowance(
    storage: &dyn Storage,
    owner: &Addr,
    spender: &Addr,
    id: &TokenId,
) -> StdResult<Uint128> {
    Ok(ALLOWANCES
        .may_load(storage, (owner, spender, id.as_slice()))?
        .unwrap_or_default())
}

pub fn is_operator(storage: &dyn Storage, owner: &Addr, operator: &Addr) -> StdResult<bool> {
    Ok(OPERATORS
        .may_load(storage, (owner, operator))?
        .unwrap_or(false))
}

pub fn withdraw_config(storage: &dyn Storage, owner: &Addr) -> StdResult<WithdrawConfig> {
    Ok(WITHDRAW_CONFIGS
        .may_load(storage, owner)?
        .unwrap_or_default())
}

// ============================================================================
// Mutations
// ============================================================================

/// Credit `amount` to `owner` and grow total supply by the same amount.
pub fn mint(
    storage: &mut dyn Storage,
    owner: &Addr,
    id: &TokenId,
    amount: Uint128,
) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Ok(());
    }
    let supply = total_supply(storage, id)?.checked_add(amount)?;
    let balance = balance_of(storage, owner, id)?.checked_add(amount)?;

    TOTAL_SUPPLY.save(storage, id.as_slice(), &supply)?;
    BALANCES.save(storage, (owner, id.as_slice()), &balance)?;
    Ok(())
}

/// Debit `amount` from `owner` and shrink total supply by the same amount.
pub fn burn(
    storage: &mut dyn Storage,
    owner: &Addr,
    id: &TokenId,
    amount: Uint128,
) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Ok(());
    }
    let balance = balance_of(storage, owner, id)?;
    if amount > balance {
        return Err(ContractError::InsufficientBalance {
            available: balance,
            requested: amount,
        });
    }
    let supply = total_supply(storage, id)?.checked_sub(amount)?;

    BALANCES.save(storage, (owner, id.as_slice()), &(balance - amount))?;
    TOTAL_SUPPLY.save(storage, id.as_slice(), &supply)?;
    Ok(())
}

/// Move `amount` between owners; total supply is untouched.
pub fn move_balance(
    storage: &mut dyn Storage,
    from: &Addr,
    to: &Addr,
    id: &TokenId,
    amount: Uint128,
) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Ok(());
    }
    let from_balance = balance_of(storage, from, id)?;
    if amount > from_balance {
        return Err(ContractError::InsufficientBalance {
            available: from_balance,
            requested: amount,
        });
    }
    BALANCES.save(storage, (from, id.as_slice()), &(from_balance - amount))?;

    let to_balance = balance_of(storage, to, id)?.checked_add(amount)?;
    BALANCES.save(storage, (to, id.as_slice()), &to_balance)?;
    Ok(())
}

/// Consume `amount` of the allowance `owner` granted to `spender`.
pub fn spend_allowance(
    storage: &mut dyn Storage,
    owner: &Addr,
    spender: &Addr,
    id: &TokenId,
    amount: Uint128,
) -> Result<(), ContractError> {
    let current = allowance(storage, owner, spender, id)?;
    if amount > current {
        return Err(ContractError::InsufficientAllowance {
            available: current,
            requested: amount,
        });
    }
    ALLOWANCES.save(storage, (owner, spender, id.as_slice()), &(current - amount))?;
    Ok(())
}

pub fn set_allowance(
    storage: &mut dyn Storage,
    owner: &Addr,
    spender: &Addr,
    id: &TokenId,
    amount: Uint128,
) -> StdResult<()> {
    ALLOWANCES.save(storage, (owner, spender, id.as_slice()), &amount)
}

pub fn set_operator(
    storage: &mut dyn Storage,
    owner: &Addr,
    operator: &Addr,
    approved: bool,
) -> StdResult<()> {
    OPERATORS.save(storage, (owner, operator), &approved)
}

pub fn set_withdraw_config(
    storage: &mut dyn Storage,
    owner: &Addr,
    config: &WithdrawConfig,
) -> StdResult<()> {
    WITHDRAW_CONFIGS.save(storage, owner, config)
}
