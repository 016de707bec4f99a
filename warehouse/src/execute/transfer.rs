//! Transfer, approval and owner-settings handlers.
//!
//! These only touch ledger storage; nothing here calls out, so none of them
//! take the reentrancy lock.

use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::ledger::{
    is_operator, move_balance, set_allowance, set_operator, set_withdraw_config, spend_allowance,
    validate_owner,
};
use crate::state::{WithdrawConfig, CONFIG};
use crate::token_id::TokenId;

// ============================================================================
// Transfers
// ============================================================================

/// Move `amount` of `token_id` from the caller to `receiver`.
pub fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    receiver: String,
    token_id: Binary,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let receiver = validate_owner(deps.api, &receiver)?;
    let id = parse_token_id(&token_id)?;

    move_balance(deps.storage, &info.sender, &receiver, &id, amount)?;

    Ok(Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("receiver", receiver)
        .add_attribute("token_id", id.to_hex())
        .add_attribute("amount", amount))
}

/// Move `amount` from `sender` to `receiver` on the sender's behalf.
///
/// Operators of `sender` (and `sender` itself) move balance without touching
/// allowances; any other caller spends `Allowance(sender, caller, id)`.
pub fn execute_transfer_from(
    deps: DepsMut,
    info: MessageInfo,
    sender: String,
    receiver: String,
    token_id: Binary,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let sender = validate_owner(deps.api, &sender)?;
    let receiver = validate_owner(deps.api, &receiver)?;
    let id = parse_token_id(&token_id)?;

    let via_operator =
        info.sender == sender || is_operator(deps.storage, &sender, &info.sender)?;
    if !via_operator {
        spend_allowance(deps.storage, &sender, &info.sender, &id, amount)?;
    }

    move_balance(deps.storage, &sender, &receiver, &id, amount)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_from")
        .add_attribute("caller", info.sender.as_str())
        .add_attribute("sender", sender)
        .add_attribute("receiver", receiver)
        .add_attribute("token_id", id.to_hex())
        .add_attribute("amount", amount)
        .add_attribute("via_operator", via_operator.to_string()))
}

/// Move balance from the caller to several receivers (all-or-nothing).
pub fn execute_batch_transfer(
    deps: DepsMut,
    info: MessageInfo,
    receivers: Vec<String>,
    token_id: Binary,
    amounts: Vec<Uint128>,
) -> Result<Response, ContractError> {
    if receivers.len() != amounts.len() {
        return Err(ContractError::InvalidTransferParams);
    }
    let id = parse_token_id(&token_id)?;

    let mut total = Uint128::zero();
    for (receiver, amount) in receivers.iter().zip(amounts) {
        let receiver = validate_owner(deps.api, receiver)?;
        move_balance(deps.storage, &info.sender, &receiver, &id, amount)?;
        total = total.checked_add(amount)?;
    }

    Ok(Response::new()
        .add_attribute("action", "batch_transfer")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("token_id", id.to_hex())
        .add_attribute("receiver_count", receivers.len().to_string())
        .add_attribute("total_amount", total))
}

// ============================================================================
// Approvals
// ============================================================================

/// Overwrite the allowance the caller grants `spender` for one token id.
pub fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    token_id: Binary,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let spender = deps.api.addr_validate(&spender)?;
    let id = parse_token_id(&token_id)?;

    set_allowance(deps.storage, &info.sender, &spender, &id, amount)?;

    Ok(Response::new()
        .add_attribute("action", "approve")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("spender", spender)
        .add_attribute("token_id", id.to_hex())
        .add_attribute("amount", amount))
}

pub fn execute_set_operator(
    deps: DepsMut,
    info: MessageInfo,
    operator: String,
    approved: bool,
) -> Result<Response, ContractError> {
    let operator = deps.api.addr_validate(&operator)?;

    set_operator(deps.storage, &info.sender, &operator, approved)?;

    Ok(Response::new()
        .add_attribute("action", "set_operator")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("operator", operator)
        .add_attribute("approved", approved.to_string()))
}

// ============================================================================
// Withdraw Config
// ============================================================================

/// Set the caller's delegated-withdrawal settings.
///
/// The incentive is checked against the instantiate-time cap and rejected,
/// never clamped.
pub fn execute_set_withdraw_config(
    deps: DepsMut,
    info: MessageInfo,
    config: WithdrawConfig,
) -> Result<Response, ContractError> {
    let contract_config = CONFIG.load(deps.storage)?;
    if let Some(max) = contract_config.max_incentive_bps {
        if config.incentive_bps > max {
            return Err(ContractError::IncentiveTooHigh {
                incentive_bps: config.incentive_bps,
                max,
            });
        }
    }

    set_withdraw_config(deps.storage, &info.sender, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_withdraw_config")
        .add_attribute("owner", info.sender.as_str())
        .add_attribute("incentive_bps", config.incentive_bps.to_string())
        .add_attribute("paused", config.paused.to_string()))
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_token_id(token_id: &Binary) -> Result<TokenId, ContractError> {
    TokenId::try_from(token_id).map_err(|e| ContractError::InvalidTokenId {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{allowance, balance_of, mint, withdraw_config};
    use crate::state::Config;
    use crate::token_id::NATIVE_TOKEN_ID;
    use cosmwasm_std::testing::{
        mock_dependencies, mock_info, MockApi, MockQuerier, MockStorage,
    };
    use cosmwasm_std::{Addr, OwnedDeps};

    fn setup(max_incentive_bps: Option<u32>) -> OwnedDeps<MockStorage, MockApi, MockQuerier> {
        let mut deps = mock_dependencies();
        CONFIG
            .save(
                deps.as_mut().storage,
                &Config {
                    native_denom: "uluna".to_string(),
                    max_incentive_bps,
                },
            )
            .unwrap();
        mint(
            deps.as_mut().storage,
            &Addr::unchecked("alice"),
            &NATIVE_TOKEN_ID,
            Uint128::new(100),
        )
        .unwrap();
        deps
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut deps = setup(None);
        let id = NATIVE_TOKEN_ID.to_binary();

        execute_approve(
            deps.as_mut(),
            mock_info("alice", &[]),
            "bob".to_string(),
            id.clone(),
            Uint128::new(100),
        )
        .unwrap();

        execute_transfer_from(
            deps.as_mut(),
            mock_info("bob", &[]),
            "alice".to_string(),
            "carol".to_string(),
            id.clone(),
            Uint128::new(60),
        )
        .unwrap();

        let alice = Addr::unchecked("alice");
        let bob = Addr::unchecked("bob");
        assert_eq!(
            allowance(&deps.storage, &alice, &bob, &NATIVE_TOKEN_ID).unwrap(),
            Uint128::new(40)
        );

        let err = execute_transfer_from(
            deps.as_mut(),
            mock_info("bob", &[]),
            "alice".to_string(),
            "carol".to_string(),
            id,
            Uint128::new(50),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientAllowance {
                available: Uint128::new(40),
                requested: Uint128::new(50),
            }
        );
    }

    #[test]
    fn test_operator_skips_allowance() {
        let mut deps = setup(None);
        let id = NATIVE_TOKEN_ID.to_binary();

        execute_set_operator(deps.as_mut(), mock_info("alice", &[]), "operator".to_string(), true)
            .unwrap();
        execute_transfer_from(
            deps.as_mut(),
            mock_info("operator", &[]),
            "alice".to_string(),
            "carol".to_string(),
            id,
            Uint128::new(30),
        )
        .unwrap();

        let carol = Addr::unchecked("carol");
        assert_eq!(
            balance_of(&deps.storage, &carol, &NATIVE_TOKEN_ID).unwrap(),
            Uint128::new(30)
        );
        assert_eq!(
            allowance(
                &deps.storage,
                &Addr::unchecked("alice"),
                &Addr::unchecked("operator"),
                &NATIVE_TOKEN_ID
            )
            .unwrap(),
            Uint128::zero()
        );
    }

    #[test]
    fn test_batch_transfer_length_mismatch() {
        let mut deps = setup(None);
        let err = execute_batch_transfer(
            deps.as_mut(),
            mock_info("alice", &[]),
            vec!["bob".to_string(), "carol".to_string()],
            NATIVE_TOKEN_ID.to_binary(),
            vec![Uint128::new(1)],
        )
        .unwrap_err();
        assert_eq!(err, ContractError::InvalidTransferParams);
    }

    #[test]
    fn test_invalid_token_id() {
        let mut deps = setup(None);
        let err = execute_transfer(
            deps.as_mut(),
            mock_info("alice", &[]),
            "bob".to_string(),
            Binary::from(vec![1u8; 31]),
            Uint128::new(1),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidTokenId { .. }));
    }

    #[test]
    fn test_set_withdraw_config_respects_cap() {
        let mut deps = setup(Some(1_000));

        let err = execute_set_withdraw_config(
            deps.as_mut(),
            mock_info("alice", &[]),
            WithdrawConfig {
                incentive_bps: 1_001,
                paused: false,
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::IncentiveTooHigh {
                incentive_bps: 1_001,
                max: 1_000,
            }
        );

        let config = WithdrawConfig {
            incentive_bps: 1_000,
            paused: true,
        };
        execute_set_withdraw_config(deps.as_mut(), mock_info("alice", &[]), config.clone())
            .unwrap();
        assert_eq!(
            withdraw_config(&deps.storage, &Addr::unchecked("alice")).unwrap(),
            config
        );
    }

    #[test]
    fn test_set_withdraw_config_uncapped() {
        let mut deps = setup(None);
        execute_set_withdraw_config(
            deps.as_mut(),
            mock_info("alice", &[]),
            WithdrawConfig {
                incentive_bps: 20_000,
                paused: false,
            },
        )
        .unwrap();
    }
}
