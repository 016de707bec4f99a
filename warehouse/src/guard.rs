//! Reentrancy guard for handlers that call out to other contracts.
//!
//! CosmWasm runs a handler's outbound messages only after the handler has
//! returned, so the lock cannot simply be dropped at the end of the handler.
//! Instead the last outbound message is dispatched as a submessage with
//! `reply_on_success`; the lock stays held while every message executes and
//! is released in the `reply` entry point. A failing message reverts the
//! whole transaction, lock included.

use cosmwasm_std::{DepsMut, ReplyOn, Response, StdResult, Storage};

use crate::error::ContractError;
use crate::state::REENTRANCY_LOCK;

/// Reply id used to release the lock after the last outbound message
pub const UNLOCK_REPLY_ID: u64 = 1;

pub fn is_locked(storage: &dyn Storage) -> StdResult<bool> {
    Ok(REENTRANCY_LOCK.may_load(storage)?.unwrap_or(false))
}

fn acquire(storage: &mut dyn Storage) -> Result<(), ContractError> {
    if is_locked(storage)? {
        return Err(ContractError::ReentrantCall);
    }
    REENTRANCY_LOCK.save(storage, &true)?;
    Ok(())
}

pub fn release(storage: &mut dyn Storage) -> StdResult<()> {
    REENTRANCY_LOCK.save(storage, &false)
}

/// Run `handler` while holding the reentrancy lock.
pub fn nonreentrant<F>(mut deps: DepsMut, handler: F) -> Result<Response, ContractError>
where
    F: FnOnce(DepsMut) -> Result<Response, ContractError>,
{
    acquire(deps.storage)?;

    match handler(deps.branch()) {
        Ok(response) => hold_until_dispatched(deps.storage, response),
        Err(err) => {
            release(deps.storage)?;
            Err(err)
        }
    }
}

fn hold_until_dispatched(
    storage: &mut dyn Storage,
    mut response: Response,
) -> Result<Response, ContractError> {
    match response.messages.last_mut() {
        None => {
            release(storage)?;
            Ok(response)
        }
        Some(last) => {
            last.id = UNLOCK_REPLY_ID;
            last.reply_on = ReplyOn::Success;
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;
    use cosmwasm_std::{coins, BankMsg};

    #[test]
    fn test_released_without_messages() {
        let mut deps = mock_dependencies();

        let res = nonreentrant(deps.as_mut(), |_| Ok(Response::new())).unwrap();
        assert!(res.messages.is_empty());
        assert!(!is_locked(&deps.storage).unwrap());
    }

    #[test]
    fn test_released_on_error() {
        let mut deps = mock_dependencies();

        let err = nonreentrant(deps.as_mut(), |_| Err(ContractError::ZeroOwner)).unwrap_err();
        assert_eq!(err, ContractError::ZeroOwner);
        assert!(!is_locked(&deps.storage).unwrap());
    }

    #[test]
    fn test_held_until_reply() {
        let mut deps = mock_dependencies();

        let res = nonreentrant(deps.as_mut(), |_| {
            Ok(Response::new()
                .add_message(BankMsg::Send {
                    to_address: "terra1a".to_string(),
                    amount: coins(1, "uluna"),
                })
                .add_message(BankMsg::Send {
                    to_address: "terra1b".to_string(),
                    amount: coins(2, "uluna"),
                }))
        })
        .unwrap();

        assert!(is_locked(&deps.storage).unwrap());
        assert_eq!(res.messages[0].reply_on, ReplyOn::Never);
        assert_eq!(res.messages[1].reply_on, ReplyOn::Success);
        assert_eq!(res.messages[1].id, UNLOCK_REPLY_ID);

        // nested entry while held
        let err = nonreentrant(deps.as_mut(), |_| Ok(Response::new())).unwrap_err();
        assert_eq!(err, ContractError::ReentrantCall);

        release(&mut deps.storage).unwrap();
        assert!(!is_locked(&deps.storage).unwrap());
    }
}
