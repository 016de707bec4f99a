//! Asset descriptors shared by the CL8Y contracts.
//!
//! An asset is either a bank denom held natively by the chain or a CW20
//! token contract. Contracts that custody both kinds use these types to
//! describe what is being moved and to build the outbound transfer message.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, BankMsg, Coin, CosmosMsg, StdResult, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

/// Identifies a token without an amount
#[cw_serde]
pub enum AssetInfo {
    /// Bank denom (e.g. "uluna")
    Native { denom: String },
    /// CW20 token contract (unvalidated address string)
    Cw20 { contract_addr: String },
}

impl AssetInfo {
    pub fn native(denom: impl Into<String>) -> Self {
        AssetInfo::Native {
            denom: denom.into(),
        }
    }

    pub fn cw20(contract_addr: impl Into<String>) -> Self {
        AssetInfo::Cw20 {
            contract_addr: contract_addr.into(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, AssetInfo::Native { .. })
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetInfo::Native { denom } => write!(f, "{}", denom),
            AssetInfo::Cw20 { contract_addr } => write!(f, "{}", contract_addr),
        }
    }
}

/// An amount of a specific token
#[cw_serde]
pub struct Asset {
    pub info: AssetInfo,
    pub amount: Uint128,
}

impl Asset {
    pub fn new(info: AssetInfo, amount: impl Into<Uint128>) -> Self {
        Self {
            info,
            amount: amount.into(),
        }
    }

    /// Build the message that sends this asset from the calling contract to `recipient`.
    pub fn transfer_msg(&self, recipient: &Addr) -> StdResult<CosmosMsg> {
        match &self.info {
            AssetInfo::Native { denom } => Ok(CosmosMsg::Bank(BankMsg::Send {
                to_address: recipient.to_string(),
                amount: vec![Coin {
                    denom: denom.clone(),
                    amount: self.amount,
                }],
            })),
            AssetInfo::Cw20 { contract_addr } => Ok(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: contract_addr.clone(),
                msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                    recipient: recipient.to_string(),
                    amount: self.amount,
                })?,
                funds: vec![],
            })),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_transfer_msg() {
        let asset = Asset::new(AssetInfo::native("uluna"), 500u128);
        let msg = asset.transfer_msg(&Addr::unchecked("terra1owner")).unwrap();

        assert_eq!(
            msg,
            CosmosMsg::Bank(BankMsg::Send {
                to_address: "terra1owner".to_string(),
                amount: vec![Coin {
                    denom: "uluna".to_string(),
                    amount: Uint128::from(500u128),
                }],
            })
        );
    }

    #[test]
    fn test_cw20_transfer_msg() {
        let asset = Asset::new(AssetInfo::cw20("terra1token"), 42u128);
        let msg = asset.transfer_msg(&Addr::unchecked("terra1owner")).unwrap();

        match msg {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) => {
                assert_eq!(contract_addr, "terra1token");
                assert!(funds.is_empty());
                let inner: Cw20ExecuteMsg = cosmwasm_std::from_json(msg).unwrap();
                assert_eq!(
                    inner,
                    Cw20ExecuteMsg::Transfer {
                        recipient: "terra1owner".to_string(),
                        amount: Uint128::from(42u128),
                    }
                );
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(AssetInfo::native("uluna").to_string(), "uluna");
        assert_eq!(
            Asset::new(AssetInfo::native("uluna"), 7u128).to_string(),
            "7uluna"
        );
    }
}
