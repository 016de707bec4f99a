//! Shared multi-test setup for the warehouse integration tests.

#![allow(dead_code)]

use cosmwasm_std::{coins, from_json, Addr, Binary, Empty, Uint128};
use cw20::{Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use common::AssetInfo;
use warehouse::msg::{
    BalanceResponse, ExecuteMsg, InstantiateMsg, QueryMsg, TokenIdResponse, TotalSupplyResponse,
};
use warehouse::NATIVE_TOKEN_ID;

pub const DENOM: &str = "uluna";
pub const INITIAL_NATIVE: u128 = 10_000_000_000;
pub const INITIAL_CW20: u128 = 1_000_000;

pub fn contract_warehouse() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        warehouse::contract::execute,
        warehouse::contract::instantiate,
        warehouse::contract::query,
    )
    .with_reply(warehouse::contract::reply);
    Box::new(contract)
}

pub fn contract_cw20() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

pub struct TestEnv {
    pub app: App,
    pub warehouse: Addr,
    pub token: Addr,
    pub alice: Addr,
    pub bob: Addr,
    pub carol: Addr,
    pub keeper: Addr,
}

pub fn setup() -> TestEnv {
    setup_with_cap(None)
}

pub fn setup_with_cap(max_incentive_bps: Option<u32>) -> TestEnv {
    let mut app = App::default();
    let admin = Addr::unchecked("terra1admin");
    let alice = Addr::unchecked("terra1alice");
    let bob = Addr::unchecked("terra1bob");
    let carol = Addr::unchecked("terra1carol");
    let keeper = Addr::unchecked("terra1keeper");

    app.init_modules(|router, _, storage| {
        for account in [&alice, &bob] {
            router
                .bank
                .init_balance(storage, account, coins(INITIAL_NATIVE, DENOM))
                .unwrap();
        }
    });

    let warehouse_code = app.store_code(contract_warehouse());
    let warehouse = app
        .instantiate_contract(
            warehouse_code,
            admin.clone(),
            &InstantiateMsg {
                native_denom: DENOM.to_string(),
                max_incentive_bps,
            },
            &[],
            "cl8y-warehouse",
            Some(admin.to_string()),
        )
        .unwrap();

    let cw20_code = app.store_code(contract_cw20());
    let token = app
        .instantiate_contract(
            cw20_code,
            admin.clone(),
            &cw20_base::msg::InstantiateMsg {
                name: "Test Token".to_string(),
                symbol: "TST".to_string(),
                decimals: 6,
                initial_balances: vec![
                    Cw20Coin {
                        address: alice.to_string(),
                        amount: Uint128::new(INITIAL_CW20),
                    },
                    Cw20Coin {
                        address: bob.to_string(),
                        amount: Uint128::new(INITIAL_CW20),
                    },
                ],
                mint: None,
                marketing: None,
            },
            &[],
            "cw20-test",
            None,
        )
        .unwrap();

    TestEnv {
        app,
        warehouse,
        token,
        alice,
        bob,
        carol,
        keeper,
    }
}

impl TestEnv {
    pub fn native_asset(&self) -> AssetInfo {
        AssetInfo::native(DENOM)
    }

    pub fn cw20_asset(&self) -> AssetInfo {
        AssetInfo::cw20(self.token.as_str())
    }

    pub fn native_id(&self) -> Binary {
        NATIVE_TOKEN_ID.to_binary()
    }

    pub fn cw20_id(&self) -> Binary {
        let res: TokenIdResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.warehouse,
                &QueryMsg::TokenId {
                    token: self.cw20_asset(),
                },
            )
            .unwrap();
        res.token_id
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn balance(&self, owner: &Addr, token_id: &Binary) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.warehouse,
                &QueryMsg::Balance {
                    owner: owner.to_string(),
                    token_id: token_id.clone(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn total_supply(&self, token_id: &Binary) -> Uint128 {
        let res: TotalSupplyResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.warehouse,
                &QueryMsg::TotalSupply {
                    token_id: token_id.clone(),
                },
            )
            .unwrap();
        res.total_supply
    }

    pub fn bank_balance(&self, addr: &Addr) -> Uint128 {
        self.app.wrap().query_balance(addr, DENOM).unwrap().amount
    }

    pub fn cw20_balance(&self, addr: &Addr) -> Uint128 {
        let res: cw20::BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.token,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    pub fn is_locked(&self) -> bool {
        self.app
            .wrap()
            .query_wasm_raw(&self.warehouse, b"reentrancy_lock".to_vec())
            .unwrap()
            .map(|raw| from_json::<bool>(&raw).unwrap())
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    pub fn execute(&mut self, sender: &Addr, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.warehouse.clone(), msg, &[])
    }

    pub fn deposit_native(
        &mut self,
        sender: &Addr,
        owner: &Addr,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        let funds = if amount == 0 { vec![] } else { coins(amount, DENOM) };
        self.app.execute_contract(
            sender.clone(),
            self.warehouse.clone(),
            &ExecuteMsg::Deposit {
                owner: owner.to_string(),
                token: self.native_asset(),
                amount: Uint128::new(amount),
            },
            &funds,
        )
    }

    /// Grant the warehouse a CW20 allowance so it can pull `amount`.
    pub fn approve_cw20(&mut self, owner: &Addr, amount: u128) {
        self.app
            .execute_contract(
                owner.clone(),
                self.token.clone(),
                &Cw20ExecuteMsg::IncreaseAllowance {
                    spender: self.warehouse.to_string(),
                    amount: Uint128::new(amount),
                    expires: None,
                },
                &[],
            )
            .unwrap();
    }

    pub fn deposit_cw20(
        &mut self,
        sender: &Addr,
        owner: &Addr,
        amount: u128,
    ) -> anyhow::Result<AppResponse> {
        let msg = ExecuteMsg::Deposit {
            owner: owner.to_string(),
            token: self.cw20_asset(),
            amount: Uint128::new(amount),
        };
        self.execute(sender, &msg)
    }
}

/// Root cause of a failed execution, as a string
pub fn root_error(res: anyhow::Result<AppResponse>) -> String {
    res.unwrap_err().root_cause().to_string()
}
