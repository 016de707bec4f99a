//! Message types for the CL8Y Warehouse contract
//!
//! Token ids travel as `Binary` (32 bytes, see `token_id.rs`). Deposits and
//! withdrawals name the underlying asset instead, so the contract knows
//! which bank denom or CW20 contract to move.

use common::AssetInfo;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use crate::state::WithdrawConfig;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Bank denom accepted as the native asset (e.g. "uluna")
    pub native_denom: String,
    /// Upper bound on per-owner withdrawal incentives in bps of `PERCENTAGE_SCALE`.
    /// `None` leaves the incentive unrestricted.
    pub max_incentive_bps: Option<u32>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deposits
    // ========================================================================
    /// Deposit on behalf of `owner`.
    ///
    /// Native: attach exactly `amount` of the native denom.
    /// CW20: the warehouse pulls `amount` from the caller via `TransferFrom`,
    /// so the caller must have granted it an allowance first.
    Deposit {
        owner: String,
        token: AssetInfo,
        amount: Uint128,
    },

    /// Deposit to several owners at once (all-or-nothing)
    DepositBatch {
        owners: Vec<String>,
        token: AssetInfo,
        amounts: Vec<Uint128>,
    },

    /// Claim CW20 tokens already transferred to the warehouse.
    ///
    /// Succeeds only if the warehouse holds at least `amount` more of the
    /// token than its recorded total supply. Call it in the same transaction
    /// as the transfer, otherwise anyone can claim the surplus first.
    DepositAfterTransfer {
        owner: String,
        token: AssetInfo,
        amount: Uint128,
    },

    /// Batch form of `DepositAfterTransfer`
    DepositAfterTransferBatch {
        owners: Vec<String>,
        token: AssetInfo,
        amounts: Vec<Uint128>,
    },

    /// CW20 receive hook (deposit via `Cw20ExecuteMsg::Send`)
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Withdrawals
    // ========================================================================
    /// Withdraw from the caller's own balance
    Withdraw { token: AssetInfo, amount: Uint128 },

    /// Withdraw on behalf of `owner`; `withdrawer` receives the owner's incentive.
    ///
    /// Authorization: anyone, unless the owner paused delegated withdrawals
    WithdrawFor {
        owner: String,
        token: AssetInfo,
        amount: Uint128,
        withdrawer: String,
    },

    /// Delegated withdrawal of several tokens at once (all-or-nothing)
    WithdrawBatchFor {
        owner: String,
        tokens: Vec<AssetInfo>,
        amounts: Vec<Uint128>,
        withdrawer: String,
    },

    // ========================================================================
    // Transfers & Approvals
    // ========================================================================
    /// Move balance from the caller to `receiver`
    Transfer {
        receiver: String,
        token_id: Binary,
        amount: Uint128,
    },

    /// Move balance from `sender` to `receiver` as spender or operator
    TransferFrom {
        sender: String,
        receiver: String,
        token_id: Binary,
        amount: Uint128,
    },

    /// Move balance from the caller to several receivers (all-or-nothing)
    BatchTransfer {
        receivers: Vec<String>,
        token_id: Binary,
        amounts: Vec<Uint128>,
    },

    /// Set (overwrite) the allowance of `spender` for one token id
    Approve {
        spender: String,
        token_id: Binary,
        amount: Uint128,
    },

    /// Grant or revoke blanket approval over all of the caller's balances
    SetOperator { operator: String, approved: bool },

    /// Set the caller's delegated-withdrawal settings
    SetWithdrawConfig { config: WithdrawConfig },
}

/// Payload of the CW20 receive hook
#[cw_serde]
pub enum ReceiveMsg {
    /// Credit the whole received amount to `owner`
    Deposit { owner: String },
    /// Split the received amount between owners; amounts must sum to it
    DepositBatch {
        owners: Vec<String>,
        amounts: Vec<Uint128>,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Fixed protocol constants
    #[returns(ConstantsResponse)]
    Constants {},

    #[returns(BalanceResponse)]
    Balance { owner: String, token_id: Binary },

    /// Paginated balances of one owner, ordered by token id
    #[returns(BalancesResponse)]
    Balances {
        owner: String,
        start_after: Option<Binary>,
        limit: Option<u32>,
    },

    #[returns(AllowanceResponse)]
    Allowance {
        owner: String,
        spender: String,
        token_id: Binary,
    },

    #[returns(IsOperatorResponse)]
    IsOperator { owner: String, operator: String },

    #[returns(TotalSupplyResponse)]
    TotalSupply { token_id: Binary },

    #[returns(WithdrawConfigResponse)]
    WithdrawConfig { owner: String },

    /// Encode an asset as its token id
    #[returns(TokenIdResponse)]
    TokenId { token: AssetInfo },

    /// Decode a token id back to its asset
    #[returns(TokenResponse)]
    Token { token_id: Binary },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub native_denom: String,
    pub max_incentive_bps: Option<u32>,
}

#[cw_serde]
pub struct ConstantsResponse {
    pub percentage_scale: Uint128,
    pub native_token_id: Binary,
    /// 0x-prefixed hex of the native sentinel address
    pub native_token_address: String,
}

#[cw_serde]
pub struct BalanceResponse {
    pub owner: Addr,
    pub token_id: Binary,
    pub balance: Uint128,
}

#[cw_serde]
pub struct BalanceEntry {
    pub token_id: Binary,
    pub balance: Uint128,
}

#[cw_serde]
pub struct BalancesResponse {
    pub owner: Addr,
    pub balances: Vec<BalanceEntry>,
}

#[cw_serde]
pub struct AllowanceResponse {
    pub owner: Addr,
    pub spender: Addr,
    pub token_id: Binary,
    pub amount: Uint128,
}

#[cw_serde]
pub struct IsOperatorResponse {
    pub owner: Addr,
    pub operator: Addr,
    pub approved: bool,
}

#[cw_serde]
pub struct TotalSupplyResponse {
    pub token_id: Binary,
    pub total_supply: Uint128,
}

#[cw_serde]
pub struct WithdrawConfigResponse {
    pub owner: Addr,
    pub incentive_bps: u32,
    pub paused: bool,
}

#[cw_serde]
pub struct TokenIdResponse {
    pub token_id: Binary,
    /// 0x-prefixed hex of the 20-byte token address
    pub token_address: String,
}

#[cw_serde]
pub struct TokenResponse {
    pub token_id: Binary,
    /// None if the id has never been deposited
    pub token: Option<AssetInfo>,
}
