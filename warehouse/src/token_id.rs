//! Token Id Encoding
//!
//! Every token the warehouse custodies is keyed by a fixed-width 32-byte id
//! derived from a 20-byte (160-bit) token address.
//!
//! ## Id Format
//!
//! ```text
//! | Zero padding (12 bytes) | Token address (20 bytes) |
//! ```
//!
//! `TokenId::from_address` and `TokenId::address` are inverse functions, so
//! the mapping between addresses and well-formed ids is a bijection. Ids with
//! non-zero padding are rejected when parsed.
//!
//! ## Token Addresses
//!
//! - Native asset: the reserved sentinel `0xEEEE...EEEE`
//! - CW20: last 20 bytes of `keccak256(canonical contract address)`

use cosmwasm_std::{Addr, Api, Binary, StdError, StdResult};
use tiny_keccak::{Hasher, Keccak};

/// Width of a token address in bytes
pub const TOKEN_ADDRESS_LEN: usize = 20;

/// Width of a token id in bytes
pub const TOKEN_ID_LEN: usize = 32;

const PADDING_LEN: usize = TOKEN_ID_LEN - TOKEN_ADDRESS_LEN;

/// Sentinel address standing in for the chain's native asset
pub const NATIVE_TOKEN_ADDRESS: TokenAddress = TokenAddress([0xEE; TOKEN_ADDRESS_LEN]);

/// Reserved id of the native asset
pub const NATIVE_TOKEN_ID: TokenId = TokenId::from_address(&NATIVE_TOKEN_ADDRESS);

// ============================================================================
// Token Address
// ============================================================================

/// 160-bit address-like token identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenAddress(pub [u8; TOKEN_ADDRESS_LEN]);

impl TokenAddress {
    /// Derive the address of a CW20 token contract.
    ///
    /// The contract address is canonicalized first so that differently
    /// cased spellings of the same address map to the same token.
    pub fn from_cw20(api: &dyn Api, contract: &Addr) -> StdResult<Self> {
        let canonical = api.addr_canonicalize(contract.as_str())?;
        let hash = keccak256(canonical.as_slice());

        let mut raw = [0u8; TOKEN_ADDRESS_LEN];
        raw.copy_from_slice(&hash[PADDING_LEN..]);
        Ok(Self(raw))
    }

    pub fn is_native(&self) -> bool {
        *self == NATIVE_TOKEN_ADDRESS
    }

    /// 0x-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

// ============================================================================
// Token Id
// ============================================================================

/// Fixed-width ledger key for a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId([u8; TOKEN_ID_LEN]);

impl TokenId {
    /// Encode a token address as an id (left-padded with zeros)
    pub const fn from_address(address: &TokenAddress) -> Self {
        let mut bytes = [0u8; TOKEN_ID_LEN];
        let mut i = 0;
        while i < TOKEN_ADDRESS_LEN {
            bytes[PADDING_LEN + i] = address.0[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Decode the token address this id was built from
    pub fn address(&self) -> TokenAddress {
        let mut raw = [0u8; TOKEN_ADDRESS_LEN];
        raw.copy_from_slice(&self.0[PADDING_LEN..]);
        TokenAddress(raw)
    }

    /// Parse from 32 bytes, rejecting non-zero padding
    pub fn from_bytes32(bytes: &[u8; TOKEN_ID_LEN]) -> StdResult<Self> {
        if bytes[..PADDING_LEN].iter().any(|b| *b != 0) {
            return Err(StdError::generic_err("Non-zero token id padding"));
        }
        Ok(Self(*bytes))
    }

    /// Parse from an arbitrary byte slice (storage keys, message payloads)
    pub fn from_slice(bytes: &[u8]) -> StdResult<Self> {
        let bytes: &[u8; TOKEN_ID_LEN] = bytes.try_into().map_err(|_| {
            StdError::generic_err(format!(
                "Invalid token id length: expected {} bytes, got {}",
                TOKEN_ID_LEN,
                bytes.len()
            ))
        })?;
        Self::from_bytes32(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn to_bytes32(&self) -> [u8; TOKEN_ID_LEN] {
        self.0
    }

    pub fn to_binary(&self) -> Binary {
        Binary::from(self.0.to_vec())
    }

    /// 0x-prefixed lowercase hex (for attributes)
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn is_native(&self) -> bool {
        *self == NATIVE_TOKEN_ID
    }
}

impl TryFrom<&Binary> for TokenId {
    type Error = StdError;

    fn try_from(value: &Binary) -> StdResult<Self> {
        Self::from_slice(value.as_slice())
    }
}

impl From<TokenAddress> for TokenId {
    fn from(address: TokenAddress) -> Self {
        Self::from_address(&address)
    }
}

/// Compute keccak256 hash
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut output);
    output
}
