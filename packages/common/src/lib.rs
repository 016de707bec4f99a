//! Common - Shared Types and Utilities for CL8Y Contracts
//!
//! This package provides shared type definitions and utility functions
//! used across the CL8Y smart contracts.

pub mod asset;

pub use asset::{Asset, AssetInfo};
