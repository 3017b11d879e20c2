//! Chain-native model implementations.
//!
//! Each submodule mirrors the wire shapes of one chain family as returned by its
//! RPC interface. These types are inputs to the adaptors, which map them into the
//! canonical models in `models::core`.

use serde::{Deserialize, Serialize};

pub mod cosmos;

/// Supported blockchain platform types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(deny_unknown_fields)]
pub enum BlockChainType {
	/// Cosmos SDK chains running on CometBFT
	Cosmos,
}
