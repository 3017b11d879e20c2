//! Canonical block shapes.

use serde::{Deserialize, Serialize};

use super::{CanonicalTransfer, TxStatus};

/// Chain independent block header
///
/// Hashes are fixed-length uppercase hex digests and `number` is base-10,
/// whatever the chain-native encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalBlockHeader {
	pub hash: String,
	pub tx_root_hash: String,
	pub parent_hash: String,
	pub number: String,
	pub time_unix_seconds: u64,
}

/// One transaction of a block with the transfers it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalBlockTransaction {
	pub hash: String,
	/// Position inside the block
	pub index: u32,
	pub status: TxStatus,
	/// Fee as reported by the chain, empty when not reported
	pub fee: String,
	pub transfers: Vec<CanonicalTransfer>,
}

/// Block header with its transactions in block order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalBlock {
	pub header: CanonicalBlockHeader,
	pub transactions: Vec<CanonicalBlockTransaction>,
}

/// Headers of a height range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRangeSummary {
	/// Latest height known to the node, base-10
	pub last_height: String,
	pub blocks: Vec<CanonicalBlockHeader>,
}
