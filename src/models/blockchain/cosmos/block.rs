//! CometBFT block and header structures.
//!
//! Note: These structures follow the CometBFT JSON-RPC responses of the `block`,
//! `block_by_hash`, `header`, `header_by_hash` and `blockchain` methods. Heights
//! are transported as decimal strings and hashes as uppercase hex strings.

use serde::{Deserialize, Serialize};

/// Identifier of a block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockId {
	/// Hex encoded block hash, empty for the block preceding genesis
	#[serde(default)]
	pub hash: String,
}

/// Block header
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
	#[serde(default)]
	pub chain_id: String,

	/// Decimal height
	pub height: String,

	/// RFC 3339 timestamp with nanosecond precision
	pub time: String,

	/// Identifier of the parent block
	#[serde(default)]
	pub last_block_id: BlockId,

	/// Merkle root of the block transactions
	#[serde(default)]
	pub data_hash: String,

	/// Application state root after the previous block
	#[serde(default)]
	pub app_hash: String,

	#[serde(default)]
	pub proposer_address: String,
}

/// Transaction list of a block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockData {
	/// Base64 encoded raw transactions; `null` for empty blocks on some node versions
	#[serde(default)]
	pub txs: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockBody {
	pub header: Header,
	#[serde(default)]
	pub data: BlockData,
}

/// Result of the `block` and `block_by_hash` methods
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
	pub block_id: BlockId,
	pub block: BlockBody,
}

impl Block {
	pub fn header(&self) -> &Header {
		&self.block.header
	}

	/// Raw transactions in block order
	pub fn txs(&self) -> &[String] {
		self.block.data.txs.as_deref().unwrap_or_default()
	}
}

/// Header together with the id of the block it belongs to
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockMeta {
	pub block_id: BlockId,
	#[serde(default)]
	pub block_size: String,
	pub header: Header,
	#[serde(default)]
	pub num_txs: String,
}

impl From<Block> for BlockMeta {
	fn from(block: Block) -> Self {
		let num_txs = block.txs().len().to_string();
		Self {
			block_id: block.block_id,
			block_size: String::new(),
			header: block.block.header,
			num_txs,
		}
	}
}

/// Result of the `blockchain` method
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockchainInfo {
	/// Latest height known to the node
	pub last_height: String,
	/// Metas in descending height order
	#[serde(default)]
	pub block_metas: Vec<BlockMeta>,
}
