//! CometBFT transaction result structures.
//!
//! Note: These structures follow the CometBFT JSON-RPC responses of the `tx`,
//! `tx_search` and `broadcast_tx_sync` methods (CometBFT 0.37+ where event
//! attributes are plain strings).

use serde::{Deserialize, Serialize};

/// Key/value annotation of an ABCI event
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventAttribute {
	#[serde(default)]
	pub key: String,

	#[serde(default)]
	pub value: String,

	/// Whether the node indexes this attribute for `tx_search`
	#[serde(rename = "index", default)]
	pub indexed: bool,
}

/// ABCI event emitted during transaction execution
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
	/// Event type, e.g. `transfer`, `message`, `tx`
	#[serde(rename = "type")]
	pub kind: String,

	#[serde(default)]
	pub attributes: Vec<EventAttribute>,
}

impl Event {
	/// Value of the last attribute named `key`
	pub fn attribute(&self, key: &str) -> Option<&str> {
		self.attributes
			.iter()
			.rev()
			.find(|attr| attr.key == key)
			.map(|attr| attr.value.as_str())
	}
}

/// DeliverTx outcome of a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecResult {
	/// Zero on success
	#[serde(default)]
	pub code: u32,

	#[serde(default)]
	pub codespace: String,

	#[serde(default)]
	pub log: String,

	#[serde(default)]
	pub gas_wanted: String,

	#[serde(default)]
	pub gas_used: String,

	#[serde(default)]
	pub events: Vec<Event>,
}

/// Result of the `tx` method
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxResponse {
	/// Uppercase hex SHA-256 of the raw transaction
	pub hash: String,

	/// Decimal height of the including block
	pub height: String,

	/// Position inside the block
	#[serde(default)]
	pub index: u32,

	pub tx_result: ExecResult,

	/// Base64 encoded raw transaction
	#[serde(default)]
	pub tx: String,
}

/// Result of the `tx_search` method
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxSearchResult {
	#[serde(default)]
	pub txs: Vec<TxResponse>,

	/// Decimal count of all matches, across pages
	pub total_count: String,
}

/// Result of the `broadcast_tx_sync` method (CheckTx outcome)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BroadcastResult {
	#[serde(default)]
	pub code: u32,

	#[serde(default)]
	pub data: String,

	#[serde(default)]
	pub log: String,

	#[serde(default)]
	pub codespace: String,

	pub hash: String,
}

impl BroadcastResult {
	pub fn is_accepted(&self) -> bool {
		self.code == 0
	}
}
