//! Canonical transaction shapes.

use serde::{Deserialize, Serialize};

/// Execution status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxStatus {
	Success,
	Failed,
	Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAddress {
	pub address: String,
}

impl From<String> for TransferAddress {
	fn from(address: String) -> Self {
		Self { address }
	}
}

/// Value movement extracted from one transfer event
///
/// Empty `amount` or addresses mean the chain did not report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTransfer {
	/// Index of the message inside a multi-message transaction
	pub message_index: u32,
	pub from: Vec<TransferAddress>,
	pub to: Vec<TransferAddress>,
	pub amount: String,
	pub fee: String,
	pub status: TxStatus,
	pub height: i64,
	pub timestamp: String,
}
