//! Inbound request shapes of the adaptor operation surface.
//!
//! Every request names the chain it targets so a dispatcher can route it
//! without inspecting the rest of the payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportChainsRequest {
	pub chain: String,
}

/// Public key to address derivation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertAddressRequest {
	pub chain: String,
	/// Hex encoded public key, optionally `0x` prefixed
	pub public_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidAddressRequest {
	pub chain: String,
	pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRequest {
	pub chain: String,
	pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderByHashRequest {
	pub chain: String,
	pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeaderByNumberRequest {
	pub chain: String,
	pub height: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockByNumberRequest {
	pub chain: String,
	pub height: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockByHashRequest {
	pub chain: String,
	pub hash: String,
}

/// Height range, both bounds inclusive and given as decimal strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockByRangeRequest {
	pub chain: String,
	pub start: String,
	pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTxRequest {
	pub chain: String,
	/// Signed transaction, standard base64
	pub raw_tx: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHashRequest {
	pub chain: String,
	pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxAddressRequest {
	pub chain: String,
	pub address: String,
	#[serde(default)]
	pub page: u32,
	#[serde(default)]
	pub page_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRequest {
	pub chain: String,
	#[serde(default)]
	pub raw_tx: String,
}
