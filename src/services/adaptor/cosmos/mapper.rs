//! Chain-native to canonical conversions.
//!
//! Hashes become 64 uppercase hex digits, heights base-10 strings and times
//! Unix seconds. Values that do not fit are reported as malformed, never
//! replaced by zero.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::DateTime;
use sha2::{Digest, Sha256};

use crate::{
	models::{
		CanonicalBlockHeader, CanonicalBlockTransaction, CosmosBlockId, CosmosHeader,
		CosmosTxResponse, TxStatus,
	},
	services::adaptor::{
		cosmos::events::{extract_fee, transfers, TransferContext},
		AdaptorError,
	},
};

/// Byte length of CometBFT block and transaction hashes
pub const HASH_LEN: usize = 32;

/// Merkle root of an empty transaction list, SHA-256 of no input
pub const EMPTY_DATA_HASH: &str =
	"E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";

/// Parent hash reported for the first block
pub const GENESIS_PARENT_HASH: &str =
	"0000000000000000000000000000000000000000000000000000000000000000";

/// Canonical form of a hash given as hex, with or without `0x`
pub fn normalize_hash(field: &str, value: &str) -> Result<String, AdaptorError> {
	let trimmed = value.strip_prefix("0x").unwrap_or(value);
	let bytes = hex::decode(trimmed).map_err(|e| {
		AdaptorError::malformed_upstream_data(
			field,
			format!("'{}' is not a hex hash", value),
			Some(Box::new(e)),
		)
	})?;
	hash_bytes_to_hex(field, &bytes)
}

/// Canonical form of a hash given as raw bytes
pub fn hash_bytes_to_hex(field: &str, bytes: &[u8]) -> Result<String, AdaptorError> {
	if bytes.len() != HASH_LEN {
		return Err(AdaptorError::malformed_upstream_data(
			field,
			format!("expected {} hash bytes, got {}", HASH_LEN, bytes.len()),
			None,
		));
	}
	Ok(hex::encode_upper(bytes))
}

pub fn parse_height(field: &str, value: &str) -> Result<u64, AdaptorError> {
	value.parse::<u64>().map_err(|e| {
		AdaptorError::malformed_upstream_data(
			field,
			format!("'{}' is not a block height", value),
			Some(Box::new(e)),
		)
	})
}

pub fn format_height(height: u64) -> String {
	height.to_string()
}

/// Unix seconds of an RFC 3339 timestamp; times before the epoch are rejected
pub fn parse_time(field: &str, value: &str) -> Result<u64, AdaptorError> {
	let time = DateTime::parse_from_rfc3339(value).map_err(|e| {
		AdaptorError::malformed_upstream_data(
			field,
			format!("'{}' is not an RFC 3339 time", value),
			Some(Box::new(e)),
		)
	})?;

	u64::try_from(time.timestamp()).map_err(|e| {
		AdaptorError::malformed_upstream_data(
			field,
			format!("'{}' is before the Unix epoch", value),
			Some(Box::new(e)),
		)
	})
}

pub fn tx_status(code: u32) -> TxStatus {
	if code == 0 {
		TxStatus::Success
	} else {
		TxStatus::Failed
	}
}

/// Hash of a base64 encoded raw transaction, as indexed by CometBFT
pub fn tx_hash(raw_tx: &str) -> Result<String, AdaptorError> {
	let bytes = BASE64.decode(raw_tx.as_bytes()).map_err(|e| {
		AdaptorError::malformed_upstream_data(
			"block.data.txs",
			"transaction is not valid base64",
			Some(Box::new(e)),
		)
	})?;
	Ok(hex::encode_upper(Sha256::digest(bytes)))
}

pub fn map_block_header(
	block_id: &CosmosBlockId,
	header: &CosmosHeader,
) -> Result<CanonicalBlockHeader, AdaptorError> {
	let height = parse_height("header.height", &header.height)?;
	let hash = normalize_hash("block_id.hash", &block_id.hash)?;

	let parent_hash = if header.last_block_id.hash.is_empty() {
		if height != 1 {
			return Err(AdaptorError::malformed_upstream_data(
				"header.last_block_id.hash",
				format!("missing parent hash at height {}", height),
				None,
			));
		}
		GENESIS_PARENT_HASH.to_string()
	} else {
		normalize_hash("header.last_block_id.hash", &header.last_block_id.hash)?
	};

	let tx_root_hash = if header.data_hash.is_empty() {
		EMPTY_DATA_HASH.to_string()
	} else {
		normalize_hash("header.data_hash", &header.data_hash)?
	};

	Ok(CanonicalBlockHeader {
		hash,
		tx_root_hash,
		parent_hash,
		number: format_height(height),
		time_unix_seconds: parse_time("header.time", &header.time)?,
	})
}

/// Maps one transaction of a block together with its transfers
///
/// `timestamp` is the block time copied into every transfer.
pub fn map_block_transaction(
	tx: &CosmosTxResponse,
	index: u32,
	timestamp: &str,
) -> Result<CanonicalBlockTransaction, AdaptorError> {
	let height = parse_height("tx.height", &tx.height)?;
	let height = i64::try_from(height).map_err(|e| {
		AdaptorError::malformed_upstream_data(
			"tx.height",
			format!("height {} does not fit a signed 64-bit integer", height),
			Some(Box::new(e)),
		)
	})?;

	let events = &tx.tx_result.events;
	let fee = extract_fee(events);
	let status = tx_status(tx.tx_result.code);
	let context = TransferContext {
		fee: fee.clone(),
		status,
		height,
		timestamp: timestamp.to_string(),
	};

	Ok(CanonicalBlockTransaction {
		hash: normalize_hash("tx.hash", &tx.hash)?,
		index,
		status,
		fee,
		transfers: transfers(events, context).collect(),
	})
}
