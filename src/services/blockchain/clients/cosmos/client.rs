//! Cosmos client implementation.
//!
//! Talks CometBFT JSON-RPC. Account and balance lookups go through `abci_query`
//! with protobuf-encoded gRPC query messages; blocks, headers and transactions
//! use the native CometBFT methods.

use anyhow::Context;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bech32::{ToBase32, Variant};
use prost::Message;
use ripemd::Ripemd160;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::instrument;

use crate::{
	models::{
		CosmosBlock, CosmosBlockId, CosmosBlockMeta, CosmosBlockchainInfo, CosmosBroadcastResult,
		CosmosCoin, CosmosHeader, CosmosQueryAccountRequest, CosmosQueryAccountResponse,
		CosmosQueryBalanceRequest, CosmosQueryBalanceResponse, CosmosTxResponse,
		CosmosTxSearchResult, Network, RawAccountPayload,
	},
	services::blockchain::{transports::CosmosTransportClient, BlockchainTransport},
};

use super::error::CosmosClientError;

const RPC_METHOD_ABCI_QUERY: &str = "abci_query";
const RPC_METHOD_BLOCK: &str = "block";
const RPC_METHOD_BLOCK_BY_HASH: &str = "block_by_hash";
const RPC_METHOD_HEADER_BY_HASH: &str = "header_by_hash";
const RPC_METHOD_BLOCKCHAIN: &str = "blockchain";
const RPC_METHOD_TX: &str = "tx";
const RPC_METHOD_TX_SEARCH: &str = "tx_search";
const RPC_METHOD_BROADCAST_TX_SYNC: &str = "broadcast_tx_sync";

const ACCOUNT_QUERY_PATH: &str = "/cosmos.auth.v1beta1.Query/Account";
const BALANCE_QUERY_PATH: &str = "/cosmos.bank.v1beta1.Query/Balance";

/// Length of a compressed secp256k1 public key
const COMPRESSED_PUBKEY_LEN: usize = 33;

#[derive(Debug, Deserialize)]
struct AbciQueryResult {
	response: AbciQueryResponse,
}

#[derive(Debug, Deserialize)]
struct AbciQueryResponse {
	#[serde(default)]
	code: u32,
	#[serde(default)]
	log: String,
	#[serde(default)]
	codespace: String,
	/// Base64 encoded query response; `null` when the query failed
	#[serde(default)]
	value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HeaderResult {
	header: Option<CosmosHeader>,
}

/// Decodes a hex hash, accepting an optional `0x` prefix
fn decode_hash(hash: &str) -> Result<Vec<u8>, anyhow::Error> {
	let trimmed = hash.strip_prefix("0x").unwrap_or(hash);
	hex::decode(trimmed).map_err(|e| {
		anyhow::anyhow!(CosmosClientError::invalid_input(
			format!("hash '{}' is not valid hex", hash),
			Some(Box::new(e)),
			None,
		))
	})
}

fn method_metadata(method: &str) -> Option<HashMap<String, String>> {
	Some(HashMap::from([("method".to_string(), method.to_string())]))
}

/// Client for Cosmos SDK chains
///
/// Safe to share between concurrent requests; all state lives in the transport.
#[derive(Clone)]
pub struct CosmosClient<T: Send + Sync + Clone> {
	http_client: T,
	/// Bech32 human readable part used for derived addresses
	account_prefix: String,
}

impl<T: Send + Sync + Clone> CosmosClient<T> {
	pub fn new_with_transport(http_client: T, account_prefix: &str) -> Self {
		Self {
			http_client,
			account_prefix: account_prefix.to_string(),
		}
	}
}

impl CosmosClient<CosmosTransportClient> {
	/// Connects to the first healthy RPC endpoint of `network`
	pub async fn new(network: &Network) -> Result<Self, anyhow::Error> {
		let http_client = CosmosTransportClient::new(network).await?;
		Ok(Self::new_with_transport(http_client, &network.account_prefix))
	}
}

impl<T: Send + Sync + Clone + BlockchainTransport> CosmosClient<T> {
	/// Sends one JSON-RPC call and returns its `result` member
	async fn call_raw(&self, method: &'static str, params: Value) -> Result<Value, anyhow::Error> {
		let response = self
			.http_client
			.send_raw_request(method, Some(params))
			.await
			.with_context(|| format!("Failed to send '{}' request", method))?;

		if let Some(rpc_error) = response.get("error") {
			let code = rpc_error.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
			let message = rpc_error
				.get("message")
				.and_then(|m| m.as_str())
				.unwrap_or("Unknown RPC error");
			let data = rpc_error.get("data").and_then(|d| d.as_str()).unwrap_or("");

			let error = CosmosClientError::rpc_error(
				format!(
					"Cosmos RPC request failed for method '{}': {} {} (code {})",
					method, message, data, code
				)
				.trim_end()
				.to_string(),
				None,
				method_metadata(method),
			);
			return Err(anyhow::anyhow!(error));
		}

		response.get("result").cloned().ok_or_else(|| {
			anyhow::anyhow!(CosmosClientError::unexpected_response_structure(
				format!("Missing 'result' in '{}' response", method),
				None,
				method_metadata(method),
			))
		})
	}

	/// Like [`Self::call_raw`], decoding the result into `R`
	async fn call<R: DeserializeOwned>(
		&self,
		method: &'static str,
		params: Value,
	) -> Result<R, anyhow::Error> {
		let result = self.call_raw(method, params).await?;
		serde_json::from_value(result).map_err(|e| {
			anyhow::anyhow!(CosmosClientError::response_parse_error(
				format!("Failed to parse '{}' response", method),
				Some(Box::new(e)),
				method_metadata(method),
			))
		})
	}

	/// Runs a gRPC query through `abci_query` and returns the raw response bytes
	async fn abci_query(&self, path: &str, data: Vec<u8>) -> Result<Vec<u8>, anyhow::Error> {
		let params = json!({
			"path": path,
			"data": hex::encode(data),
			"height": "0",
			"prove": false
		});
		let result: AbciQueryResult = self.call(RPC_METHOD_ABCI_QUERY, params).await?;
		let response = result.response;

		if response.code != 0 {
			let error = CosmosClientError::rpc_error(
				format!("ABCI query '{}' failed: {}", path, response.log),
				None,
				Some(HashMap::from([
					("code".to_string(), response.code.to_string()),
					("codespace".to_string(), response.codespace),
				])),
			);
			return Err(anyhow::anyhow!(error));
		}

		let encoded = response.value.unwrap_or_default();
		BASE64.decode(encoded.as_bytes()).map_err(|e| {
			anyhow::anyhow!(CosmosClientError::response_parse_error(
				format!("ABCI query '{}' returned invalid base64", path),
				Some(Box::new(e)),
				None,
			))
		})
	}
}

/// Chain-native queries against a Cosmos SDK node
#[async_trait]
pub trait CosmosClientTrait: Send + Sync {
	/// Polymorphic account stored at `address`
	async fn get_account(&self, address: &str) -> Result<RawAccountPayload, anyhow::Error>;

	/// Balance of `address` in `denom`
	async fn get_balance(&self, denom: &str, address: &str) -> Result<CosmosCoin, anyhow::Error>;

	async fn get_block(&self, height: u64) -> Result<CosmosBlock, anyhow::Error>;

	/// Block with the given hex hash
	async fn get_block_by_hash(&self, hash: &str) -> Result<CosmosBlock, anyhow::Error>;

	async fn get_header_by_height(&self, height: u64) -> Result<CosmosBlockMeta, anyhow::Error>;

	/// Header with the given hex hash; the returned meta carries that hash as block id
	async fn get_header_by_hash(&self, hash: &str) -> Result<CosmosBlockMeta, anyhow::Error>;

	async fn get_tx_by_hash(&self, hash: &str) -> Result<CosmosTxResponse, anyhow::Error>;

	/// Transactions matching all `events` conditions, e.g. `transfer.sender='cosmos1...'`
	///
	/// `page` starts at 1.
	async fn get_tx_by_event(
		&self,
		events: Vec<String>,
		page: u32,
		per_page: u32,
	) -> Result<CosmosTxSearchResult, anyhow::Error>;

	/// Block metas of `[min_height, max_height]` in descending order
	///
	/// Nodes cap the number of metas per call (20 on CometBFT).
	async fn blockchain_info(
		&self,
		min_height: u64,
		max_height: u64,
	) -> Result<CosmosBlockchainInfo, anyhow::Error>;

	/// Submits a signed transaction and waits for its CheckTx outcome
	async fn broadcast_tx(&self, raw_tx: Vec<u8>) -> Result<CosmosBroadcastResult, anyhow::Error>;

	/// Bech32 account address of a compressed secp256k1 public key
	fn derive_address(&self, public_key: &[u8]) -> Result<String, anyhow::Error>;
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> CosmosClientTrait for CosmosClient<T> {
	#[instrument(skip(self), fields(address))]
	async fn get_account(&self, address: &str) -> Result<RawAccountPayload, anyhow::Error> {
		let request = CosmosQueryAccountRequest {
			address: address.to_string(),
		};
		let bytes = self
			.abci_query(ACCOUNT_QUERY_PATH, request.encode_to_vec())
			.await
			.with_context(|| format!("Failed to query account {}", address))?;

		let response = CosmosQueryAccountResponse::decode(bytes.as_slice()).map_err(|e| {
			anyhow::anyhow!(CosmosClientError::response_parse_error(
				"Failed to decode QueryAccountResponse",
				Some(Box::new(e)),
				None,
			))
		})?;

		let account = response.account.ok_or_else(|| {
			anyhow::anyhow!(CosmosClientError::unexpected_response_structure(
				format!("Account response for {} carries no account", address),
				None,
				None,
			))
		})?;

		Ok(RawAccountPayload::from(account))
	}

	#[instrument(skip(self), fields(denom, address))]
	async fn get_balance(&self, denom: &str, address: &str) -> Result<CosmosCoin, anyhow::Error> {
		let request = CosmosQueryBalanceRequest {
			address: address.to_string(),
			denom: denom.to_string(),
		};
		let bytes = self
			.abci_query(BALANCE_QUERY_PATH, request.encode_to_vec())
			.await
			.with_context(|| format!("Failed to query {} balance of {}", denom, address))?;

		let response = CosmosQueryBalanceResponse::decode(bytes.as_slice()).map_err(|e| {
			anyhow::anyhow!(CosmosClientError::response_parse_error(
				"Failed to decode QueryBalanceResponse",
				Some(Box::new(e)),
				None,
			))
		})?;

		response.balance.ok_or_else(|| {
			anyhow::anyhow!(CosmosClientError::unexpected_response_structure(
				format!("Balance response for {} carries no coin", address),
				None,
				None,
			))
		})
	}

	#[instrument(skip(self), fields(height))]
	async fn get_block(&self, height: u64) -> Result<CosmosBlock, anyhow::Error> {
		self.call(RPC_METHOD_BLOCK, json!({ "height": height.to_string() }))
			.await
			.with_context(|| format!("Failed to get block {}", height))
	}

	#[instrument(skip(self), fields(hash))]
	async fn get_block_by_hash(&self, hash: &str) -> Result<CosmosBlock, anyhow::Error> {
		let hash_bytes = decode_hash(hash)?;
		let result = self
			.call_raw(
				RPC_METHOD_BLOCK_BY_HASH,
				json!({ "hash": BASE64.encode(hash_bytes) }),
			)
			.await
			.with_context(|| format!("Failed to get block {}", hash))?;

		// Unknown hashes come back as a null block rather than an error
		if result.get("block").map_or(true, Value::is_null) {
			return Err(anyhow::anyhow!(CosmosClientError::rpc_error(
				format!("Block {} not found", hash),
				None,
				method_metadata(RPC_METHOD_BLOCK_BY_HASH),
			)));
		}

		serde_json::from_value(result).map_err(|e| {
			anyhow::anyhow!(CosmosClientError::response_parse_error(
				format!("Failed to parse '{}' response", RPC_METHOD_BLOCK_BY_HASH),
				Some(Box::new(e)),
				method_metadata(RPC_METHOD_BLOCK_BY_HASH),
			))
		})
	}

	#[instrument(skip(self), fields(height))]
	async fn get_header_by_height(&self, height: u64) -> Result<CosmosBlockMeta, anyhow::Error> {
		let info = self
			.blockchain_info(height, height)
			.await
			.with_context(|| format!("Failed to get header {}", height))?;

		info.block_metas.into_iter().next().ok_or_else(|| {
			anyhow::anyhow!(CosmosClientError::unexpected_response_structure(
				format!("No block meta returned for height {}", height),
				None,
				method_metadata(RPC_METHOD_BLOCKCHAIN),
			))
		})
	}

	#[instrument(skip(self), fields(hash))]
	async fn get_header_by_hash(&self, hash: &str) -> Result<CosmosBlockMeta, anyhow::Error> {
		let hash_bytes = decode_hash(hash)?;
		let result: HeaderResult = self
			.call(
				RPC_METHOD_HEADER_BY_HASH,
				json!({ "hash": hex::encode_upper(&hash_bytes) }),
			)
			.await
			.with_context(|| format!("Failed to get header {}", hash))?;

		let header = result.header.ok_or_else(|| {
			anyhow::anyhow!(CosmosClientError::rpc_error(
				format!("Header {} not found", hash),
				None,
				method_metadata(RPC_METHOD_HEADER_BY_HASH),
			))
		})?;

		Ok(CosmosBlockMeta {
			block_id: CosmosBlockId {
				hash: hex::encode_upper(hash_bytes),
			},
			block_size: String::new(),
			header,
			num_txs: String::new(),
		})
	}

	#[instrument(skip(self), fields(hash))]
	async fn get_tx_by_hash(&self, hash: &str) -> Result<CosmosTxResponse, anyhow::Error> {
		let hash_bytes = decode_hash(hash)?;
		self.call(
			RPC_METHOD_TX,
			json!({ "hash": BASE64.encode(hash_bytes), "prove": false }),
		)
		.await
		.with_context(|| format!("Failed to get transaction {}", hash))
	}

	#[instrument(skip(self), fields(page, per_page))]
	async fn get_tx_by_event(
		&self,
		events: Vec<String>,
		page: u32,
		per_page: u32,
	) -> Result<CosmosTxSearchResult, anyhow::Error> {
		if events.is_empty() {
			let input_error =
				CosmosClientError::invalid_input("At least one event condition is required", None, None);
			return Err(anyhow::anyhow!(input_error))
				.context("Invalid input parameters for Cosmos RPC");
		}

		let query = events.join(" AND ");
		let params = json!({
			"query": query,
			"prove": false,
			"page": page.max(1).to_string(),
			"per_page": per_page.max(1).to_string(),
			"order_by": "asc"
		});

		self.call(RPC_METHOD_TX_SEARCH, params)
			.await
			.with_context(|| format!("Failed to search transactions for '{}'", query))
	}

	#[instrument(skip(self), fields(min_height, max_height))]
	async fn blockchain_info(
		&self,
		min_height: u64,
		max_height: u64,
	) -> Result<CosmosBlockchainInfo, anyhow::Error> {
		if min_height > max_height {
			let message = format!(
				"min_height {} cannot be greater than max_height {}",
				min_height, max_height
			);
			let input_error = CosmosClientError::invalid_input(message, None, None);
			return Err(anyhow::anyhow!(input_error))
				.context("Invalid input parameters for Cosmos RPC");
		}

		let params = json!({
			"minHeight": min_height.to_string(),
			"maxHeight": max_height.to_string()
		});
		self.call(RPC_METHOD_BLOCKCHAIN, params)
			.await
			.with_context(|| format!("Failed to get block metas {}..={}", min_height, max_height))
	}

	#[instrument(skip(self, raw_tx), fields(tx_len = raw_tx.len()))]
	async fn broadcast_tx(&self, raw_tx: Vec<u8>) -> Result<CosmosBroadcastResult, anyhow::Error> {
		self.call(
			RPC_METHOD_BROADCAST_TX_SYNC,
			json!({ "tx": BASE64.encode(raw_tx) }),
		)
		.await
		.context("Failed to broadcast transaction")
	}

	fn derive_address(&self, public_key: &[u8]) -> Result<String, anyhow::Error> {
		let compressed = public_key.len() == COMPRESSED_PUBKEY_LEN
			&& matches!(public_key.first(), Some(0x02) | Some(0x03));
		if !compressed {
			let input_error = CosmosClientError::invalid_input(
				format!(
					"expected a {}-byte compressed secp256k1 public key, got {} bytes",
					COMPRESSED_PUBKEY_LEN,
					public_key.len()
				),
				None,
				None,
			);
			return Err(anyhow::anyhow!(input_error));
		}

		let sha_digest = Sha256::digest(public_key);
		let account_id = Ripemd160::digest(sha_digest);

		bech32::encode(&self.account_prefix, account_id.to_base32(), Variant::Bech32).map_err(
			|e| {
				anyhow::anyhow!(CosmosClientError::invalid_input(
					format!("failed to encode address with prefix '{}'", self.account_prefix),
					Some(Box::new(e)),
					None,
				))
			},
		)
	}
}
