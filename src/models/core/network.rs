use serde::{Deserialize, Serialize};

use crate::{
	models::BlockChainType,
	utils::{
		RetryConfig, DEFAULT_COSMOS_SUPPORTED_CHAINS, DEFAULT_MAX_CONCURRENT_REQUESTS,
		DEFAULT_REQUEST_TIMEOUT_MS,
	},
};

fn default_supported_chains() -> Vec<String> {
	DEFAULT_COSMOS_SUPPORTED_CHAINS
		.iter()
		.map(|chain| chain.to_string())
		.collect()
}

/// Configuration for connecting to and serving one chain.
///
/// One adaptor is built per network file found in the configuration directory.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Network {
	/// Chain family served by the adaptor
	pub network_type: BlockChainType,

	/// Unique identifier, also used as the routing name
	pub slug: String,

	/// Human-readable name of the network
	pub name: String,

	/// Network label reported in account responses, e.g. "mainnet"
	pub network: String,

	/// Chain ID expected from the node, e.g. "cosmoshub-4"
	#[serde(default)]
	pub chain_id: Option<String>,

	/// List of RPC endpoints with their weights for load balancing
	pub rpc_urls: Vec<RpcUrl>,

	/// Bech32 human readable part of account addresses
	pub account_prefix: String,

	/// Staking denom used for balance lookups
	pub denom: String,

	/// Chain names this adaptor answers for, matched case-insensitively
	#[serde(default = "default_supported_chains")]
	pub supported_chains: Vec<String>,

	/// Upper bound of concurrent upstream calls within a single operation
	#[serde(default)]
	pub max_concurrent_requests: Option<usize>,

	/// Default deadline for one operation
	#[serde(default)]
	pub request_timeout_ms: Option<u64>,

	/// Retry policy of the HTTP transport
	#[serde(default)]
	pub retry: RetryConfig,
}

impl Network {
	pub fn max_concurrent_requests(&self) -> usize {
		self.max_concurrent_requests
			.unwrap_or(DEFAULT_MAX_CONCURRENT_REQUESTS)
	}

	pub fn request_timeout_ms(&self) -> u64 {
		self.request_timeout_ms
			.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
	}

	/// Whether `chain` names this network
	pub fn supports_chain(&self, chain: &str) -> bool {
		self.supported_chains
			.iter()
			.any(|supported| supported.eq_ignore_ascii_case(chain))
	}
}

/// RPC endpoint configuration with load balancing weight
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RpcUrl {
	/// Type of RPC endpoint (e.g. "rpc")
	pub type_: String,

	/// URL of the RPC endpoint
	pub url: String,

	/// Weight for load balancing (0-100)
	pub weight: u32,
}
