//! Domain models and data structures.
//!
//! - `blockchain`: Chain-native shapes as returned by chain RPC interfaces
//! - `config`: Configuration loading and validation
//! - `core`: Canonical shapes, the response envelope, requests and networks

mod blockchain;
mod config;
mod core;

// Re-export blockchain types
pub use blockchain::BlockChainType;

pub use blockchain::cosmos::{
	CosmosAny, CosmosBaseAccount, CosmosBlock, CosmosBlockBody, CosmosBlockData, CosmosBlockId,
	CosmosBlockMeta, CosmosBlockchainInfo, CosmosBroadcastResult, CosmosCoin, CosmosEvent,
	CosmosEventAttribute, CosmosHeader, CosmosQueryAccountRequest, CosmosQueryAccountResponse,
	CosmosQueryBalanceRequest, CosmosQueryBalanceResponse, CosmosTxExecResult, CosmosTxResponse,
	CosmosTxSearchResult, RawAccountPayload, BASE_ACCOUNT_TYPE_URL,
};

// Re-export core types
pub use core::{
	AccountRequest, AddressValidation, BlockByHashRequest, BlockByNumberRequest,
	BlockByRangeRequest, BlockHeaderByHashRequest, BlockHeaderByNumberRequest, BlockRangeSummary,
	CanonicalAccount, CanonicalBlock, CanonicalBlockHeader, CanonicalBlockTransaction,
	CanonicalTransfer, ConvertAddressRequest, FeeEstimate, FeeRequest, Network, ResponseEnvelope,
	ReturnCode, RpcUrl, SendTxRequest, SupportChainsRequest, TransferAddress, TxAddressRequest,
	TxHashRequest, TxStatus, ValidAddressRequest,
};

// Re-export config types
pub use config::{ConfigError, ConfigLoader};
