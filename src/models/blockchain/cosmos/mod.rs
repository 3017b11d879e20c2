//! Cosmos SDK / CometBFT specific data structures.
//!
//! Accounts are protobuf messages wrapped in `Any` and fetched through ABCI queries.
//! Blocks, headers and transaction results follow the CometBFT JSON-RPC format.

mod account;
mod block;
mod transaction;

pub use account::{
	Any as CosmosAny, BaseAccount as CosmosBaseAccount, Coin as CosmosCoin,
	QueryAccountRequest as CosmosQueryAccountRequest,
	QueryAccountResponse as CosmosQueryAccountResponse,
	QueryBalanceRequest as CosmosQueryBalanceRequest,
	QueryBalanceResponse as CosmosQueryBalanceResponse, RawAccountPayload,
	BASE_ACCOUNT_TYPE_URL,
};
pub use block::{
	Block as CosmosBlock, BlockBody as CosmosBlockBody, BlockData as CosmosBlockData,
	BlockId as CosmosBlockId, BlockMeta as CosmosBlockMeta,
	BlockchainInfo as CosmosBlockchainInfo, Header as CosmosHeader,
};
pub use transaction::{
	BroadcastResult as CosmosBroadcastResult, Event as CosmosEvent,
	EventAttribute as CosmosEventAttribute, ExecResult as CosmosTxExecResult,
	TxResponse as CosmosTxResponse, TxSearchResult as CosmosTxSearchResult,
};
