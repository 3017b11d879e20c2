//! Chain adaptor layer.
//!
//! A chain adaptor answers the canonical wallet operation set for one chain and
//! wraps every outcome in a [`ResponseEnvelope`]. Adaptors are built once per
//! configured network and shared across concurrent requests.
//!
//! - `context`: Request deadlines
//! - `cosmos`: Cosmos SDK / CometBFT adaptor
//! - `error`: Error taxonomy of adaptor operations
//! - `registry`: Chain name routing

mod context;
mod cosmos;
mod error;
mod registry;

use async_trait::async_trait;

use crate::models::{
	AccountRequest, AddressValidation, BlockByHashRequest, BlockByNumberRequest,
	BlockByRangeRequest, BlockHeaderByHashRequest, BlockHeaderByNumberRequest, BlockRangeSummary,
	CanonicalAccount, CanonicalBlock, CanonicalBlockHeader, CanonicalBlockTransaction,
	CanonicalTransfer, ConvertAddressRequest, FeeEstimate, FeeRequest, ResponseEnvelope,
	SendTxRequest, SupportChainsRequest, TxAddressRequest, TxHashRequest, ValidAddressRequest,
};

pub use context::RequestContext;
pub use cosmos::{
	decode_base_account, extract_fee, mapper, transfers, validate_address, AccountDecodeFn,
	AccountDecoderRegistry, CosmosAdaptor, DecodedAccount, TransferContext, TransferEvents,
	TRANSFER_EVENT_TYPE,
};
pub use error::AdaptorError;
pub use registry::AdaptorRegistry;

/// Canonical wallet operations of one chain
///
/// Operations never fail outside the envelope: errors are reported with
/// [`ReturnCode::Error`](crate::models::ReturnCode) and a message. Operations a
/// chain does not support keep the default bodies, which answer with a
/// "not implemented" envelope.
#[async_trait]
pub trait ChainAdaptor: Send + Sync {
	/// Slug of the network this adaptor serves
	fn chain_name(&self) -> &str;

	/// Chain names this adaptor answers for, besides its slug
	fn aliases(&self) -> Vec<String>;

	async fn get_supported_chains(
		&self,
		ctx: &RequestContext,
		req: SupportChainsRequest,
	) -> ResponseEnvelope<bool>;

	async fn convert_address(
		&self,
		ctx: &RequestContext,
		req: ConvertAddressRequest,
	) -> ResponseEnvelope<String>;

	async fn validate_address(
		&self,
		ctx: &RequestContext,
		req: ValidAddressRequest,
	) -> ResponseEnvelope<AddressValidation>;

	async fn get_account(
		&self,
		ctx: &RequestContext,
		req: AccountRequest,
	) -> ResponseEnvelope<CanonicalAccount>;

	async fn get_block_header_by_hash(
		&self,
		ctx: &RequestContext,
		req: BlockHeaderByHashRequest,
	) -> ResponseEnvelope<CanonicalBlockHeader>;

	async fn get_block_header_by_number(
		&self,
		ctx: &RequestContext,
		req: BlockHeaderByNumberRequest,
	) -> ResponseEnvelope<CanonicalBlockHeader>;

	async fn get_block_by_number(
		&self,
		ctx: &RequestContext,
		req: BlockByNumberRequest,
	) -> ResponseEnvelope<CanonicalBlock>;

	async fn get_block_by_hash(
		&self,
		_ctx: &RequestContext,
		_req: BlockByHashRequest,
	) -> ResponseEnvelope<CanonicalBlock> {
		not_implemented("get_block_by_hash")
	}

	async fn get_block_by_range(
		&self,
		ctx: &RequestContext,
		req: BlockByRangeRequest,
	) -> ResponseEnvelope<BlockRangeSummary>;

	async fn send_tx(&self, ctx: &RequestContext, req: SendTxRequest) -> ResponseEnvelope<String>;

	async fn get_tx_by_hash(
		&self,
		_ctx: &RequestContext,
		_req: TxHashRequest,
	) -> ResponseEnvelope<CanonicalBlockTransaction> {
		not_implemented("get_tx_by_hash")
	}

	async fn get_tx_by_address(
		&self,
		_ctx: &RequestContext,
		_req: TxAddressRequest,
	) -> ResponseEnvelope<Vec<CanonicalTransfer>> {
		not_implemented("get_tx_by_address")
	}

	async fn get_fee(&self, _ctx: &RequestContext, _req: FeeRequest) -> ResponseEnvelope<FeeEstimate> {
		not_implemented("get_fee")
	}
}

fn not_implemented<T>(operation: &'static str) -> ResponseEnvelope<T> {
	tracing::debug!(operation, "operation is not implemented for this chain");
	ResponseEnvelope::from_result("", Err::<T, _>(AdaptorError::not_implemented(operation)))
}
