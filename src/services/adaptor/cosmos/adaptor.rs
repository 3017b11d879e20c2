//! Cosmos SDK chain adaptor.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use futures::{stream, StreamExt, TryStreamExt};
use std::{collections::HashMap, time::Duration};
use tracing::{info, instrument};

use crate::{
	models::{
		AccountRequest, AddressValidation, BlockByHashRequest, BlockByNumberRequest,
		BlockByRangeRequest, BlockHeaderByHashRequest, BlockHeaderByNumberRequest,
		BlockRangeSummary, CanonicalAccount, CanonicalBlock, CanonicalBlockHeader,
		ConvertAddressRequest, CosmosBlock, CosmosBlockchainInfo, Network, ResponseEnvelope,
		SendTxRequest, SupportChainsRequest, ValidAddressRequest,
	},
	services::{
		adaptor::{
			cosmos::{
				account::AccountDecoderRegistry,
				address::validate_address,
				mapper::{
					format_height, map_block_header, map_block_transaction, normalize_hash,
					parse_height, tx_hash,
				},
			},
			AdaptorError, ChainAdaptor, RequestContext,
		},
		blockchain::{CosmosClient, CosmosClientTrait, CosmosTransportClient},
	},
	utils::MAX_BLOCK_RANGE,
};

/// Block metas returned by one `blockchain` call
const BLOCKCHAIN_INFO_PAGE: u64 = 20;

/// Adaptor for one configured Cosmos network
///
/// Holds no per-request state; every operation only reads the client, the
/// network and the decoder registry.
pub struct CosmosAdaptor<C> {
	client: C,
	network: Network,
	decoders: AccountDecoderRegistry,
}

impl CosmosAdaptor<CosmosClient<CosmosTransportClient>> {
	/// Connects to `network` and builds an adaptor with the default decoders
	pub async fn connect(network: &Network) -> Result<Self, anyhow::Error> {
		let client = CosmosClient::new(network).await?;
		Ok(Self::new(client, network.clone()))
	}
}

impl<C: CosmosClientTrait> CosmosAdaptor<C> {
	pub fn new(client: C, network: Network) -> Self {
		Self::with_decoders(client, network, AccountDecoderRegistry::default())
	}

	/// Adaptor that resolves accounts through `decoders`
	pub fn with_decoders(client: C, network: Network, decoders: AccountDecoderRegistry) -> Self {
		Self {
			client,
			network,
			decoders,
		}
	}

	pub fn network(&self) -> &Network {
		&self.network
	}

	/// Caller deadline, capped by the network's request timeout
	fn deadline(&self, ctx: &RequestContext) -> RequestContext {
		ctx.or_timeout(Duration::from_millis(self.network.request_timeout_ms()))
	}

	async fn account(
		&self,
		ctx: &RequestContext,
		address: &str,
	) -> Result<CanonicalAccount, AdaptorError> {
		if address.is_empty() {
			return Err(AdaptorError::invalid_input("address is empty", None, None));
		}

		let ctx = self.deadline(ctx);
		let (payload, balance) = futures::try_join!(
			ctx.run("get_account", self.client.get_account(address)),
			ctx.run(
				"get_balance",
				self.client.get_balance(&self.network.denom, address)
			),
		)?;

		let account = self.decoders.decode(payload)?;
		Ok(account.into_canonical(&self.network.network, balance.amount))
	}

	async fn header_by_hash(
		&self,
		ctx: &RequestContext,
		hash: &str,
	) -> Result<CanonicalBlockHeader, AdaptorError> {
		let hash = request_hash(hash)?;
		let meta = self
			.deadline(ctx)
			.run("get_header_by_hash", self.client.get_header_by_hash(&hash))
			.await?;
		map_block_header(&meta.block_id, &meta.header)
	}

	async fn header_by_number(
		&self,
		ctx: &RequestContext,
		height: u64,
	) -> Result<CanonicalBlockHeader, AdaptorError> {
		request_height(height)?;
		let meta = self
			.deadline(ctx)
			.run("get_header_by_height", self.client.get_header_by_height(height))
			.await?;
		map_block_header(&meta.block_id, &meta.header)
	}

	/// Header plus every transaction of `block`, in block order
	///
	/// Transactions are fetched concurrently; the first failure aborts the
	/// whole aggregate.
	async fn assemble_block(
		&self,
		ctx: &RequestContext,
		block: CosmosBlock,
	) -> Result<CanonicalBlock, AdaptorError> {
		let header = map_block_header(&block.block_id, block.header())?;
		let hashes = block
			.txs()
			.iter()
			.map(|raw| tx_hash(raw))
			.collect::<Result<Vec<_>, _>>()?;

		let fetches: Vec<_> = hashes
			.iter()
			.map(|hash| ctx.run("get_tx_by_hash", self.client.get_tx_by_hash(hash)))
			.collect();
		let responses: Vec<_> = stream::iter(fetches)
			.buffered(self.network.max_concurrent_requests())
			.try_collect()
			.await?;

		let timestamp = header.time_unix_seconds.to_string();
		let transactions = responses
			.iter()
			.zip(0u32..)
			.map(|(tx, index)| map_block_transaction(tx, index, &timestamp))
			.collect::<Result<Vec<_>, _>>()?;

		Ok(CanonicalBlock {
			header,
			transactions,
		})
	}

	async fn block_by_number(
		&self,
		ctx: &RequestContext,
		height: u64,
	) -> Result<CanonicalBlock, AdaptorError> {
		request_height(height)?;
		let ctx = self.deadline(ctx);
		let block = ctx.run("get_block", self.client.get_block(height)).await?;
		self.assemble_block(&ctx, block).await
	}

	async fn block_by_hash(
		&self,
		ctx: &RequestContext,
		hash: &str,
	) -> Result<CanonicalBlock, AdaptorError> {
		let hash = request_hash(hash)?;
		let ctx = self.deadline(ctx);
		let block = ctx
			.run("get_block_by_hash", self.client.get_block_by_hash(&hash))
			.await?;
		self.assemble_block(&ctx, block).await
	}

	/// Headers of `start..=end` in ascending order
	///
	/// `start` is parsed before `end`, so a bad start is reported even when
	/// `end` is bad too. The first page reports the chain tip; `end` is
	/// clamped to it before the remaining pages are requested.
	async fn block_range(
		&self,
		ctx: &RequestContext,
		start: &str,
		end: &str,
	) -> Result<BlockRangeSummary, AdaptorError> {
		let start = range_bound("start", start)?;
		let end = range_bound("end", end)?;
		if start > end {
			return Err(AdaptorError::invalid_input(
				format!("start {} is greater than end {}", start, end),
				None,
				None,
			));
		}
		if end - start >= MAX_BLOCK_RANGE {
			return Err(AdaptorError::invalid_input(
				format!(
					"range {}..={} spans more than {} blocks",
					start, end, MAX_BLOCK_RANGE
				),
				None,
				None,
			));
		}

		let ctx = self.deadline(ctx);
		let first_max = page_end(start, end);
		let first = ctx
			.run("blockchain_info", self.client.blockchain_info(start, first_max))
			.await?;
		let end = end.min(parse_height("last_height", &first.last_height)?);

		let mut pages = vec![first];
		if first_max < end {
			let fetches: Vec<_> = (first_max + 1..=end)
				.step_by(BLOCKCHAIN_INFO_PAGE as usize)
				.map(|min| {
					ctx.run(
						"blockchain_info",
						self.client.blockchain_info(min, page_end(min, end)),
					)
				})
				.collect();
			let rest: Vec<CosmosBlockchainInfo> = stream::iter(fetches)
				.buffered(self.network.max_concurrent_requests())
				.try_collect()
				.await?;
			pages.extend(rest);
		}

		let mut last_height = 0;
		let mut blocks = Vec::new();
		for page in &pages {
			last_height = last_height.max(parse_height("last_height", &page.last_height)?);
			for meta in &page.block_metas {
				let height = parse_height("header.height", &meta.header.height)?;
				blocks.push((height, map_block_header(&meta.block_id, &meta.header)?));
			}
		}
		blocks.sort_by_key(|(height, _)| *height);

		Ok(BlockRangeSummary {
			last_height: format_height(last_height),
			blocks: blocks.into_iter().map(|(_, header)| header).collect(),
		})
	}

	async fn broadcast(&self, ctx: &RequestContext, raw_tx: &str) -> Result<String, AdaptorError> {
		if raw_tx.is_empty() {
			return Err(AdaptorError::invalid_input("transaction is empty", None, None));
		}
		let tx_bytes = BASE64.decode(raw_tx.as_bytes()).map_err(|e| {
			AdaptorError::invalid_input("transaction is not valid base64", Some(Box::new(e)), None)
		})?;

		let result = self
			.deadline(ctx)
			.run("broadcast_tx", self.client.broadcast_tx(tx_bytes))
			.await?;

		if !result.is_accepted() {
			let metadata = HashMap::from([
				("code".to_string(), result.code.to_string()),
				("codespace".to_string(), result.codespace.clone()),
				("log".to_string(), result.log.clone()),
				("hash".to_string(), result.hash.clone()),
			]);
			return Err(AdaptorError::transaction_rejected(
				format!(
					"code {} ({}): {}",
					result.code, result.codespace, result.log
				),
				Some(metadata),
			));
		}

		info!(hash = %result.hash, "transaction accepted");
		normalize_hash("hash", &result.hash)
	}

	fn address_from_public_key(&self, public_key: &str) -> Result<String, AdaptorError> {
		let trimmed = public_key.strip_prefix("0x").unwrap_or(public_key);
		let bytes = hex::decode(trimmed).map_err(|e| {
			AdaptorError::invalid_input("public key is not valid hex", Some(Box::new(e)), None)
		})?;

		self.client
			.derive_address(&bytes)
			.map_err(|e| AdaptorError::invalid_input(format!("{:#}", e), Some(e.into()), None))
	}
}

/// Last height of the page starting at `min`, never past `end`
fn page_end(min: u64, end: u64) -> u64 {
	min.saturating_add(BLOCKCHAIN_INFO_PAGE - 1).min(end)
}

/// Request hash in canonical form; bad hashes are the caller's fault
fn request_hash(hash: &str) -> Result<String, AdaptorError> {
	normalize_hash("hash", hash).map_err(|e| {
		AdaptorError::invalid_input(
			format!("'{}' is not a 32-byte hex hash", hash),
			Some(Box::new(e)),
			None,
		)
	})
}

/// CometBFT numbers blocks from 1; height 0 would silently mean "latest"
fn request_height(height: u64) -> Result<(), AdaptorError> {
	if height == 0 {
		return Err(AdaptorError::invalid_input(
			"height must be at least 1",
			None,
			None,
		));
	}
	Ok(())
}

fn range_bound(field: &str, value: &str) -> Result<u64, AdaptorError> {
	let height = value.parse::<u64>().map_err(|e| {
		AdaptorError::invalid_input(
			format!("{} height '{}' is not a decimal number", field, value),
			Some(Box::new(e)),
			Some(HashMap::from([("field".to_string(), field.to_string())])),
		)
	})?;
	request_height(height)?;
	Ok(height)
}

#[async_trait]
impl<C: CosmosClientTrait> ChainAdaptor for CosmosAdaptor<C> {
	fn chain_name(&self) -> &str {
		&self.network.slug
	}

	fn aliases(&self) -> Vec<String> {
		self.network.supported_chains.clone()
	}

	#[instrument(skip(self, _ctx, req), fields(chain = %req.chain))]
	async fn get_supported_chains(
		&self,
		_ctx: &RequestContext,
		req: SupportChainsRequest,
	) -> ResponseEnvelope<bool> {
		ResponseEnvelope::success("Support this chain", self.network.supports_chain(&req.chain))
	}

	#[instrument(skip(self, _ctx, req), fields(chain = %req.chain))]
	async fn convert_address(
		&self,
		_ctx: &RequestContext,
		req: ConvertAddressRequest,
	) -> ResponseEnvelope<String> {
		ResponseEnvelope::from_result(
			"convert address success",
			self.address_from_public_key(&req.public_key),
		)
	}

	#[instrument(skip(self, _ctx, req), fields(chain = %req.chain))]
	async fn validate_address(
		&self,
		_ctx: &RequestContext,
		req: ValidAddressRequest,
	) -> ResponseEnvelope<AddressValidation> {
		ResponseEnvelope::success(
			"valid address success",
			validate_address(&self.network.account_prefix, &req.address),
		)
	}

	#[instrument(skip(self, ctx, req), fields(chain = %req.chain, address = %req.address))]
	async fn get_account(
		&self,
		ctx: &RequestContext,
		req: AccountRequest,
	) -> ResponseEnvelope<CanonicalAccount> {
		ResponseEnvelope::from_result("get account success", self.account(ctx, &req.address).await)
	}

	#[instrument(skip(self, ctx, req), fields(chain = %req.chain, hash = %req.hash))]
	async fn get_block_header_by_hash(
		&self,
		ctx: &RequestContext,
		req: BlockHeaderByHashRequest,
	) -> ResponseEnvelope<CanonicalBlockHeader> {
		ResponseEnvelope::from_result(
			"get block header by hash success",
			self.header_by_hash(ctx, &req.hash).await,
		)
	}

	#[instrument(skip(self, ctx, req), fields(chain = %req.chain, height = req.height))]
	async fn get_block_header_by_number(
		&self,
		ctx: &RequestContext,
		req: BlockHeaderByNumberRequest,
	) -> ResponseEnvelope<CanonicalBlockHeader> {
		ResponseEnvelope::from_result(
			"get block header by number success",
			self.header_by_number(ctx, req.height).await,
		)
	}

	#[instrument(skip(self, ctx, req), fields(chain = %req.chain, height = req.height))]
	async fn get_block_by_number(
		&self,
		ctx: &RequestContext,
		req: BlockByNumberRequest,
	) -> ResponseEnvelope<CanonicalBlock> {
		ResponseEnvelope::from_result(
			"get block by number success",
			self.block_by_number(ctx, req.height).await,
		)
	}

	#[instrument(skip(self, ctx, req), fields(chain = %req.chain, hash = %req.hash))]
	async fn get_block_by_hash(
		&self,
		ctx: &RequestContext,
		req: BlockByHashRequest,
	) -> ResponseEnvelope<CanonicalBlock> {
		ResponseEnvelope::from_result(
			"get block by hash success",
			self.block_by_hash(ctx, &req.hash).await,
		)
	}

	#[instrument(skip(self, ctx, req), fields(chain = %req.chain, start = %req.start, end = %req.end))]
	async fn get_block_by_range(
		&self,
		ctx: &RequestContext,
		req: BlockByRangeRequest,
	) -> ResponseEnvelope<BlockRangeSummary> {
		ResponseEnvelope::from_result(
			"get block by range success",
			self.block_range(ctx, &req.start, &req.end).await,
		)
	}

	#[instrument(skip(self, ctx, req), fields(chain = %req.chain))]
	async fn send_tx(&self, ctx: &RequestContext, req: SendTxRequest) -> ResponseEnvelope<String> {
		ResponseEnvelope::from_result("send tx success", self.broadcast(ctx, &req.raw_tx).await)
	}
}
