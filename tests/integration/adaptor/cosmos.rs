use async_trait::async_trait;
use mockall::predicate::eq;
use prost::Message;
use std::{sync::Arc, time::Duration};

use wallet_chain_adaptor::{
	models::{
		AccountRequest, BlockByHashRequest, BlockByNumberRequest, BlockByRangeRequest,
		BlockHeaderByHashRequest, BlockHeaderByNumberRequest, CanonicalAccount, ConvertAddressRequest,
		CosmosBaseAccount, CosmosBlock, CosmosBlockMeta, CosmosBlockchainInfo, CosmosBroadcastResult,
		CosmosCoin, CosmosTxResponse, CosmosTxSearchResult, FeeRequest, RawAccountPayload,
		ReturnCode, SendTxRequest, SupportChainsRequest, TxAddressRequest, TxHashRequest, TxStatus,
		ValidAddressRequest, BASE_ACCOUNT_TYPE_URL,
	},
	services::{
		adaptor::{mapper, ChainAdaptor, CosmosAdaptor, RequestContext},
		blockchain::{CosmosClientError, CosmosClientTrait},
	},
	utils::tests::builders::{
		cosmos::{
			event, transfer_event, BlockBuilder, TxResponseBuilder, TEST_BLOCK_HASH,
		},
		network::NetworkBuilder,
	},
};

use crate::integration::mocks::MockCosmosClientTrait;

const ADDRESS: &str = "cosmos1abcxyz";

fn adaptor(client: MockCosmosClientTrait) -> CosmosAdaptor<MockCosmosClientTrait> {
	CosmosAdaptor::new(client, NetworkBuilder::new().build())
}

fn base_account(address: &str, account_number: u64, sequence: u64) -> RawAccountPayload {
	RawAccountPayload {
		type_url: BASE_ACCOUNT_TYPE_URL.to_string(),
		value: CosmosBaseAccount {
			address: address.to_string(),
			pub_key: None,
			account_number,
			sequence,
		}
		.encode_to_vec(),
	}
}

fn coin(amount: &str) -> CosmosCoin {
	CosmosCoin {
		denom: "uatom".to_string(),
		amount: amount.to_string(),
	}
}

fn meta(height: u64, hash: &str) -> CosmosBlockMeta {
	let builder = BlockBuilder::new().height(height).hash(hash);
	let builder = match height {
		1 => builder.last_block_hash(""),
		_ => builder.last_block_hash(&hash_at(height - 1)),
	};
	CosmosBlockMeta::from(builder.build())
}

/// Distinct valid hash per height
fn hash_at(height: u64) -> String {
	format!("{:064X}", height)
}

fn ctx() -> RequestContext {
	RequestContext::with_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn test_get_account_maps_base_account() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_account()
		.withf(|address| address == ADDRESS)
		.times(1)
		.returning(|address| Ok(base_account(address, 42, 5)));
	client
		.expect_get_balance()
		.withf(|denom, address| denom == "uatom" && address == ADDRESS)
		.times(1)
		.returning(|_, _| Ok(coin("1250000")));

	let response = adaptor(client)
		.get_account(
			&ctx(),
			AccountRequest {
				chain: "cosmos".to_string(),
				address: ADDRESS.to_string(),
			},
		)
		.await;

	assert_eq!(response.code, ReturnCode::Success);
	assert_eq!(response.message, "get account success");
	assert_eq!(
		response.payload,
		Some(CanonicalAccount {
			network: "mainnet".to_string(),
			address: ADDRESS.to_string(),
			account_number: "42".to_string(),
			sequence: "5".to_string(),
			balance: "1250000".to_string(),
		})
	);
}

#[tokio::test]
async fn test_get_account_is_idempotent() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_account()
		.times(2)
		.returning(|address| Ok(base_account(address, 7, 3)));
	client
		.expect_get_balance()
		.times(2)
		.returning(|_, _| Ok(coin("10")));

	let adaptor = adaptor(client);
	let request = AccountRequest {
		chain: "cosmos".to_string(),
		address: ADDRESS.to_string(),
	};

	let first = adaptor.get_account(&ctx(), request.clone()).await;
	let second = adaptor.get_account(&ctx(), request).await;
	assert!(first.is_success());
	assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_account_rejects_unregistered_type() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_get_account().returning(|_| {
		Ok(RawAccountPayload {
			type_url: "/cosmos.vesting.v1beta1.ContinuousVestingAccount".to_string(),
			value: vec![0x0a, 0x02, 0x08, 0x01],
		})
	});
	client
		.expect_get_balance()
		.returning(|_, _| Ok(coin("1")));

	let response = adaptor(client)
		.get_account(
			&ctx(),
			AccountRequest {
				chain: "cosmos".to_string(),
				address: ADDRESS.to_string(),
			},
		)
		.await;

	assert_eq!(response.code, ReturnCode::Error);
	assert_eq!(
		response.message,
		"Unsupported account type '/cosmos.vesting.v1beta1.ContinuousVestingAccount'"
	);
	assert!(response.payload.is_none());
}

#[tokio::test]
async fn test_get_account_reports_upstream_failure() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_account()
		.returning(|_| Err(anyhow::anyhow!("connection refused")));
	client
		.expect_get_balance()
		.returning(|_, _| Ok(coin("1")));

	let response = adaptor(client)
		.get_account(
			&ctx(),
			AccountRequest {
				chain: "cosmos".to_string(),
				address: ADDRESS.to_string(),
			},
		)
		.await;

	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.starts_with("Upstream unavailable"));
	assert!(response.message.contains("connection refused"));
}

#[tokio::test]
async fn test_get_account_requires_address() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_get_account().never();
	client.expect_get_balance().never();

	let response = adaptor(client)
		.get_account(&ctx(), AccountRequest::default())
		.await;
	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.contains("address is empty"));
}

#[tokio::test]
async fn test_get_supported_chains() {
	let adaptor = adaptor(MockCosmosClientTrait::new());

	for (chain, supported) in [("ATOM", true), ("stake", true), ("Cosmos", true), ("osmosis", false)] {
		let response = adaptor
			.get_supported_chains(
				&ctx(),
				SupportChainsRequest {
					chain: chain.to_string(),
				},
			)
			.await;
		assert_eq!(response.code, ReturnCode::Success);
		assert_eq!(response.message, "Support this chain");
		assert_eq!(response.payload, Some(supported), "chain {}", chain);
	}
}

#[tokio::test]
async fn test_convert_address() {
	let public_key = "02950e1cdfcb133d6024109fd489f734eeb4502418e538c28481f22bce276f248c";
	let key_bytes = hex::decode(public_key).unwrap();

	let mut client = MockCosmosClientTrait::new();
	client
		.expect_derive_address()
		.withf(move |key| key == key_bytes.as_slice())
		.times(2)
		.returning(|_| Ok("cosmos1derived".to_string()));

	let adaptor = adaptor(client);
	for key in [public_key.to_string(), format!("0x{}", public_key)] {
		let response = adaptor
			.convert_address(
				&ctx(),
				ConvertAddressRequest {
					chain: "cosmos".to_string(),
					public_key: key,
				},
			)
			.await;
		assert_eq!(response.message, "convert address success");
		assert_eq!(response.payload.as_deref(), Some("cosmos1derived"));
	}
}

#[tokio::test]
async fn test_convert_address_rejects_malformed_key() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_derive_address().returning(|_| {
		Err(anyhow::anyhow!(CosmosClientError::invalid_input(
			"expected a 33-byte compressed secp256k1 public key, got 2 bytes",
			None,
			None,
		)))
	});

	let adaptor = adaptor(client);

	let not_hex = adaptor
		.convert_address(
			&ctx(),
			ConvertAddressRequest {
				chain: "cosmos".to_string(),
				public_key: "zz".to_string(),
			},
		)
		.await;
	assert_eq!(not_hex.code, ReturnCode::Error);
	assert!(not_hex.message.contains("public key is not valid hex"));

	let too_short = adaptor
		.convert_address(
			&ctx(),
			ConvertAddressRequest {
				chain: "cosmos".to_string(),
				public_key: "abcd".to_string(),
			},
		)
		.await;
	assert_eq!(too_short.code, ReturnCode::Error);
	assert!(too_short.message.contains("33-byte compressed"));
}

#[tokio::test]
async fn test_validate_address_uses_single_channel() {
	let adaptor = adaptor(MockCosmosClientTrait::new());

	let valid = adaptor
		.validate_address(
			&ctx(),
			ValidAddressRequest {
				chain: "cosmos".to_string(),
				address: "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu".to_string(),
			},
		)
		.await;
	assert_eq!(valid.code, ReturnCode::Success);
	assert_eq!(valid.message, "valid address success");
	let result = valid.payload.unwrap();
	assert!(result.valid);
	assert!(result.reason.is_none());

	let invalid = adaptor
		.validate_address(
			&ctx(),
			ValidAddressRequest {
				chain: "cosmos".to_string(),
				address: "osmo1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5helwsw".to_string(),
			},
		)
		.await;
	assert_eq!(invalid.code, ReturnCode::Success);
	let result = invalid.payload.unwrap();
	assert!(!result.valid);
	assert_eq!(
		result.reason.as_deref(),
		Some("expected prefix 'cosmos', got 'osmo'")
	);
}

#[tokio::test]
async fn test_get_block_header_by_hash() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_header_by_hash()
		.withf(|hash| hash == TEST_BLOCK_HASH)
		.times(1)
		.returning(|_| Ok(meta(100, TEST_BLOCK_HASH)));

	let response = adaptor(client)
		.get_block_header_by_hash(
			&ctx(),
			BlockHeaderByHashRequest {
				chain: "cosmos".to_string(),
				hash: format!("0x{}", TEST_BLOCK_HASH.to_lowercase()),
			},
		)
		.await;

	assert_eq!(response.message, "get block header by hash success");
	let header = response.payload.unwrap();
	assert_eq!(header.hash, TEST_BLOCK_HASH);
	assert_eq!(header.parent_hash, hash_at(99));
	assert_eq!(header.number, "100");
	assert_eq!(header.time_unix_seconds, 1730106664);
}

#[tokio::test]
async fn test_get_block_header_by_hash_rejects_bad_hash() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_get_header_by_hash().never();

	let response = adaptor(client)
		.get_block_header_by_hash(
			&ctx(),
			BlockHeaderByHashRequest {
				chain: "cosmos".to_string(),
				hash: "not-a-hash".to_string(),
			},
		)
		.await;
	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.starts_with("Invalid input"));
}

#[tokio::test]
async fn test_get_block_header_by_number() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_header_by_height()
		.with(eq(22879895u64))
		.times(1)
		.returning(|height| Ok(meta(height, TEST_BLOCK_HASH)));

	let response = adaptor(client)
		.get_block_header_by_number(
			&ctx(),
			BlockHeaderByNumberRequest {
				chain: "cosmos".to_string(),
				height: 22879895,
			},
		)
		.await;

	assert_eq!(response.message, "get block header by number success");
	assert_eq!(response.payload.unwrap().number, "22879895");
}

#[tokio::test]
async fn test_get_block_header_reports_malformed_data() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_get_header_by_height().returning(|_| {
		let mut meta = meta(10, TEST_BLOCK_HASH);
		meta.header.time = "not a time".to_string();
		Ok(meta)
	});

	let response = adaptor(client)
		.get_block_header_by_number(
			&ctx(),
			BlockHeaderByNumberRequest {
				chain: "cosmos".to_string(),
				height: 10,
			},
		)
		.await;

	assert_eq!(response.code, ReturnCode::Error);
	assert!(response
		.message
		.starts_with("Malformed upstream data in 'header.time'"));
}

#[tokio::test]
async fn test_get_block_header_rejects_height_zero() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_get_header_by_height().never();

	let response = adaptor(client)
		.get_block_header_by_number(&ctx(), BlockHeaderByNumberRequest::default())
		.await;
	assert_eq!(response.code, ReturnCode::Error);
}

#[tokio::test]
async fn test_get_block_by_number_assembles_transactions_in_order() {
	let raw_txs = ["YWJj", "ZGVm"];
	let first_hash = mapper::tx_hash(raw_txs[0]).unwrap();
	let second_hash = mapper::tx_hash(raw_txs[1]).unwrap();

	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_block()
		.with(eq(100u64))
		.times(1)
		.returning(move |_| Ok(BlockBuilder::new().txs(raw_txs.to_vec()).build()));

	let (first, second) = (first_hash.clone(), second_hash.clone());
	client
		.expect_get_tx_by_hash()
		.times(2)
		.returning(move |hash| {
			if hash == first {
				Ok(TxResponseBuilder::new()
					.hash(&first)
					.height(100)
					.fee("5000uatom")
					.event(transfer_event("cosmos1fee", "cosmos1collector", "5000uatom", "0"))
					.event(transfer_event("cosmos1A", "cosmos1B", "100uatom", "0"))
					.event(event("message", &[("action", "/cosmos.bank.v1beta1.MsgSend")]))
					.event(transfer_event("cosmos1A", "cosmos1C", "7uatom", "1"))
					.build())
			} else {
				assert_eq!(hash, second);
				Ok(TxResponseBuilder::new()
					.hash(&second)
					.height(100)
					.index(1)
					.code(5)
					.fee("2000uatom")
					.build())
			}
		});

	let response = adaptor(client)
		.get_block_by_number(
			&ctx(),
			BlockByNumberRequest {
				chain: "cosmos".to_string(),
				height: 100,
			},
		)
		.await;

	assert_eq!(response.message, "get block by number success");
	let block = response.payload.unwrap();
	assert_eq!(block.header.number, "100");
	assert_eq!(block.transactions.len(), 2);

	let tx = &block.transactions[0];
	assert_eq!(tx.hash, first_hash);
	assert_eq!(tx.index, 0);
	assert_eq!(tx.status, TxStatus::Success);
	assert_eq!(tx.fee, "5000uatom");
	let recipients: Vec<_> = tx
		.transfers
		.iter()
		.map(|t| t.to[0].address.as_str())
		.collect();
	assert_eq!(recipients, ["cosmos1collector", "cosmos1B", "cosmos1C"]);
	assert_eq!(tx.transfers[2].message_index, 1);
	assert_eq!(tx.transfers[1].timestamp, "1730106664");

	let failed = &block.transactions[1];
	assert_eq!(failed.hash, second_hash);
	assert_eq!(failed.index, 1);
	assert_eq!(failed.status, TxStatus::Failed);
	assert!(failed.transfers.is_empty());
}

#[tokio::test]
async fn test_get_block_by_number_aborts_on_tx_failure() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_block()
		.returning(|_| Ok(BlockBuilder::new().txs(vec!["YWJj", "ZGVm"]).build()));
	client
		.expect_get_tx_by_hash()
		.returning(|_| Err(anyhow::anyhow!("tx index unavailable")));

	let response = adaptor(client)
		.get_block_by_number(
			&ctx(),
			BlockByNumberRequest {
				chain: "cosmos".to_string(),
				height: 100,
			},
		)
		.await;

	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.contains("tx index unavailable"));
	assert!(response.payload.is_none());
}

#[tokio::test]
async fn test_get_block_by_number_without_transactions() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_block()
		.returning(|_| Ok(BlockBuilder::new().null_txs().data_hash("").build()));
	client.expect_get_tx_by_hash().never();

	let response = adaptor(client)
		.get_block_by_number(
			&ctx(),
			BlockByNumberRequest {
				chain: "cosmos".to_string(),
				height: 100,
			},
		)
		.await;

	let block = response.payload.unwrap();
	assert!(block.transactions.is_empty());
	assert_eq!(block.header.tx_root_hash, mapper::EMPTY_DATA_HASH);
}

#[tokio::test]
async fn test_get_block_by_hash() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_block_by_hash()
		.withf(|hash| hash == TEST_BLOCK_HASH)
		.times(1)
		.returning(|_| Ok(BlockBuilder::new().build()));

	let response = adaptor(client)
		.get_block_by_hash(
			&ctx(),
			BlockByHashRequest {
				chain: "cosmos".to_string(),
				hash: TEST_BLOCK_HASH.to_lowercase(),
			},
		)
		.await;

	assert_eq!(response.message, "get block by hash success");
	assert_eq!(response.payload.unwrap().header.hash, TEST_BLOCK_HASH);
}

#[tokio::test]
async fn test_get_block_by_range_rejects_start_first() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_blockchain_info().never();
	let adaptor = adaptor(client);

	let response = adaptor
		.get_block_by_range(
			&ctx(),
			BlockByRangeRequest {
				chain: "cosmos".to_string(),
				start: "abc".to_string(),
				end: "xyz".to_string(),
			},
		)
		.await;
	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.contains("start height 'abc'"));
	assert!(!response.message.contains("xyz"));

	let response = adaptor
		.get_block_by_range(
			&ctx(),
			BlockByRangeRequest {
				chain: "cosmos".to_string(),
				start: "5".to_string(),
				end: "ten".to_string(),
			},
		)
		.await;
	assert!(response.message.contains("end height 'ten'"));

	let response = adaptor
		.get_block_by_range(
			&ctx(),
			BlockByRangeRequest {
				chain: "cosmos".to_string(),
				start: "10".to_string(),
				end: "5".to_string(),
			},
		)
		.await;
	assert!(response.message.contains("start 10 is greater than end 5"));
}

#[tokio::test]
async fn test_get_block_by_range_pages_and_sorts() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_blockchain_info()
		.with(eq(1u64), eq(20u64))
		.times(1)
		.returning(|min, max| {
			Ok(CosmosBlockchainInfo {
				last_height: "30".to_string(),
				block_metas: (min..=max).rev().map(|h| meta(h, &hash_at(h))).collect(),
			})
		});
	client
		.expect_blockchain_info()
		.with(eq(21u64), eq(25u64))
		.times(1)
		.returning(|min, max| {
			Ok(CosmosBlockchainInfo {
				last_height: "31".to_string(),
				block_metas: (min..=max).rev().map(|h| meta(h, &hash_at(h))).collect(),
			})
		});

	let response = adaptor(client)
		.get_block_by_range(
			&ctx(),
			BlockByRangeRequest {
				chain: "cosmos".to_string(),
				start: "1".to_string(),
				end: "25".to_string(),
			},
		)
		.await;

	assert_eq!(response.message, "get block by range success");
	let summary = response.payload.unwrap();
	assert_eq!(summary.last_height, "31");
	let numbers: Vec<u64> = summary
		.blocks
		.iter()
		.map(|b| b.number.parse().unwrap())
		.collect();
	assert_eq!(numbers, (1..=25).collect::<Vec<_>>());
	assert_eq!(summary.blocks[0].parent_hash, mapper::GENESIS_PARENT_HASH.to_string());
	assert_eq!(summary.blocks[4].hash, hash_at(5));
	assert_eq!(summary.blocks[4].parent_hash, hash_at(4));
}

/// Mocked `blockchain` endpoint of a node whose tip is `tip`
///
/// Like CometBFT, `max` is clamped to the tip and a `min` above it is refused.
fn chain_with_tip(client: &mut MockCosmosClientTrait, tip: u64) {
	client.expect_blockchain_info().returning(move |min, max| {
		let max = max.min(tip);
		if min > max {
			return Err(anyhow::anyhow!(CosmosClientError::rpc_error(
				format!("min height {} can't be greater than max height {}", min, max),
				None,
				None,
			)));
		}
		Ok(CosmosBlockchainInfo {
			last_height: tip.to_string(),
			block_metas: (min..=max).rev().map(|h| meta(h, &hash_at(h))).collect(),
		})
	});
}

fn range(start: &str, end: &str) -> BlockByRangeRequest {
	BlockByRangeRequest {
		chain: "cosmos".to_string(),
		start: start.to_string(),
		end: end.to_string(),
	}
}

#[tokio::test]
async fn test_get_block_by_range_stops_at_chain_tip() {
	let mut client = MockCosmosClientTrait::new();
	chain_with_tip(&mut client, 30);
	let adaptor = adaptor(client);

	let response = adaptor.get_block_by_range(&ctx(), range("25", "45")).await;
	assert_eq!(response.code, ReturnCode::Success);
	let summary = response.payload.unwrap();
	assert_eq!(summary.last_height, "30");
	let numbers: Vec<u64> = summary
		.blocks
		.iter()
		.map(|b| b.number.parse().unwrap())
		.collect();
	assert_eq!(numbers, (25..=30).collect::<Vec<_>>());

	let response = adaptor.get_block_by_range(&ctx(), range("2", "95")).await;
	assert_eq!(response.code, ReturnCode::Success);
	assert_eq!(response.payload.unwrap().blocks.len(), 29);
}

#[tokio::test]
async fn test_get_block_by_range_entirely_past_tip_fails() {
	let mut client = MockCosmosClientTrait::new();
	chain_with_tip(&mut client, 30);

	let response = adaptor(client).get_block_by_range(&ctx(), range("40", "45")).await;
	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.contains("min height 40"));
}

#[tokio::test]
async fn test_get_block_by_range_rejects_wide_ranges() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_blockchain_info().never();
	let adaptor = adaptor(client);

	let response = adaptor
		.get_block_by_range(&ctx(), range("1", &u64::MAX.to_string()))
		.await;
	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.contains("spans more than 1000 blocks"));

	let response = adaptor.get_block_by_range(&ctx(), range("1", "1001")).await;
	assert!(response.message.contains("spans more than 1000 blocks"));
}

#[tokio::test]
async fn test_block_futures_can_be_spawned() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_get_block()
		.returning(|height| Ok(BlockBuilder::new().height(height).build()));
	client
		.expect_get_block_by_hash()
		.returning(|_| Ok(BlockBuilder::new().height(9).build()));
	let adaptor: Arc<dyn ChainAdaptor> = Arc::new(adaptor(client));

	let by_number = tokio::spawn({
		let adaptor = adaptor.clone();
		async move {
			adaptor
				.get_block_by_number(
					&RequestContext::new(),
					BlockByNumberRequest {
						chain: "cosmos".to_string(),
						height: 9,
					},
				)
				.await
		}
	});
	let by_hash = tokio::spawn(async move {
		adaptor
			.get_block_by_hash(
				&RequestContext::new(),
				BlockByHashRequest {
					chain: "cosmos".to_string(),
					hash: TEST_BLOCK_HASH.to_string(),
				},
			)
			.await
	});

	assert_eq!(by_number.await.unwrap().code, ReturnCode::Success);
	assert_eq!(by_hash.await.unwrap().code, ReturnCode::Success);
}

#[tokio::test]
async fn test_send_tx() {
	let mut client = MockCosmosClientTrait::new();
	client
		.expect_broadcast_tx()
		.with(eq(b"abc".to_vec()))
		.times(1)
		.returning(|_| {
			Ok(CosmosBroadcastResult {
				code: 0,
				hash: TEST_BLOCK_HASH.to_lowercase(),
				..Default::default()
			})
		});

	let response = adaptor(client)
		.send_tx(
			&ctx(),
			SendTxRequest {
				chain: "cosmos".to_string(),
				raw_tx: "YWJj".to_string(),
			},
		)
		.await;

	assert_eq!(response.message, "send tx success");
	assert_eq!(response.payload.as_deref(), Some(TEST_BLOCK_HASH));
}

#[tokio::test]
async fn test_send_tx_rejection_keeps_node_error() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_broadcast_tx().returning(|_| {
		Ok(CosmosBroadcastResult {
			code: 32,
			codespace: "sdk".to_string(),
			log: "account sequence mismatch, expected 6, got 5".to_string(),
			hash: TEST_BLOCK_HASH.to_string(),
			..Default::default()
		})
	});

	let response = adaptor(client)
		.send_tx(
			&ctx(),
			SendTxRequest {
				chain: "cosmos".to_string(),
				raw_tx: "YWJj".to_string(),
			},
		)
		.await;

	assert_eq!(response.code, ReturnCode::Error);
	assert!(response
		.message
		.starts_with("Transaction rejected: code 32 (sdk): account sequence mismatch"));
}

#[tokio::test]
async fn test_send_tx_rejects_invalid_base64() {
	let mut client = MockCosmosClientTrait::new();
	client.expect_broadcast_tx().never();

	let response = adaptor(client)
		.send_tx(
			&ctx(),
			SendTxRequest {
				chain: "cosmos".to_string(),
				raw_tx: "not base64!".to_string(),
			},
		)
		.await;
	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.contains("not valid base64"));
}

#[tokio::test]
async fn test_unsupported_operations() {
	let adaptor = adaptor(MockCosmosClientTrait::new());

	let tx = adaptor.get_tx_by_hash(&ctx(), TxHashRequest::default()).await;
	let by_address = adaptor
		.get_tx_by_address(&ctx(), TxAddressRequest::default())
		.await;
	let fee = adaptor.get_fee(&ctx(), FeeRequest::default()).await;

	for (code, message) in [
		(tx.code, tx.message),
		(by_address.code, by_address.message),
		(fee.code, fee.message),
	] {
		assert_eq!(code, ReturnCode::Error);
		assert_eq!(message, "not implemented");
	}
}

/// Client that answers after a fixed delay
struct SlowClient {
	delay: Duration,
}

impl SlowClient {
	async fn wait(&self) -> anyhow::Error {
		tokio::time::sleep(self.delay).await;
		anyhow::anyhow!("answered too late")
	}
}

#[async_trait]
impl CosmosClientTrait for SlowClient {
	async fn get_account(&self, _address: &str) -> Result<RawAccountPayload, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn get_balance(&self, _denom: &str, _address: &str) -> Result<CosmosCoin, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn get_block(&self, _height: u64) -> Result<CosmosBlock, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn get_block_by_hash(&self, _hash: &str) -> Result<CosmosBlock, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn get_header_by_height(&self, _height: u64) -> Result<CosmosBlockMeta, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn get_header_by_hash(&self, _hash: &str) -> Result<CosmosBlockMeta, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn get_tx_by_hash(&self, _hash: &str) -> Result<CosmosTxResponse, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn get_tx_by_event(
		&self,
		_events: Vec<String>,
		_page: u32,
		_per_page: u32,
	) -> Result<CosmosTxSearchResult, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn blockchain_info(
		&self,
		_min_height: u64,
		_max_height: u64,
	) -> Result<CosmosBlockchainInfo, anyhow::Error> {
		Err(self.wait().await)
	}
	async fn broadcast_tx(&self, _raw_tx: Vec<u8>) -> Result<CosmosBroadcastResult, anyhow::Error> {
		Err(self.wait().await)
	}
	fn derive_address(&self, _public_key: &[u8]) -> Result<String, anyhow::Error> {
		Err(anyhow::anyhow!("not used"))
	}
}

#[tokio::test]
async fn test_caller_deadline_expires() {
	let adaptor = CosmosAdaptor::new(
		SlowClient {
			delay: Duration::from_secs(5),
		},
		NetworkBuilder::new().build(),
	);

	let response = adaptor
		.get_block_header_by_number(
			&RequestContext::with_timeout(Duration::from_millis(20)),
			BlockHeaderByNumberRequest {
				chain: "cosmos".to_string(),
				height: 10,
			},
		)
		.await;

	assert_eq!(response.code, ReturnCode::Error);
	assert!(response.message.starts_with("Deadline exceeded"));
	assert!(response.message.contains("get_header_by_height"));
}

#[tokio::test]
async fn test_network_timeout_applies_without_caller_deadline() {
	let adaptor = CosmosAdaptor::new(
		SlowClient {
			delay: Duration::from_secs(5),
		},
		NetworkBuilder::new().request_timeout_ms(20).build(),
	);

	let response = adaptor
		.get_account(
			&RequestContext::new(),
			AccountRequest {
				chain: "cosmos".to_string(),
				address: ADDRESS.to_string(),
			},
		)
		.await;

	assert!(response.message.starts_with("Deadline exceeded"));
}
