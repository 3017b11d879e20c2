use proptest::{prelude::*, test_runner::Config};
use wallet_chain_adaptor::{
	models::TxStatus,
	services::adaptor::mapper::{format_height, normalize_hash, parse_height, tx_status, HASH_LEN},
};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	// Heights survive the decimal string form
	#[test]
	fn test_height_round_trip(height in 0u64..=i64::MAX as u64) {
		let formatted = format_height(height);
		prop_assert_eq!(parse_height("height", &formatted).unwrap(), height);
	}

	// Anything that is not a plain decimal is rejected with the field name
	#[test]
	fn test_non_decimal_height_names_field(value in "[a-z .-]{1,8}[0-9]{0,3}") {
		let error = parse_height("header.height", &value).unwrap_err();
		prop_assert!(error.to_string().contains("'header.height'"));
	}

	// Hashes come out uppercase, without prefix, whatever the input casing
	#[test]
	fn test_hash_normalization(
		bytes in prop::collection::vec(any::<u8>(), HASH_LEN),
		upper in any::<bool>(),
		prefixed in any::<bool>(),
	) {
		let mut hex = hex::encode(&bytes);
		if upper {
			hex = hex.to_uppercase();
		}
		if prefixed {
			hex = format!("0x{}", hex);
		}

		let normalized = normalize_hash("hash", &hex).unwrap();
		prop_assert_eq!(normalized, hex::encode_upper(&bytes));
	}

	// Only 32-byte digests are hashes
	#[test]
	fn test_short_or_long_hashes_are_rejected(
		bytes in prop::collection::vec(any::<u8>(), 0..64)
			.prop_filter("not a digest", |b| b.len() != HASH_LEN)
	) {
		prop_assert!(normalize_hash("hash", &hex::encode(&bytes)).is_err());
	}

	#[test]
	fn test_status_follows_code(code in any::<u32>()) {
		let expected = if code == 0 { TxStatus::Success } else { TxStatus::Failed };
		prop_assert_eq!(tx_status(code), expected);
	}
}
