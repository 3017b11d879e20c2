//! Type-URL dispatch for polymorphic Cosmos accounts.
//!
//! The auth module returns accounts as `Any`. Each supported concrete type is
//! registered with a decoder; unknown types fail closed.

use prost::Message;
use std::collections::HashMap;

use crate::{
	models::{CanonicalAccount, CosmosBaseAccount, RawAccountPayload, BASE_ACCOUNT_TYPE_URL},
	services::adaptor::AdaptorError,
};

/// Fields every account variant resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAccount {
	pub address: String,
	pub account_number: u64,
	pub sequence: u64,
}

impl DecodedAccount {
	pub fn into_canonical(self, network: &str, balance: String) -> CanonicalAccount {
		CanonicalAccount {
			network: network.to_string(),
			address: self.address,
			account_number: self.account_number.to_string(),
			sequence: self.sequence.to_string(),
			balance,
		}
	}
}

/// Decodes the protobuf value of one account type
pub type AccountDecodeFn = fn(&[u8]) -> Result<DecodedAccount, AdaptorError>;

/// Decoder for `/cosmos.auth.v1beta1.BaseAccount`
pub fn decode_base_account(value: &[u8]) -> Result<DecodedAccount, AdaptorError> {
	let account = CosmosBaseAccount::decode(value).map_err(|e| {
		AdaptorError::malformed_upstream_data(
			"account",
			"failed to decode BaseAccount",
			Some(Box::new(e)),
		)
	})?;

	Ok(DecodedAccount {
		address: account.address,
		account_number: account.account_number,
		sequence: account.sequence,
	})
}

/// Map from type URL to decoder
#[derive(Debug, Clone)]
pub struct AccountDecoderRegistry {
	decoders: HashMap<String, AccountDecodeFn>,
}

impl Default for AccountDecoderRegistry {
	/// Registry that only understands base accounts
	fn default() -> Self {
		let mut registry = Self::empty();
		registry.register(BASE_ACCOUNT_TYPE_URL, decode_base_account);
		registry
	}
}

impl AccountDecoderRegistry {
	pub fn empty() -> Self {
		Self {
			decoders: HashMap::new(),
		}
	}

	/// Registers `decoder` for `type_url`, returning the decoder it replaces
	pub fn register(
		&mut self,
		type_url: impl Into<String>,
		decoder: AccountDecodeFn,
	) -> Option<AccountDecodeFn> {
		self.decoders.insert(type_url.into(), decoder)
	}

	/// Decodes `payload` with the decoder registered for its type URL
	pub fn decode(&self, payload: RawAccountPayload) -> Result<DecodedAccount, AdaptorError> {
		let RawAccountPayload { type_url, value } = payload;
		match self.decoders.get(&type_url) {
			Some(decoder) => decoder(&value),
			None => Err(AdaptorError::unsupported_account_type(type_url)),
		}
	}
}
