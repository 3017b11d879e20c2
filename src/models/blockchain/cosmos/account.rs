//! Cosmos auth and bank protobuf messages.
//!
//! The generated messages come from `ibc-proto`; this module only adds the
//! type-tagged payload handed to the account decoder.

pub use ibc_proto::{
	cosmos::{
		auth::v1beta1::{BaseAccount, QueryAccountRequest, QueryAccountResponse},
		bank::v1beta1::{QueryBalanceRequest, QueryBalanceResponse},
		base::v1beta1::Coin,
	},
	google::protobuf::Any,
};

/// Type URL of the plain account shape registered by the auth module
pub const BASE_ACCOUNT_TYPE_URL: &str = "/cosmos.auth.v1beta1.BaseAccount";

/// Account payload whose layout depends on `type_url`
///
/// Handed from the RPC client to the account decoder, which consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawAccountPayload {
	/// URL-style type identifier, e.g. `/cosmos.auth.v1beta1.BaseAccount`
	pub type_url: String,
	/// Protobuf encoded account message
	pub value: Vec<u8>,
}

impl From<Any> for RawAccountPayload {
	fn from(any: Any) -> Self {
		Self {
			type_url: any.type_url,
			value: any.value,
		}
	}
}
