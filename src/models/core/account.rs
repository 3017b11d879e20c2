//! Canonical account shapes.

use serde::{Deserialize, Serialize};

/// Chain independent view of an account
///
/// Numeric fields are decimal strings so that chains with different integer
/// widths share one representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalAccount {
	/// Network label from configuration, e.g. `mainnet`
	pub network: String,
	pub address: String,
	pub account_number: String,
	pub sequence: String,
	/// Amount of the network's staking denom, in base units
	pub balance: String,
}

/// Result of an address validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressValidation {
	pub valid: bool,
	/// Why the address was rejected; `None` when valid
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
}

impl AddressValidation {
	pub fn valid() -> Self {
		Self {
			valid: true,
			reason: None,
		}
	}

	pub fn invalid(reason: impl Into<String>) -> Self {
		Self {
			valid: false,
			reason: Some(reason.into()),
		}
	}
}

/// Fee estimate for a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
	pub slow_fee: String,
	pub normal_fee: String,
	pub fast_fee: String,
}
