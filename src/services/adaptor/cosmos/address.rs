//! Bech32 account address checks.

use bech32::{FromBase32, Variant};

use crate::models::AddressValidation;

/// Byte lengths of account addresses: key hashes and module/ICA addresses
const ADDRESS_LENGTHS: [usize; 2] = [20, 32];

/// Checks that `address` is a bech32 account address under `prefix`
///
/// Every outcome is a validation result; nothing here fails.
pub fn validate_address(prefix: &str, address: &str) -> AddressValidation {
	if address.is_empty() {
		return AddressValidation::invalid("address is empty");
	}

	let (hrp, data, variant) = match bech32::decode(address) {
		Ok(decoded) => decoded,
		Err(e) => return AddressValidation::invalid(format!("invalid bech32 encoding: {}", e)),
	};

	if variant != Variant::Bech32 {
		return AddressValidation::invalid("bech32m addresses are not account addresses");
	}
	if hrp != prefix {
		return AddressValidation::invalid(format!(
			"expected prefix '{}', got '{}'",
			prefix, hrp
		));
	}

	match Vec::<u8>::from_base32(&data) {
		Ok(bytes) if ADDRESS_LENGTHS.contains(&bytes.len()) => AddressValidation::valid(),
		Ok(bytes) => AddressValidation::invalid(format!(
			"unexpected address length {} bytes",
			bytes.len()
		)),
		Err(e) => AddressValidation::invalid(format!("invalid address payload: {}", e)),
	}
}
