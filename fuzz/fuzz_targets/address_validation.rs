#![no_main]

use libfuzzer_sys::fuzz_target;
use wallet_chain_adaptor::services::adaptor::validate_address;

fuzz_target!(|data: &[u8]| {
    let address = String::from_utf8_lossy(data);
    let result = validate_address("cosmos", &address);
    assert_eq!(result.valid, result.reason.is_none());
});
