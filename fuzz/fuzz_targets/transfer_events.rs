#![no_main]

use libfuzzer_sys::fuzz_target;
use wallet_chain_adaptor::{
    models::{CosmosEvent, TxStatus},
    services::adaptor::{extract_fee, transfers, TransferContext},
};

fuzz_target!(|data: &[u8]| {
    let Ok(events) = serde_json::from_slice::<Vec<CosmosEvent>>(data) else {
        return;
    };
    let context = TransferContext {
        fee: extract_fee(&events),
        status: TxStatus::Success,
        height: 1,
        timestamp: "0".to_string(),
    };
    let _ = transfers(&events, context).count();
});
