//! Application wide constants.

/// Directory scanned for network configuration files
pub const DEFAULT_NETWORK_CONFIG_DIR: &str = "config/networks";

/// Deadline applied to a request when the caller does not provide one
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Upper bound of concurrent upstream calls issued by a single operation
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Chain names a Cosmos adaptor answers for when none are configured
pub const DEFAULT_COSMOS_SUPPORTED_CHAINS: [&str; 3] = ["stake", "cosmos", "atom"];

/// Message carried by envelopes of operations a chain does not support
pub const NOT_IMPLEMENTED_MESSAGE: &str = "not implemented";

/// Widest block range a single range request may ask for
pub const MAX_BLOCK_RANGE: u64 = 1_000;
