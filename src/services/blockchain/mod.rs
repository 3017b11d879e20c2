//! Upstream chain clients and the transports they run on.
//!
//! The adaptors only depend on the client traits; the concrete clients talk
//! JSON-RPC through a [`BlockchainTransport`].

mod clients;
mod transports;

pub use clients::{CosmosClient, CosmosClientError, CosmosClientTrait};
pub use transports::{
	BlockchainTransport, CosmosTransportClient, EndpointManager, HttpTransportClient,
	RotatingTransport, TransientErrorRetryStrategy, TransportError, ROTATE_ON_ERROR_CODES,
};
