//! Upstream chain client implementations.
//!
//! - Cosmos client for Cosmos SDK chains served over CometBFT JSON-RPC

mod cosmos {
	pub mod client;
	pub mod error;
}

pub use cosmos::client::{CosmosClient, CosmosClientTrait};
pub use cosmos::error::CosmosClientError;
