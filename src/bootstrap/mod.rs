//! Bootstrap module for loading networks and constructing adaptors.
//!
//! One adaptor is built per configured network at startup; each owns its own
//! upstream client. The resulting [`AdaptorRegistry`] is read-only afterwards.

use futures::future::join_all;
use std::{collections::BTreeMap, error::Error, future::Future, path::Path, sync::Arc};
use tracing::{error, info};

use crate::{
	models::{BlockChainType, ConfigLoader, Network},
	services::adaptor::{AdaptorRegistry, ChainAdaptor, CosmosAdaptor},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Loads and validates every network file under `path`
///
/// Networks are returned in file name order.
pub async fn load_networks(path: Option<&Path>) -> Result<Vec<Network>> {
	let networks: BTreeMap<String, Network> = Network::load_all(path).await?;
	info!(count = networks.len(), "loaded network configurations");
	Ok(networks.into_values().collect())
}

/// Builds adaptors for `networks` with `factory` and registers them
///
/// Networks whose adaptor cannot be built are logged and left out; an
/// empty registry is an error.
pub async fn build_registry<F, Fut>(networks: &[Network], factory: F) -> Result<AdaptorRegistry>
where
	F: Fn(Network) -> Fut,
	Fut: Future<Output = std::result::Result<Arc<dyn ChainAdaptor>, anyhow::Error>>,
{
	let results = join_all(networks.iter().cloned().map(&factory)).await;

	let mut registry = AdaptorRegistry::new();
	for (network, result) in networks.iter().zip(results) {
		match result {
			Ok(adaptor) => {
				info!(chain = %network.slug, "adaptor ready");
				registry.register(adaptor);
			}
			Err(e) => {
				error!(chain = %network.slug, "failed to initialize adaptor: {:#}", e);
			}
		}
	}

	if registry.is_empty() {
		return Err("no chain adaptor could be initialized".into());
	}
	info!(
		count = registry.len(),
		chains = ?registry.chains(),
		"chain adaptor registry ready"
	);
	Ok(registry)
}

/// Connects one adaptor per network
pub async fn initialize_adaptors(networks: &[Network]) -> Result<AdaptorRegistry> {
	build_registry(networks, |network| async move {
		match network.network_type {
			BlockChainType::Cosmos => {
				let adaptor = CosmosAdaptor::connect(&network).await?;
				Ok(Arc::new(adaptor) as Arc<dyn ChainAdaptor>)
			}
		}
	})
	.await
}
