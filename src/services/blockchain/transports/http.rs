//! JSON-RPC over HTTP with weighted endpoint selection.
//!
//! The client probes the configured endpoints by descending weight and keeps the
//! remaining ones as fallbacks for the [`EndpointManager`].

use anyhow::Context;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::{
	models::Network,
	services::blockchain::transports::{
		BlockchainTransport, EndpointManager, RotatingTransport, TransientErrorRetryStrategy,
		TransportError,
	},
	utils::http::create_retryable_http_client,
};

/// HTTP transport shared by all chain-specific transports
///
/// Cloning is cheap; clones share the endpoint state.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	/// Retryable HTTP client for making requests
	pub client: ClientWithMiddleware,
	/// Active and fallback endpoints
	endpoint_manager: EndpointManager,
	/// JSON-RPC body used to probe an endpoint
	test_connection_payload: Value,
}

impl HttpTransportClient {
	/// Connects to the first healthy endpoint of `network`
	///
	/// Endpoints are probed with `test_connection_payload` in descending weight
	/// order; zero-weight endpoints are never used. Fails when no endpoint
	/// answers the probe with a success status.
	pub async fn new(network: &Network, test_connection_payload: &str) -> Result<Self, anyhow::Error> {
		let test_connection_payload: Value = serde_json::from_str(test_connection_payload)
			.context("Failed to parse test payload as JSON")?;

		let mut rpc_urls: Vec<_> = network
			.rpc_urls
			.iter()
			.filter(|rpc_url| rpc_url.type_ == "rpc" && rpc_url.weight > 0)
			.collect();
		rpc_urls.sort_by(|a, b| b.weight.cmp(&a.weight));

		let base_http_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(Duration::from_millis(network.request_timeout_ms()))
			.connect_timeout(Duration::from_secs(20))
			.build()
			.context("Failed to create base HTTP client")?;

		let retryable_client = create_retryable_http_client(
			&network.retry,
			base_http_client,
			Some(TransientErrorRetryStrategy),
		);

		for rpc_url in rpc_urls.iter() {
			let Ok(url) = Url::parse(&rpc_url.url) else {
				tracing::warn!("Skipping unparsable RPC URL: {}", rpc_url.url);
				continue;
			};

			let healthy = match retryable_client
				.post(url)
				.json(&test_connection_payload)
				.send()
				.await
			{
				Ok(response) => response.status().is_success(),
				Err(e) => {
					tracing::debug!("RPC URL {} failed the connection probe: {}", rpc_url.url, e);
					false
				}
			};
			if !healthy {
				continue;
			}

			let fallback_urls: Vec<String> = rpc_urls
				.iter()
				.filter(|other| other.url != rpc_url.url)
				.map(|other| other.url.clone())
				.collect();

			tracing::info!(
				"Network '{}' connected to {} ({} fallback URLs)",
				network.slug,
				rpc_url.url,
				fallback_urls.len()
			);

			return Ok(Self {
				client: retryable_client.clone(),
				endpoint_manager: EndpointManager::new(
					retryable_client,
					&rpc_url.url,
					fallback_urls,
				),
				test_connection_payload,
			});
		}

		Err(anyhow::anyhow!(
			"All RPC URLs failed to connect for network '{}'",
			network.slug
		))
	}

	/// Endpoint state, for wrappers that customize the request body
	pub fn endpoint_manager(&self) -> &EndpointManager {
		&self.endpoint_manager
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	async fn get_current_url(&self) -> String {
		self.endpoint_manager.active_url.read().await.clone()
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		self.endpoint_manager
			.send_raw_request(self, method, params)
			.await
	}

	fn update_endpoint_manager_client(
		&mut self,
		client: ClientWithMiddleware,
	) -> Result<(), anyhow::Error> {
		self.endpoint_manager.update_client(client);
		Ok(())
	}
}

#[async_trait]
impl RotatingTransport for HttpTransportClient {
	async fn try_connect(&self, url: &str) -> Result<(), anyhow::Error> {
		let url = Url::parse(url).map_err(|_| anyhow::anyhow!("Invalid URL: {}", url))?;

		let response = self
			.client
			.post(url.clone())
			.json(&self.test_connection_payload)
			.send()
			.await
			.map_err(|e| anyhow::anyhow!("Failed to connect to {}: {}", url, e))?;

		if !response.status().is_success() {
			return Err(anyhow::anyhow!(
				"Failed to connect to {}: {}",
				url,
				response.status().as_u16()
			));
		}
		Ok(())
	}

	async fn update_client(&self, url: &str) -> Result<(), anyhow::Error> {
		let parsed_url = Url::parse(url).map_err(|_| anyhow::anyhow!("Invalid URL: {}", url))?;

		// The HTTP client is URL agnostic, only the active URL moves
		let mut active_url = self.endpoint_manager.active_url.write().await;
		*active_url = parsed_url.as_str().trim_end_matches('/').to_string();
		Ok(())
	}
}
