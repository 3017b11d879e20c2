//! CometBFT JSON-RPC transport.
//!
//! Wraps [`HttpTransportClient`]; CometBFT takes named parameters, so calls
//! without parameters send an empty object instead of `null`.

use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
	models::Network,
	services::blockchain::transports::{
		BlockchainTransport, HttpTransportClient, RotatingTransport, TransportError,
	},
};

/// Probe sent to every endpoint before it is used
const HEALTH_PAYLOAD: &str = r#"{"jsonrpc":"2.0","id":1,"method":"health","params":{}}"#;

#[derive(Clone, Debug)]
pub struct CosmosTransportClient {
	http_client: HttpTransportClient,
}

impl CosmosTransportClient {
	pub async fn new(network: &Network) -> Result<Self, anyhow::Error> {
		let http_client = HttpTransportClient::new(network, HEALTH_PAYLOAD).await?;
		Ok(Self { http_client })
	}
}

#[async_trait::async_trait]
impl BlockchainTransport for CosmosTransportClient {
	async fn get_current_url(&self) -> String {
		self.http_client.get_current_url().await
	}

	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		// Route through the endpoint manager with `self` so that
		// `customize_request` below shapes the body
		self.http_client
			.endpoint_manager()
			.send_raw_request(self, method, params)
			.await
	}

	async fn customize_request<P>(&self, method: &str, params: Option<P>) -> Value
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.map(|p| p.into()).unwrap_or_else(|| json!({}))
		})
	}

	fn update_endpoint_manager_client(
		&mut self,
		client: ClientWithMiddleware,
	) -> Result<(), anyhow::Error> {
		self.http_client.update_endpoint_manager_client(client)
	}
}

#[async_trait::async_trait]
impl RotatingTransport for CosmosTransportClient {
	async fn try_connect(&self, url: &str) -> Result<(), anyhow::Error> {
		self.http_client.try_connect(url).await
	}

	async fn update_client(&self, url: &str) -> Result<(), anyhow::Error> {
		self.http_client.update_client(url).await
	}
}
