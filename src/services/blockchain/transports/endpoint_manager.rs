//! Active/fallback endpoint bookkeeping.
//!
//! Requests go to the active URL. Network failures and rate limiting move the
//! transport to the first fallback that passes a connection probe; the
//! previously active URL becomes the last fallback.

use reqwest_middleware::ClientWithMiddleware;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::services::blockchain::transports::{
	RotatingTransport, TransportError, ROTATE_ON_ERROR_CODES,
};

#[derive(Clone, Debug)]
pub struct EndpointManager {
	pub active_url: Arc<RwLock<String>>,
	pub fallback_urls: Arc<RwLock<Vec<String>>>,
	client: ClientWithMiddleware,
	/// Serializes rotations so concurrent failures rotate once
	rotation_lock: Arc<Mutex<()>>,
}

/// Outcome of sending one request to one URL
#[derive(Debug)]
enum AttemptOutcome {
	/// A response arrived; its status may still be an error
	Response(reqwest::Response),
	NetworkError(reqwest_middleware::Error),
	SerializationError(TransportError),
}

impl EndpointManager {
	pub fn new(client: ClientWithMiddleware, active_url: &str, fallback_urls: Vec<String>) -> Self {
		Self {
			active_url: Arc::new(RwLock::new(active_url.to_string())),
			fallback_urls: Arc::new(RwLock::new(fallback_urls)),
			rotation_lock: Arc::new(Mutex::new(())),
			client,
		}
	}

	pub fn update_client(&mut self, client: ClientWithMiddleware) {
		self.client = client;
	}

	/// Moves to the first fallback different from the active URL
	///
	/// Returns the new active URL. The active URL is left untouched when no
	/// fallback exists or the candidate fails its probe.
	pub async fn try_rotate_url<T: RotatingTransport>(
		&self,
		transport: &T,
	) -> Result<String, TransportError> {
		let _guard = self.rotation_lock.lock().await;
		let previous_url = self.active_url.read().await.clone();
		let fallbacks = self.fallback_urls.read().await.clone();

		let Some(new_url) = fallbacks.iter().find(|url| **url != previous_url).cloned() else {
			return Err(TransportError::url_rotation(
				format!(
					"No fallback URLs available. Current active: '{}', Fallbacks checked: {:?}",
					previous_url, fallbacks
				),
				None,
				None,
			));
		};

		tracing::debug!("Rotating RPC URL from '{}' to '{}'", previous_url, new_url);

		transport.try_connect(&new_url).await.map_err(|e| {
			TransportError::url_rotation(
				format!("Failed to connect to new URL '{}'", new_url),
				Some(e.into()),
				None,
			)
		})?;

		transport.update_client(&new_url).await.map_err(|e| {
			TransportError::url_rotation(
				format!(
					"Failed to update transport client with new URL '{}'",
					new_url
				),
				Some(e.into()),
				None,
			)
		})?;

		let mut active_url = self.active_url.write().await;
		let mut fallback_urls = self.fallback_urls.write().await;
		fallback_urls.retain(|url| *url != new_url);
		fallback_urls.push(previous_url);
		*active_url = new_url.clone();

		Ok(new_url)
	}

	async fn try_request_on_url<P>(
		&self,
		url: &str,
		transport: &impl RotatingTransport,
		method: &str,
		params: Option<P>,
	) -> AttemptOutcome
	where
		P: Into<Value> + Send + Clone + Serialize,
	{
		let request_body = transport.customize_request(method, params).await;

		let body = match serde_json::to_string(&request_body) {
			Ok(body) => body,
			Err(e) => {
				return AttemptOutcome::SerializationError(TransportError::request_serialization(
					"Failed to serialize request JSON",
					Some(Box::new(e)),
					None,
				));
			}
		};

		match self
			.client
			.post(url)
			.header("Content-Type", "application/json")
			.body(body)
			.send()
			.await
		{
			Ok(response) => AttemptOutcome::Response(response),
			Err(e) => AttemptOutcome::NetworkError(e),
		}
	}

	/// Sends `method` to the active URL, rotating on network errors and 429s
	///
	/// The request is replayed on the new active URL after every successful
	/// rotation. Other HTTP errors fail immediately.
	pub async fn send_raw_request<T, P>(
		&self,
		transport: &T,
		method: &str,
		params: Option<P>,
	) -> Result<Value, TransportError>
	where
		T: RotatingTransport,
		P: Into<Value> + Send + Clone + Serialize,
	{
		loop {
			let url = self.active_url.read().await.clone();
			tracing::debug!("Sending '{}' to '{}'", method, url);

			match self
				.try_request_on_url(&url, transport, method, params.clone())
				.await
			{
				AttemptOutcome::Response(response) if response.status().is_success() => {
					return response.json().await.map_err(|e| {
						TransportError::response_parse(
							"Failed to parse JSON response",
							Some(Box::new(e)),
							None,
						)
					});
				}
				AttemptOutcome::Response(response) => {
					let status = response.status();
					let body = response.text().await.unwrap_or_default();
					tracing::warn!("Request to {} failed with status {}: {}", url, status, body);

					if !ROTATE_ON_ERROR_CODES.contains(&status.as_u16()) {
						return Err(TransportError::http(status, url, body, None, None));
					}

					if let Err(rotation_error) = self.try_rotate_url(transport).await {
						return Err(TransportError::http(
							status,
							url,
							body,
							Some(Box::new(rotation_error)),
							None,
						));
					}
				}
				AttemptOutcome::NetworkError(network_error) => {
					tracing::warn!("Network error for {}: {}", url, network_error);

					if let Err(rotation_error) = self.try_rotate_url(transport).await {
						return Err(TransportError::network(
							network_error.to_string(),
							Some(Box::new(rotation_error)),
							None,
						));
					}
				}
				AttemptOutcome::SerializationError(error) => return Err(error),
			}
		}
	}
}
