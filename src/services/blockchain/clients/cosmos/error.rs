//! Cosmos client error types
//!
//! Distinguishes node-reported failures from responses the client cannot read.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CosmosClientError {
	/// The node answered with a JSON-RPC error or a failed ABCI query
	#[error("Cosmos RPC request failed: {0}")]
	RpcError(Box<ErrorContext>),

	/// The `result` member could not be decoded into the expected type
	#[error("Failed to parse Cosmos RPC response: {0}")]
	ResponseParseError(Box<ErrorContext>),

	#[error("Invalid input: {0}")]
	InvalidInput(Box<ErrorContext>),

	/// The response lacks a member the protocol guarantees
	#[error("Unexpected response structure from Cosmos RPC: {0}")]
	UnexpectedResponseStructure(Box<ErrorContext>),
}

impl CosmosClientError {
	pub fn rpc_error(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::RpcError(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	pub fn response_parse_error(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ResponseParseError(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	pub fn invalid_input(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidInput(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	pub fn unexpected_response_structure(
		message: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UnexpectedResponseStructure(Box::new(ErrorContext::new_with_log(
			message, source, metadata,
		)))
	}

	/// Whether the failure comes from data the node returned
	pub fn is_malformed_response(&self) -> bool {
		matches!(
			self,
			Self::ResponseParseError(_) | Self::UnexpectedResponseStructure(_)
		)
	}
}

impl TraceableError for CosmosClientError {
	fn trace_id(&self) -> String {
		match self {
			Self::RpcError(context) => context.trace_id.clone(),
			Self::ResponseParseError(context) => context.trace_id.clone(),
			Self::InvalidInput(context) => context.trace_id.clone(),
			Self::UnexpectedResponseStructure(context) => context.trace_id.clone(),
		}
	}
}
