//! Adaptor error types.
//!
//! Every failed adaptor operation ends in exactly one of these variants; the
//! envelope message is the variant's display text.

use crate::{
	services::blockchain::{CosmosClientError, TransportError},
	utils::{
		logging::error::{ErrorContext, TraceableError},
		NOT_IMPLEMENTED_MESSAGE,
	},
};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AdaptorError {
	/// The upstream node could not be reached or refused the query
	#[error("Upstream unavailable: {0}")]
	UpstreamUnavailable(Box<ErrorContext>),

	/// No decoder is registered for the account's type identifier
	#[error("Unsupported account type '{type_url}'")]
	UnsupportedAccountType {
		type_url: String,
		context: Box<ErrorContext>,
	},

	/// A chain-native value could not be mapped
	#[error("Malformed upstream data in '{field}': {context}")]
	MalformedUpstreamData {
		field: String,
		context: Box<ErrorContext>,
	},

	/// The caller supplied a value that cannot be used
	#[error("Invalid input: {0}")]
	InvalidInput(Box<ErrorContext>),

	/// The operation exists on the interface but not for this chain
	#[error("{}", NOT_IMPLEMENTED_MESSAGE)]
	NotImplemented { operation: &'static str },

	/// The request deadline passed before the upstream answered
	#[error("Deadline exceeded: {0}")]
	DeadlineExceeded(Box<ErrorContext>),

	/// The network refused a broadcast transaction
	#[error("Transaction rejected: {0}")]
	TransactionRejected(Box<ErrorContext>),
}

impl AdaptorError {
	pub fn upstream_unavailable(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UpstreamUnavailable(Box::new(ErrorContext::new_with_log(msg, source, metadata)))
	}

	pub fn unsupported_account_type(type_url: impl Into<String>) -> Self {
		let type_url = type_url.into();
		let context = ErrorContext::new_with_log(
			format!("no decoder registered for '{}'", type_url),
			None,
			None,
		);
		Self::UnsupportedAccountType {
			type_url,
			context: Box::new(context),
		}
	}

	pub fn malformed_upstream_data(
		field: impl Into<String>,
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
	) -> Self {
		Self::MalformedUpstreamData {
			field: field.into(),
			context: Box::new(ErrorContext::new_with_log(msg, source, None)),
		}
	}

	/// Caller mistakes are reported in the envelope but not logged as errors
	pub fn invalid_input(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidInput(Box::new(ErrorContext::new(msg, source, metadata)))
	}

	pub fn not_implemented(operation: &'static str) -> Self {
		Self::NotImplemented { operation }
	}

	pub fn deadline_exceeded(operation: &str, source: tokio::time::error::Elapsed) -> Self {
		Self::DeadlineExceeded(Box::new(ErrorContext::new_with_log(
			format!("'{}' did not complete before the request deadline", operation),
			Some(Box::new(source)),
			None,
		)))
	}

	pub fn transaction_rejected(
		msg: impl Into<String>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::TransactionRejected(Box::new(ErrorContext::new_with_log(msg, None, metadata)))
	}

	/// Classifies a failure reported by the upstream client
	///
	/// Responses the client could not read become `MalformedUpstreamData`,
	/// invalid arguments become `InvalidInput` and everything else is
	/// `UpstreamUnavailable`. The original error is kept as source and its
	/// trace id is carried over.
	pub fn from_upstream(operation: &str, error: anyhow::Error) -> Self {
		let message = format!("{} failed: {:#}", operation, error);
		let client_error = error.downcast_ref::<CosmosClientError>();
		let trace_id = client_error
			.map(|e| e.trace_id())
			.or_else(|| error.downcast_ref::<TransportError>().map(|e| e.trace_id()));
		let malformed = client_error.is_some_and(|e| e.is_malformed_response());
		let invalid_input = matches!(client_error, Some(CosmosClientError::InvalidInput(_)));

		let mut context = ErrorContext::new(message, Some(error.into()), None);
		if let Some(trace_id) = trace_id {
			context.trace_id = trace_id;
		}

		if invalid_input {
			return Self::InvalidInput(Box::new(context));
		}

		context.log();
		if malformed {
			Self::MalformedUpstreamData {
				field: operation.to_string(),
				context: Box::new(context),
			}
		} else {
			Self::UpstreamUnavailable(Box::new(context))
		}
	}
}

impl TraceableError for AdaptorError {
	fn trace_id(&self) -> String {
		match self {
			Self::UpstreamUnavailable(ctx)
			| Self::InvalidInput(ctx)
			| Self::DeadlineExceeded(ctx)
			| Self::TransactionRejected(ctx) => ctx.trace_id.clone(),
			Self::UnsupportedAccountType { context, .. }
			| Self::MalformedUpstreamData { context, .. } => context.trace_id.clone(),
			Self::NotImplemented { .. } => Uuid::new_v4().to_string(),
		}
	}
}
