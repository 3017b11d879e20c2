//! Uniform response wrapper returned by every adaptor operation.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Outcome code of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnCode {
	Success,
	Error,
}

/// `{code, message, payload}` envelope
///
/// The payload is present exactly when `code` is [`ReturnCode::Success`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
	pub code: ReturnCode,
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload: Option<T>,
}

impl<T> ResponseEnvelope<T> {
	pub fn success(message: impl Into<String>, payload: T) -> Self {
		Self {
			code: ReturnCode::Success,
			message: message.into(),
			payload: Some(payload),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			code: ReturnCode::Error,
			message: message.into(),
			payload: None,
		}
	}

	/// Envelope of an operation outcome; errors keep only their display text
	pub fn from_result<E: Display>(success_message: impl Into<String>, result: Result<T, E>) -> Self {
		match result {
			Ok(payload) => Self::success(success_message, payload),
			Err(error) => Self::error(error.to_string()),
		}
	}

	pub fn is_success(&self) -> bool {
		self.code == ReturnCode::Success
	}

	/// Payload on success, message on error
	pub fn into_result(self) -> Result<T, String> {
		match (self.code, self.payload) {
			(ReturnCode::Success, Some(payload)) => Ok(payload),
			(_, _) => Err(self.message),
		}
	}
}
