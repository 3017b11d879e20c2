//! Per-request deadline propagation.

use std::{future::Future, time::Duration};
use tokio::time::Instant;

use crate::services::adaptor::AdaptorError;

/// Deadline shared by every upstream call of one adaptor operation
///
/// Upstream futures are dropped when the deadline passes, which cancels the
/// in-flight HTTP requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
	deadline: Option<Instant>,
}

impl RequestContext {
	/// Context without a deadline
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_timeout(timeout: Duration) -> Self {
		Self::with_deadline(Instant::now() + timeout)
	}

	pub fn with_deadline(deadline: Instant) -> Self {
		Self {
			deadline: Some(deadline),
		}
	}

	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Keeps the earlier of the current deadline and `now + timeout`
	pub fn or_timeout(self, timeout: Duration) -> Self {
		let fallback = Instant::now() + timeout;
		Self {
			deadline: Some(self.deadline.map_or(fallback, |d| d.min(fallback))),
		}
	}

	/// Awaits `future` under the deadline
	///
	/// Expiry yields [`AdaptorError::DeadlineExceeded`]; upstream failures are
	/// classified with [`AdaptorError::from_upstream`].
	pub async fn run<T, F>(&self, operation: &str, future: F) -> Result<T, AdaptorError>
	where
		F: Future<Output = Result<T, anyhow::Error>>,
	{
		let result = match self.deadline {
			Some(deadline) => tokio::time::timeout_at(deadline, future)
				.await
				.map_err(|elapsed| AdaptorError::deadline_exceeded(operation, elapsed))?,
			None => future.await,
		};
		result.map_err(|e| AdaptorError::from_upstream(operation, e))
	}
}
