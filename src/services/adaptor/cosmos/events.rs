//! Transfer extraction from CometBFT event lists.
//!
//! Bank sends emit one `transfer` event per message, with `sender`,
//! `recipient`, `amount` and (since SDK 0.50) `msg_index` attributes. Attribute
//! order inside an event carries no meaning.

use std::{iter::FusedIterator, slice};

use crate::models::{CanonicalTransfer, CosmosEvent, TransferAddress, TxStatus};

pub const TRANSFER_EVENT_TYPE: &str = "transfer";
const TX_EVENT_TYPE: &str = "tx";

const ATTR_SENDER: &str = "sender";
const ATTR_RECIPIENT: &str = "recipient";
const ATTR_AMOUNT: &str = "amount";
const ATTR_MSG_INDEX: &str = "msg_index";
const ATTR_FEE: &str = "fee";

/// Transaction level values copied into every transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferContext {
	pub fee: String,
	pub status: TxStatus,
	pub height: i64,
	pub timestamp: String,
}

/// Lazy, single pass sequence of transfers of one transaction
///
/// Yields one transfer per `transfer` event, in event order. Build a new
/// iterator from the event list to walk it again.
#[derive(Debug, Clone)]
pub struct TransferEvents<'a> {
	events: slice::Iter<'a, CosmosEvent>,
	context: TransferContext,
}

impl<'a> TransferEvents<'a> {
	pub fn new(events: &'a [CosmosEvent], context: TransferContext) -> Self {
		Self {
			events: events.iter(),
			context,
		}
	}

	fn normalize(&self, event: &CosmosEvent) -> CanonicalTransfer {
		let mut from = String::new();
		let mut to = String::new();
		let mut amount = String::new();
		let mut message_index = 0;

		for attribute in &event.attributes {
			match attribute.key.as_str() {
				ATTR_SENDER => from = attribute.value.clone(),
				ATTR_RECIPIENT => to = attribute.value.clone(),
				ATTR_AMOUNT => amount = attribute.value.clone(),
				// Only this field degrades on bad input
				ATTR_MSG_INDEX => message_index = attribute.value.trim().parse().unwrap_or(0),
				_ => {}
			}
		}

		CanonicalTransfer {
			message_index,
			from: vec![TransferAddress::from(from)],
			to: vec![TransferAddress::from(to)],
			amount,
			fee: self.context.fee.clone(),
			status: self.context.status,
			height: self.context.height,
			timestamp: self.context.timestamp.clone(),
		}
	}
}

impl Iterator for TransferEvents<'_> {
	type Item = CanonicalTransfer;

	fn next(&mut self) -> Option<Self::Item> {
		let event = self
			.events
			.by_ref()
			.find(|event| event.kind == TRANSFER_EVENT_TYPE)?;
		Some(self.normalize(event))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, self.events.size_hint().1)
	}
}

impl FusedIterator for TransferEvents<'_> {}

/// Transfers of `events`, see [`TransferEvents`]
pub fn transfers(events: &[CosmosEvent], context: TransferContext) -> TransferEvents<'_> {
	TransferEvents::new(events, context)
}

/// Fee reported by the `tx` event, empty when the chain did not report one
pub fn extract_fee(events: &[CosmosEvent]) -> String {
	events
		.iter()
		.filter(|event| event.kind == TX_EVENT_TYPE)
		.find_map(|event| event.attribute(ATTR_FEE))
		.unwrap_or_default()
		.to_string()
}
