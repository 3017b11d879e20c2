//! Cosmos SDK / CometBFT adaptor.
//!
//! - `account`: Type-URL registry for polymorphic accounts
//! - `adaptor`: The [`ChainAdaptor`](super::ChainAdaptor) implementation
//! - `address`: Bech32 address validation
//! - `events`: Transfer extraction from event lists
//! - `mapper`: Chain-native to canonical conversions

mod account;
mod adaptor;
mod address;
mod events;
pub mod mapper;

pub use account::{decode_base_account, AccountDecodeFn, AccountDecoderRegistry, DecodedAccount};
pub use adaptor::CosmosAdaptor;
pub use address::validate_address;
pub use events::{extract_fee, transfers, TransferContext, TransferEvents, TRANSFER_EVENT_TYPE};
