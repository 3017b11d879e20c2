//! Chain independent domain models.
//!
//! - Canonical account, block and transfer shapes returned to callers
//! - The response envelope wrapping every operation result
//! - Inbound request shapes
//! - Network definitions loaded from configuration

mod account;
mod block;
mod envelope;
mod network;
mod request;
mod transaction;

pub use account::{AddressValidation, CanonicalAccount, FeeEstimate};
pub use block::{BlockRangeSummary, CanonicalBlock, CanonicalBlockHeader, CanonicalBlockTransaction};
pub use envelope::{ResponseEnvelope, ReturnCode};
pub use network::{Network, RpcUrl};
pub use request::{
	AccountRequest, BlockByHashRequest, BlockByNumberRequest, BlockByRangeRequest,
	BlockHeaderByHashRequest, BlockHeaderByNumberRequest, ConvertAddressRequest, FeeRequest,
	SendTxRequest, SupportChainsRequest, TxAddressRequest, TxHashRequest, ValidAddressRequest,
};
pub use transaction::{CanonicalTransfer, TransferAddress, TxStatus};
