//! Core services implementing the business logic.
//!
//! - `adaptor`: Chain adaptors answering the canonical wallet operations
//! - `blockchain`: Upstream RPC clients and transports

pub mod adaptor;
pub mod blockchain;
