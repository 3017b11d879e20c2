//! Chain adaptor library for a multi-chain wallet backend.
//!
//! Maps Cosmos SDK / CometBFT accounts, blocks, transactions and events into
//! chain-agnostic canonical shapes and answers every wallet operation with a
//! uniform response envelope.
//!
//! # Module Structure
//!
//! - `bootstrap`: Loads networks and constructs adaptors
//! - `models`: Chain-native and canonical data structures, configuration
//! - `services`: Chain adaptors and upstream RPC clients
//! - `utils`: Common utilities and helper functions

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
