//! Wallet chain adaptor command line entry point.
//!
//! Loads the configured networks, builds the adaptor for the requested chain
//! and runs a single operation against it. The outcome is printed as the JSON
//! response envelope; Error envelopes exit with status 1.

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;

use crate::{
	bootstrap::{initialize_adaptors, load_networks, Result},
	models::{
		AccountRequest, BlockByHashRequest, BlockByNumberRequest, BlockByRangeRequest,
		BlockHeaderByHashRequest, BlockHeaderByNumberRequest, ConvertAddressRequest, FeeRequest,
		ResponseEnvelope, SendTxRequest, SupportChainsRequest, TxAddressRequest, TxHashRequest,
		ValidAddressRequest,
	},
	services::adaptor::{ChainAdaptor, RequestContext},
	utils::logging::setup_logging,
};

use clap::{Parser, Subcommand};
use dotenvy::dotenv_override;
use serde::Serialize;
use std::{
	env::{set_var, var},
	path::PathBuf,
	sync::Arc,
	time::Duration,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(
	name = "wallet-chain-adaptor",
	about = "Runs canonical wallet operations against configured Cosmos SDK chains.",
	version
)]
struct Cli {
	/// Write logs to file instead of stdout
	#[arg(long, global = true)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, global = true, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, global = true, value_name = "PATH")]
	log_path: Option<String>,

	/// Directory holding network configuration files (default: config/networks)
	#[arg(long, global = true, value_name = "DIR")]
	config_dir: Option<PathBuf>,

	/// Deadline for the whole operation, in milliseconds
	#[arg(long, global = true, value_name = "MS")]
	timeout_ms: Option<u64>,

	/// Chain to run the operation against, by slug or alias
	#[arg(long, global = true, value_name = "CHAIN", default_value = "cosmos")]
	chain: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Validate configuration files and exit
	Check,
	/// Report whether a chain name is served by the selected adaptor
	SupportedChains {
		/// Chain name to look up (default: --chain)
		name: Option<String>,
	},
	/// Derive the account address of a hex encoded public key
	ConvertAddress { public_key: String },
	/// Check that an address is a valid account address
	ValidateAddress { address: String },
	/// Fetch account number, sequence and balance
	Account { address: String },
	/// Fetch a block header by hash
	HeaderByHash { hash: String },
	/// Fetch a block header by height
	HeaderByNumber { height: u64 },
	/// Fetch a block with its transactions and transfers
	Block {
		/// Block height
		#[arg(conflicts_with = "hash")]
		height: Option<u64>,
		/// Block hash
		#[arg(long)]
		hash: Option<String>,
	},
	/// Fetch the headers of an inclusive height range
	BlockByRange { start: String, end: String },
	/// Broadcast a signed, base64 encoded transaction
	SendTx { raw_tx: String },
	/// Fetch a transaction by hash
	TxByHash { hash: String },
	/// List the transfers of an address
	TxByAddress {
		address: String,
		#[arg(long, default_value_t = 1)]
		page: u32,
		#[arg(long, default_value_t = 20)]
		page_size: u32,
	},
	/// Estimate the fee of a transaction
	Fee {
		#[arg(default_value = "")]
		raw_tx: String,
	},
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}
	}

	fn context(&self) -> RequestContext {
		match self.timeout_ms {
			Some(ms) => RequestContext::with_timeout(Duration::from_millis(ms)),
			None => RequestContext::new(),
		}
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	cli.apply_to_env();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let networks = load_networks(cli.config_dir.as_deref()).await?;

	if let Command::Check = cli.command {
		for network in &networks {
			info!(
				chain = %network.slug,
				rpc_urls = network.rpc_urls.len(),
				"✓ network configuration is valid"
			);
		}
		info!("Configuration validation completed successfully!");
		return Ok(());
	}

	let selected: Vec<_> = networks
		.into_iter()
		.filter(|n| n.slug.eq_ignore_ascii_case(&cli.chain) || n.supports_chain(&cli.chain))
		.collect();
	if selected.is_empty() {
		return Err(format!("no network configured for chain '{}'", cli.chain).into());
	}

	let registry = initialize_adaptors(&selected).await?;
	let adaptor = registry
		.get(&cli.chain)
		.ok_or_else(|| format!("no adaptor serves chain '{}'", cli.chain))?;

	if !run(&cli, adaptor).await? {
		std::process::exit(1);
	}
	Ok(())
}

/// Runs the selected operation and prints its envelope; returns whether it succeeded
async fn run(cli: &Cli, adaptor: Arc<dyn ChainAdaptor>) -> Result<bool> {
	let ctx = cli.context();
	let chain = cli.chain.clone();

	match &cli.command {
		Command::Check => Ok(true),
		Command::SupportedChains { name } => {
			let req = SupportChainsRequest {
				chain: name.clone().unwrap_or(chain),
			};
			print_envelope(&adaptor.get_supported_chains(&ctx, req).await)
		}
		Command::ConvertAddress { public_key } => {
			let req = ConvertAddressRequest {
				chain,
				public_key: public_key.clone(),
			};
			print_envelope(&adaptor.convert_address(&ctx, req).await)
		}
		Command::ValidateAddress { address } => {
			let req = ValidAddressRequest {
				chain,
				address: address.clone(),
			};
			print_envelope(&adaptor.validate_address(&ctx, req).await)
		}
		Command::Account { address } => {
			let req = AccountRequest {
				chain,
				address: address.clone(),
			};
			print_envelope(&adaptor.get_account(&ctx, req).await)
		}
		Command::HeaderByHash { hash } => {
			let req = BlockHeaderByHashRequest {
				chain,
				hash: hash.clone(),
			};
			print_envelope(&adaptor.get_block_header_by_hash(&ctx, req).await)
		}
		Command::HeaderByNumber { height } => {
			let req = BlockHeaderByNumberRequest {
				chain,
				height: *height,
			};
			print_envelope(&adaptor.get_block_header_by_number(&ctx, req).await)
		}
		Command::Block { height, hash } => match (height, hash) {
			(_, Some(hash)) => {
				let req = BlockByHashRequest {
					chain,
					hash: hash.clone(),
				};
				print_envelope(&adaptor.get_block_by_hash(&ctx, req).await)
			}
			(Some(height), None) => {
				let req = BlockByNumberRequest {
					chain,
					height: *height,
				};
				print_envelope(&adaptor.get_block_by_number(&ctx, req).await)
			}
			(None, None) => Err("either a height or --hash is required".into()),
		},
		Command::BlockByRange { start, end } => {
			let req = BlockByRangeRequest {
				chain,
				start: start.clone(),
				end: end.clone(),
			};
			print_envelope(&adaptor.get_block_by_range(&ctx, req).await)
		}
		Command::SendTx { raw_tx } => {
			let req = SendTxRequest {
				chain,
				raw_tx: raw_tx.clone(),
			};
			print_envelope(&adaptor.send_tx(&ctx, req).await)
		}
		Command::TxByHash { hash } => {
			let req = TxHashRequest {
				chain,
				hash: hash.clone(),
			};
			print_envelope(&adaptor.get_tx_by_hash(&ctx, req).await)
		}
		Command::TxByAddress {
			address,
			page,
			page_size,
		} => {
			let req = TxAddressRequest {
				chain,
				address: address.clone(),
				page: *page,
				page_size: *page_size,
			};
			print_envelope(&adaptor.get_tx_by_address(&ctx, req).await)
		}
		Command::Fee { raw_tx } => {
			let req = FeeRequest {
				chain,
				raw_tx: raw_tx.clone(),
			};
			print_envelope(&adaptor.get_fee(&ctx, req).await)
		}
	}
}

fn print_envelope<T: Serialize>(envelope: &ResponseEnvelope<T>) -> Result<bool> {
	println!("{}", serde_json::to_string_pretty(envelope)?);
	Ok(envelope.is_success())
}
