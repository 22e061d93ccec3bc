//! Transeos SDK for Rust.
//!
//! A client SDK for the Transledger basic (token) and exchange (order book)
//! contracts deployed on EOS-compatible chains. It validates arguments,
//! normalizes quantities into the chain's fixed-point asset-string format,
//! derives order keys, and either returns prepared action payloads or submits
//! them through an external signing wallet. Read queries (balances,
//! allowances, order book) go against the node's chain API with client-side
//! filtering and pagination.
//!
//! # What This SDK Provides
//!
//! - High-level client: [`TranseosClient`]
//! - Action construction without submission: [`ActionBuilder`]
//! - The wallet seam for external signers: [`WalletClient`]
//! - Fixed-point asset formatting and order-key encoding primitives
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use transeos_sdk::{ClientConfig, Network, Protocol, TranseosClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), transeos_sdk::TranseosError> {
//!     let network = Network::new("nodes.example.org", None, Protocol::Https, "chain-id");
//!     let config = ClientConfig::new("basiccontrct", Some("exchangecont".into()), network);
//!     let client = TranseosClient::new(config);
//!
//!     let balances = client.get_balance("alice", Some("TBTC"), None, None).await?;
//!     for balance in balances.docs {
//!         println!("{balance}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Preview vs. Submit
//!
//! Every write operation exists in two forms. The [`ActionBuilder`] (also
//! reachable as `client.actions`) validates arguments and returns the
//! [`ActionIntent`] without touching the network; the corresponding
//! [`TranseosClient`] method builds the same intent and hands it to a
//! [`WalletClient`] for signing and broadcast with a fixed policy
//! (broadcast immediately, 3 blocks behind, 60-second expiry).
//!
//! # Errors
//!
//! All fallible operations return [`TranseosError`]. Validation and encoding
//! failures are caller errors (400-class); transport and endpoint failures
//! surface as upstream errors (500) with the original message, never
//! retried. [`TranseosError::to_body`] renders the legacy
//! `{name, statusCode, message}` contract.
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/)
//! facade for every API and client call, and an error-level log when a
//! submission fails. Configure any compatible logger in your binary.
pub mod actions;
pub mod amount;
pub mod api;
pub mod client;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod models;
pub mod wallet;

// Re-export primary types for convenience.
pub use actions::{
    ActionBuilder, ActionIntent, Authorization, CreateOrderParams, EditOrderParams,
    SettleOrdersParams, SettlementLeg,
};
pub use amount::{format_amount, AmountFormat, Rounding};
pub use api::ChainApi;
pub use client::TranseosClient;
pub use config::{ClientConfig, Network, Protocol};
pub use encoding::order_key;
pub use errors::{ErrorBody, TranseosError};
pub use models::{
    AllowanceRow, OrderFilters, OrderRow, PaginatedResult, TransactReceipt,
};
pub use wallet::{TransactOptions, WalletClient};
