//! # Ledgerboard Common
//!
//! Shared record types, error handling, and logging for Ledgerboard.
//!
//! This crate provides the foundational types used across all other crates
//! in the Ledgerboard workspace: the daily record model, the workspace error
//! type, and the tracing bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{LedgerError, Result};
pub use logging::{bootstrap_subscriber, init_logging, LogFormat, LoggingConfig};
pub use types::*;
