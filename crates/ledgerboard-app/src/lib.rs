//! # Ledgerboard App
//!
//! Binary crate that wires a record source, the view catalog, and a
//! presentation adapter around the composition core.
//!
//! Everything the core treats as an external collaborator lives here: where
//! the records come from, how the finished views are laid out and written,
//! and process bootstrap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod dashboard;
pub mod error;
pub mod source;

pub use adapter::*;
pub use dashboard::*;
pub use error::*;
pub use source::*;
