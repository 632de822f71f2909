//! # Ledgerboard Views
//!
//! Turns a flat set of daily revenue/cost records into the finished
//! analytical views of the dashboard.
//!
//! Data flows one way: [`record_store`] builds the record set,
//! [`aggregator`] derives weekly sums and difference series, and
//! [`composer`] evaluates every entry of a [`catalog::ViewCatalog`] into a
//! [`composer::RenderableView`]. Everything here is synchronous and pure;
//! record sets and catalogs can be shared across threads behind an `Arc`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod catalog;
pub mod composer;
pub mod record_store;

pub use aggregator::*;
pub use catalog::*;
pub use composer::*;
pub use record_store::{load, load_columns, load_input, load_value, load_yaml_value, RawInput};
