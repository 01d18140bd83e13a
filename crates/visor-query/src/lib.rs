//! # visor-query — Filter Engine and Statistics
//!
//! Every interaction with the viewer runs the same two steps against the
//! immutable [`TerritoryCollection`](visor_core::TerritoryCollection):
//!
//! 1. [`apply`] narrows the collection to a [`Subset`] using a
//!    [`FilterCriteria`].
//! 2. [`summarize`] computes the statistics panel for that subset.
//!
//! [`FilterOptions`] lists the distinct values offered by the sidebar
//! dropdowns.
//!
//! ## Crate Policy
//!
//! - A [`Subset`] borrows the collection and stores indices only. Records are
//!   never cloned by filtering.
//! - Filtering has no error conditions. Criteria that match nothing yield an
//!   empty subset.

pub mod filter;
pub mod options;
pub mod summary;

pub use filter::{apply, FilterCriteria, Subset};
pub use options::FilterOptions;
pub use summary::{summarize, Summary};
