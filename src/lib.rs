//! Per-station min/mean/max over `<key>;<value>` measurement files.
//!
//! The fast path parses records straight out of the input buffer into an
//! open-addressing [`StationTable`]; chunks of the buffer can be aggregated
//! independently and merged. [`reference`] holds a validating line-by-line
//! variant used as a cross-check.

pub mod aggregate;
pub mod chunk;
pub mod config;
pub mod error;
pub mod fixed;
pub mod hash;
pub mod parse;
pub mod reference;
pub mod station;
pub mod summary;
pub mod table;

pub use aggregate::{aggregate, aggregate_chunk};
pub use config::{Executor, Options};
pub use error::Error;
pub use fixed::Tenths;
pub use station::Station;
pub use summary::Summary;
pub use table::{EntryId, Lookup, StationTable};
