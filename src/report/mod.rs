//! Report module
//!
//! Earnings aggregation and the views built on top of it.

pub mod aggregator;
pub mod filter;
pub mod view;

pub use aggregator::{EarningsReport, OwnerSummary, PlatformTotals, ReportAggregator};
pub use filter::{any_record, at_least, filter_records, search_roster, TextField};
pub use view::{rank_owners, search_owners, OwnerSort, SortOrder};
