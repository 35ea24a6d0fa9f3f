//! course_earnings Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod domain;
mod error;
pub mod report;
pub mod source;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorResponse};
pub use domain::{Course, Enrollment, Money, PayoutSplit, RecordId, UserAccount};
pub use report::{EarningsReport, OwnerSummary, PlatformTotals, ReportAggregator};
