//! Domain module
//!
//! Core domain types: catalog records, identifiers and money.

pub mod context;
pub mod error;
pub mod ids;
pub mod money;
pub mod records;
pub mod roster;

pub use context::RequestContext;
pub use error::DomainError;
pub use ids::RecordId;
pub use money::{Money, Payout, PayoutSplit, PLACEHOLDER_PENDING_PERCENT};
pub use records::{
    Course, CourseField, CourseRef, Enrollment, OwnerIdentity, OwnerRef, UserAccount,
    WrappedEnrollment, UNASSIGNED_OWNER_KEY, UNASSIGNED_OWNER_NAME,
};
pub use roster::RosterEntry;
