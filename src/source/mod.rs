//! Catalog source module
//!
//! Obtains the course and user collections the earnings report is built
//! from. The report itself never performs I/O; it only sees the snapshot
//! a `CatalogSource` hands over.

mod error;
mod http;
mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Course, UserAccount};

pub use error::SourceError;
pub use http::{HttpCatalog, HttpCatalogConfig};
pub use memory::StaticCatalog;

/// Collection name of the course list
pub const COURSES: &str = "courses";

/// Collection name of the user list
pub const USERS: &str = "users";

/// Both collections, fetched for one report.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub courses: Vec<Course>,
    pub users: Vec<UserAccount>,
}

/// Supplier of catalog collections.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every course.
    async fn fetch_courses(&self) -> Result<Vec<Course>, SourceError>;

    /// Fetch every user account with its enrollments.
    async fn fetch_users(&self) -> Result<Vec<UserAccount>, SourceError>;

    /// Fetch both collections concurrently; fails if either fails.
    async fn fetch_snapshot(&self) -> Result<CatalogSnapshot, SourceError> {
        let (courses, users) = tokio::try_join!(self.fetch_courses(), self.fetch_users())?;
        Ok(CatalogSnapshot { courses, users })
    }
}

/// Decode a collection response body.
///
/// The body must be a JSON array, or an object holding the array under the
/// collection name or under `data`. Entries that fail to decode are skipped.
pub fn decode_collection<T>(collection: &'static str, body: Value) -> Result<Vec<T>, SourceError>
where
    T: DeserializeOwned,
{
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope
            .remove(collection)
            .or_else(|| envelope.remove("data"))
        {
            Some(Value::Array(items)) => items,
            _ => return Err(SourceError::NotACollection { collection }),
        },
        _ => return Err(SourceError::NotACollection { collection }),
    };

    Ok(decode_entries(collection, items))
}

/// Decode entries one by one, skipping the ones that don't fit `T`.
pub fn decode_entries<T>(collection: &'static str, items: Vec<Value>) -> Vec<T>
where
    T: DeserializeOwned,
{
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(position, item)| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(
                    collection,
                    position,
                    error = %e,
                    "Skipping malformed catalog entry"
                );
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!(
            collection,
            total,
            skipped = total - decoded.len(),
            "Catalog collection decoded with skipped entries"
        );
    }

    decoded
}
