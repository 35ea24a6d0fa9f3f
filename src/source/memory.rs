//! In-memory catalog source

use async_trait::async_trait;

use super::{CatalogSource, SourceError};
use crate::domain::{Course, UserAccount};

/// Catalog serving a fixed snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    courses: Vec<Course>,
    users: Vec<UserAccount>,
}

impl StaticCatalog {
    pub fn new(courses: Vec<Course>, users: Vec<UserAccount>) -> Self {
        Self { courses, users }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch_courses(&self) -> Result<Vec<Course>, SourceError> {
        Ok(self.courses.clone())
    }

    async fn fetch_users(&self) -> Result<Vec<UserAccount>, SourceError> {
        Ok(self.users.clone())
    }
}
