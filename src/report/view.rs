//! Report views
//!
//! Ordering and search over a finished earnings report. Views only pick and
//! order rows; they never recompute amounts.

use serde::{Deserialize, Serialize};

use super::aggregator::OwnerSummary;
use super::filter::{at_least, filter_records, TextField};
use crate::domain::Money;

/// Column to rank owners by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerSort {
    #[default]
    Revenue,
    Students,
    Courses,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl OwnerSort {
    /// Amounts and counts rank highest first, names alphabetically.
    pub fn default_order(&self) -> SortOrder {
        match self {
            OwnerSort::Name => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Sort owners in place. Ties fall back to the owner key, ascending.
pub fn rank_owners(owners: &mut [OwnerSummary], sort: OwnerSort, order: Option<SortOrder>) {
    let order = order.unwrap_or_else(|| sort.default_order());

    owners.sort_by(|a, b| {
        let primary = match sort {
            OwnerSort::Revenue => a.revenue.cmp(&b.revenue),
            OwnerSort::Students => a.students.cmp(&b.students),
            OwnerSort::Courses => a.courses.cmp(&b.courses),
            OwnerSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.key.cmp(&b.key))
    });
}

fn owner_name(owner: &OwnerSummary) -> &str {
    &owner.name
}

fn owner_key(owner: &OwnerSummary) -> &str {
    &owner.key
}

const OWNER_FIELDS: [TextField<OwnerSummary>; 2] = [owner_name, owner_key];

/// Owners whose name or key contains `query` and whose revenue reaches
/// `min_revenue`, in their current order.
pub fn search_owners<'a>(
    owners: &'a [OwnerSummary],
    query: &str,
    min_revenue: Option<Money>,
) -> Vec<&'a OwnerSummary> {
    let threshold = min_revenue.unwrap_or(Money::ZERO);
    filter_records(
        owners,
        query,
        &OWNER_FIELDS,
        at_least(threshold, |owner: &OwnerSummary| owner.revenue),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn owner(key: &str, courses: usize, students: usize, revenue: u64) -> OwnerSummary {
        let revenue = Money::from_integer(revenue);
        OwnerSummary {
            key: key.to_string(),
            name: key.to_string(),
            courses,
            students,
            revenue,
            pending: revenue.scale_by(dec!(0.1)),
            paid: revenue.scale_by(dec!(0.9)),
        }
    }

    fn keys(owners: &[OwnerSummary]) -> Vec<&str> {
        owners.iter().map(|o| o.key.as_str()).collect()
    }

    fn sample() -> Vec<OwnerSummary> {
        vec![
            owner("carol", 1, 5, 300),
            owner("alice", 3, 2, 500),
            owner("Bob", 2, 5, 300),
            owner("dave", 1, 0, 0),
        ]
    }

    #[test]
    fn test_rank_by_revenue_default() {
        let mut owners = sample();
        rank_owners(&mut owners, OwnerSort::default(), None);
        assert_eq!(keys(&owners), vec!["alice", "Bob", "carol", "dave"]);
    }

    #[test]
    fn test_rank_by_name_ascending_case_insensitive() {
        let mut owners = sample();
        rank_owners(&mut owners, OwnerSort::Name, None);
        assert_eq!(keys(&owners), vec!["alice", "Bob", "carol", "dave"]);

        rank_owners(&mut owners, OwnerSort::Name, Some(SortOrder::Desc));
        assert_eq!(keys(&owners), vec!["dave", "carol", "Bob", "alice"]);
    }

    #[test]
    fn test_rank_by_students_and_courses() {
        let mut owners = sample();
        rank_owners(&mut owners, OwnerSort::Students, None);
        assert_eq!(keys(&owners), vec!["Bob", "carol", "alice", "dave"]);

        rank_owners(&mut owners, OwnerSort::Courses, Some(SortOrder::Asc));
        assert_eq!(keys(&owners), vec!["carol", "dave", "Bob", "alice"]);
    }

    #[test]
    fn test_ranking_leaves_amounts_untouched() {
        let mut owners = sample();
        let before: Money = owners.iter().map(|o| o.revenue).sum();
        rank_owners(&mut owners, OwnerSort::Revenue, Some(SortOrder::Asc));
        let after: Money = owners.iter().map(|o| o.revenue).sum();
        assert_eq!(before, after);
    }

    #[test]
    fn test_search_owners() {
        let owners = sample();

        let found = search_owners(&owners, "AL", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "alice");

        let found = search_owners(&owners, "", Some(Money::from_integer(300)));
        let found: Vec<_> = found.iter().map(|o| o.key.as_str()).collect();
        assert_eq!(found, vec!["carol", "alice", "Bob"]);
    }

    #[test]
    fn test_sort_params_deserialize() {
        let sort: OwnerSort = serde_json::from_str("\"students\"").unwrap();
        assert_eq!(sort, OwnerSort::Students);
        let order: SortOrder = serde_json::from_str("\"asc\"").unwrap();
        assert_eq!(order, SortOrder::Asc);
    }
}
