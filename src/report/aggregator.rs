//! Earnings aggregation
//!
//! Builds the per-instructor earnings report from a snapshot of the course
//! catalog and the user accounts with their enrollments.
//!
//! The aggregation runs in three passes over locally owned accumulators:
//! 1. index: course id -> course, one accumulator per owner key
//! 2. accrual: every enrollment adds its course price to the owner and the
//!    user to the owner's customer set
//! 3. derivation: payout split per owner and for the platform total
//!
//! Nothing outlives a call, so one aggregator can serve concurrent requests.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Course, Money, OwnerIdentity, PayoutSplit, RecordId, UserAccount};

/// Per-instructor row of the earnings report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    /// Grouping key (instructor name or id)
    pub key: String,
    pub name: String,
    /// Course entries owned
    pub courses: usize,
    /// Distinct paying customers
    pub students: usize,
    pub revenue: Money,
    pub pending: Money,
    pub paid: Money,
}

/// Platform-wide row of the earnings report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTotals {
    pub revenue: Money,
    pub pending: Money,
    pub paid: Money,
}

/// Result of one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsReport {
    /// One entry per owner key, sorted by key
    pub owners: Vec<OwnerSummary>,
    pub totals: PlatformTotals,
}

impl EarningsReport {
    /// Look up an owner's row by key.
    pub fn owner(&self, key: &str) -> Option<&OwnerSummary> {
        self.owners.iter().find(|o| o.key == key)
    }
}

/// Owner accumulator used during a single run.
struct OwnerAccrual<'a> {
    name: String,
    courses: usize,
    revenue: Money,
    customers: HashSet<&'a RecordId>,
}

/// Computes earnings reports under a fixed payout split.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAggregator {
    split: PayoutSplit,
}

impl ReportAggregator {
    pub fn new(split: PayoutSplit) -> Self {
        Self { split }
    }

    /// Aggregate courses and users into an earnings report.
    ///
    /// Enrollments that name no course, or a course missing from `courses`,
    /// are skipped. Duplicate course ids all count toward their owner's
    /// course count, but enrollments resolve to the last one seen.
    pub fn aggregate(&self, courses: &[Course], users: &[UserAccount]) -> EarningsReport {
        // Index pass
        let identities: Vec<OwnerIdentity> = courses.iter().map(Course::owner_identity).collect();
        let mut index: HashMap<&RecordId, usize> = HashMap::with_capacity(courses.len());
        let mut owners: BTreeMap<&str, OwnerAccrual<'_>> = BTreeMap::new();

        for (position, (course, owner)) in courses.iter().zip(&identities).enumerate() {
            index.insert(&course.id, position);
            owners
                .entry(owner.key.as_str())
                .or_insert_with(|| OwnerAccrual {
                    name: owner.name.clone(),
                    courses: 0,
                    revenue: Money::ZERO,
                    customers: HashSet::new(),
                })
                .courses += 1;
        }

        // Accrual pass
        let mut skipped = 0usize;
        for user in users {
            for enrollment in &user.enrollments {
                let Some(position) = enrollment
                    .course_ref()
                    .and_then(|course_ref| index.get(course_ref.id()).copied())
                else {
                    tracing::trace!(user_id = %user.id, "Skipping unresolved enrollment");
                    skipped += 1;
                    continue;
                };

                if let Some(owner) = owners.get_mut(identities[position].key.as_str()) {
                    owner.revenue = owner.revenue + courses[position].price;
                    owner.customers.insert(&user.id);
                }
            }
        }

        // Derivation pass
        let owners: Vec<OwnerSummary> = owners
            .into_iter()
            .map(|(key, accrual)| {
                let payout = self.split.apply(accrual.revenue);
                OwnerSummary {
                    key: key.to_string(),
                    name: accrual.name,
                    courses: accrual.courses,
                    students: accrual.customers.len(),
                    revenue: accrual.revenue,
                    pending: payout.pending,
                    paid: payout.paid,
                }
            })
            .collect();

        let revenue: Money = owners.iter().map(|o| o.revenue).sum();
        let payout = self.split.apply(revenue);
        let totals = PlatformTotals {
            revenue,
            pending: payout.pending,
            paid: payout.paid,
        };

        tracing::debug!(
            courses = courses.len(),
            users = users.len(),
            owners = owners.len(),
            skipped_enrollments = skipped,
            revenue = %totals.revenue,
            "Earnings report aggregated"
        );

        EarningsReport { owners, totals }
    }
}
