//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Course, Money, RequestContext, RosterEntry, UserAccount};
use crate::error::{AppError, AppResult};
use crate::report::{
    rank_owners, search_owners, search_roster, EarningsReport, OwnerSort, OwnerSummary,
    PlatformTotals, SortOrder,
};
use crate::source::{decode_entries, CatalogSource, COURSES, USERS};

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

/// View parameters for earnings reports
#[derive(Debug, Default, Deserialize)]
pub struct EarningsQuery {
    #[serde(default)]
    pub sort: Option<OwnerSort>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(default)]
    pub search: Option<String>,
    /// Decimal string, e.g. `"100.50"`
    #[serde(default)]
    pub min_revenue: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EarningsResponse {
    pub generated_at: DateTime<Utc>,
    pub owners: Vec<OwnerSummary>,
    /// Platform totals, unaffected by search filters
    pub totals: PlatformTotals,
}

/// Caller-supplied catalog snapshot
#[derive(Debug, Deserialize, Serialize)]
pub struct SnapshotRequest {
    #[serde(default)]
    pub courses: Vec<Value>,
    #[serde(default)]
    pub users: Vec<Value>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RosterSearchRequest {
    #[serde(default)]
    pub entries: Vec<Value>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub min_progress: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterSearchResponse {
    pub entries: Vec<RosterEntry>,
    pub total: usize,
}

impl EarningsResponse {
    /// Apply search and ranking to a report.
    fn build(
        report: EarningsReport,
        query: &EarningsQuery,
        context: &RequestContext,
    ) -> AppResult<Self> {
        let min_revenue = query
            .min_revenue
            .as_deref()
            .map(str::parse::<Money>)
            .transpose()?;

        let mut owners: Vec<OwnerSummary> = search_owners(
            &report.owners,
            query.search.as_deref().unwrap_or(""),
            min_revenue,
        )
        .into_iter()
        .cloned()
        .collect();
        rank_owners(&mut owners, query.sort.unwrap_or_default(), query.order);

        Ok(Self {
            generated_at: context.received_at,
            owners,
            totals: report.totals,
        })
    }
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/admin/earnings", get(get_earnings))
        .route("/admin/earnings/owners/:owner_key", get(get_owner_earnings))
        .route("/reports/earnings", post(build_earnings_report))
        .route("/instructor/roster/search", post(search_roster_entries))
}

/// Fetch the catalog and aggregate it.
async fn fetch_report(state: &AppState) -> AppResult<EarningsReport> {
    let snapshot = state.catalog.fetch_snapshot().await?;
    Ok(state
        .aggregator
        .aggregate(&snapshot.courses, &snapshot.users))
}

// =========================================================================
// GET /admin/earnings
// =========================================================================

/// Earnings report over the live catalog
async fn get_earnings(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Query(query): Query<EarningsQuery>,
) -> AppResult<Json<EarningsResponse>> {
    let report = fetch_report(&state).await?;

    tracing::info!(
        correlation_id = %context.correlation_id,
        owners = report.owners.len(),
        revenue = %report.totals.revenue,
        "Earnings report built"
    );

    Ok(Json(EarningsResponse::build(report, &query, &context)?))
}

// =========================================================================
// GET /admin/earnings/owners/:owner_key
// =========================================================================

/// One owner's row of the live report
async fn get_owner_earnings(
    State(state): State<AppState>,
    Path(owner_key): Path<String>,
) -> AppResult<Json<OwnerSummary>> {
    let report = fetch_report(&state).await?;

    report
        .owner(&owner_key)
        .cloned()
        .map(Json)
        .ok_or(AppError::OwnerNotFound(owner_key))
}

// =========================================================================
// POST /reports/earnings
// =========================================================================

/// Earnings report over a snapshot supplied in the request body
async fn build_earnings_report(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Query(query): Query<EarningsQuery>,
    Json(request): Json<SnapshotRequest>,
) -> AppResult<Json<EarningsResponse>> {
    let courses: Vec<Course> = decode_entries(COURSES, request.courses);
    let users: Vec<UserAccount> = decode_entries(USERS, request.users);

    let report = state.aggregator.aggregate(&courses, &users);

    tracing::info!(
        correlation_id = %context.correlation_id,
        courses = courses.len(),
        users = users.len(),
        "Earnings report built from supplied snapshot"
    );

    Ok(Json(EarningsResponse::build(report, &query, &context)?))
}

// =========================================================================
// POST /instructor/roster/search
// =========================================================================

/// Filter a gradebook roster by text and minimum progress
async fn search_roster_entries(
    Json(request): Json<RosterSearchRequest>,
) -> AppResult<Json<RosterSearchResponse>> {
    if let Some(threshold) = request.min_progress {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(AppError::InvalidRequest(format!(
                "min_progress must be between 0 and 100 (got {threshold})"
            )));
        }
    }

    let entries: Vec<RosterEntry> = decode_entries("roster", request.entries);
    let matching: Vec<RosterEntry> = search_roster(&entries, &request.query, request.min_progress)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(RosterSearchResponse {
        total: matching.len(),
        entries: matching,
    }))
}
