use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// App-wide totals across every analytics event.
///
/// `total_stores` counts distinct shops *appearing in the event set*, not
/// shop records: a store with no events contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppWideMetrics {
    pub total_revenue: f64,
    pub total_orders: i64,
    pub total_stores: i64,
}

/// One day of the revenue series. Days with no events are omitted, so the
/// series is sparse and consumers must not assume contiguous dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenuePoint {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub revenue: f64,
    pub orders: i64,
}

/// One row of the top-performing-stores ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStore {
    pub shop_id: String,
    /// Display name resolved from the shop record; falls back to the raw
    /// shop id when no shop matches.
    pub shop_name: String,
    pub total_revenue: f64,
    pub total_orders: i64,
}

/// Response of `GET /api/analytics/app-wide`. The app-wide totals are
/// flattened at the top level, matching the shape the dashboard charts
/// already consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    #[serde(flatten)]
    pub metrics: AppWideMetrics,
    pub revenue_by_date: Vec<RevenuePoint>,
    pub top_performing_stores: Vec<TopStore>,
    pub timestamp: DateTime<Utc>,
}
