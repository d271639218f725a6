use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of the store list (`GET /api/analytics/stores`). Includes
/// inactive stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub domain: String,
    pub created_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub plan_type: Option<String>,
    pub billing: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListResponse {
    pub stores: Vec<StoreSummary>,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

/// The shop record as shaped for the store detail view. `shop_domain` and
/// `domain` carry the same resolved value; both keys are part of the
/// published contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub shop_domain: String,
    pub domain: String,
    pub is_active: bool,
    pub plan_type: String,
    pub created_at: Option<DateTime<Utc>>,
    pub billing: Option<Value>,
    pub settings: Option<Value>,
    pub onboarding: Option<Value>,
}

/// Store-level aggregate totals plus display rates (the `summary` view).
///
/// Rates are pre-formatted strings with one decimal place; `"0.0"` stands in
/// whenever the view count is zero. `active_campaigns` here carries the
/// *total* campaign count; the summary cards render it as-is, so the name
/// stays even though [`StoreStats::active_campaigns`] means something else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRollup {
    pub total_impressions: i64,
    pub total_views: i64,
    pub total_revenue: f64,
    pub total_add_to_cart_conversions: i64,
    pub total_conversions: i64,
    pub add_to_cart_rate: String,
    pub revenue_conversion_rate: String,
    pub active_campaigns: i64,
}

/// One campaign with its summed counters and derived rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPerformance {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// `"active"` or `"inactive"`.
    pub status: String,
    pub impressions: i64,
    pub views: i64,
    pub add_to_cart_conversions: i64,
    pub revenue_conversions: i64,
    pub add_to_cart_rate: String,
    pub revenue_rate: String,
    pub revenue: f64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub product_id: Option<String>,
    pub product_title: String,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Counter view of the same accumulator backing [`StoreRollup`]. Two
/// presentation views consume the two field sets, so both are part of the
/// contract; the shared totals must always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_campaigns: i64,
    pub active_campaigns: i64,
    pub total_videos: i64,
    pub total_impressions: i64,
    pub total_views: i64,
    pub total_revenue: f64,
    pub total_add_to_cart_conversions: i64,
    pub total_conversions: i64,
}

/// Full detail bundle for one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDetail {
    pub store: StoreRecord,
    pub summary: StoreRollup,
    pub campaigns: Vec<CampaignPerformance>,
    pub videos: Vec<VideoItem>,
    pub stats: StoreStats,
}

/// Response of `GET /api/stores/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDetailResponse {
    #[serde(flatten)]
    pub detail: StoreDetail,
    pub timestamp: DateTime<Utc>,
}
