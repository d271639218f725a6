//! Normalization boundary between raw BSON documents and the strict row
//! types the aggregation functions consume.
//!
//! The source collections are written by an external ingestion system and
//! carry loosely-typed, partially aliased fields (`shopDomain` vs `domain`,
//! `productTitle` vs `title`, counters as Int32/Int64/Double). Every read
//! goes through one of the `*_row` mappers here so that nothing past this
//! module has to reason about field aliases or BSON variants.

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// One row of the `analytics` event collection.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub shop_id: Option<String>,
    pub revenue: f64,
    pub orders: i64,
    pub timestamp: Option<DateTime<Utc>>,
}

/// One row of the `analyticssummaries` collection. A campaign usually has
/// several rows (per day or per source); counters are summed downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub shop_id: Option<String>,
    pub campaign_id: Option<String>,
    pub impressions: i64,
    pub views: i64,
    pub add_to_cart_conversions: i64,
    pub conversions: i64,
    pub revenue: f64,
    pub total_revenue: f64,
    pub total_orders: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShopRow {
    pub id: String,
    pub shop_domain: Option<String>,
    pub domain: Option<String>,
    pub is_active: bool,
    pub plan_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub billing: Option<Value>,
    pub settings: Option<Value>,
    pub onboarding: Option<Value>,
}

impl ShopRow {
    /// Alias-preference rule: `shopDomain` wins over `domain`.
    pub fn display_domain(&self) -> Option<&str> {
        self.shop_domain.as_deref().or(self.domain.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRow {
    pub id: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoRow {
    pub id: String,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub product_id: Option<String>,
    pub product_title: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

pub fn event_row(doc: &Document) -> EventRow {
    EventRow {
        shop_id: id_string(doc.get("shopId")),
        revenue: field_f64(doc, "revenue"),
        orders: field_i64(doc, "orders"),
        timestamp: field_datetime(doc, "timestamp"),
    }
}

pub fn summary_row(doc: &Document) -> SummaryRow {
    SummaryRow {
        shop_id: id_string(doc.get("shopId")),
        campaign_id: id_string(doc.get("campaignId")),
        impressions: field_i64(doc, "impressions"),
        views: field_i64(doc, "views"),
        add_to_cart_conversions: field_i64(doc, "addToCartConversions"),
        conversions: field_i64(doc, "conversions"),
        revenue: field_f64(doc, "revenue"),
        total_revenue: field_f64(doc, "totalRevenue"),
        total_orders: field_i64(doc, "totalOrders"),
    }
}

pub fn shop_row(doc: &Document) -> ShopRow {
    ShopRow {
        id: id_string(doc.get("_id")).unwrap_or_default(),
        shop_domain: field_str(doc, "shopDomain"),
        domain: field_str(doc, "domain"),
        is_active: field_bool(doc, "isActive"),
        plan_type: field_str(doc, "planType"),
        created_at: field_datetime(doc, "createdAt"),
        billing: field_json(doc, "billing"),
        settings: field_json(doc, "settings"),
        onboarding: field_json(doc, "onboarding"),
    }
}

pub fn campaign_row(doc: &Document) -> CampaignRow {
    CampaignRow {
        id: id_string(doc.get("_id")).unwrap_or_default(),
        name: field_str(doc, "name"),
        is_active: field_bool(doc, "isActive"),
        created_at: field_datetime(doc, "createdAt"),
    }
}

pub fn video_row(doc: &Document) -> VideoRow {
    VideoRow {
        id: id_string(doc.get("_id")).unwrap_or_default(),
        status: field_str(doc, "status"),
        created_at: field_datetime(doc, "createdAt"),
        product_id: id_string(doc.get("productId")),
        product_title: first_str(doc, &["productTitle", "title"]),
        video_url: first_str(doc, &["videoUrl", "url"]),
        thumbnail_url: first_str(doc, &["thumbnailUrl", "thumbnail"]),
    }
}

/// Render an id-like value as a string. ObjectIds become their hex form;
/// anything that does not stringify sensibly is treated as absent.
pub fn id_string(value: Option<&Bson>) -> Option<String> {
    match value? {
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::String(s) if !s.is_empty() => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn field_str(doc: &Document, key: &str) -> Option<String> {
    match doc.get(key) {
        Some(Bson::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// First non-empty string among `keys`, in preference order.
pub fn first_str(doc: &Document, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| field_str(doc, key))
}

pub fn field_f64(doc: &Document, key: &str) -> f64 {
    match doc.get(key) {
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => f64::from(*v),
        Some(Bson::Int64(v)) => *v as f64,
        _ => 0.0,
    }
}

pub fn field_i64(doc: &Document, key: &str) -> i64 {
    match doc.get(key) {
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}

pub fn field_bool(doc: &Document, key: &str) -> bool {
    matches!(doc.get(key), Some(Bson::Boolean(true)))
}

/// Timestamps arrive as BSON dates from the ingestion system, but older
/// rows carry plain strings; accept RFC 3339 and bare `YYYY-MM-DD`.
pub fn field_datetime(doc: &Document, key: &str) -> Option<DateTime<Utc>> {
    match doc.get(key) {
        Some(Bson::DateTime(dt)) => Some(dt.to_chrono()),
        Some(Bson::String(s)) => parse_datetime(s),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Opaque subdocuments (`billing`, `settings`, `onboarding`) pass through
/// as JSON without interpretation.
pub fn field_json(doc: &Document, key: &str) -> Option<Value> {
    doc.get(key).map(|b| b.clone().into_relaxed_extjson())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn shop_domain_wins_over_domain() {
        let row = shop_row(&doc! {
            "_id": "s1",
            "shopDomain": "primary.myshopify.com",
            "domain": "legacy.myshopify.com",
        });
        assert_eq!(row.display_domain(), Some("primary.myshopify.com"));
    }

    #[test]
    fn domain_only_shop_still_resolves() {
        let row = shop_row(&doc! { "_id": "s1", "domain": "only.myshopify.com" });
        assert_eq!(row.display_domain(), Some("only.myshopify.com"));
    }

    #[test]
    fn video_title_alias_preference() {
        let both = video_row(&doc! { "_id": "v1", "productTitle": "A", "title": "B" });
        assert_eq!(both.product_title.as_deref(), Some("A"));

        let fallback = video_row(&doc! { "_id": "v2", "title": "B", "url": "http://x/v.mp4" });
        assert_eq!(fallback.product_title.as_deref(), Some("B"));
        assert_eq!(fallback.video_url.as_deref(), Some("http://x/v.mp4"));
    }

    #[test]
    fn id_string_accepts_object_ids_and_strings() {
        let oid = ObjectId::new();
        assert_eq!(id_string(Some(&Bson::ObjectId(oid))), Some(oid.to_hex()));
        assert_eq!(
            id_string(Some(&Bson::String("abc".into()))),
            Some("abc".to_string())
        );
        assert_eq!(id_string(Some(&Bson::Null)), None);
        assert_eq!(id_string(None), None);
    }

    #[test]
    fn numeric_coercion_defaults_to_zero() {
        let row = summary_row(&doc! {
            "campaignId": "c1",
            "impressions": 10_i32,
            "views": 4_i64,
            "revenue": 12.5,
        });
        assert_eq!(row.impressions, 10);
        assert_eq!(row.views, 4);
        assert_eq!(row.revenue, 12.5);
        assert_eq!(row.add_to_cart_conversions, 0);
        assert_eq!(row.conversions, 0);
        assert_eq!(row.total_orders, 0);
    }

    #[test]
    fn string_timestamps_are_accepted() {
        let bare = event_row(&doc! { "timestamp": "2025-10-01", "revenue": 100, "orders": 2 });
        assert_eq!(
            bare.timestamp.unwrap().date_naive(),
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
        );

        let rfc = event_row(&doc! { "timestamp": "2025-10-01T12:30:00Z" });
        assert_eq!(rfc.timestamp.unwrap().to_rfc3339(), "2025-10-01T12:30:00+00:00");

        let missing = event_row(&doc! { "revenue": 1 });
        assert!(missing.timestamp.is_none());
    }
}
