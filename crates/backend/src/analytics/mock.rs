//! Fixture-backed provider for development and demos. Serves the exact
//! response shapes of the live provider without touching the document
//! store; store detail runs fixtures through the real aggregation code so
//! the two cannot drift apart.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use contracts::analytics::overview::{AppWideMetrics, RevenuePoint, TopStore};
use contracts::analytics::store::{StoreDetail, StoreSummary};

use crate::shared::error::AnalyticsError;

use super::normalize::{CampaignRow, ShopRow, SummaryRow, VideoRow};
use super::provider::AnalyticsProvider;
use super::rollup;

pub struct MockAnalytics;

/// (id, name, domain, created_at)
const STORES: [(&str, &str, &str, &str); 8] = [
    ("store_001", "Fashion Forward", "fashionforward.myshopify.com", "2025-01-15T10:30:00Z"),
    ("store_002", "Tech Haven", "techhaven.myshopify.com", "2025-02-20T14:15:00Z"),
    ("store_003", "Home Essentials", "homeessentials.myshopify.com", "2025-03-10T09:45:00Z"),
    ("store_004", "Beauty Bliss", "beautybliss.myshopify.com", "2025-03-25T11:20:00Z"),
    ("store_005", "Sports Central", "sportscentral.myshopify.com", "2025-04-05T16:00:00Z"),
    ("store_006", "Pet Paradise", "petparadise.myshopify.com", "2025-05-12T13:30:00Z"),
    ("store_007", "Kitchen Magic", "kitchenmagic.myshopify.com", "2025-06-08T10:00:00Z"),
    ("store_008", "Garden Grove", "gardengrove.myshopify.com", "2025-07-14T15:45:00Z"),
];

/// (date, revenue, orders) for the trailing thirty days of the demo period.
const REVENUE_SERIES: [(&str, f64, i64); 30] = [
    ("2025-09-18", 3200.0, 89),
    ("2025-09-19", 3800.0, 95),
    ("2025-09-20", 4100.0, 102),
    ("2025-09-21", 3600.0, 88),
    ("2025-09-22", 4500.0, 110),
    ("2025-09-23", 5200.0, 125),
    ("2025-09-24", 4800.0, 115),
    ("2025-09-25", 3900.0, 92),
    ("2025-09-26", 4200.0, 98),
    ("2025-09-27", 4600.0, 108),
    ("2025-09-28", 5100.0, 120),
    ("2025-09-29", 4900.0, 118),
    ("2025-09-30", 5400.0, 128),
    ("2025-10-01", 5800.0, 135),
    ("2025-10-02", 6200.0, 145),
    ("2025-10-03", 5600.0, 130),
    ("2025-10-04", 5900.0, 138),
    ("2025-10-05", 6500.0, 152),
    ("2025-10-06", 7200.0, 168),
    ("2025-10-07", 6800.0, 158),
    ("2025-10-08", 6300.0, 148),
    ("2025-10-09", 5700.0, 132),
    ("2025-10-10", 6100.0, 142),
    ("2025-10-11", 6600.0, 155),
    ("2025-10-12", 7100.0, 165),
    ("2025-10-13", 6900.0, 160),
    ("2025-10-14", 7400.0, 172),
    ("2025-10-15", 7800.0, 182),
    ("2025-10-16", 8200.0, 195),
    ("2025-10-17", 7600.0, 178),
];

/// (shop_id, shop_name, total_revenue, total_orders), already ranked.
const TOP_STORES: [(&str, &str, f64, i64); 8] = [
    ("store_001", "Fashion Forward", 28500.75, 845),
    ("store_002", "Tech Haven", 24200.00, 612),
    ("store_003", "Home Essentials", 19800.50, 523),
    ("store_004", "Beauty Bliss", 15600.25, 489),
    ("store_005", "Sports Central", 12400.00, 356),
    ("store_006", "Pet Paradise", 10200.75, 298),
    ("store_007", "Kitchen Magic", 8900.50, 245),
    ("store_008", "Garden Grove", 6800.00, 187),
];

fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn shop_row(index: usize) -> ShopRow {
    let (id, _, domain, created_at) = STORES[index];
    ShopRow {
        id: id.to_string(),
        shop_domain: Some(domain.to_string()),
        domain: Some(domain.to_string()),
        is_active: true,
        plan_type: Some("free".to_string()),
        created_at: parse_ts(created_at),
        billing: None,
        settings: None,
        onboarding: None,
    }
}

/// Deterministic per-store fixture rows, scaled by the store's position so
/// each demo store looks distinct. The rows feed the real aggregation code.
fn fixture_rows(index: usize) -> (Vec<CampaignRow>, Vec<SummaryRow>, Vec<VideoRow>) {
    let (id, name, domain, created_at) = STORES[index];
    let scale = (STORES.len() - index) as i64;
    let created = parse_ts(created_at);

    let campaigns: Vec<CampaignRow> = (0..3)
        .map(|n| CampaignRow {
            id: format!("{id}_campaign_{n}"),
            name: Some(format!("{name} Campaign {}", n + 1)),
            is_active: n < 2,
            created_at: created.map(|c| c + Duration::days(n * 7)),
        })
        .collect();

    let summaries: Vec<SummaryRow> = campaigns
        .iter()
        .enumerate()
        .map(|(n, campaign)| {
            let views = scale * 1200 - n as i64 * 150;
            SummaryRow {
                shop_id: Some(id.to_string()),
                campaign_id: Some(campaign.id.clone()),
                impressions: views * 4,
                views,
                add_to_cart_conversions: views / 10,
                conversions: views / 25,
                revenue: (views / 25) as f64 * 42.5,
                total_revenue: 0.0,
                total_orders: 0,
            }
        })
        .collect();

    let videos: Vec<VideoRow> = (0..2)
        .map(|n| VideoRow {
            id: format!("{id}_video_{n}"),
            status: Some(if n == 0 { "completed" } else { "processing" }.to_string()),
            created_at: created.map(|c| c + Duration::days(n + 1)),
            product_id: Some(format!("{id}_product_{n}")),
            product_title: Some(format!("{name} Product {}", n + 1)),
            video_url: Some(format!("https://cdn.example.com/{domain}/video_{n}.mp4")),
            thumbnail_url: Some(format!("https://cdn.example.com/{domain}/thumb_{n}.jpg")),
        })
        .collect();

    (campaigns, summaries, videos)
}

#[async_trait]
impl AnalyticsProvider for MockAnalytics {
    async fn app_wide_metrics(&self) -> Result<AppWideMetrics, AnalyticsError> {
        Ok(AppWideMetrics {
            total_revenue: 125_840.50,
            total_orders: 3420,
            total_stores: 15,
        })
    }

    async fn revenue_by_date(&self, days: i64) -> Result<Vec<RevenuePoint>, AnalyticsError> {
        let len = REVENUE_SERIES.len().min(days.max(0) as usize);
        Ok(REVENUE_SERIES[REVENUE_SERIES.len() - len..]
            .iter()
            .map(|&(date, revenue, orders)| RevenuePoint {
                date: date.to_string(),
                revenue,
                orders,
            })
            .collect())
    }

    async fn top_performing_stores(&self, limit: usize) -> Result<Vec<TopStore>, AnalyticsError> {
        Ok(TOP_STORES
            .iter()
            .take(limit)
            .map(|&(shop_id, shop_name, total_revenue, total_orders)| TopStore {
                shop_id: shop_id.to_string(),
                shop_name: shop_name.to_string(),
                total_revenue,
                total_orders,
            })
            .collect())
    }

    async fn all_stores(&self) -> Result<Vec<StoreSummary>, AnalyticsError> {
        Ok(STORES
            .iter()
            .map(|&(id, name, domain, created_at)| StoreSummary {
                id: id.to_string(),
                name: name.to_string(),
                domain: domain.to_string(),
                created_at: parse_ts(created_at),
                is_active: true,
                plan_type: Some("free".to_string()),
                billing: None,
            })
            .collect())
    }

    async fn store_analytics(&self, id: &str) -> Result<Option<StoreDetail>, AnalyticsError> {
        let Some(index) = STORES.iter().position(|&(sid, ..)| sid == id) else {
            return Ok(None);
        };
        let shop = shop_row(index);
        let (campaigns, summaries, videos) = fixture_rows(index);
        Ok(Some(rollup::store_detail(
            &shop, &campaigns, &summaries, &videos,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_store_id_is_absent() {
        let detail = MockAnalytics.store_analytics("missing-id").await.unwrap();
        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn revenue_series_respects_the_window() {
        let series = MockAnalytics.revenue_by_date(7).await.unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series.first().unwrap().date, "2025-10-11");
        assert_eq!(series.last().unwrap().date, "2025-10-17");

        let all = MockAnalytics.revenue_by_date(90).await.unwrap();
        assert_eq!(all.len(), 30);
    }

    #[tokio::test]
    async fn top_stores_honor_the_limit() {
        let top = MockAnalytics.top_performing_stores(3).await.unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].shop_name, "Fashion Forward");
        assert!(top[0].total_revenue >= top[1].total_revenue);
        assert!(top[1].total_revenue >= top[2].total_revenue);
    }

    #[tokio::test]
    async fn store_list_carries_live_fields() {
        let stores = MockAnalytics.all_stores().await.unwrap();
        assert_eq!(stores.len(), 8);
        for store in &stores {
            assert!(store.is_active);
            assert_eq!(store.plan_type.as_deref(), Some("free"));
            assert!(store.created_at.is_some());
        }
    }

    #[tokio::test]
    async fn store_detail_is_internally_consistent() {
        let detail = MockAnalytics
            .store_analytics("store_001")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.store.id, "store_001");
        assert_eq!(detail.store.domain, "fashionforward.myshopify.com");
        assert_eq!(detail.summary.active_campaigns, 3);
        assert_eq!(detail.stats.active_campaigns, 2);
        assert_eq!(detail.stats.total_videos, 2);

        let views: i64 = detail.campaigns.iter().map(|c| c.views).sum();
        assert_eq!(views, detail.summary.total_views);
        assert_eq!(detail.summary.total_revenue, detail.stats.total_revenue);
    }

    /// The mock detail payload must carry exactly the keys the live payload
    /// does; a drifted mock shape breaks the dashboard in demo mode only,
    /// which is the worst place to find out.
    #[tokio::test]
    async fn mock_detail_serializes_with_the_full_key_set() {
        let detail = MockAnalytics
            .store_analytics("store_002")
            .await
            .unwrap()
            .unwrap();
        let value = serde_json::to_value(&detail).unwrap();

        let top = value.as_object().unwrap();
        for key in ["store", "summary", "campaigns", "videos", "stats"] {
            assert!(top.contains_key(key), "detail missing {key}");
        }
        assert_eq!(top.len(), 5);

        let summary = value["summary"].as_object().unwrap();
        for key in [
            "totalImpressions",
            "totalViews",
            "totalRevenue",
            "totalAddToCartConversions",
            "totalConversions",
            "addToCartRate",
            "revenueConversionRate",
            "activeCampaigns",
        ] {
            assert!(summary.contains_key(key), "summary missing {key}");
        }

        let campaign = value["campaigns"][0].as_object().unwrap();
        for key in ["_id", "name", "status", "addToCartRate", "revenueRate"] {
            assert!(campaign.contains_key(key), "campaign missing {key}");
        }

        let video = value["videos"][0].as_object().unwrap();
        for key in ["_id", "status", "productTitle", "videoUrl", "thumbnailUrl"] {
            assert!(video.contains_key(key), "video missing {key}");
        }
    }
}
