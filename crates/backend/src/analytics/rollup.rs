//! The aggregation library: pure functions turning normalized rows into the
//! dashboard-facing rollups. Summation is exact throughout; only the final
//! display rates are rounded.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use contracts::analytics::overview::{AppWideMetrics, RevenuePoint, TopStore};
use contracts::analytics::store::{
    CampaignPerformance, StoreDetail, StoreRecord, StoreRollup, StoreStats, StoreSummary,
    VideoItem,
};

use super::normalize::{CampaignRow, EventRow, ShopRow, SummaryRow, VideoRow};

/// Sum revenue and orders across all events and count the distinct shops
/// that appear in the event set. An empty set yields the zeroed struct.
pub fn app_wide_metrics(events: &[EventRow]) -> AppWideMetrics {
    let mut metrics = AppWideMetrics::default();
    let mut shops = HashSet::new();
    for event in events {
        metrics.total_revenue += event.revenue;
        metrics.total_orders += event.orders;
        if let Some(shop_id) = &event.shop_id {
            shops.insert(shop_id.as_str());
        }
    }
    metrics.total_stores = shops.len() as i64;
    metrics
}

/// Bucket events by calendar day within `[since, until]`, ascending. Days
/// with no events are omitted; events without a timestamp are skipped.
pub fn revenue_by_date(events: &[EventRow], since: NaiveDate, until: NaiveDate) -> Vec<RevenuePoint> {
    let mut days: BTreeMap<NaiveDate, (f64, i64)> = BTreeMap::new();
    for event in events {
        let Some(timestamp) = event.timestamp else {
            continue;
        };
        let day = timestamp.date_naive();
        if day < since || day > until {
            continue;
        }
        let bucket = days.entry(day).or_insert((0.0, 0));
        bucket.0 += event.revenue;
        bucket.1 += event.orders;
    }
    days.into_iter()
        .map(|(day, (revenue, orders))| RevenuePoint {
            date: day.format("%Y-%m-%d").to_string(),
            revenue,
            orders,
        })
        .collect()
}

/// Group summary rows by shop, sum their store-level totals, rank by revenue
/// descending and keep the first `limit`. Shops are left-joined for a display
/// name; rows whose shop record is missing keep the raw id.
pub fn top_performing_stores(
    summaries: &[SummaryRow],
    shops: &[ShopRow],
    limit: usize,
) -> Vec<TopStore> {
    let mut totals: HashMap<&str, (f64, i64)> = HashMap::new();
    for row in summaries {
        let Some(shop_id) = &row.shop_id else {
            continue;
        };
        let bucket = totals.entry(shop_id.as_str()).or_insert((0.0, 0));
        bucket.0 += row.total_revenue;
        bucket.1 += row.total_orders;
    }

    let by_id: HashMap<&str, &ShopRow> = shops.iter().map(|s| (s.id.as_str(), s)).collect();

    let mut ranked: Vec<TopStore> = totals
        .into_iter()
        .map(|(shop_id, (total_revenue, total_orders))| TopStore {
            shop_name: by_id
                .get(shop_id)
                .and_then(|shop| shop.display_domain())
                .unwrap_or(shop_id)
                .to_string(),
            shop_id: shop_id.to_string(),
            total_revenue,
            total_orders,
        })
        .collect();
    ranked.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
    ranked.truncate(limit);
    ranked
}

/// Shape shop rows for the store list. Input order (newest first, from the
/// repository sort) is preserved.
pub fn store_summaries(shops: &[ShopRow]) -> Vec<StoreSummary> {
    shops
        .iter()
        .map(|shop| StoreSummary {
            id: shop.id.clone(),
            name: shop
                .display_domain()
                .unwrap_or("Unnamed Store")
                .to_string(),
            domain: shop.display_domain().unwrap_or_default().to_string(),
            created_at: shop.created_at,
            is_active: shop.is_active,
            plan_type: shop.plan_type.clone(),
            billing: shop.billing.clone(),
        })
        .collect()
}

/// Percentage of `conversions` over `views`, one decimal place. `"0.0"`
/// whenever there are no views, so the output never carries NaN/Infinity.
pub fn conversion_rate(conversions: i64, views: i64) -> String {
    if views <= 0 {
        return "0.0".to_string();
    }
    format!("{:.1}", conversions as f64 / views as f64 * 100.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CampaignTotals {
    pub impressions: i64,
    pub views: i64,
    pub add_to_cart_conversions: i64,
    pub conversions: i64,
    pub revenue: f64,
}

impl CampaignTotals {
    fn add(&mut self, other: &CampaignTotals) {
        self.impressions += other.impressions;
        self.views += other.views;
        self.add_to_cart_conversions += other.add_to_cart_conversions;
        self.conversions += other.conversions;
        self.revenue += other.revenue;
    }
}

/// Sum summary rows per campaign. Rows with no resolvable campaign id are
/// skipped.
pub fn campaign_totals(summaries: &[SummaryRow]) -> HashMap<String, CampaignTotals> {
    let mut map: HashMap<String, CampaignTotals> = HashMap::new();
    for row in summaries {
        let Some(campaign_id) = &row.campaign_id else {
            continue;
        };
        map.entry(campaign_id.clone()).or_default().add(&CampaignTotals {
            impressions: row.impressions,
            views: row.views,
            add_to_cart_conversions: row.add_to_cart_conversions,
            conversions: row.conversions,
            revenue: row.revenue,
        });
    }
    map
}

/// Assemble the full detail bundle for one store.
///
/// `summary` and `stats` are two named views of the same accumulator; both
/// ship because two presentation views consume the two field sets.
/// `summary.active_campaigns` carries the total campaign count and
/// `stats.active_campaigns` the count of active ones — that is the published
/// contract, not an accident.
pub fn store_detail(
    shop: &ShopRow,
    campaigns: &[CampaignRow],
    summaries: &[SummaryRow],
    videos: &[VideoRow],
) -> StoreDetail {
    let per_campaign = campaign_totals(summaries);

    // Store-level totals only count summaries attached to a loaded
    // campaign; orphaned rows stay out.
    let mut aggregate = CampaignTotals::default();
    for campaign in campaigns {
        if let Some(totals) = per_campaign.get(&campaign.id) {
            aggregate.add(totals);
        }
    }

    let campaigns_out: Vec<CampaignPerformance> = campaigns
        .iter()
        .map(|campaign| {
            let totals = per_campaign.get(&campaign.id).copied().unwrap_or_default();
            CampaignPerformance {
                id: campaign.id.clone(),
                name: campaign
                    .name
                    .clone()
                    .unwrap_or_else(|| "Unnamed Campaign".to_string()),
                status: if campaign.is_active { "active" } else { "inactive" }.to_string(),
                impressions: totals.impressions,
                views: totals.views,
                add_to_cart_conversions: totals.add_to_cart_conversions,
                revenue_conversions: totals.conversions,
                add_to_cart_rate: conversion_rate(totals.add_to_cart_conversions, totals.views),
                revenue_rate: conversion_rate(totals.conversions, totals.views),
                revenue: totals.revenue,
                created_at: campaign.created_at,
            }
        })
        .collect();

    let videos_out: Vec<VideoItem> = videos
        .iter()
        .map(|video| VideoItem {
            id: video.id.clone(),
            status: video.status.clone().unwrap_or_else(|| "pending".to_string()),
            created_at: video.created_at,
            product_id: video.product_id.clone(),
            product_title: video
                .product_title
                .clone()
                .unwrap_or_else(|| "Untitled Video".to_string()),
            video_url: video.video_url.clone(),
            thumbnail_url: video.thumbnail_url.clone(),
        })
        .collect();

    let domain = shop.display_domain().unwrap_or_default().to_string();
    let store = StoreRecord {
        id: shop.id.clone(),
        shop_domain: domain.clone(),
        domain,
        is_active: shop.is_active,
        plan_type: shop.plan_type.clone().unwrap_or_else(|| "free".to_string()),
        created_at: shop.created_at,
        billing: shop.billing.clone(),
        settings: shop.settings.clone(),
        onboarding: shop.onboarding.clone(),
    };

    let summary = StoreRollup {
        total_impressions: aggregate.impressions,
        total_views: aggregate.views,
        total_revenue: aggregate.revenue,
        total_add_to_cart_conversions: aggregate.add_to_cart_conversions,
        total_conversions: aggregate.conversions,
        add_to_cart_rate: conversion_rate(aggregate.add_to_cart_conversions, aggregate.views),
        revenue_conversion_rate: conversion_rate(aggregate.conversions, aggregate.views),
        active_campaigns: campaigns.len() as i64,
    };

    let stats = StoreStats {
        total_campaigns: campaigns.len() as i64,
        active_campaigns: campaigns.iter().filter(|c| c.is_active).count() as i64,
        total_videos: videos.len() as i64,
        total_impressions: aggregate.impressions,
        total_views: aggregate.views,
        total_revenue: aggregate.revenue,
        total_add_to_cart_conversions: aggregate.add_to_cart_conversions,
        total_conversions: aggregate.conversions,
    };

    StoreDetail {
        store,
        summary,
        campaigns: campaigns_out,
        videos: videos_out,
        stats,
    }
}
