//! Collection reads. Every function returns normalized rows; no BSON leaves
//! this module.

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::options::FindOptions;

use crate::shared::data::db::MongoStore;
use crate::shared::error::AnalyticsError;

use super::normalize::{self, CampaignRow, EventRow, ShopRow, SummaryRow, VideoRow};

/// Per-event revenue/order records.
pub const EVENTS: &str = "analytics";
/// Per-campaign aggregate records, possibly several rows per campaign.
pub const SUMMARIES: &str = "analyticssummaries";
pub const SHOPS: &str = "shops";
pub const CAMPAIGNS: &str = "campaigns";
pub const VIDEOS: &str = "aivideos";

async fn collect_rows<T>(
    store: &MongoStore,
    collection: &str,
    filter: Option<Document>,
    options: Option<FindOptions>,
    map: fn(&Document) -> T,
) -> Result<Vec<T>, AnalyticsError> {
    let coll = store.collection(collection).await?;
    let mut cursor = coll.find(filter, options).await?;
    let mut rows = Vec::new();
    while let Some(doc) = cursor.try_next().await? {
        rows.push(map(&doc));
    }
    Ok(rows)
}

fn newest_first() -> FindOptions {
    FindOptions::builder().sort(doc! { "createdAt": -1 }).build()
}

pub async fn load_events(store: &MongoStore) -> Result<Vec<EventRow>, AnalyticsError> {
    collect_rows(store, EVENTS, None, None, normalize::event_row).await
}

pub async fn load_events_since(
    store: &MongoStore,
    since: DateTime<Utc>,
) -> Result<Vec<EventRow>, AnalyticsError> {
    let filter = doc! { "timestamp": { "$gte": BsonDateTime::from_chrono(since) } };
    collect_rows(store, EVENTS, Some(filter), None, normalize::event_row).await
}

pub async fn load_summaries(store: &MongoStore) -> Result<Vec<SummaryRow>, AnalyticsError> {
    collect_rows(store, SUMMARIES, None, None, normalize::summary_row).await
}

pub async fn load_summaries_for_domain(
    store: &MongoStore,
    domain: &str,
) -> Result<Vec<SummaryRow>, AnalyticsError> {
    let filter = doc! { "shopDomain": domain };
    collect_rows(store, SUMMARIES, Some(filter), None, normalize::summary_row).await
}

pub async fn load_shops(store: &MongoStore) -> Result<Vec<ShopRow>, AnalyticsError> {
    collect_rows(store, SHOPS, None, Some(newest_first()), normalize::shop_row).await
}

/// Resolve one shop by id. Ids that parse as ObjectIds are looked up as
/// such, anything else as a raw string `_id`; no match is a typed absent
/// result, not an error.
pub async fn find_shop_by_id(
    store: &MongoStore,
    id: &str,
) -> Result<Option<ShopRow>, AnalyticsError> {
    let coll = store.collection(SHOPS).await?;
    let filter = match ObjectId::parse_str(id) {
        Ok(oid) => doc! { "_id": oid },
        Err(_) => doc! { "_id": id },
    };
    Ok(coll
        .find_one(filter, None)
        .await?
        .map(|d| normalize::shop_row(&d)))
}

pub async fn load_campaigns_for_domain(
    store: &MongoStore,
    domain: &str,
) -> Result<Vec<CampaignRow>, AnalyticsError> {
    let filter = doc! { "shopDomain": domain };
    collect_rows(
        store,
        CAMPAIGNS,
        Some(filter),
        Some(newest_first()),
        normalize::campaign_row,
    )
    .await
}

pub async fn load_videos_for_domain(
    store: &MongoStore,
    domain: &str,
) -> Result<Vec<VideoRow>, AnalyticsError> {
    let filter = doc! { "shopDomain": domain };
    collect_rows(
        store,
        VIDEOS,
        Some(filter),
        Some(newest_first()),
        normalize::video_row,
    )
    .await
}
