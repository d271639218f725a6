//! Provider backed by the document store. Collections are read through the
//! repository and aggregated client-side; independent reads within one
//! operation run concurrently.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use contracts::analytics::overview::{AppWideMetrics, RevenuePoint, TopStore};
use contracts::analytics::store::{StoreDetail, StoreSummary};

use crate::shared::data::db::MongoStore;
use crate::shared::error::AnalyticsError;

use super::provider::AnalyticsProvider;
use super::{repository, rollup};

pub struct LiveAnalytics {
    store: MongoStore,
}

impl LiveAnalytics {
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AnalyticsProvider for LiveAnalytics {
    async fn app_wide_metrics(&self) -> Result<AppWideMetrics, AnalyticsError> {
        let events = repository::load_events(&self.store).await?;
        Ok(rollup::app_wide_metrics(&events))
    }

    async fn revenue_by_date(&self, days: i64) -> Result<Vec<RevenuePoint>, AnalyticsError> {
        let now = Utc::now();
        let since = now - Duration::days(days);
        let events = repository::load_events_since(&self.store, since).await?;
        Ok(rollup::revenue_by_date(
            &events,
            since.date_naive(),
            now.date_naive(),
        ))
    }

    async fn top_performing_stores(&self, limit: usize) -> Result<Vec<TopStore>, AnalyticsError> {
        let (summaries, shops) = tokio::try_join!(
            repository::load_summaries(&self.store),
            repository::load_shops(&self.store),
        )?;
        Ok(rollup::top_performing_stores(&summaries, &shops, limit))
    }

    async fn all_stores(&self) -> Result<Vec<StoreSummary>, AnalyticsError> {
        let shops = repository::load_shops(&self.store).await?;
        Ok(rollup::store_summaries(&shops))
    }

    async fn store_analytics(&self, id: &str) -> Result<Option<StoreDetail>, AnalyticsError> {
        let Some(shop) = repository::find_shop_by_id(&self.store, id).await? else {
            return Ok(None);
        };
        let domain = shop.display_domain().unwrap_or_default().to_string();

        let (campaigns, summaries, videos) = tokio::try_join!(
            repository::load_campaigns_for_domain(&self.store, &domain),
            repository::load_summaries_for_domain(&self.store, &domain),
            repository::load_videos_for_domain(&self.store, &domain),
        )?;

        Ok(Some(rollup::store_detail(
            &shop, &campaigns, &summaries, &videos,
        )))
    }
}
