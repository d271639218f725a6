//! App-wide overview: one response merging the headline metrics, the
//! trailing revenue series and the store leaderboard. The three reads are
//! independent and run concurrently; the first failure aborts the whole
//! request.

use chrono::Utc;
use contracts::analytics::overview::OverviewResponse;

use crate::analytics::provider::AnalyticsProvider;
use crate::shared::error::AnalyticsError;

pub const REVENUE_WINDOW_DAYS: i64 = 30;
pub const TOP_STORES_LIMIT: usize = 10;

pub async fn get_overview(
    provider: &dyn AnalyticsProvider,
) -> Result<OverviewResponse, AnalyticsError> {
    let (metrics, revenue_by_date, top_performing_stores) = tokio::try_join!(
        provider.app_wide_metrics(),
        provider.revenue_by_date(REVENUE_WINDOW_DAYS),
        provider.top_performing_stores(TOP_STORES_LIMIT),
    )?;

    Ok(OverviewResponse {
        metrics,
        revenue_by_date,
        top_performing_stores,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::mock::MockAnalytics;
    use async_trait::async_trait;
    use contracts::analytics::overview::{AppWideMetrics, RevenuePoint, TopStore};
    use contracts::analytics::store::{StoreDetail, StoreSummary};

    struct FailingProvider;

    #[async_trait]
    impl AnalyticsProvider for FailingProvider {
        async fn app_wide_metrics(&self) -> Result<AppWideMetrics, AnalyticsError> {
            Err(AnalyticsError::Configuration("no uri".to_string()))
        }

        async fn revenue_by_date(&self, _days: i64) -> Result<Vec<RevenuePoint>, AnalyticsError> {
            Ok(Vec::new())
        }

        async fn top_performing_stores(
            &self,
            _limit: usize,
        ) -> Result<Vec<TopStore>, AnalyticsError> {
            Ok(Vec::new())
        }

        async fn all_stores(&self) -> Result<Vec<StoreSummary>, AnalyticsError> {
            Ok(Vec::new())
        }

        async fn store_analytics(
            &self,
            _id: &str,
        ) -> Result<Option<StoreDetail>, AnalyticsError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn overview_merges_the_three_reads() {
        let overview = get_overview(&MockAnalytics).await.unwrap();
        assert_eq!(overview.metrics.total_orders, 3420);
        assert_eq!(overview.revenue_by_date.len(), 30);
        assert_eq!(overview.top_performing_stores.len(), 8);
    }

    #[tokio::test]
    async fn one_failing_read_fails_the_overview() {
        let err = get_overview(&FailingProvider).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Configuration(_)));
    }

    #[tokio::test]
    async fn overview_serializes_flat() {
        let overview = get_overview(&MockAnalytics).await.unwrap();
        let value = serde_json::to_value(&overview).unwrap();
        let object = value.as_object().unwrap();
        // metrics fields sit at the top level next to the series
        assert!(object.contains_key("totalRevenue"));
        assert!(object.contains_key("totalOrders"));
        assert!(object.contains_key("totalStores"));
        assert!(object.contains_key("revenueByDate"));
        assert!(object.contains_key("topPerformingStores"));
        assert!(object.contains_key("timestamp"));
        assert!(!object.contains_key("metrics"));
    }
}
