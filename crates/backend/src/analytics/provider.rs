use std::sync::Arc;

use async_trait::async_trait;
use contracts::analytics::overview::{AppWideMetrics, RevenuePoint, TopStore};
use contracts::analytics::store::{StoreDetail, StoreSummary};

use crate::shared::config::Config;
use crate::shared::data::db::MongoStore;
use crate::shared::error::AnalyticsError;

use super::live::LiveAnalytics;
use super::mock::MockAnalytics;

/// The read surface the dashboard is built on. The live implementation
/// queries the document store; the mock one serves fixtures in the same
/// shapes. Callers never know which one they hold.
#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
    async fn app_wide_metrics(&self) -> Result<AppWideMetrics, AnalyticsError>;

    /// Daily revenue series for the trailing `days` days, oldest first.
    async fn revenue_by_date(&self, days: i64) -> Result<Vec<RevenuePoint>, AnalyticsError>;

    async fn top_performing_stores(&self, limit: usize) -> Result<Vec<TopStore>, AnalyticsError>;

    /// Every store, newest first.
    async fn all_stores(&self) -> Result<Vec<StoreSummary>, AnalyticsError>;

    /// Full detail bundle for one store; `None` when the id matches nothing.
    async fn store_analytics(&self, id: &str) -> Result<Option<StoreDetail>, AnalyticsError>;
}

/// Pick the provider once at startup. Everything downstream sees only the
/// trait object.
pub fn provider_from_config(config: &Config) -> Arc<dyn AnalyticsProvider> {
    if config.dashboard.use_mock_data {
        tracing::warn!("serving mock analytics data, document store will not be queried");
        Arc::new(MockAnalytics)
    } else {
        Arc::new(LiveAnalytics::new(MongoStore::new(&config.database)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[tokio::test]
    async fn mock_flag_selects_the_mock_provider() {
        let cfg = config("[database]\nuri = \"\"\n[dashboard]\nuse_mock_data = true\n");
        // The mock provider works without any database configuration.
        let provider = provider_from_config(&cfg);
        let metrics = provider.app_wide_metrics().await.unwrap();
        assert!(metrics.total_revenue > 0.0);
    }

    #[tokio::test]
    async fn default_selects_the_live_provider() {
        let cfg = config("[database]\nuri = \"\"\n");
        let provider = provider_from_config(&cfg);
        // Live provider with an empty uri fails on first use, not at build.
        let err = provider.app_wide_metrics().await.unwrap_err();
        assert!(matches!(err, AnalyticsError::Configuration(_)));
    }
}
