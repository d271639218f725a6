use std::sync::Arc;

use crate::analytics::provider::AnalyticsProvider;

pub mod handlers;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn AnalyticsProvider>,
}
