use thiserror::Error;

/// Failure kinds of the analytics core.
///
/// "Store not found" is not an error: lookups return `Option` so callers can
/// tell absent data from a failing system. A zero/empty result set is also
/// never an error; these variants only cover true faults.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Required connection configuration is missing. Fatal, never retried.
    #[error("database configuration missing: {0}")]
    Configuration(String),

    /// The document store rejected the connection attempt. Fatal for the
    /// current request; a later request may connect successfully.
    #[error("failed to connect to document store: {0}")]
    Connection(#[source] mongodb::error::Error),

    /// A read or aggregation failed store-side. The driver diagnostic is
    /// preserved for logging.
    #[error("query failed: {0}")]
    Query(#[from] mongodb::error::Error),
}
