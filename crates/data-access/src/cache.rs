//! A time-bounded cache around a rate provider, so repeated analyses within
//! a short horizon do not hammer the underlying source. Expiry is per
//! requested window; the pipeline treats cached and fresh series identically.

use crate::error::ProviderError;
use crate::RateProvider;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::Series;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default time-to-live of a cached window: 6 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

struct CacheEntry {
    stored_at: Instant,
    series: Series,
}

/// Wraps any [`RateProvider`] with a TTL cache keyed by the requested window.
pub struct CachedRates<P> {
    inner: P,
    ttl: Duration,
    entries: RwLock<HashMap<(NaiveDate, NaiveDate), CacheEntry>>,
}

impl<P> CachedRates<P> {
    pub fn new(inner: P) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<P: RateProvider> RateProvider for CachedRates<P> {
    fn source_id(&self) -> &str {
        self.inner.source_id()
    }

    async fn fetch_levels(&self, from: NaiveDate, to: NaiveDate) -> Result<Series, ProviderError> {
        let key = (from, to);

        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if entry.stored_at.elapsed() < self.ttl {
                    return Ok(entry.series.clone());
                }
            }
        }

        let series = self.inner.fetch_levels(from, to).await?;

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                series: series.clone(),
            },
        );

        Ok(series)
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }
}
