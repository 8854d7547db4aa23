use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use picferry_protocol::{GalleryImage, GalleryReply, UploadConfig, constants};
use picferry_transport::Transport;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::GalleryError;

/// A gallery listing as handed to callers.
#[derive(Debug, Clone)]
pub struct Listing {
    pub images: Vec<GalleryImage>,
    /// True when a refresh failed and these items come from an expired
    /// entry. Callers can surface a "showing older data" note on it.
    pub stale: bool,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    images: Vec<GalleryImage>,
    fetched_at_ms: u64,
}

struct CacheState {
    entries: HashMap<String, CacheEntry>,
    insertion_order: VecDeque<String>,
}

/// TTL-bounded cache of endpoint listings.
///
/// One entry per endpoint key. Entries younger than the TTL are served
/// without network use; expired ones are refreshed through the transport.
/// A failed refresh serves the old entry marked stale instead of erroring,
/// so a flaky network degrades the picker rather than emptying it. Only a
/// cold cache surfaces fetch failures.
pub struct GalleryCache {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl GalleryCache {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_options(
            transport,
            constants::DEFAULT_GALLERY_CACHE_CAPACITY,
            Arc::new(SystemClock),
        )
    }

    /// Capacity and clock injection for tests and unusual hosts.
    pub fn with_options(
        transport: Arc<dyn Transport>,
        capacity: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            clock,
            capacity: capacity.max(1),
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
        }
    }

    /// Returns the listing for the configured endpoint.
    pub async fn listing(&self, config: &UploadConfig) -> Result<Listing, GalleryError> {
        let key = cache_key(&config.endpoint_url);
        let now_ms = self.clock.now_ms();

        if let Some(entry) = self.fresh_entry(&key, now_ms, config.gallery_cache_ttl) {
            debug!(key = %key, "gallery cache hit");
            return Ok(Listing {
                images: entry.images,
                stale: false,
            });
        }

        let url = listing_url(&config.endpoint_url, now_ms);
        match self.fetch_images(&url, config.gallery_timeout).await {
            Ok(images) => {
                self.store(&key, images.clone());
                Ok(Listing {
                    images,
                    stale: false,
                })
            }
            Err(err) => match self.any_entry(&key) {
                Some(entry) => {
                    warn!(key = %key, error = %err, "gallery refresh failed, serving stale listing");
                    Ok(Listing {
                        images: entry.images,
                        stale: true,
                    })
                }
                None => Err(err),
            },
        }
    }

    /// Forgets every cached listing. Safe to call repeatedly.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.entries.clear();
        state.insertion_order.clear();
        debug!("gallery cache cleared");
    }

    /// Number of endpoint keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    async fn fetch_images(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<Vec<GalleryImage>, GalleryError> {
        let text = self.transport.fetch(url, timeout).await?;
        let reply: GalleryReply = serde_json::from_str(&text)?;
        if reply.success {
            Ok(reply.images)
        } else {
            Err(GalleryError::Rejected(reply.error.unwrap_or_else(|| {
                "the server rejected the listing request".to_string()
            })))
        }
    }

    fn fresh_entry(&self, key: &str, now_ms: u64, ttl: Duration) -> Option<CacheEntry> {
        let state = self.state.lock().unwrap();
        let entry = state.entries.get(key)?;
        let age_ms = now_ms.saturating_sub(entry.fetched_at_ms);
        if age_ms < ttl.as_millis() as u64 {
            Some(entry.clone())
        } else {
            None
        }
    }

    fn any_entry(&self, key: &str) -> Option<CacheEntry> {
        self.state.lock().unwrap().entries.get(key).cloned()
    }

    /// Whole-entry swap stamped with the post-fetch clock.
    ///
    /// A refreshed key keeps its original insertion slot; eviction only
    /// considers first-insert order, not access.
    fn store(&self, key: &str, images: Vec<GalleryImage>) {
        let fetched_at_ms = self.clock.now_ms();
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.entries.get_mut(key) {
            *entry = CacheEntry {
                images,
                fetched_at_ms,
            };
            return;
        }
        if state.entries.len() >= self.capacity {
            if let Some(oldest) = state.insertion_order.pop_front() {
                state.entries.remove(&oldest);
                debug!(evicted = %oldest, "gallery cache over capacity");
            }
        }
        state.insertion_order.push_back(key.to_string());
        state.entries.insert(
            key.to_string(),
            CacheEntry {
                images,
                fetched_at_ms,
            },
        );
    }
}

/// Listing URL: the endpoint plus the listing selector and a cache-buster
/// timestamp, so intermediaries never serve a cached reply.
fn listing_url(endpoint_url: &str, now_ms: u64) -> String {
    let separator = if endpoint_url.contains('?') { '&' } else { '?' };
    format!(
        "{endpoint_url}{separator}action={}&{}={now_ms}",
        constants::GALLERY_ACTION,
        constants::GALLERY_BUSTER_PARAM
    )
}

/// Cache key for an endpoint: first half of the SHA-256 of the URL, hex
/// encoded. Stable across runs and safe to log.
fn cache_key(endpoint_url: &str) -> String {
    let digest = Sha256::digest(endpoint_url.as_bytes());
    hex::encode(&digest[..16])
}
