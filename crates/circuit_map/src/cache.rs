//! Content-keyed memoization of assembled maps
//!
//! The assembler never touches a cache; callers wrap it with
//! [`cached_assemble`].

use std::collections::{HashMap, VecDeque};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use contracts::{CircuitMap, ComparisonConfig, DriverId, GridDomain, LapSelector, MapError, Rgb};
use parking_lot::RwLock;

/// Everything a map depends on besides the raw telemetry itself
///
/// Floats are held as bit patterns so the key is `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub session_id: String,
    pub driver1: DriverId,
    pub driver2: DriverId,
    pub lap: LapSelector,
    delta_threshold: u64,
    num_points: usize,
    lighten_factor: u64,
    grid_domain: GridDomain,
    drs_min_zone_m: u64,
    neutral_color: Rgb,
}

impl CacheKey {
    pub fn new(
        session_id: &str,
        driver1: &DriverId,
        driver2: &DriverId,
        lap: LapSelector,
        config: &ComparisonConfig,
    ) -> Self {
        Self {
            session_id: session_id.to_string(),
            driver1: driver1.clone(),
            driver2: driver2.clone(),
            lap,
            delta_threshold: config.delta_threshold.to_bits(),
            num_points: config.num_points,
            lighten_factor: config.lighten_factor.to_bits(),
            grid_domain: config.grid_domain,
            drs_min_zone_m: config.drs_min_zone_m.to_bits(),
            neutral_color: config.neutral_color,
        }
    }

    /// Hash of the key as 16 hex digits, stable for a given build
    pub fn content_hash(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

/// Storage for assembled maps
pub trait MapCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<Arc<CircuitMap>>;
    fn put(&self, key: CacheKey, map: Arc<CircuitMap>);
}

/// Bounded in-process cache, evicting the oldest entry first
#[derive(Debug)]
pub struct InMemoryMapCache {
    capacity: usize,
    inner: RwLock<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<CacheKey, Arc<CircuitMap>>,
    order: VecDeque<CacheKey>,
}

impl InMemoryMapCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: RwLock::new(CacheInner::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MapCache for InMemoryMapCache {
    fn get(&self, key: &CacheKey) -> Option<Arc<CircuitMap>> {
        self.inner.read().entries.get(key).cloned()
    }

    fn put(&self, key: CacheKey, map: Arc<CircuitMap>) {
        let mut inner = self.inner.write();
        if inner.entries.insert(key.clone(), map).is_none() {
            inner.order.push_back(key);
        }
        while inner.entries.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
        }
    }
}

/// Return the cached map for `key`, or build and store it
///
/// Failed builds are not cached.
pub fn cached_assemble<F>(
    cache: &dyn MapCache,
    key: CacheKey,
    build: F,
) -> Result<Arc<CircuitMap>, MapError>
where
    F: FnOnce() -> Result<CircuitMap, MapError>,
{
    if let Some(map) = cache.get(&key) {
        metrics::counter!("circuit_map_cache_total", "result" => "hit").increment(1);
        tracing::debug!(key = %key.content_hash(), "circuit map cache hit");
        return Ok(map);
    }
    metrics::counter!("circuit_map_cache_total", "result" => "miss").increment(1);
    let map = Arc::new(build()?);
    cache.put(key, Arc::clone(&map));
    Ok(map)
}
