use crate::domain::ports::KeyValueStoreBox;
use crate::domain::query::{FilterCriteria, FilterPatch};
use crate::error::Result;

/// Storage key of the favorite property ids.
pub const FAVORITES_KEY: &str = "favorites";
/// Storage key of the ids selected for side-by-side comparison.
pub const COMPARISON_KEY: &str = "comparison";
/// Maximum number of properties compared at once.
pub const COMPARISON_CAPACITY: usize = 3;

/// Visitor session state: active filters plus the favorite and comparison lists.
///
/// The session is an explicit value handed to whoever needs it. Id lists are kept
/// in the injected `KeyValueStore` as JSON arrays; filters live only in memory.
pub struct SessionStore {
    store: KeyValueStoreBox,
    filters: FilterCriteria,
    default_filters: FilterCriteria,
    comparison_capacity: usize,
}

impl SessionStore {
    /// Creates a session with unconstrained default filters.
    pub fn new(store: KeyValueStoreBox) -> Self {
        Self::with_default_filters(store, FilterCriteria::default())
    }

    /// Creates a session whose filters start from, and reset to, `default_filters`.
    pub fn with_default_filters(store: KeyValueStoreBox, default_filters: FilterCriteria) -> Self {
        Self {
            store,
            filters: default_filters.clone(),
            default_filters,
            comparison_capacity: COMPARISON_CAPACITY,
        }
    }

    pub fn with_comparison_capacity(mut self, capacity: usize) -> Self {
        self.comparison_capacity = capacity;
        self
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.merge(patch);
    }

    pub fn reset_filters(&mut self) {
        self.filters = self.default_filters.clone();
    }

    pub async fn favorites(&self) -> Result<Vec<u32>> {
        self.read_ids(FAVORITES_KEY).await
    }

    pub async fn is_favorite(&self, id: u32) -> Result<bool> {
        Ok(self.favorites().await?.contains(&id))
    }

    /// Adds `id` to the favorites. Returns `false` when it was already there.
    pub async fn add_favorite(&self, id: u32) -> Result<bool> {
        let mut favorites = self.favorites().await?;
        if favorites.contains(&id) {
            return Ok(false);
        }
        favorites.push(id);
        self.write_ids(FAVORITES_KEY, &favorites).await?;
        Ok(true)
    }

    /// Removes `id` from the favorites. Returns `false` when it was not there.
    pub async fn remove_favorite(&self, id: u32) -> Result<bool> {
        let mut favorites = self.favorites().await?;
        let before = favorites.len();
        favorites.retain(|f| *f != id);
        if favorites.len() == before {
            return Ok(false);
        }
        self.write_ids(FAVORITES_KEY, &favorites).await?;
        Ok(true)
    }

    /// Flips the favorite flag of `id` and returns the new state.
    pub async fn toggle_favorite(&self, id: u32) -> Result<bool> {
        if self.remove_favorite(id).await? {
            Ok(false)
        } else {
            self.add_favorite(id).await
        }
    }

    pub async fn comparison(&self) -> Result<Vec<u32>> {
        self.read_ids(COMPARISON_KEY).await
    }

    /// Adds `id` to the comparison list.
    ///
    /// Silently does nothing (returning `false`) when the list is full or already
    /// holds `id`; the oldest entry is never evicted.
    pub async fn add_to_comparison(&self, id: u32) -> Result<bool> {
        let mut comparison = self.comparison().await?;
        if comparison.contains(&id) {
            return Ok(false);
        }
        if comparison.len() >= self.comparison_capacity {
            tracing::debug!(id, capacity = self.comparison_capacity, "comparison list full");
            return Ok(false);
        }
        comparison.push(id);
        self.write_ids(COMPARISON_KEY, &comparison).await?;
        Ok(true)
    }

    pub async fn remove_from_comparison(&self, id: u32) -> Result<bool> {
        let mut comparison = self.comparison().await?;
        let before = comparison.len();
        comparison.retain(|c| *c != id);
        if comparison.len() == before {
            return Ok(false);
        }
        self.write_ids(COMPARISON_KEY, &comparison).await?;
        Ok(true)
    }

    pub async fn clear_comparison(&self) -> Result<()> {
        self.store.remove(COMPARISON_KEY).await
    }

    async fn read_ids(&self, key: &str) -> Result<Vec<u32>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(ids) => Ok(ids),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable stored id list");
                Ok(Vec::new())
            }
        }
    }

    async fn write_ids(&self, key: &str, ids: &[u32]) -> Result<()> {
        let encoded = serde_json::to_string(ids)?;
        tracing::debug!(key, count = ids.len(), "storing id list");
        self.store.set(key, encoded).await
    }
}
