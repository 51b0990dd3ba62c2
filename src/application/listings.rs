use crate::domain::catalog;
use crate::domain::property::Property;
use crate::domain::query::{self, FilterCriteria, SortKey};
use crate::error::{RealtyError, Result};

/// Read-only view over the agency catalog.
///
/// `ListingService` owns the listings and answers searches through the pure query
/// engine; it never mutates the catalog it was built with.
pub struct ListingService {
    properties: Vec<Property>,
}

impl Default for ListingService {
    fn default() -> Self {
        Self::with_sample_catalog()
    }
}

impl ListingService {
    /// Creates a service over `properties`, rejecting invalid or duplicate records.
    pub fn new(properties: Vec<Property>) -> Result<Self> {
        let mut seen = std::collections::HashSet::with_capacity(properties.len());
        for property in &properties {
            property.validate()?;
            if !seen.insert(property.id) {
                return Err(RealtyError::validation(format!(
                    "Duplicate property id {}",
                    property.id
                )));
            }
        }
        tracing::debug!(count = properties.len(), "catalog loaded");
        Ok(Self { properties })
    }

    pub fn with_sample_catalog() -> Self {
        Self {
            properties: catalog::sample(),
        }
    }

    pub fn get(&self, id: u32) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// Filters then sorts the catalog.
    pub fn search(&self, criteria: &FilterCriteria, sort_key: SortKey) -> Vec<Property> {
        let results = query::query(&self.properties, criteria, sort_key);
        tracing::debug!(
            total = self.properties.len(),
            matched = results.len(),
            sort = %sort_key,
            "search executed"
        );
        results
    }

    /// Resolves ids to listings, skipping ids that are not in the catalog.
    pub fn resolve(&self, ids: &[u32]) -> Vec<Property> {
        ids.iter().filter_map(|id| self.get(*id)).cloned().collect()
    }
}
