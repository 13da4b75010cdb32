use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::Filter;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("filter '{0}' is already registered")]
    DuplicateName(String),
}

/// Name-unique collection of filters, filled once at startup and then shared
/// read-only behind an `Arc`. There is no way to remove a filter.
#[derive(Default)]
pub struct FilterRegistry {
    // registration order; `all()` sorts a copy
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `filter` and hands the same handle back, so a filter can be
    /// registered where it is built.
    pub fn register<F: Filter + 'static>(
        &mut self,
        filter: Arc<F>,
    ) -> Result<Arc<F>, RegistryError> {
        if self.get(filter.name()).is_some() {
            return Err(RegistryError::DuplicateName(filter.name().to_string()));
        }

        info!(
            name = filter.name(),
            priority = filter.priority(),
            "Registered filter"
        );
        self.filters.push(filter.clone());
        Ok(filter)
    }

    /// All filters by ascending priority. Equal priorities keep registration order.
    pub fn all(&self) -> Vec<Arc<dyn Filter>> {
        let mut ordered = self.filters.clone();
        ordered.sort_by_key(|f| f.priority());
        ordered
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Filter>> {
        self.filters.iter().find(|f| f.name() == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
