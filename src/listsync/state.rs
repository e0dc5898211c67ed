use uuid::Uuid;

use super::query::FilterKey;

/// Items in a paginated list are opaque beyond a stable identifier, used for
/// append deduplication and favorite-membership lookups.
pub trait Identify {
    fn id(&self) -> Uuid;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Uninitialized,
    Loading,
    Ready,
    Error,
}

/// The durable list state owned by one page instance.
///
/// Mutated only by the fetcher: wholesale replace on refresh, deduplicated
/// concatenation on append. Discarded when the page deactivates.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total: u64,
    pub filter: FilterKey,
    pub phase: LoadPhase,
    pub(crate) loaded: bool,
}

impl<T> ListState<T> {
    pub fn new(filter: FilterKey) -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total: 0,
            filter,
            phase: LoadPhase::Uninitialized,
            loaded: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// True once at least one fetch has completed.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    /// True iff every known item has been fetched. Callers must stop
    /// appending once this holds.
    pub fn is_exhausted(&self) -> bool {
        self.loaded && self.items.len() as u64 >= self.total
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new(FilterKey::All)
    }
}
