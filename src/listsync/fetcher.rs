use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::error::{ListError, TransportError};
use super::query::{FilterKey, ListPage, ListQuery};
use super::state::{Identify, ListState, LoadPhase};

/// A remote list endpoint. Implemented by the per-entity services.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<T>, ListError>;
}

/// How a completed fetch ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the list state.
    Applied,
    /// A newer fetch superseded this one; the response was dropped and the
    /// state is untouched. Not an error, nothing to surface.
    DiscardedStale,
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub page_size: u32,
    pub sort_field: String,
    pub sort_descending: bool,
    /// Watchdog so a hung response cannot keep the fetcher busy forever.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: 30,
            sort_field: "name".to_string(),
            sort_descending: true,
            timeout: Duration::from_secs(15),
        }
    }
}

struct Inner<T> {
    state: ListState<T>,
    /// Bumped on every refresh issue; a response is applied only if the
    /// epoch it was issued under is still current.
    epoch: u64,
    /// Filter of the outstanding fetch, if any.
    in_flight: Option<FilterKey>,
}

/// Issues page-bounded queries against a [`ListSource`] and keeps one
/// [`ListState`] consistent under concurrent refresh/append traffic.
///
/// Concurrency rules:
/// - at most one outstanding fetch per state; `append` and a same-filter
///   `refresh` are rejected with [`ListError::Busy`] while one is in flight;
/// - a `refresh` for a *different* filter supersedes the outstanding fetch:
///   the old response is discarded on arrival instead of clobbering the
///   newer filter's result.
pub struct PagedFetcher<T> {
    source: Arc<dyn ListSource<T>>,
    inner: Arc<Mutex<Inner<T>>>,
    options: FetchOptions,
}

impl<T> Clone for PagedFetcher<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            inner: self.inner.clone(),
            options: self.options.clone(),
        }
    }
}

impl<T> PagedFetcher<T>
where
    T: Identify + Clone + Send + Sync + 'static,
{
    pub fn new(source: Arc<dyn ListSource<T>>, options: FetchOptions) -> Self {
        Self {
            source,
            inner: Arc::new(Mutex::new(Inner {
                state: ListState::default(),
                epoch: 0,
                in_flight: None,
            })),
            options,
        }
    }

    /// Fetches page 1 for `filter` and replaces the items wholesale.
    ///
    /// Replace, never merge: a refresh may have reordered or removed items
    /// seen earlier.
    pub async fn refresh(&self, filter: FilterKey) -> Result<FetchOutcome, ListError> {
        let (epoch, query) = {
            let mut inner = self.inner.lock();
            if inner.in_flight.as_ref() == Some(&filter) {
                return Err(ListError::Busy);
            }
            inner.epoch += 1;
            inner.state.filter = filter.clone();
            inner.state.phase = LoadPhase::Loading;
            inner.in_flight = Some(filter.clone());
            (inner.epoch, self.query_for(filter, 1))
        };

        let result = self.run_fetch(&query).await;

        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            debug!(filter = %query.filter, "discarding stale refresh response");
            return Ok(FetchOutcome::DiscardedStale);
        }
        inner.in_flight = None;
        match result {
            Ok(page) => {
                let state = &mut inner.state;
                state.items = page.items;
                state.current_page = 1;
                state.total = page.total;
                state.phase = LoadPhase::Ready;
                state.loaded = true;
                debug_assert!(state.items.len() as u64 <= u64::from(self.options.page_size));
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                inner.state.phase = LoadPhase::Error;
                Err(err)
            }
        }
    }

    /// Fetches the next page and concatenates it onto the tail, skipping
    /// items already present (guards against refresh/append races).
    pub async fn append(&self) -> Result<FetchOutcome, ListError> {
        let (epoch, query) = {
            let mut inner = self.inner.lock();
            if inner.in_flight.is_some() {
                return Err(ListError::Busy);
            }
            if !inner.state.has_loaded() {
                // Nothing to extend before the first refresh.
                return Err(ListError::Exhausted);
            }
            if inner.state.is_exhausted() {
                return Err(ListError::Exhausted);
            }
            let filter = inner.state.filter.clone();
            let next_page = inner.state.current_page + 1;
            inner.state.phase = LoadPhase::Loading;
            inner.in_flight = Some(filter.clone());
            (inner.epoch, self.query_for(filter, next_page))
        };

        let result = self.run_fetch(&query).await;

        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            debug!(filter = %query.filter, "discarding stale append response");
            return Ok(FetchOutcome::DiscardedStale);
        }
        inner.in_flight = None;
        match result {
            Ok(page) => {
                let state = &mut inner.state;
                let known: HashSet<Uuid> = state.items.iter().map(Identify::id).collect();
                state
                    .items
                    .extend(page.items.into_iter().filter(|item| !known.contains(&item.id())));
                state.current_page += 1;
                state.total = page.total;
                state.phase = LoadPhase::Ready;
                debug_assert!(
                    state.items.len() as u64
                        <= u64::from(state.current_page) * u64::from(self.options.page_size)
                );
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                inner.state.phase = LoadPhase::Error;
                Err(err)
            }
        }
    }

    /// Drops the accumulated state. Invalidates any outstanding fetch.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.epoch += 1;
        inner.in_flight = None;
        inner.state = ListState::default();
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.inner.lock().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.lock().in_flight.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.inner.lock().state.is_exhausted()
    }

    pub fn filter(&self) -> FilterKey {
        self.inner.lock().state.filter.clone()
    }

    pub fn page_size(&self) -> u32 {
        self.options.page_size
    }

    fn query_for(&self, filter: FilterKey, page: u32) -> ListQuery {
        ListQuery {
            filter,
            page,
            page_size: self.options.page_size,
            sort_field: self.options.sort_field.clone(),
            sort_descending: self.options.sort_descending,
        }
    }

    async fn run_fetch(&self, query: &ListQuery) -> Result<ListPage<T>, ListError> {
        match tokio::time::timeout(self.options.timeout, self.source.fetch_page(query)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(self.options.timeout).into()),
        }
    }
}
