use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::publisher::{NewPublisher, Publisher, PublisherPatch, PublisherStatus};
use crate::listsync::{
    FilterKey, ListEvent, ListSource, ListState, PagedFetcher, ScrollMetrics, ScrollProbe,
};
use crate::services::PublisherApi;
use crate::shell::Notifier;

use super::{PageLifecycle, PageOptions};

pub const PAGE: &str = "publisher-list";

pub type PublisherListEvent = ListEvent<NewPublisher, PublisherPatch>;

/// The publisher list. Start/stop flips the status locally before the
/// control call resolves; the next wholesale refresh is the reconciliation
/// point, and a failed call reverts just its own entry.
pub struct PublisherListPage {
    fetcher: PagedFetcher<Publisher>,
    publishers: Arc<dyn PublisherApi>,
    pending_status: HashMap<Uuid, PublisherStatus>,
    notifier: Notifier,
    probe: ScrollProbe,
}

impl PublisherListPage {
    pub fn new(
        source: Arc<dyn ListSource<Publisher>>,
        publishers: Arc<dyn PublisherApi>,
        notifier: Notifier,
        options: PageOptions,
    ) -> Self {
        Self {
            fetcher: PagedFetcher::new(source, options.fetch),
            probe: ScrollProbe::new(options.scroll_threshold),
            publishers,
            pending_status: HashMap::new(),
            notifier,
        }
    }

    pub async fn refresh_publishers(&mut self) {
        match self.fetcher.refresh(FilterKey::All).await {
            Ok(_) => {
                // Server truth replaced the items; drop the overlay.
                self.pending_status.clear();
            }
            Err(err) if err.is_flow_control() => {}
            Err(err) => self
                .notifier
                .error("failed to load publishers", Some(err.to_string())),
        }
    }

    pub async fn on_scroll(&mut self, metrics: ScrollMetrics) {
        if !self.probe.should_append(metrics) {
            return;
        }
        if self.fetcher.is_loading() || self.fetcher.is_exhausted() {
            return;
        }
        match self.fetcher.append().await {
            Ok(_) => {}
            Err(err) if err.is_flow_control() => {}
            Err(err) => self
                .notifier
                .error("failed to load more publishers", Some(err.to_string())),
        }
    }

    pub async fn on_pull_refresh(&mut self) {
        self.refresh_publishers().await;
    }

    pub async fn start(&mut self, id: Uuid) {
        self.switch(id, PublisherStatus::Running).await;
    }

    pub async fn stop(&mut self, id: Uuid) {
        self.switch(id, PublisherStatus::Stopped).await;
    }

    pub async fn delete_many(&mut self, ids: Vec<Uuid>) {
        match self.publishers.delete_many(ids).await {
            Ok(()) => {
                self.notifier.info("deleted");
                self.refresh_publishers().await;
            }
            Err(err) => self
                .notifier
                .error("failed to delete publishers", Some(err.to_string())),
        }
    }

    pub async fn handle_event(&mut self, event: PublisherListEvent) {
        match event {
            ListEvent::CreateRequested(publisher) => {
                let result = self.publishers.create(publisher).await.map(drop);
                self.after_mutation(result, "new publisher created").await;
            }
            ListEvent::UpdateRequested(id, patch) => {
                let result = self.publishers.update(id, patch).await.map(drop);
                self.after_mutation(result, "edited").await;
            }
            ListEvent::DeleteRequested(id) => self.delete_many(vec![id]).await,
            ListEvent::Selected(id) => debug!(%id, "publisher selected"),
            other => debug!(?other, "unhandled publisher list event"),
        }
    }

    /// The projected rows: current items with pending status flips applied.
    pub fn rows(&self) -> Vec<Publisher> {
        self.fetcher
            .snapshot()
            .items
            .into_iter()
            .map(|mut publisher| {
                if let Some(status) = self.pending_status.get(&publisher.id) {
                    publisher.status = *status;
                }
                publisher
            })
            .collect()
    }

    pub fn state(&self) -> ListState<Publisher> {
        self.fetcher.snapshot()
    }

    async fn switch(&mut self, id: Uuid, target: PublisherStatus) {
        self.pending_status.insert(id, target);
        let result = match target {
            PublisherStatus::Running => self.publishers.start(id).await,
            PublisherStatus::Stopped => self.publishers.stop(id).await,
        };
        match result {
            Ok(()) => self.refresh_publishers().await,
            Err(err) => {
                // Revert only this entry; the rest of the overlay stands.
                self.pending_status.remove(&id);
                self.notifier
                    .error("failed to switch publisher", Some(err.to_string()));
            }
        }
    }

    async fn after_mutation(&mut self, result: anyhow::Result<()>, success: &str) {
        match result {
            Ok(()) => {
                self.notifier.info(success);
                self.refresh_publishers().await;
            }
            Err(err) => self
                .notifier
                .error("publisher operation failed", Some(err.to_string())),
        }
    }
}

#[async_trait]
impl PageLifecycle for PublisherListPage {
    async fn on_activate(&mut self) {
        self.refresh_publishers().await;
    }

    async fn on_deactivate(&mut self) {
        self.pending_status.clear();
        self.fetcher.reset();
    }

    async fn on_filter_change(&mut self, _filter: FilterKey) {
        // Publishers are unfiltered; the route carries no filter segment.
    }
}
