use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::favorite::FavoriteSet;
use crate::domain::font::{Font, FontPatch, NewFont};
use crate::listsync::{
    project, FilterBar, FilterKey, ListEvent, ListSource, ListState, PagedFetcher, ScrollMetrics,
    ScrollProbe, Tile,
};
use crate::services::FontApi;
use crate::shell::Notifier;

use super::{PageLifecycle, PageOptions};

pub const PAGE: &str = "font-list";

pub type FontListEvent = ListEvent<NewFont, FontPatch>;

/// The font selector: provider filter over an infinitely scrolling card
/// list, with creation and an active toggle per font.
pub struct FontListPage {
    fetcher: PagedFetcher<Font>,
    fonts: Arc<dyn FontApi>,
    filter_bar: FilterBar,
    notifier: Notifier,
    probe: ScrollProbe,
}

impl FontListPage {
    pub fn new(
        source: Arc<dyn ListSource<Font>>,
        fonts: Arc<dyn FontApi>,
        providers: Vec<String>,
        notifier: Notifier,
        options: PageOptions,
    ) -> Self {
        let mut keys = vec![FilterKey::All];
        keys.extend(providers.into_iter().map(FilterKey::Provider));
        Self {
            fetcher: PagedFetcher::new(source, options.fetch),
            probe: ScrollProbe::new(options.scroll_threshold),
            fonts,
            filter_bar: FilterBar::new(keys),
            notifier,
        }
    }

    pub async fn refresh_fonts(&mut self) {
        let filter = self.filter_bar.active().clone();
        match self.fetcher.refresh(filter).await {
            Ok(_) => {}
            Err(err) if err.is_flow_control() => {}
            Err(err) => self
                .notifier
                .error("failed to load fonts", Some(err.to_string())),
        }
    }

    /// The provider dropdown; `None` selects all providers.
    pub async fn select_provider(&mut self, provider: Option<String>) {
        let filter = match provider {
            Some(provider) => FilterKey::Provider(provider),
            None => FilterKey::All,
        };
        self.on_filter_change(filter).await;
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
                .error("failed to load more fonts", Some(err.to_string())),
        }
    }

    pub async fn on_pull_refresh(&mut self) {
        self.refresh_fonts().await;
    }

    /// Flips a font's active flag via the generic update path.
    pub async fn toggle_active(&mut self, id: Uuid, active: bool) {
        let patch = FontPatch {
            active: Some(active),
            ..FontPatch::default()
        };
        self.handle_event(ListEvent::UpdateRequested(id, patch))
            .await;
    }

    pub async fn handle_event(&mut self, event: FontListEvent) {
        match event {
            ListEvent::CreateRequested(font) => {
                let result = self.fonts.create(font).await.map(drop);
                self.after_mutation(result, "new font created").await;
            }
            ListEvent::UpdateRequested(id, patch) => {
                let result = self.fonts.update(id, patch).await.map(drop);
                self.after_mutation(result, "saved").await;
            }
            ListEvent::DeleteRequested(id) => {
                let result = self.fonts.delete(id).await;
                self.after_mutation(result, "deleted").await;
            }
            ListEvent::FilterChanged(filter) => self.on_filter_change(filter).await,
            ListEvent::Selected(id) => debug!(%id, "font selected"),
            other => debug!(?other, "unhandled font list event"),
        }
    }

    pub fn tiles(&self) -> Vec<Tile> {
        project(&self.fetcher.snapshot(), &FavoriteSet::default())
    }

    pub fn state(&self) -> ListState<Font> {
        self.fetcher.snapshot()
    }

    pub fn filter_bar(&self) -> &FilterBar {
        &self.filter_bar
    }

    async fn after_mutation(&mut self, result: anyhow::Result<()>, success: &str) {
        match result {
            Ok(()) => {
                self.notifier.info(success);
                self.refresh_fonts().await;
            }
            Err(err) => self
                .notifier
                .error("font operation failed", Some(err.to_string())),
        }
    }
}

#[async_trait]
impl PageLifecycle for FontListPage {
    async fn on_activate(&mut self) {
        self.refresh_fonts().await;
    }

    async fn on_deactivate(&mut self) {
        self.fetcher.reset();
    }

    async fn on_filter_change(&mut self, filter: FilterKey) {
        if !self.filter_bar.select(filter) {
            return;
        }
        self.refresh_fonts().await;
    }
}
