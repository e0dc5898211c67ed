use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::debug;

use crate::domain::board::{Board, BoardPatch, NewBoard};
use crate::domain::favorite::FavoriteSet;
use crate::domain::group::{Group, GroupPatch, NewGroup};
use crate::listsync::{
    project, FilterBar, FilterKey, ListEvent, ListSource, ListState, PagedFetcher, ScrollMetrics,
    ScrollProbe, SwipeDirection, Tile,
};
use crate::services::{BoardApi, GroupApi};
use crate::shell::{Notifier, RouteState};

use super::{PageLifecycle, PageOptions};

pub const PAGE: &str = "play-list";

pub type PlayListEvent = ListEvent<NewBoard, BoardPatch>;
pub type PlayGroupEvent = ListEvent<NewGroup, GroupPatch>;

/// The play list shows one play group's boards at a time. A play group's
/// boards arrive wholesale, so the shared list pattern runs with a single
/// always-exhausted page; removing a board means leaving the group, not
/// deleting the board.
pub struct PlayListPage {
    fetcher: PagedFetcher<Board>,
    boards: Arc<dyn BoardApi>,
    groups_api: Arc<dyn GroupApi>,
    filter_bar: FilterBar,
    groups: Vec<Group>,
    favorites: FavoriteSet,
    notifier: Notifier,
    route_rx: watch::Receiver<RouteState>,
    favorites_rx: watch::Receiver<FavoriteSet>,
    probe: ScrollProbe,
    active: bool,
}

impl PlayListPage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Arc<dyn ListSource<Board>>,
        boards: Arc<dyn BoardApi>,
        groups: Arc<dyn GroupApi>,
        notifier: Notifier,
        route_rx: watch::Receiver<RouteState>,
        favorites_rx: watch::Receiver<FavoriteSet>,
        options: PageOptions,
    ) -> Self {
        Self {
            fetcher: PagedFetcher::new(source, options.fetch),
            probe: ScrollProbe::new(options.scroll_threshold),
            boards,
            groups_api: groups,
            filter_bar: FilterBar::new(Vec::new()),
            groups: Vec::new(),
            favorites: FavoriteSet::default(),
            notifier,
            route_rx,
            favorites_rx,
            active: false,
        }
    }

    /// Full refresh: the play-group bar, then the selected group's boards.
    /// With no group selected yet, the first one is picked automatically.
    pub async fn refresh(&mut self) {
        match self.groups_api.list().await {
            Ok(groups) => {
                self.groups = groups;
                let keys: Vec<FilterKey> = self
                    .groups
                    .iter()
                    .map(|group| FilterKey::Group(group.id))
                    .collect();
                self.filter_bar.set_keys(keys);
            }
            Err(err) => {
                self.notifier
                    .error("failed to load play groups", Some(err.to_string()));
                return;
            }
        }
        self.refresh_boards().await;
    }

    pub async fn refresh_boards(&mut self) {
        let filter = self.filter_bar.active().clone();
        match self.fetcher.refresh(filter).await {
            Ok(_) => {}
            Err(err) if err.is_flow_control() => {}
            Err(err) => self
                .notifier
                .error("failed to load boards", Some(err.to_string())),
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
                .error("failed to load more boards", Some(err.to_string())),
        }
    }

    pub async fn on_pull_refresh(&mut self) {
        self.refresh().await;
    }

    pub async fn on_swipe(&mut self, direction: SwipeDirection) {
        if self.filter_bar.shift(direction).is_some() {
            self.refresh_boards().await;
        }
    }

    pub async fn poll_signals(&mut self) {
        let route = self.route_rx.borrow_and_update().clone();
        if self.active {
            if let Some(filter) = route.filter_for(PAGE) {
                if filter != self.filter_bar.active() {
                    let filter = filter.clone();
                    self.on_filter_change(filter).await;
                }
            }
        }
        self.favorites = self.favorites_rx.borrow_and_update().clone();
    }

    pub async fn handle_event(&mut self, event: PlayListEvent) {
        match event {
            ListEvent::UpdateRequested(id, patch) => {
                match self.boards.update(id, patch).await {
                    Ok(_) => {
                        self.notifier.info("saved");
                        self.refresh_boards().await;
                    }
                    Err(err) => self
                        .notifier
                        .error("board operation failed", Some(err.to_string())),
                }
            }
            // Removing a board from a play list leaves the group.
            ListEvent::DeleteRequested(board_id) => {
                let FilterKey::Group(group_id) = self.filter_bar.active().clone() else {
                    self.notifier.error("no play group selected", None);
                    return;
                };
                match self.groups_api.leave(board_id, group_id).await {
                    Ok(()) => {
                        self.notifier.info("removed from this play group");
                        self.refresh().await;
                    }
                    Err(err) => self
                        .notifier
                        .error("failed to leave play group", Some(err.to_string())),
                }
            }
            ListEvent::FilterChanged(filter) => self.on_filter_change(filter).await,
            ListEvent::Selected(id) => debug!(%id, "board selected"),
            ListEvent::InfoRequested(id) => debug!(?id, "board info requested"),
            other => debug!(?other, "unhandled play list event"),
        }
    }

    pub async fn handle_group_event(&mut self, event: PlayGroupEvent) {
        match event {
            ListEvent::CreateRequested(group) => {
                let result = self.groups_api.create(group).await.map(drop);
                self.after_group_mutation(result, "new play group created")
                    .await;
            }
            ListEvent::UpdateRequested(id, patch) => {
                let result = self.groups_api.update(id, patch).await.map(drop);
                self.after_group_mutation(result, "saved").await;
            }
            ListEvent::DeleteRequested(id) => {
                let result = self.groups_api.delete(id).await;
                self.after_group_mutation(result, "deleted").await;
            }
            other => debug!(?other, "unhandled play group event"),
        }
    }

    pub fn tiles(&self) -> Vec<Tile> {
        project(&self.fetcher.snapshot(), &self.favorites)
    }

    pub fn state(&self) -> ListState<Board> {
        self.fetcher.snapshot()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn filter_bar(&self) -> &FilterBar {
        &self.filter_bar
    }

    pub fn context_title(&self) -> String {
        if let FilterKey::Group(id) = self.filter_bar.active() {
            if let Some(group) = self.groups.iter().find(|group| group.id == *id) {
                return format!("Play List : {}", group.name);
            }
        }
        "Play List".to_string()
    }

    async fn after_group_mutation(&mut self, result: anyhow::Result<()>, success: &str) {
        match result {
            Ok(()) => {
                self.notifier.info(success);
                self.refresh().await;
            }
            Err(err) => self
                .notifier
                .error("play group operation failed", Some(err.to_string())),
        }
    }
}

#[async_trait]
impl PageLifecycle for PlayListPage {
    async fn on_activate(&mut self) {
        self.active = true;
        let route = self.route_rx.borrow().clone();
        if let Some(filter) = route.filter_for(PAGE) {
            if matches!(filter, FilterKey::Group(_)) {
                self.filter_bar.select(filter.clone());
            }
        }
        self.favorites = self.favorites_rx.borrow().clone();
        self.refresh().await;
    }

    async fn on_deactivate(&mut self) {
        self.active = false;
        self.fetcher.reset();
    }

    async fn on_filter_change(&mut self, filter: FilterKey) {
        if !self.filter_bar.select(filter) {
            return;
        }
        self.refresh_boards().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{MockBoardApi, MockGroupApi};
    use crate::shell::{Level, Notification};
    use crate::test_helpers::{board, group, page, ScriptedSource};
    use tokio::sync::broadcast::Receiver;

    struct Harness {
        page: PlayListPage,
        source: Arc<ScriptedSource<Board>>,
        notifications: Receiver<Notification>,
    }

    fn harness(boards: MockBoardApi, groups: MockGroupApi) -> Harness {
        let source = ScriptedSource::new();
        let notifier = Notifier::default();
        let notifications = notifier.subscribe();
        let (_route_tx, route_rx) = watch::channel(RouteState::new(PAGE, FilterKey::All));
        let (_favorites_tx, favorites_rx) = watch::channel(FavoriteSet::default());

        let page = PlayListPage::new(
            source.clone(),
            Arc::new(boards),
            Arc::new(groups),
            notifier,
            route_rx,
            favorites_rx,
            PageOptions::default(),
        );
        Harness {
            page,
            source,
            notifications,
        }
    }

    fn drain(rx: &mut Receiver<Notification>) -> Vec<Notification> {
        let mut seen = Vec::new();
        while let Ok(notification) = rx.try_recv() {
            seen.push(notification);
        }
        seen
    }

    #[tokio::test]
    async fn activation_selects_the_first_group() {
        let mut groups = MockGroupApi::new();
        groups
            .expect_list()
            .returning(|| Ok(vec![group(1), group(2)]));
        let mut h = harness(MockBoardApi::new(), groups);
        h.source.push_page(
            &FilterKey::Group(group(1).id),
            page(&[board(1), board(2)], 2, 1),
        );

        h.page.on_activate().await;

        assert_eq!(*h.page.filter_bar().active(), FilterKey::Group(group(1).id));
        assert_eq!(h.page.tiles().len(), 2);
        assert_eq!(h.page.context_title(), "Play List : group-1");
        // The whole group arrived at once; nothing left to append.
        assert!(h.page.state().is_exhausted());
    }

    #[tokio::test]
    async fn delete_leaves_the_active_group() {
        let mut groups = MockGroupApi::new();
        groups.expect_list().returning(|| Ok(vec![group(1)]));
        groups.expect_leave().returning(|_, _| Ok(()));
        let mut h = harness(MockBoardApi::new(), groups);
        let key = FilterKey::Group(group(1).id);
        h.source.push_page(&key, page(&[board(1)], 1, 1));
        h.source.push_page(&key, page(&[], 0, 1));

        h.page.on_activate().await;
        drain(&mut h.notifications);

        h.page
            .handle_event(ListEvent::DeleteRequested(board(1).id))
            .await;

        let seen = drain(&mut h.notifications);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].level, Level::Info);
        assert!(h.page.tiles().is_empty());
    }

    #[tokio::test]
    async fn failed_leave_keeps_the_list() {
        let mut groups = MockGroupApi::new();
        groups.expect_list().returning(|| Ok(vec![group(1)]));
        groups
            .expect_leave()
            .returning(|_, _| Err(anyhow::anyhow!("rejected")));
        let mut h = harness(MockBoardApi::new(), groups);
        let key = FilterKey::Group(group(1).id);
        h.source.push_page(&key, page(&[board(1)], 1, 1));

        h.page.on_activate().await;
        drain(&mut h.notifications);

        h.page
            .handle_event(ListEvent::DeleteRequested(board(1).id))
            .await;

        let seen = drain(&mut h.notifications);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].level, Level::Error);
        assert_eq!(h.page.tiles().len(), 1);
        assert_eq!(h.source.calls(), 1);
    }
}
