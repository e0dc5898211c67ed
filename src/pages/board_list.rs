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
use crate::services::{BoardApi, FavoriteApi, GroupApi};
use crate::shell::{Notifier, RouteState};

use super::{PageLifecycle, PageOptions};

pub const PAGE: &str = "board-list";

pub type BoardListEvent = ListEvent<NewBoard, BoardPatch>;
pub type GroupEvent = ListEvent<NewGroup, GroupPatch>;

/// The board list: a group bar (all / favorites / one key per group) over an
/// infinitely scrolling tile list. Owns its list state exclusively; mutations
/// are delegated to the services and acknowledged with a refresh.
pub struct BoardListPage {
    fetcher: PagedFetcher<Board>,
    boards: Arc<dyn BoardApi>,
    groups_api: Arc<dyn GroupApi>,
    favorites_api: Arc<dyn FavoriteApi>,
    filter_bar: FilterBar,
    groups: Vec<Group>,
    favorites: FavoriteSet,
    notifier: Notifier,
    route_rx: watch::Receiver<RouteState>,
    favorites_rx: watch::Receiver<FavoriteSet>,
    probe: ScrollProbe,
    active: bool,
}

impl BoardListPage {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Arc<dyn ListSource<Board>>,
        boards: Arc<dyn BoardApi>,
        groups: Arc<dyn GroupApi>,
        favorites: Arc<dyn FavoriteApi>,
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
            favorites_api: favorites,
            filter_bar: FilterBar::new(vec![FilterKey::All, FilterKey::Favorites]),
            groups: Vec::new(),
            favorites: FavoriteSet::default(),
            notifier,
            route_rx,
            favorites_rx,
            active: false,
        }
    }

    /// Full refresh: the group bar first, then the active board list.
    pub async fn refresh(&mut self) {
        match self.groups_api.list().await {
            Ok(groups) => {
                self.groups = groups;
                let mut keys = vec![FilterKey::All, FilterKey::Favorites];
                keys.extend(self.groups.iter().map(|group| FilterKey::Group(group.id)));
                self.filter_bar.set_keys(keys);
            }
            Err(err) => {
                self.notifier
                    .error("failed to load groups", Some(err.to_string()));
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

    /// Scroll probe: appends the next page once the remaining distance drops
    /// under the threshold, gated on loading and exhaustion.
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

    /// Swiping moves one filter over; past either end the gesture is
    /// blocked.
    pub async fn on_swipe(&mut self, direction: SwipeDirection) {
        if self.filter_bar.shift(direction).is_some() {
            self.refresh_boards().await;
        }
    }

    /// Applies the latest route and favorites snapshots. Only a changed
    /// filter for this page triggers a refetch; a favorites update merely
    /// redecorates the tiles.
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

    pub async fn handle_event(&mut self, event: BoardListEvent) {
        match event {
            ListEvent::CreateRequested(board) => {
                let result = self.boards.create(board).await.map(drop);
                self.after_board_mutation(result, "new board created").await;
            }
            ListEvent::UpdateRequested(id, patch) => {
                let result = self.boards.update(id, patch).await.map(drop);
                self.after_board_mutation(result, "saved").await;
            }
            ListEvent::DeleteRequested(id) => {
                let result = self.boards.delete(id).await;
                self.after_board_mutation(result, "deleted").await;
            }
            ListEvent::FavoriteToggled(id) => match self.favorites_api.toggle(id).await {
                // Membership only changes what the favorites view lists.
                Ok(()) => {
                    if *self.filter_bar.active() == FilterKey::Favorites {
                        self.refresh_boards().await;
                    }
                }
                Err(err) => self
                    .notifier
                    .error("failed to toggle favorite", Some(err.to_string())),
            },
            ListEvent::FilterChanged(filter) => self.on_filter_change(filter).await,
            ListEvent::Selected(id) => debug!(%id, "board selected"),
            ListEvent::InfoRequested(id) => debug!(?id, "board info requested"),
        }
    }

    /// Group CRUD raised from the group info overlay; any change redraws the
    /// whole bar.
    pub async fn handle_group_event(&mut self, event: GroupEvent) {
        match event {
            ListEvent::CreateRequested(group) => {
                let result = self.groups_api.create(group).await.map(drop);
                self.after_group_mutation(result, "new group created").await;
            }
            ListEvent::UpdateRequested(id, patch) => {
                let result = self.groups_api.update(id, patch).await.map(drop);
                self.after_group_mutation(result, "saved").await;
            }
            ListEvent::DeleteRequested(id) => {
                let result = self.groups_api.delete(id).await;
                self.after_group_mutation(result, "deleted").await;
            }
            other => debug!(?other, "unhandled group event"),
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
                return format!("Board List : {}", group.name);
            }
        }
        "Board List".to_string()
    }

    async fn after_board_mutation(&mut self, result: anyhow::Result<()>, success: &str) {
        match result {
            Ok(()) => {
                self.notifier.info(success);
                self.refresh_boards().await;
            }
            // The list did not change; no refresh after a failed mutation.
            Err(err) => self
                .notifier
                .error("board operation failed", Some(err.to_string())),
        }
    }

    async fn after_group_mutation(&mut self, result: anyhow::Result<()>, success: &str) {
        match result {
            Ok(()) => {
                self.notifier.info(success);
                self.refresh().await;
            }
            Err(err) => self
                .notifier
                .error("group operation failed", Some(err.to_string())),
        }
    }
}

#[async_trait]
impl PageLifecycle for BoardListPage {
    async fn on_activate(&mut self) {
        self.active = true;
        let route = self.route_rx.borrow().clone();
        if let Some(filter) = route.filter_for(PAGE) {
            self.filter_bar.select(filter.clone());
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
    use crate::services::{MockBoardApi, MockFavoriteApi, MockGroupApi};
    use crate::shell::{Level, Notification};
    use crate::test_helpers::{board, group, page, ScriptedSource};
    use tokio::sync::broadcast::Receiver;

    struct Harness {
        page: BoardListPage,
        source: Arc<ScriptedSource<Board>>,
        notifications: Receiver<Notification>,
        route_tx: watch::Sender<RouteState>,
        favorites_tx: watch::Sender<FavoriteSet>,
    }

    fn harness(boards: MockBoardApi, groups: MockGroupApi, favorites: MockFavoriteApi) -> Harness {
        let source = ScriptedSource::new();
        let notifier = Notifier::default();
        let notifications = notifier.subscribe();
        let (route_tx, route_rx) = watch::channel(RouteState::new(PAGE, FilterKey::All));
        let (favorites_tx, favorites_rx) = watch::channel(FavoriteSet::default());

        let page = BoardListPage::new(
            source.clone(),
            Arc::new(boards),
            Arc::new(groups),
            Arc::new(favorites),
            notifier,
            route_rx,
            favorites_rx,
            PageOptions::default(),
        );
        Harness {
            page,
            source,
            notifications,
            route_tx,
            favorites_tx,
        }
    }

    fn groups_returning(groups: Vec<Group>) -> MockGroupApi {
        let mut mock = MockGroupApi::new();
        mock.expect_list().returning(move || Ok(groups.clone()));
        mock
    }

    fn drain(rx: &mut Receiver<Notification>) -> Vec<Notification> {
        let mut seen = Vec::new();
        while let Ok(notification) = rx.try_recv() {
            seen.push(notification);
        }
        seen
    }

    #[tokio::test]
    async fn activation_loads_groups_then_boards() {
        let mut h = harness(
            MockBoardApi::new(),
            groups_returning(vec![group(1)]),
            MockFavoriteApi::new(),
        );
        h.source
            .push_page(&FilterKey::All, page(&[board(1), board(2)], 2, 1));

        h.page.on_activate().await;

        assert_eq!(h.page.tiles().len(), 2);
        assert_eq!(h.page.filter_bar().keys().len(), 3);
        assert_eq!(h.source.calls(), 1);
        assert_eq!(h.page.context_title(), "Board List");
    }

    #[tokio::test]
    async fn route_churn_with_same_filter_does_not_refetch() {
        let mut h = harness(
            MockBoardApi::new(),
            groups_returning(vec![]),
            MockFavoriteApi::new(),
        );
        h.source.push_page(&FilterKey::All, page(&[board(1)], 1, 1));

        h.page.on_activate().await;
        h.route_tx
            .send(RouteState::new(PAGE, FilterKey::All))
            .unwrap();
        h.page.poll_signals().await;

        assert_eq!(h.source.calls(), 1);
    }

    #[tokio::test]
    async fn favorites_snapshot_redecorates_without_refetch() {
        let mut h = harness(
            MockBoardApi::new(),
            groups_returning(vec![]),
            MockFavoriteApi::new(),
        );
        h.source.push_page(&FilterKey::All, page(&[board(1)], 1, 1));

        h.page.on_activate().await;
        assert!(!h.page.tiles()[0].starred);

        h.favorites_tx
            .send(FavoriteSet::from_iter([board(1).id]))
            .unwrap();
        h.page.poll_signals().await;

        assert!(h.page.tiles()[0].starred);
        assert_eq!(h.source.calls(), 1);
    }

    #[tokio::test]
    async fn route_filter_change_refetches() {
        let mut h = harness(
            MockBoardApi::new(),
            groups_returning(vec![]),
            MockFavoriteApi::new(),
        );
        h.source.push_page(&FilterKey::All, page(&[board(1)], 1, 1));
        h.source
            .push_page(&FilterKey::Favorites, page(&[board(2)], 1, 1));

        h.page.on_activate().await;
        h.route_tx
            .send(RouteState::new(PAGE, FilterKey::Favorites))
            .unwrap();
        h.page.poll_signals().await;

        assert_eq!(h.source.calls(), 2);
        assert_eq!(h.page.state().filter, FilterKey::Favorites);
        assert_eq!(h.page.tiles()[0].id, board(2).id);
    }

    #[tokio::test]
    async fn failed_mutation_notifies_once_and_skips_refresh() {
        let mut boards = MockBoardApi::new();
        boards
            .expect_delete()
            .returning(|_| Err(anyhow::anyhow!("rejected")));
        let mut h = harness(boards, groups_returning(vec![]), MockFavoriteApi::new());
        h.source.push_page(&FilterKey::All, page(&[board(1)], 1, 1));

        h.page.on_activate().await;
        drain(&mut h.notifications);

        h.page
            .handle_event(ListEvent::DeleteRequested(board(1).id))
            .await;

        let seen = drain(&mut h.notifications);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].level, Level::Error);
        assert_eq!(h.source.calls(), 1);
    }

    #[tokio::test]
    async fn successful_mutation_notifies_and_refreshes() {
        let mut boards = MockBoardApi::new();
        boards.expect_delete().returning(|_| Ok(()));
        let mut h = harness(boards, groups_returning(vec![]), MockFavoriteApi::new());
        h.source.push_page(&FilterKey::All, page(&[board(1)], 1, 1));
        h.source.push_page(&FilterKey::All, page(&[], 0, 1));

        h.page.on_activate().await;
        drain(&mut h.notifications);

        h.page
            .handle_event(ListEvent::DeleteRequested(board(1).id))
            .await;

        let seen = drain(&mut h.notifications);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].level, Level::Info);
        assert_eq!(h.source.calls(), 2);
        assert!(h.page.tiles().is_empty());
    }

    #[tokio::test]
    async fn swipe_is_blocked_past_the_first_filter() {
        let mut h = harness(
            MockBoardApi::new(),
            groups_returning(vec![]),
            MockFavoriteApi::new(),
        );
        h.source.push_page(&FilterKey::All, page(&[board(1)], 1, 1));

        h.page.on_activate().await;
        h.page.on_swipe(SwipeDirection::Right).await;

        assert_eq!(h.source.calls(), 1);
        assert_eq!(*h.page.filter_bar().active(), FilterKey::All);
    }

    #[tokio::test]
    async fn deactivation_discards_state() {
        let mut h = harness(
            MockBoardApi::new(),
            groups_returning(vec![]),
            MockFavoriteApi::new(),
        );
        h.source.push_page(&FilterKey::All, page(&[board(1)], 1, 1));

        h.page.on_activate().await;
        assert_eq!(h.page.tiles().len(), 1);

        h.page.on_deactivate().await;
        assert!(h.page.tiles().is_empty());
        assert!(!h.page.state().has_loaded());
    }
}
