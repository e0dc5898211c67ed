use std::env;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;

use boardwalk::config::AppConfig;
use boardwalk::domain::favorite::FavoriteSet;
use boardwalk::listsync::{FilterKey, ListState, ScrollMetrics, Tile};
use boardwalk::pages::{
    board_list, play_list, BoardListPage, FontListPage, PageLifecycle, PlayListPage,
    PublisherListPage,
};
use boardwalk::services::{
    BoardService, FavoriteService, FontService, GroupKind, GroupService, PlayBoardSource,
    PublisherService,
};
use boardwalk::shell::{Notifier, RouteState};
use boardwalk::transport::GraphQlClient;

/// Minimal stand-in for the hosting shell: wires one list page against a
/// live endpoint and dumps its projection.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load()?;
    let client = GraphQlClient::new(&config.endpoint)?;
    let notifier = Notifier::default();
    let mut notifications = notifier.subscribe();

    let which = env::args().nth(1).unwrap_or_else(|| "board".to_string());
    match which.as_str() {
        "board" => run_board_list(&config, client, notifier).await,
        "play" => run_play_list(&config, client, notifier).await,
        "font" => run_font_list(&config, client, notifier).await,
        "publisher" => run_publisher_list(&config, client, notifier).await,
        other => anyhow::bail!("unknown page '{other}' (expected board, play, font or publisher)"),
    }

    while let Ok(notification) = notifications.try_recv() {
        eprintln!("[{:?}] {}", notification.level, notification.message);
    }

    Ok(())
}

async fn run_board_list(config: &AppConfig, client: GraphQlClient, notifier: Notifier) {
    let (_route_tx, route_rx) =
        watch::channel(RouteState::new(board_list::PAGE, FilterKey::All));
    let (_favorites_tx, favorites_rx) = watch::channel(FavoriteSet::default());

    let boards = Arc::new(BoardService::new(client.clone()));
    let groups = Arc::new(GroupService::new(client.clone(), GroupKind::Board));
    let favorites = Arc::new(FavoriteService::new(client));

    let mut page = BoardListPage::new(
        boards.clone(),
        boards,
        groups,
        favorites,
        notifier,
        route_rx,
        favorites_rx,
        config.board_page_options(),
    );

    page.on_activate().await;

    // One simulated near-bottom scroll pulls the next page, if any.
    page.on_scroll(ScrollMetrics {
        offset: 960.0,
        viewport: 600.0,
        content: 1600.0,
    })
    .await;

    dump(&page.context_title(), &page.tiles(), &page.state());
}

async fn run_play_list(config: &AppConfig, client: GraphQlClient, notifier: Notifier) {
    let (_route_tx, route_rx) =
        watch::channel(RouteState::new(play_list::PAGE, FilterKey::All));
    let (_favorites_tx, favorites_rx) = watch::channel(FavoriteSet::default());

    let source = Arc::new(PlayBoardSource::new(client.clone()));
    let boards = Arc::new(BoardService::new(client.clone()));
    let groups = Arc::new(GroupService::new(client, GroupKind::Play));

    let mut page = PlayListPage::new(
        source,
        boards,
        groups,
        notifier,
        route_rx,
        favorites_rx,
        config.board_page_options(),
    );

    page.on_activate().await;
    dump(&page.context_title(), &page.tiles(), &page.state());
}

async fn run_font_list(config: &AppConfig, client: GraphQlClient, notifier: Notifier) {
    let fonts = Arc::new(FontService::new(client));

    let mut page = FontListPage::new(
        fonts.clone(),
        fonts,
        config.font_providers.clone(),
        notifier,
        config.board_page_options(),
    );

    page.on_activate().await;
    dump("Font List", &page.tiles(), &page.state());
}

async fn run_publisher_list(config: &AppConfig, client: GraphQlClient, notifier: Notifier) {
    let publishers = Arc::new(PublisherService::new(client, config.control_base.clone()));

    let mut page = PublisherListPage::new(
        publishers.clone(),
        publishers,
        notifier,
        config.publisher_page_options(),
    );

    page.on_activate().await;

    println!("Publisher List");
    for publisher in page.rows() {
        println!("  {}  {}  {:?}", publisher.id, publisher.name, publisher.status);
    }
    let state = page.state();
    println!("{} of {} loaded", state.items.len(), state.total);
}

fn dump<T>(title: &str, tiles: &[Tile], state: &ListState<T>) {
    println!("{title}");
    for tile in tiles {
        let star = if tile.starred { "*" } else { " " };
        println!("{star} {}  {}", tile.id, tile.title);
    }
    println!(
        "{} of {} loaded (page {})",
        state.items.len(),
        state.total,
        state.current_page
    );
}
