//! End-to-end checks of the paginated list synchronization contract:
//! staleness discard, append dedup, exhaustion, single-flight and failure
//! behavior, driven through scripted sources with controlled resolution
//! order.

use std::sync::Arc;

use uuid::Uuid;

use boardwalk::listsync::{
    ApplicationError, FetchOptions, FetchOutcome, FilterKey, ListError, LoadPhase, PagedFetcher,
    RejectionKind,
};
use boardwalk::test_helpers::{item, page, ScriptedSource, TestItem};

fn fetcher(source: Arc<ScriptedSource<TestItem>>, page_size: u32) -> PagedFetcher<TestItem> {
    PagedFetcher::new(
        source,
        FetchOptions {
            page_size,
            ..FetchOptions::default()
        },
    )
}

#[tokio::test]
async fn last_issued_refresh_wins() {
    let source = ScriptedSource::new();
    let group_a = FilterKey::Group(Uuid::from_u128(0xa));
    let group_b = FilterKey::Group(Uuid::from_u128(0xb));
    let gate = source.push_gated_page(&group_a, page(&[item(1)], 1, 1));
    source.push_page(&group_b, page(&[item(2)], 1, 1));

    let fetcher = fetcher(source.clone(), 30);

    let slow = tokio::spawn({
        let fetcher = fetcher.clone();
        let group_a = group_a.clone();
        async move { fetcher.refresh(group_a).await }
    });
    source.wait_for_calls(1).await;

    // The newer filter's refresh resolves first.
    assert_eq!(
        fetcher.refresh(group_b.clone()).await.unwrap(),
        FetchOutcome::Applied
    );

    // Now the slow response for the old filter lands, and is discarded.
    gate.send(()).unwrap();
    assert_eq!(
        slow.await.unwrap().unwrap(),
        FetchOutcome::DiscardedStale
    );

    let state = fetcher.snapshot();
    assert_eq!(state.filter, group_b);
    assert_eq!(state.items, vec![item(2)]);
    assert_eq!(state.phase, LoadPhase::Ready);
}

#[tokio::test]
async fn group_to_favorites_switch_discards_the_outstanding_refresh() {
    let source = ScriptedSource::new();
    let group = FilterKey::Group(Uuid::from_u128(0x9));
    let gate = source.push_gated_page(&group, page(&[item(1), item(2)], 2, 1));
    source.push_page(&FilterKey::Favorites, page(&[item(3)], 1, 1));

    let fetcher = fetcher(source.clone(), 30);

    let outstanding = tokio::spawn({
        let fetcher = fetcher.clone();
        let group = group.clone();
        async move { fetcher.refresh(group).await }
    });
    source.wait_for_calls(1).await;

    fetcher.refresh(FilterKey::Favorites).await.unwrap();

    gate.send(()).unwrap();
    assert_eq!(
        outstanding.await.unwrap().unwrap(),
        FetchOutcome::DiscardedStale
    );

    let state = fetcher.snapshot();
    assert_eq!(state.filter, FilterKey::Favorites);
    assert_eq!(state.items, vec![item(3)]);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn append_never_duplicates_an_item_already_present() {
    let source = ScriptedSource::new();
    source.push_page(&FilterKey::All, page(&[item(1), item(2), item(3)], 5, 1));
    source.push_page(&FilterKey::All, page(&[item(3), item(4), item(5)], 5, 2));

    let fetcher = fetcher(source, 3);
    fetcher.refresh(FilterKey::All).await.unwrap();
    fetcher.append().await.unwrap();

    assert_eq!(
        fetcher.snapshot().items,
        vec![item(1), item(2), item(3), item(4), item(5)]
    );
}

#[tokio::test]
async fn five_items_fetched_in_pages_of_two() {
    let source = ScriptedSource::new();
    source.push_page(&FilterKey::All, page(&[item(1), item(2)], 5, 1));
    source.push_page(&FilterKey::All, page(&[item(3), item(4)], 5, 2));
    source.push_page(&FilterKey::All, page(&[item(5)], 5, 3));

    let fetcher = fetcher(source.clone(), 2);

    fetcher.refresh(FilterKey::All).await.unwrap();
    let state = fetcher.snapshot();
    assert_eq!(state.items, vec![item(1), item(2)]);
    assert_eq!(state.total, 5);
    assert_eq!(state.current_page, 1);
    assert!(!fetcher.is_exhausted());

    fetcher.append().await.unwrap();
    let state = fetcher.snapshot();
    assert_eq!(state.items.len(), 4);
    assert_eq!(state.current_page, 2);
    assert!(!fetcher.is_exhausted());

    fetcher.append().await.unwrap();
    let state = fetcher.snapshot();
    assert_eq!(state.items, vec![item(1), item(2), item(3), item(4), item(5)]);
    assert_eq!(state.current_page, 3);
    assert!(fetcher.is_exhausted());

    // Exhausted: further appends are no-ops and issue no transport call.
    assert!(matches!(fetcher.append().await, Err(ListError::Exhausted)));
    assert_eq!(fetcher.snapshot().items.len(), 5);
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn append_while_loading_is_rejected_without_a_transport_call() {
    let source = ScriptedSource::new();
    source.push_page(&FilterKey::All, page(&[item(1)], 3, 1));
    let gate = source.push_gated_page(&FilterKey::All, page(&[item(2)], 3, 2));

    let fetcher = fetcher(source.clone(), 1);
    fetcher.refresh(FilterKey::All).await.unwrap();

    let outstanding = tokio::spawn({
        let fetcher = fetcher.clone();
        async move { fetcher.append().await }
    });
    source.wait_for_calls(2).await;
    assert!(fetcher.is_loading());

    let before = fetcher.snapshot();
    assert!(matches!(fetcher.append().await, Err(ListError::Busy)));
    assert!(matches!(
        fetcher.refresh(FilterKey::All).await,
        Err(ListError::Busy)
    ));
    assert_eq!(source.calls(), 2);
    assert_eq!(fetcher.snapshot().items, before.items);

    gate.send(()).unwrap();
    outstanding.await.unwrap().unwrap();
    assert_eq!(fetcher.snapshot().items, vec![item(1), item(2)]);
}

#[tokio::test]
async fn filter_change_during_append_discards_the_append() {
    let source = ScriptedSource::new();
    source.push_page(&FilterKey::All, page(&[item(1)], 2, 1));
    let gate = source.push_gated_page(&FilterKey::All, page(&[item(2)], 2, 2));
    source.push_page(&FilterKey::Favorites, page(&[item(7)], 1, 1));

    let fetcher = fetcher(source.clone(), 1);
    fetcher.refresh(FilterKey::All).await.unwrap();

    let outstanding = tokio::spawn({
        let fetcher = fetcher.clone();
        async move { fetcher.append().await }
    });
    source.wait_for_calls(2).await;

    fetcher.refresh(FilterKey::Favorites).await.unwrap();

    gate.send(()).unwrap();
    assert_eq!(
        outstanding.await.unwrap().unwrap(),
        FetchOutcome::DiscardedStale
    );

    let state = fetcher.snapshot();
    assert_eq!(state.filter, FilterKey::Favorites);
    assert_eq!(state.items, vec![item(7)]);
    assert_eq!(state.current_page, 1);
}

#[tokio::test]
async fn failed_refresh_retains_last_known_good_items() {
    let source = ScriptedSource::new();
    source.push_page(&FilterKey::All, page(&[item(1), item(2)], 2, 1));
    source.push_error(
        &FilterKey::All,
        ListError::Application(ApplicationError {
            kind: RejectionKind::Authorization,
            message: "forbidden".to_string(),
        }),
    );

    let fetcher = fetcher(source, 30);
    fetcher.refresh(FilterKey::All).await.unwrap();

    let err = fetcher.refresh(FilterKey::All).await.unwrap_err();
    assert!(matches!(err, ListError::Application(_)));

    let state = fetcher.snapshot();
    assert_eq!(state.items, vec![item(1), item(2)]);
    assert_eq!(state.phase, LoadPhase::Error);
    assert!(!fetcher.is_loading());
}
