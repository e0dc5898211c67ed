//! Scripted list sources and fixtures shared by unit and integration tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::domain::board::Board;
use crate::domain::font::Font;
use crate::domain::group::Group;
use crate::domain::publisher::{Publisher, PublisherStatus};
use crate::listsync::{
    FilterKey, Identify, ListError, ListPage, ListQuery, ListSource, TileSource,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestItem {
    pub id: Uuid,
    pub name: String,
}

impl Identify for TestItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl TileSource for TestItem {
    fn title(&self) -> &str {
        &self.name
    }
}

pub fn item(n: u32) -> TestItem {
    TestItem {
        id: Uuid::from_u128(u128::from(n)),
        name: format!("item-{n}"),
    }
}

pub fn page<T: Clone>(items: &[T], total: u64, page: u32) -> ListPage<T> {
    ListPage {
        items: items.to_vec(),
        total,
        page,
    }
}

pub fn board(n: u32) -> Board {
    let now = Utc::now();
    Board {
        id: Uuid::from_u128(u128::from(n)),
        name: format!("board-{n}"),
        description: None,
        thumbnail: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn group(n: u32) -> Group {
    let now = Utc::now();
    Group {
        id: Uuid::from_u128(0x1000 + u128::from(n)),
        name: format!("group-{n}"),
        description: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn font(n: u32) -> Font {
    Font {
        id: Uuid::from_u128(0x2000 + u128::from(n)),
        name: format!("font-{n}"),
        provider: "custom".to_string(),
        uri: None,
        path: None,
        active: true,
    }
}

pub fn publisher(n: u32) -> Publisher {
    let now = Utc::now();
    Publisher {
        id: Uuid::from_u128(0x3000 + u128::from(n)),
        name: format!("publisher-{n}"),
        description: None,
        api_url: None,
        status: PublisherStatus::Stopped,
        created_at: now,
        updated_at: now,
    }
}

struct ScriptedReply<T> {
    result: Result<ListPage<T>, ListError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// A [`ListSource`] that serves pre-scripted replies per filter key.
///
/// Replies can carry a gate so tests control the order in which concurrent
/// fetches resolve; the call counter backs single-flight assertions.
pub struct ScriptedSource<T> {
    replies: Mutex<HashMap<FilterKey, VecDeque<ScriptedReply<T>>>>,
    calls: AtomicUsize,
}

impl<T> ScriptedSource<T> {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn push_page(&self, filter: &FilterKey, page: ListPage<T>) {
        self.push(filter, Ok(page), None);
    }

    /// Scripts a reply held back until the returned sender fires (or drops).
    pub fn push_gated_page(&self, filter: &FilterKey, page: ListPage<T>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(filter, Ok(page), Some(rx));
        tx
    }

    pub fn push_error(&self, filter: &FilterKey, error: ListError) {
        self.push(filter, Err(error), None);
    }

    /// Transport calls issued so far, in-flight ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Spins until `n` calls have been issued; keeps concurrent tests
    /// deterministic without sleeping for fixed amounts.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    fn push(
        &self,
        filter: &FilterKey,
        result: Result<ListPage<T>, ListError>,
        gate: Option<oneshot::Receiver<()>>,
    ) {
        self.replies
            .lock()
            .entry(filter.clone())
            .or_default()
            .push_back(ScriptedReply { result, gate });
    }
}

#[async_trait]
impl<T> ListSource<T> for ScriptedSource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<T>, ListError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .get_mut(&query.filter)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted reply for filter {}", query.filter));
        if let Some(gate) = reply.gate {
            let _ = gate.await;
        }
        reply.result
    }
}
