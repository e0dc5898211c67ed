use async_trait::async_trait;

use crate::listsync::{FetchOptions, FilterKey};

pub mod board_list;
pub mod font_list;
pub mod play_list;
pub mod publisher_list;

pub use board_list::BoardListPage;
pub use font_list::FontListPage;
pub use play_list::PlayListPage;
pub use publisher_list::PublisherListPage;

/// Lifecycle hooks invoked by the host controller. Pages implement these
/// instead of assuming any base-class lifecycle; the host decides when a
/// page becomes visible and when its route-selected filter changes.
#[async_trait]
pub trait PageLifecycle: Send {
    async fn on_activate(&mut self);
    async fn on_deactivate(&mut self);
    async fn on_filter_change(&mut self, filter: FilterKey);
}

#[derive(Debug, Clone)]
pub struct PageOptions {
    pub fetch: FetchOptions,
    /// Remaining scroll distance below which an append intent fires.
    pub scroll_threshold: f64,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            fetch: FetchOptions::default(),
            scroll_threshold: 40.0,
        }
    }
}
