use uuid::Uuid;

use crate::domain::favorite::FavoriteSet;

use super::query::FilterKey;
use super::state::{Identify, ListState};

/// What a list item contributes to its tile. Rendering stays with the host;
/// this is the data contract only.
pub trait TileSource: Identify {
    fn title(&self) -> &str;

    fn subtitle(&self) -> Option<&str> {
        None
    }

    fn thumbnail(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub thumbnail: Option<String>,
    pub starred: bool,
}

/// Projects the list state into tiles, decorating each with its favorite
/// membership. Pure; never touches the fetcher.
pub fn project<T: TileSource>(state: &ListState<T>, favorites: &FavoriteSet) -> Vec<Tile> {
    state
        .items
        .iter()
        .map(|item| Tile {
            id: item.id(),
            title: item.title().to_string(),
            subtitle: item.subtitle().map(str::to_string),
            thumbnail: item.thumbnail().map(str::to_string),
            starred: favorites.contains(item.id()),
        })
        .collect()
}

/// User intent raised by a rendered list. The owning page consumes these;
/// the projection never calls mutation endpoints itself.
#[derive(Debug, Clone)]
pub enum ListEvent<New, Patch> {
    Selected(Uuid),
    InfoRequested(Option<Uuid>),
    CreateRequested(New),
    UpdateRequested(Uuid, Patch),
    DeleteRequested(Uuid),
    FavoriteToggled(Uuid),
    FilterChanged(FilterKey),
}

/// Scroll geometry reported by the host's scrollable region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset: f64,
    /// Visible extent of the region.
    pub viewport: f64,
    /// Total extent of the content.
    pub content: f64,
}

impl ScrollMetrics {
    pub fn remaining(&self) -> f64 {
        (self.content - (self.offset + self.viewport)).max(0.0)
    }
}

/// Emits an append intent once the remaining scroll distance drops under a
/// fixed threshold. The owning page still gates on `is_loading` and
/// `is_exhausted` before acting.
#[derive(Debug, Clone, Copy)]
pub struct ScrollProbe {
    threshold: f64,
}

impl ScrollProbe {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn should_append(&self, metrics: ScrollMetrics) -> bool {
        metrics.remaining() <= self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::item;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 100.0, 1000.0, false)]
    #[case(860.0, 100.0, 1000.0, true)]
    #[case(900.0, 100.0, 1000.0, true)]
    #[case(0.0, 100.0, 80.0, true)]
    fn probe_threshold(
        #[case] offset: f64,
        #[case] viewport: f64,
        #[case] content: f64,
        #[case] expected: bool,
    ) {
        let probe = ScrollProbe::new(40.0);
        let metrics = ScrollMetrics {
            offset,
            viewport,
            content,
        };
        assert_eq!(probe.should_append(metrics), expected);
    }

    #[test]
    fn projection_marks_favorites() {
        let mut state = ListState::new(FilterKey::All);
        state.items = vec![item(1), item(2)];
        let favorites = FavoriteSet::from_iter([item(2).id]);

        let tiles = project(&state, &favorites);
        assert_eq!(tiles.len(), 2);
        assert!(!tiles[0].starred);
        assert!(tiles[1].starred);
        assert_eq!(tiles[0].title, "item-1");
    }
}
