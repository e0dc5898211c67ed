use crate::listsync::FilterKey;

/// Snapshot of the host's routing state: which page is shown and which
/// filter segment its route carries. Delivered over a `watch` channel; pages
/// compare against their last-seen value and only react to relevant change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteState {
    pub page: String,
    pub filter: FilterKey,
}

impl RouteState {
    pub fn new(page: impl Into<String>, filter: FilterKey) -> Self {
        Self {
            page: page.into(),
            filter,
        }
    }

    pub fn from_path(page: impl Into<String>, segment: &str) -> Self {
        Self {
            page: page.into(),
            filter: FilterKey::from_route_segment(segment),
        }
    }

    /// The filter this route selects for `page`, if it addresses that page.
    pub fn filter_for(&self, page: &str) -> Option<&FilterKey> {
        (self.page == page).then_some(&self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_for_matches_page_only() {
        let route = RouteState::from_path("board-list", "favor");
        assert_eq!(route.filter_for("board-list"), Some(&FilterKey::Favorites));
        assert_eq!(route.filter_for("play-list"), None);
    }
}
