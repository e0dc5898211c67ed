use tracing::warn;
use uuid::Uuid;

/// The reserved route segment that selects the favorites view.
pub const FAVORITES_SEGMENT: &str = "favor";

/// The active grouping/category selector for a list page.
///
/// This is a deliberate enum rather than a raw string: the favorites view is
/// a distinct remote endpoint, not a generic filter value, and a group
/// selector always carries a concrete id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FilterKey {
    /// No filter; the whole list.
    #[default]
    All,
    /// The dedicated favorites view.
    Favorites,
    /// Items belonging to one group.
    Group(Uuid),
    /// Items from one provider (font lists).
    Provider(String),
}

impl FilterKey {
    /// Parses the filter segment of a route (`""`, `"favor"`, or a group id).
    pub fn from_route_segment(segment: &str) -> Self {
        match segment {
            "" => FilterKey::All,
            FAVORITES_SEGMENT => FilterKey::Favorites,
            other => match other.parse::<Uuid>() {
                Ok(id) => FilterKey::Group(id),
                Err(_) => {
                    warn!(segment = other, "unrecognized filter segment, falling back to All");
                    FilterKey::All
                }
            },
        }
    }

    pub fn route_segment(&self) -> String {
        match self {
            FilterKey::All => String::new(),
            FilterKey::Favorites => FAVORITES_SEGMENT.to_string(),
            FilterKey::Group(id) => id.to_string(),
            FilterKey::Provider(provider) => provider.clone(),
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterKey::All => write!(f, "all"),
            FilterKey::Favorites => write!(f, "favorites"),
            FilterKey::Group(id) => write!(f, "group:{id}"),
            FilterKey::Provider(provider) => write!(f, "provider:{provider}"),
        }
    }
}

/// One page-bounded fetch request. Constructed fresh per call, never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: FilterKey,
    pub page: u32,
    pub page_size: u32,
    pub sort_field: String,
    pub sort_descending: bool,
}

/// The result of one fetch.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_segment_round_trip() {
        let id = Uuid::new_v4();
        for key in [FilterKey::All, FilterKey::Favorites, FilterKey::Group(id)] {
            assert_eq!(FilterKey::from_route_segment(&key.route_segment()), key);
        }
    }

    #[test]
    fn bad_segment_falls_back_to_all() {
        assert_eq!(FilterKey::from_route_segment("not-a-uuid"), FilterKey::All);
    }
}
