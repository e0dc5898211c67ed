use super::query::FilterKey;

/// Swipe gestures map onto filter navigation: left goes to the next filter,
/// right to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// The ordered set of available filters and the active selection.
///
/// Owns nothing but selection state; the owning page reacts to changes by
/// refreshing its fetcher.
#[derive(Debug, Clone)]
pub struct FilterBar {
    keys: Vec<FilterKey>,
    active: usize,
}

impl FilterBar {
    pub fn new(keys: Vec<FilterKey>) -> Self {
        let keys = if keys.is_empty() {
            vec![FilterKey::All]
        } else {
            keys
        };
        Self { keys, active: 0 }
    }

    pub fn keys(&self) -> &[FilterKey] {
        &self.keys
    }

    pub fn active(&self) -> &FilterKey {
        &self.keys[self.active]
    }

    /// Replaces the available keys, keeping the active selection when it is
    /// still present.
    pub fn set_keys(&mut self, keys: Vec<FilterKey>) {
        let current = self.active().clone();
        *self = FilterBar::new(keys);
        if let Some(index) = self.keys.iter().position(|key| *key == current) {
            self.active = index;
        }
    }

    /// Selects `key`; returns true when this changed the active selection.
    /// An unknown key is appended, matching a route pointing at a group that
    /// has not been listed yet.
    pub fn select(&mut self, key: FilterKey) -> bool {
        if *self.active() == key {
            return false;
        }
        match self.keys.iter().position(|candidate| *candidate == key) {
            Some(index) => self.active = index,
            None => {
                self.keys.push(key);
                self.active = self.keys.len() - 1;
            }
        }
        true
    }

    /// Moves the selection one step; swiping past either end is blocked,
    /// not wrapped. Returns the newly active key when the selection moved.
    pub fn shift(&mut self, direction: SwipeDirection) -> Option<FilterKey> {
        let next = match direction {
            SwipeDirection::Left => self.active.checked_add(1).filter(|i| *i < self.keys.len()),
            SwipeDirection::Right => self.active.checked_sub(1),
        }?;
        self.active = next;
        Some(self.active().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn bar() -> FilterBar {
        FilterBar::new(vec![
            FilterKey::All,
            FilterKey::Favorites,
            FilterKey::Group(Uuid::from_u128(1)),
        ])
    }

    #[test]
    fn select_reports_change() {
        let mut bar = bar();
        assert!(bar.select(FilterKey::Favorites));
        assert!(!bar.select(FilterKey::Favorites));
        assert_eq!(*bar.active(), FilterKey::Favorites);
    }

    #[test]
    fn shift_saturates_at_both_ends() {
        let mut bar = bar();
        assert_eq!(bar.shift(SwipeDirection::Right), None);
        assert_eq!(bar.shift(SwipeDirection::Left), Some(FilterKey::Favorites));
        bar.shift(SwipeDirection::Left);
        assert_eq!(bar.shift(SwipeDirection::Left), None);
        assert_eq!(*bar.active(), FilterKey::Group(Uuid::from_u128(1)));
    }

    #[test]
    fn set_keys_keeps_active_selection_when_possible() {
        let mut bar = bar();
        bar.select(FilterKey::Favorites);
        bar.set_keys(vec![FilterKey::Favorites, FilterKey::All]);
        assert_eq!(*bar.active(), FilterKey::Favorites);

        bar.set_keys(vec![FilterKey::Group(Uuid::from_u128(2))]);
        assert_eq!(*bar.active(), FilterKey::Group(Uuid::from_u128(2)));
    }

    #[test]
    fn unknown_selection_is_appended() {
        let mut bar = bar();
        let unknown = FilterKey::Group(Uuid::from_u128(9));
        assert!(bar.select(unknown.clone()));
        assert_eq!(*bar.active(), unknown);
    }
}
