use std::collections::HashSet;

use serde::Deserialize;
use uuid::Uuid;

/// One favorite record; `routing` is the id of the favored item.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: Uuid,
    pub routing: Uuid,
}

/// Read-only snapshot of the user's favored item ids, owned by the host and
/// pushed to pages on change. Pages only ever read the latest snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: HashSet<Uuid>,
}

impl FavoriteSet {
    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<Uuid> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl From<&[Favorite]> for FavoriteSet {
    fn from(favorites: &[Favorite]) -> Self {
        favorites.iter().map(|favorite| favorite.routing).collect()
    }
}
