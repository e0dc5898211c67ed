use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::group::GroupRef;
use crate::listsync::{Identify, TileSource};

/// A board as it appears in paginated lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identify for Board {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl TileSource for Board {
    fn title(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: Uuid,
    pub name: String,
}

/// The full board record shown in the info overlay. The `model` is the
/// board's canvas document, opaque to this module and carried as a JSON
/// string on the wire.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetail {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group: Option<GroupRef>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub creator: Option<UserRef>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub updater: Option<UserRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBoard {
    pub name: String,
    pub description: Option<String>,
    pub model: serde_json::Value,
    pub group_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub model: Option<serde_json::Value>,
    pub group_id: Option<Uuid>,
}
