use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::listsync::{Identify, TileSource};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Font {
    pub id: Uuid,
    pub name: String,
    pub provider: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    pub active: bool,
}

impl Identify for Font {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl TileSource for Font {
    fn title(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> Option<&str> {
        Some(&self.provider)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewFont {
    pub name: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FontPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
