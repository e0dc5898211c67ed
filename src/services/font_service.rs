use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::font::{Font, FontPatch, NewFont};
use crate::listsync::{ListError, ListPage, ListQuery, ListSource};
use crate::transport::{self, GraphQlClient, ListParam};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FontApi: Send + Sync {
    async fn create(&self, font: NewFont) -> Result<Font>;
    async fn update(&self, id: Uuid, patch: FontPatch) -> Result<Font>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[derive(Clone)]
pub struct FontService {
    client: GraphQlClient,
}

impl FontService {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }

    /// Flips a font's active flag.
    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<Font> {
        let patch = FontPatch {
            active: Some(active),
            ..FontPatch::default()
        };
        Ok(transport::font::update_font(&self.client, id, &patch).await?)
    }
}

#[async_trait]
impl ListSource<Font> for FontService {
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<Font>, ListError> {
        let list = transport::font::fetch_font_list(&self.client, &ListParam::from(query)).await?;
        Ok(ListPage {
            items: list.items,
            total: list.total,
            page: query.page,
        })
    }
}

#[async_trait]
impl FontApi for FontService {
    async fn create(&self, font: NewFont) -> Result<Font> {
        Ok(transport::font::create_font(&self.client, &font).await?)
    }

    async fn update(&self, id: Uuid, patch: FontPatch) -> Result<Font> {
        Ok(transport::font::update_font(&self.client, id, &patch).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        transport::font::delete_font(&self.client, id).await?;
        Ok(())
    }
}
