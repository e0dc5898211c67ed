use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::publisher::{NewPublisher, Publisher, PublisherPatch};
use crate::listsync::{ListError, ListPage, ListQuery, ListSource};
use crate::transport::{self, GraphQlClient, ListParam};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublisherApi: Send + Sync {
    async fn create(&self, publisher: NewPublisher) -> Result<Publisher>;
    async fn update(&self, id: Uuid, patch: PublisherPatch) -> Result<Publisher>;
    async fn delete_many(&self, ids: Vec<Uuid>) -> Result<()>;
    async fn start(&self, id: Uuid) -> Result<()>;
    async fn stop(&self, id: Uuid) -> Result<()>;
}

#[derive(Clone)]
pub struct PublisherService {
    client: GraphQlClient,
    control_base: String,
}

impl PublisherService {
    pub fn new(client: GraphQlClient, control_base: impl Into<String>) -> Self {
        Self {
            client,
            control_base: control_base.into(),
        }
    }
}

#[async_trait]
impl ListSource<Publisher> for PublisherService {
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<Publisher>, ListError> {
        let list =
            transport::publisher::fetch_publisher_list(&self.client, &ListParam::from(query))
                .await?;
        Ok(ListPage {
            items: list.items,
            total: list.total,
            page: query.page,
        })
    }
}

#[async_trait]
impl PublisherApi for PublisherService {
    async fn create(&self, publisher: NewPublisher) -> Result<Publisher> {
        Ok(transport::publisher::create_publisher(&self.client, &publisher).await?)
    }

    async fn update(&self, id: Uuid, patch: PublisherPatch) -> Result<Publisher> {
        Ok(transport::publisher::update_publisher(&self.client, id, &patch).await?)
    }

    async fn delete_many(&self, ids: Vec<Uuid>) -> Result<()> {
        transport::publisher::delete_publishers(&self.client, &ids).await?;
        Ok(())
    }

    async fn start(&self, id: Uuid) -> Result<()> {
        transport::publisher::start_publisher(&self.client, &self.control_base, id).await?;
        Ok(())
    }

    async fn stop(&self, id: Uuid) -> Result<()> {
        transport::publisher::stop_publisher(&self.client, &self.control_base, id).await?;
        Ok(())
    }
}
