use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::favorite::FavoriteSet;
use crate::transport::{self, GraphQlClient};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteApi: Send + Sync {
    async fn toggle(&self, routing: Uuid) -> Result<()>;
    async fn snapshot(&self) -> Result<FavoriteSet>;
}

#[derive(Clone)]
pub struct FavoriteService {
    client: GraphQlClient,
}

impl FavoriteService {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FavoriteApi for FavoriteService {
    async fn toggle(&self, routing: Uuid) -> Result<()> {
        transport::favorite::toggle_favorite(&self.client, routing).await?;
        Ok(())
    }

    async fn snapshot(&self) -> Result<FavoriteSet> {
        let favorites = transport::favorite::fetch_favorites(&self.client).await?;
        Ok(FavoriteSet::from(favorites.as_slice()))
    }
}
