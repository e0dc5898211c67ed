use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::board::{Board, BoardDetail, BoardPatch, NewBoard};
use crate::listsync::{FilterKey, ListError, ListPage, ListQuery, ListSource};
use crate::transport::{self, GraphQlClient, ListParam, Pagination};

/// Board mutations as seen by the pages. Split from [`ListSource`] so pages
/// can be exercised against mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn create(&self, board: NewBoard) -> Result<Board>;
    async fn update(&self, id: Uuid, patch: BoardPatch) -> Result<Board>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[derive(Clone)]
pub struct BoardService {
    client: GraphQlClient,
}

impl BoardService {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: Uuid) -> Result<BoardDetail> {
        Ok(transport::board::fetch_board(&self.client, id).await?)
    }

    pub async fn create(&self, board: &NewBoard) -> Result<Board> {
        Ok(transport::board::create_board(&self.client, board).await?)
    }

    pub async fn update(&self, id: Uuid, patch: &BoardPatch) -> Result<Board> {
        Ok(transport::board::update_board(&self.client, id, patch).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        transport::board::delete_board(&self.client, id).await?;
        Ok(())
    }
}

#[async_trait]
impl ListSource<Board> for BoardService {
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<Board>, ListError> {
        // Favorites come from their own endpoint; everything else is the
        // generic filtered board list.
        let list = match &query.filter {
            FilterKey::Favorites => {
                transport::favorite::fetch_favorite_board_list(
                    &self.client,
                    &Pagination::from(query),
                )
                .await?
            }
            _ => transport::board::fetch_board_list(&self.client, &ListParam::from(query)).await?,
        };
        Ok(ListPage {
            items: list.items,
            total: list.total,
            page: query.page,
        })
    }
}

#[async_trait]
impl BoardApi for BoardService {
    async fn create(&self, board: NewBoard) -> Result<Board> {
        BoardService::create(self, &board).await
    }

    async fn update(&self, id: Uuid, patch: BoardPatch) -> Result<Board> {
        BoardService::update(self, id, &patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        BoardService::delete(self, id).await
    }
}
