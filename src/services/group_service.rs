use anyhow::{bail, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::board::Board;
use crate::domain::group::{Group, GroupPatch, NewGroup};
use crate::listsync::{FilterKey, ListError, ListPage, ListQuery, ListSource};
use crate::transport::{self, GraphQlClient};

/// Board groups and play groups share one service; only the endpoints
/// differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Board,
    Play,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Group>>;
    async fn create(&self, group: NewGroup) -> Result<Group>;
    async fn update(&self, id: Uuid, patch: GroupPatch) -> Result<Group>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    /// Removes a board from a play group. Board groups do not support this.
    async fn leave(&self, board_id: Uuid, group_id: Uuid) -> Result<()>;
}

#[derive(Clone)]
pub struct GroupService {
    client: GraphQlClient,
    kind: GroupKind,
}

impl GroupService {
    pub fn new(client: GraphQlClient, kind: GroupKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }
}

#[async_trait]
impl GroupApi for GroupService {
    async fn list(&self) -> Result<Vec<Group>> {
        let groups = match self.kind {
            GroupKind::Board => transport::group::fetch_group_list(&self.client).await?,
            GroupKind::Play => transport::group::fetch_play_group_list(&self.client).await?,
        };
        Ok(groups)
    }

    async fn create(&self, group: NewGroup) -> Result<Group> {
        let created = match self.kind {
            GroupKind::Board => transport::group::create_group(&self.client, &group).await?,
            GroupKind::Play => transport::group::create_play_group(&self.client, &group).await?,
        };
        Ok(created)
    }

    async fn update(&self, id: Uuid, patch: GroupPatch) -> Result<Group> {
        let updated = match self.kind {
            GroupKind::Board => transport::group::update_group(&self.client, id, &patch).await?,
            GroupKind::Play => {
                transport::group::update_play_group(&self.client, id, &patch).await?
            }
        };
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        match self.kind {
            GroupKind::Board => transport::group::delete_group(&self.client, id).await?,
            GroupKind::Play => transport::group::delete_play_group(&self.client, id).await?,
        }
        Ok(())
    }

    async fn leave(&self, board_id: Uuid, group_id: Uuid) -> Result<()> {
        match self.kind {
            GroupKind::Board => bail!("board groups do not support leaving"),
            GroupKind::Play => {
                transport::group::leave_play_group(&self.client, board_id, group_id).await?
            }
        }
        Ok(())
    }
}

/// List source for play-list pages: a play group's boards arrive wholesale
/// from the play-group resolver, so every fetch is a single exhausted page.
#[derive(Clone)]
pub struct PlayBoardSource {
    client: GraphQlClient,
}

impl PlayBoardSource {
    pub fn new(client: GraphQlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListSource<Board> for PlayBoardSource {
    async fn fetch_page(&self, query: &ListQuery) -> Result<ListPage<Board>, ListError> {
        let boards = match &query.filter {
            FilterKey::Group(id) => {
                transport::group::fetch_play_group(&self.client, *id)
                    .await?
                    .boards
            }
            // No play group selected yet; nothing to show.
            _ => Vec::new(),
        };
        let total = boards.len() as u64;
        // Later pages are empty by construction.
        let items = if query.page == 1 { boards } else { Vec::new() };
        Ok(ListPage {
            items,
            total,
            page: query.page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn play_board_source_is_empty_without_a_group() {
        let client = GraphQlClient::new("http://localhost/graphql").unwrap();
        let source = PlayBoardSource::new(client);
        let page = source
            .fetch_page(&ListQuery {
                filter: FilterKey::All,
                page: 1,
                page_size: 30,
                sort_field: "name".to_string(),
                sort_descending: true,
            })
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn board_groups_reject_leave() {
        let client = GraphQlClient::new("http://localhost/graphql").unwrap();
        let service = GroupService::new(client, GroupKind::Board);
        let err = service
            .leave(Uuid::from_u128(1), Uuid::from_u128(2))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("do not support"));
    }
}
