use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::group::{Group, GroupPatch, NewGroup, PlayGroupDetail};
use crate::listsync::ListError;

use super::client::GraphQlClient;

const GROUP_LIST: &str = r#"
query {
  groups {
    items { id name description createdAt updatedAt }
    total
  }
}"#;

const CREATE_GROUP: &str = r#"
mutation CreateGroup($group: NewGroup!) {
  createGroup(group: $group) {
    id name description createdAt updatedAt
  }
}"#;

const UPDATE_GROUP: &str = r#"
mutation UpdateGroup($id: String!, $patch: GroupPatch!) {
  updateGroup(id: $id, patch: $patch) {
    id name description createdAt updatedAt
  }
}"#;

const DELETE_GROUP: &str = r#"
mutation($id: String!) {
  deleteGroup(id: $id) { id }
}"#;

const JOIN_GROUP: &str = r#"
mutation JoinGroup($id: String!, $boardIds: [String]!) {
  joinGroup(id: $id, boardIds: $boardIds) { id name }
}"#;

const PLAY_GROUP_LIST: &str = r#"
query {
  playGroups {
    items { id name description createdAt updatedAt }
    total
  }
}"#;

const PLAY_GROUP_BY_ID: &str = r#"
query FetchPlayGroupById($id: String!) {
  playGroup(id: $id) {
    id
    name
    description
    boards { id name description thumbnail createdAt updatedAt }
  }
}"#;

const CREATE_PLAY_GROUP: &str = r#"
mutation CreatePlayGroup($group: NewPlayGroup!) {
  createPlayGroup(group: $group) {
    id name description createdAt updatedAt
  }
}"#;

const UPDATE_PLAY_GROUP: &str = r#"
mutation UpdatePlayGroup($id: String!, $patch: PlayGroupPatch!) {
  updatePlayGroup(id: $id, patch: $patch) {
    id name description createdAt updatedAt
  }
}"#;

const DELETE_PLAY_GROUP: &str = r#"
mutation($id: String!) {
  deletePlayGroup(id: $id) { id }
}"#;

const LEAVE_PLAY_GROUP: &str = r#"
mutation LeavePlayGroup($boardId: String!, $groupId: String!) {
  leavePlayGroup(boardId: $boardId, groupId: $groupId) { id }
}"#;

#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct GroupList {
    pub items: Vec<Group>,
    pub total: u64,
}

#[derive(Deserialize)]
struct GroupListData {
    groups: GroupList,
}

#[derive(Deserialize)]
struct PlayGroupListData {
    #[serde(rename = "playGroups")]
    play_groups: GroupList,
}

#[derive(Deserialize)]
struct PlayGroupData {
    #[serde(rename = "playGroup")]
    play_group: PlayGroupDetail,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct MutatedGroup {
    id: Uuid,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Serialize)]
struct IdVariables {
    id: Uuid,
}

#[derive(Serialize)]
struct GroupVariables<'a> {
    group: &'a NewGroup,
}

#[derive(Serialize)]
struct PatchVariables<'a> {
    id: Uuid,
    patch: &'a GroupPatch,
}

pub async fn fetch_group_list(client: &GraphQlClient) -> Result<Vec<Group>, ListError> {
    let data: GroupListData = client.query(GROUP_LIST, &serde_json::json!({})).await?;
    Ok(data.groups.items)
}

pub async fn create_group(client: &GraphQlClient, group: &NewGroup) -> Result<Group, ListError> {
    #[derive(Deserialize)]
    struct Data {
        #[serde(rename = "createGroup")]
        create_group: Group,
    }
    let data: Data = client
        .query(CREATE_GROUP, &GroupVariables { group })
        .await?;
    Ok(data.create_group)
}

pub async fn update_group(
    client: &GraphQlClient,
    id: Uuid,
    patch: &GroupPatch,
) -> Result<Group, ListError> {
    #[derive(Deserialize)]
    struct Data {
        #[serde(rename = "updateGroup")]
        update_group: Group,
    }
    let data: Data = client
        .query(UPDATE_GROUP, &PatchVariables { id, patch })
        .await?;
    Ok(data.update_group)
}

pub async fn delete_group(client: &GraphQlClient, id: Uuid) -> Result<(), ListError> {
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Data {
        #[serde(rename = "deleteGroup")]
        delete_group: MutatedGroup,
    }
    let _: Data = client.query(DELETE_GROUP, &IdVariables { id }).await?;
    Ok(())
}

pub async fn join_group(
    client: &GraphQlClient,
    group_id: Uuid,
    board_ids: &[Uuid],
) -> Result<(), ListError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Variables<'a> {
        id: Uuid,
        board_ids: &'a [Uuid],
    }
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Data {
        #[serde(rename = "joinGroup")]
        join_group: MutatedGroup,
    }
    let _: Data = client
        .query(
            JOIN_GROUP,
            &Variables {
                id: group_id,
                board_ids,
            },
        )
        .await?;
    Ok(())
}

pub async fn fetch_play_group_list(client: &GraphQlClient) -> Result<Vec<Group>, ListError> {
    let data: PlayGroupListData = client
        .query(PLAY_GROUP_LIST, &serde_json::json!({}))
        .await?;
    Ok(data.play_groups.items)
}

pub async fn fetch_play_group(
    client: &GraphQlClient,
    id: Uuid,
) -> Result<PlayGroupDetail, ListError> {
    let data: PlayGroupData = client.query(PLAY_GROUP_BY_ID, &IdVariables { id }).await?;
    Ok(data.play_group)
}

pub async fn create_play_group(
    client: &GraphQlClient,
    group: &NewGroup,
) -> Result<Group, ListError> {
    #[derive(Deserialize)]
    struct Data {
        #[serde(rename = "createPlayGroup")]
        create_play_group: Group,
    }
    let data: Data = client
        .query(CREATE_PLAY_GROUP, &GroupVariables { group })
        .await?;
    Ok(data.create_play_group)
}

pub async fn update_play_group(
    client: &GraphQlClient,
    id: Uuid,
    patch: &GroupPatch,
) -> Result<Group, ListError> {
    #[derive(Deserialize)]
    struct Data {
        #[serde(rename = "updatePlayGroup")]
        update_play_group: Group,
    }
    let data: Data = client
        .query(UPDATE_PLAY_GROUP, &PatchVariables { id, patch })
        .await?;
    Ok(data.update_play_group)
}

pub async fn delete_play_group(client: &GraphQlClient, id: Uuid) -> Result<(), ListError> {
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Data {
        #[serde(rename = "deletePlayGroup")]
        delete_play_group: MutatedGroup,
    }
    let _: Data = client.query(DELETE_PLAY_GROUP, &IdVariables { id }).await?;
    Ok(())
}

pub async fn leave_play_group(
    client: &GraphQlClient,
    board_id: Uuid,
    group_id: Uuid,
) -> Result<(), ListError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Variables {
        board_id: Uuid,
        group_id: Uuid,
    }
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Data {
        #[serde(rename = "leavePlayGroup")]
        leave_play_group: MutatedGroup,
    }
    let _: Data = client
        .query(LEAVE_PLAY_GROUP, &Variables { board_id, group_id })
        .await?;
    Ok(())
}
