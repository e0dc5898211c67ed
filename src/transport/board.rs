use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::board::{Board, BoardDetail, BoardPatch, NewBoard};
use crate::listsync::ListError;

use super::client::GraphQlClient;
use super::list_param::ListParam;

const BOARD_LIST: &str = r#"
query BoardList($filters: [Filter!], $sortings: [Sorting!], $pagination: Pagination) {
  boards(filters: $filters, sortings: $sortings, pagination: $pagination) {
    items { id name description thumbnail createdAt updatedAt }
    total
  }
}"#;

const BOARD_BY_ID: &str = r#"
query FetchBoardById($id: String!) {
  board(id: $id) {
    id
    name
    description
    group { id name }
    thumbnail
    model
    createdAt
    creator { id name }
    updatedAt
    updater { id name }
  }
}"#;

const CREATE_BOARD: &str = r#"
mutation CreateBoard($board: NewBoard!) {
  createBoard(board: $board) {
    id name description thumbnail createdAt updatedAt
  }
}"#;

const UPDATE_BOARD: &str = r#"
mutation UpdateBoard($id: String!, $patch: BoardPatch!) {
  updateBoard(id: $id, patch: $patch) {
    id name description thumbnail createdAt updatedAt
  }
}"#;

const DELETE_BOARD: &str = r#"
mutation($id: String!) {
  deleteBoard(id: $id) { id }
}"#;

#[derive(Debug, Clone, Deserialize)]
pub struct BoardList {
    pub items: Vec<Board>,
    pub total: u64,
}

#[derive(Deserialize)]
struct BoardListData {
    boards: BoardList,
}

#[derive(Deserialize)]
struct BoardData {
    board: BoardDetail,
}

#[derive(Deserialize)]
struct CreateBoardData {
    #[serde(rename = "createBoard")]
    create_board: Board,
}

#[derive(Deserialize)]
struct UpdateBoardData {
    #[serde(rename = "updateBoard")]
    update_board: Board,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct DeleteBoardData {
    #[serde(rename = "deleteBoard")]
    delete_board: DeletedRef,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct DeletedRef {
    id: Uuid,
}

#[derive(Serialize)]
struct IdVariables {
    id: Uuid,
}

pub async fn fetch_board_list(
    client: &GraphQlClient,
    param: &ListParam,
) -> Result<BoardList, ListError> {
    let data: BoardListData = client.query(BOARD_LIST, param).await?;
    Ok(data.boards)
}

pub async fn fetch_board(client: &GraphQlClient, id: Uuid) -> Result<BoardDetail, ListError> {
    let data: BoardData = client.query(BOARD_BY_ID, &IdVariables { id }).await?;
    Ok(data.board)
}

pub async fn create_board(client: &GraphQlClient, board: &NewBoard) -> Result<Board, ListError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Wire<'a> {
        name: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<&'a str>,
        // The canvas document travels as a JSON string.
        model: String,
        group_id: Uuid,
    }
    #[derive(Serialize)]
    struct Variables<'a> {
        board: Wire<'a>,
    }

    let variables = Variables {
        board: Wire {
            name: &board.name,
            description: board.description.as_deref(),
            model: board.model.to_string(),
            group_id: board.group_id,
        },
    };
    let data: CreateBoardData = client.query(CREATE_BOARD, &variables).await?;
    Ok(data.create_board)
}

pub async fn update_board(
    client: &GraphQlClient,
    id: Uuid,
    patch: &BoardPatch,
) -> Result<Board, ListError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Wire<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        model: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        group_id: Option<Uuid>,
    }
    #[derive(Serialize)]
    struct Variables<'a> {
        id: Uuid,
        patch: Wire<'a>,
    }

    let variables = Variables {
        id,
        patch: Wire {
            name: patch.name.as_deref(),
            description: patch.description.as_deref(),
            model: patch.model.as_ref().map(|model| model.to_string()),
            group_id: patch.group_id,
        },
    };
    let data: UpdateBoardData = client.query(UPDATE_BOARD, &variables).await?;
    Ok(data.update_board)
}

pub async fn delete_board(client: &GraphQlClient, id: Uuid) -> Result<(), ListError> {
    let _: DeleteBoardData = client.query(DELETE_BOARD, &IdVariables { id }).await?;
    Ok(())
}
