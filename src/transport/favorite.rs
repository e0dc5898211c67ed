use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::favorite::Favorite;
use crate::listsync::ListError;

use super::board::BoardList;
use super::client::GraphQlClient;
use super::list_param::Pagination;

// Favorites are served by a dedicated endpoint joining the favorite table,
// not by a generic filter on the board list.
const FAVORITE_BOARD_LIST: &str = r#"
query FavoriteBoardList($pagination: Pagination) {
  favoriteBoards(pagination: $pagination) {
    items { id name description thumbnail createdAt updatedAt }
    total
  }
}"#;

const FAVORITES: &str = r#"
query {
  favorites {
    items { id routing }
    total
  }
}"#;

const TOGGLE_FAVORITE: &str = r#"
mutation ToggleFavorite($routing: String!) {
  toggleFavorite(routing: $routing) { id routing }
}"#;

#[derive(Deserialize)]
struct FavoriteBoardListData {
    #[serde(rename = "favoriteBoards")]
    favorite_boards: BoardList,
}

#[derive(Deserialize)]
struct FavoritesData {
    favorites: FavoriteList,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct FavoriteList {
    items: Vec<Favorite>,
    total: u64,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct ToggleFavoriteData {
    #[serde(rename = "toggleFavorite")]
    toggle_favorite: Option<Favorite>,
}

#[derive(Serialize)]
struct PaginationVariables<'a> {
    pagination: &'a Pagination,
}

#[derive(Serialize)]
struct RoutingVariables {
    routing: Uuid,
}

pub async fn fetch_favorite_board_list(
    client: &GraphQlClient,
    pagination: &Pagination,
) -> Result<BoardList, ListError> {
    let data: FavoriteBoardListData = client
        .query(FAVORITE_BOARD_LIST, &PaginationVariables { pagination })
        .await?;
    Ok(data.favorite_boards)
}

pub async fn fetch_favorites(client: &GraphQlClient) -> Result<Vec<Favorite>, ListError> {
    let data: FavoritesData = client.query(FAVORITES, &serde_json::json!({})).await?;
    Ok(data.favorites.items)
}

pub async fn toggle_favorite(client: &GraphQlClient, routing: Uuid) -> Result<(), ListError> {
    let _: ToggleFavoriteData = client
        .query(TOGGLE_FAVORITE, &RoutingVariables { routing })
        .await?;
    Ok(())
}
