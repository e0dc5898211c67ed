use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::font::{Font, FontPatch, NewFont};
use crate::listsync::ListError;

use super::client::GraphQlClient;
use super::list_param::ListParam;

const FONT_LIST: &str = r#"
query FontList($filters: [Filter!], $sortings: [Sorting!], $pagination: Pagination) {
  fonts(filters: $filters, sortings: $sortings, pagination: $pagination) {
    items { id name provider uri path active }
    total
  }
}"#;

const CREATE_FONT: &str = r#"
mutation($font: NewFont!) {
  createFont(font: $font) {
    id name provider uri path active
  }
}"#;

const UPDATE_FONT: &str = r#"
mutation UpdateFont($id: String!, $patch: FontPatch!) {
  updateFont(id: $id, patch: $patch) {
    id name provider uri path active
  }
}"#;

const DELETE_FONT: &str = r#"
mutation($id: String!) {
  deleteFont(id: $id) { id }
}"#;

#[derive(Debug, Clone, Deserialize)]
pub struct FontList {
    pub items: Vec<Font>,
    pub total: u64,
}

#[derive(Deserialize)]
struct FontListData {
    fonts: FontList,
}

#[derive(Serialize)]
struct IdVariables {
    id: Uuid,
}

pub async fn fetch_font_list(
    client: &GraphQlClient,
    param: &ListParam,
) -> Result<FontList, ListError> {
    let data: FontListData = client.query(FONT_LIST, param).await?;
    Ok(data.fonts)
}

pub async fn create_font(client: &GraphQlClient, font: &NewFont) -> Result<Font, ListError> {
    #[derive(Serialize)]
    struct Variables<'a> {
        font: &'a NewFont,
    }
    #[derive(Deserialize)]
    struct Data {
        #[serde(rename = "createFont")]
        create_font: Font,
    }
    let data: Data = client.query(CREATE_FONT, &Variables { font }).await?;
    Ok(data.create_font)
}

pub async fn update_font(
    client: &GraphQlClient,
    id: Uuid,
    patch: &FontPatch,
) -> Result<Font, ListError> {
    #[derive(Serialize)]
    struct Variables<'a> {
        id: Uuid,
        patch: &'a FontPatch,
    }
    #[derive(Deserialize)]
    struct Data {
        #[serde(rename = "updateFont")]
        update_font: Font,
    }
    let data: Data = client.query(UPDATE_FONT, &Variables { id, patch }).await?;
    Ok(data.update_font)
}

pub async fn delete_font(client: &GraphQlClient, id: Uuid) -> Result<(), ListError> {
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Deleted {
        id: Uuid,
    }
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Data {
        #[serde(rename = "deleteFont")]
        delete_font: Deleted,
    }
    let _: Data = client.query(DELETE_FONT, &IdVariables { id }).await?;
    Ok(())
}
