use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::publisher::{NewPublisher, Publisher, PublisherPatch};
use crate::listsync::{ListError, TransportError};

use super::client::GraphQlClient;
use super::list_param::ListParam;

const PUBLISHER_LIST: &str = r#"
query PublisherList($filters: [Filter!], $sortings: [Sorting!], $pagination: Pagination) {
  publishers(filters: $filters, sortings: $sortings, pagination: $pagination) {
    items { id name description apiUrl status createdAt updatedAt }
    total
  }
}"#;

const CREATE_PUBLISHER: &str = r#"
mutation CreatePublisher($publisher: NewPublisher!) {
  createPublisher(publisher: $publisher) {
    id name description apiUrl status createdAt updatedAt
  }
}"#;

const UPDATE_PUBLISHER: &str = r#"
mutation UpdatePublisher($id: String!, $patch: PublisherPatch!) {
  updatePublisher(id: $id, patch: $patch) {
    id name description apiUrl status createdAt updatedAt
  }
}"#;

const DELETE_PUBLISHERS: &str = r#"
mutation($ids: [String]!) {
  deletePublishers(ids: $ids)
}"#;

#[derive(Debug, Clone, Deserialize)]
pub struct PublisherList {
    pub items: Vec<Publisher>,
    pub total: u64,
}

#[derive(Deserialize)]
struct PublisherListData {
    publishers: PublisherList,
}

pub async fn fetch_publisher_list(
    client: &GraphQlClient,
    param: &ListParam,
) -> Result<PublisherList, ListError> {
    let data: PublisherListData = client.query(PUBLISHER_LIST, param).await?;
    Ok(data.publishers)
}

pub async fn create_publisher(
    client: &GraphQlClient,
    publisher: &NewPublisher,
) -> Result<Publisher, ListError> {
    #[derive(Serialize)]
    struct Variables<'a> {
        publisher: &'a NewPublisher,
    }
    #[derive(Deserialize)]
    struct Data {
        #[serde(rename = "createPublisher")]
        create_publisher: Publisher,
    }
    let data: Data = client
        .query(CREATE_PUBLISHER, &Variables { publisher })
        .await?;
    Ok(data.create_publisher)
}

pub async fn update_publisher(
    client: &GraphQlClient,
    id: Uuid,
    patch: &PublisherPatch,
) -> Result<Publisher, ListError> {
    #[derive(Serialize)]
    struct Variables<'a> {
        id: Uuid,
        patch: &'a PublisherPatch,
    }
    #[derive(Deserialize)]
    struct Data {
        #[serde(rename = "updatePublisher")]
        update_publisher: Publisher,
    }
    let data: Data = client
        .query(UPDATE_PUBLISHER, &Variables { id, patch })
        .await?;
    Ok(data.update_publisher)
}

pub async fn delete_publishers(client: &GraphQlClient, ids: &[Uuid]) -> Result<(), ListError> {
    #[derive(Serialize)]
    struct Variables<'a> {
        ids: &'a [Uuid],
    }
    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Data {
        #[serde(rename = "deletePublishers")]
        delete_publishers: Option<bool>,
    }
    let _: Data = client.query(DELETE_PUBLISHERS, &Variables { ids }).await?;
    Ok(())
}

/// Publisher start/stop are control endpoints next to the GraphQL one, not
/// mutations.
pub async fn start_publisher(
    client: &GraphQlClient,
    control_base: &str,
    id: Uuid,
) -> Result<(), ListError> {
    control_call(client, control_base, "start-publisher", id).await
}

pub async fn stop_publisher(
    client: &GraphQlClient,
    control_base: &str,
    id: Uuid,
) -> Result<(), ListError> {
    control_call(client, control_base, "stop-publisher", id).await
}

async fn control_call(
    client: &GraphQlClient,
    control_base: &str,
    action: &str,
    id: Uuid,
) -> Result<(), ListError> {
    let url = format!("{}/{}/{}", control_base.trim_end_matches('/'), action, id);
    client
        .http()
        .get(url)
        .send()
        .await
        .map_err(TransportError::from)?
        .error_for_status()
        .map_err(TransportError::from)?;
    Ok(())
}
