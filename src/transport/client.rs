use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::listsync::{ApplicationError, ListError, RejectionKind, TransportError};

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Deserialize)]
struct GraphQlResponse<D> {
    data: Option<D>,
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
    #[serde(default)]
    extensions: Option<ErrorExtensions>,
}

#[derive(Deserialize, Default)]
struct ErrorExtensions {
    #[serde(default)]
    code: Option<String>,
}

fn rejection_kind(entry: &GraphQlErrorEntry) -> RejectionKind {
    let code = entry
        .extensions
        .as_ref()
        .and_then(|extensions| extensions.code.as_deref());
    match code {
        Some("BAD_USER_INPUT") | Some("GRAPHQL_VALIDATION_FAILED") => RejectionKind::Validation,
        Some("UNAUTHENTICATED") | Some("FORBIDDEN") => RejectionKind::Authorization,
        _ => RejectionKind::Other,
    }
}

/// Thin GraphQL-over-HTTP client shared by every service.
///
/// Network and HTTP failures surface as [`TransportError`]; a GraphQL error
/// envelope surfaces as [`ApplicationError`] carrying the first error.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphQlClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The underlying HTTP client, for the few non-GraphQL control
    /// endpoints (publisher start/stop).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub async fn query<V, D>(&self, query: &str, variables: &V) -> Result<D, ListError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        debug!(endpoint = %self.endpoint, "issuing graphql request");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(TransportError::from)?
            .error_for_status()
            .map_err(TransportError::from)?;

        let envelope: GraphQlResponse<D> =
            response.json().await.map_err(TransportError::from)?;

        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            let first = &errors[0];
            return Err(ApplicationError {
                kind: rejection_kind(first),
                message: first.message.clone(),
            }
            .into());
        }

        envelope.data.ok_or_else(|| {
            ListError::Application(ApplicationError {
                kind: RejectionKind::Other,
                message: "response carried neither data nor errors".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: Option<&str>) -> GraphQlErrorEntry {
        GraphQlErrorEntry {
            message: "nope".to_string(),
            extensions: code.map(|code| ErrorExtensions {
                code: Some(code.to_string()),
            }),
        }
    }

    #[test]
    fn envelope_decodes_data_and_errors() {
        let body = r#"{
            "data": null,
            "errors": [
                { "message": "forbidden", "extensions": { "code": "FORBIDDEN" } }
            ]
        }"#;
        let envelope: GraphQlResponse<serde_json::Value> = serde_json::from_str(body).unwrap();
        let errors = envelope.errors.unwrap();
        assert_eq!(errors[0].message, "forbidden");
        assert_eq!(rejection_kind(&errors[0]), RejectionKind::Authorization);

        let body = r#"{ "data": { "boards": { "items": [], "total": 0 } } }"#;
        let envelope: GraphQlResponse<serde_json::Value> = serde_json::from_str(body).unwrap();
        assert!(envelope.data.is_some());
        assert!(envelope.errors.is_none());
    }

    #[test]
    fn rejection_kinds_map_from_error_codes() {
        assert_eq!(
            rejection_kind(&entry(Some("BAD_USER_INPUT"))),
            RejectionKind::Validation
        );
        assert_eq!(
            rejection_kind(&entry(Some("FORBIDDEN"))),
            RejectionKind::Authorization
        );
        assert_eq!(
            rejection_kind(&entry(Some("UNAUTHENTICATED"))),
            RejectionKind::Authorization
        );
        assert_eq!(rejection_kind(&entry(None)), RejectionKind::Other);
    }
}
