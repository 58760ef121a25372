//! Graph-backed directory lookups

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use traincast_core::DirectoryLookup;
use traincast_domain::constants::GRAPH_BATCH_LIMIT;
use traincast_domain::{DirectoryUser, Result, TraincastError};

use super::{encode_segment, GraphClient};

const USER_SELECT: &str = "id,displayName,mail,userPrincipalName,onPremisesSyncEnabled";

/// Resolves users (and their mailbox routing) through Microsoft Graph.
#[derive(Clone)]
pub struct GraphDirectory {
    client: GraphClient,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphUser {
    id: String,
    display_name: Option<String>,
    mail: Option<String>,
    user_principal_name: Option<String>,
    on_premises_sync_enabled: Option<bool>,
}

impl GraphUser {
    fn into_directory_user(self, requested: &str) -> DirectoryUser {
        let address = self
            .mail
            .filter(|m| !m.trim().is_empty())
            .or(self.user_principal_name)
            .unwrap_or_else(|| requested.to_string());
        let display_name =
            self.display_name.filter(|n| !n.trim().is_empty()).unwrap_or_else(|| address.clone());
        DirectoryUser {
            id: self.id,
            display_name,
            address,
            on_premises: self.on_premises_sync_enabled.unwrap_or(false),
        }
    }
}

#[derive(Serialize)]
struct BatchRequest {
    requests: Vec<BatchItem>,
}

#[derive(Serialize)]
struct BatchItem {
    id: String,
    method: &'static str,
    url: String,
}

#[derive(Deserialize)]
struct BatchResponse {
    responses: Vec<BatchItemResponse>,
}

#[derive(Deserialize)]
struct BatchItemResponse {
    id: String,
    status: u16,
    #[serde(default)]
    body: Value,
}

fn user_path(identifier: &str) -> String {
    format!("/users/{}?$select={}", encode_segment(identifier), USER_SELECT)
}

/// Pull `error.message` out of a Graph error body.
fn graph_error_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

impl GraphDirectory {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    async fn resolve_chunk(&self, identifiers: &[String]) -> Result<Vec<DirectoryUser>> {
        let request = BatchRequest {
            requests: identifiers
                .iter()
                .enumerate()
                .map(|(index, identifier)| BatchItem {
                    id: index.to_string(),
                    method: "GET",
                    url: user_path(identifier),
                })
                .collect(),
        };

        let builder = self.client.request(Method::POST, "/$batch").await?.json(&request);
        let batch: BatchResponse = self.client.send_json(builder).await?;

        let mut by_id: HashMap<String, BatchItemResponse> =
            batch.responses.into_iter().map(|r| (r.id.clone(), r)).collect();

        identifiers
            .iter()
            .enumerate()
            .map(|(index, identifier)| {
                let item = by_id.remove(&index.to_string()).ok_or_else(|| {
                    TraincastError::External(format!(
                        "Graph batch returned no response for '{identifier}'"
                    ))
                })?;

                match item.status {
                    200 => {
                        let user: GraphUser = serde_json::from_value(item.body).map_err(|e| {
                            TraincastError::External(format!(
                                "unexpected Graph user payload for '{identifier}': {e}"
                            ))
                        })?;
                        Ok(user.into_directory_user(identifier))
                    }
                    404 => Err(TraincastError::NotFound(format!(
                        "directory user '{identifier}' not found"
                    ))),
                    401 | 403 => Err(TraincastError::Auth(format!(
                        "directory lookup for '{identifier}' denied: {}",
                        graph_error_message(&item.body)
                    ))),
                    429 | 500..=599 => Err(TraincastError::Network(format!(
                        "directory lookup for '{identifier}' failed ({}): {}",
                        item.status,
                        graph_error_message(&item.body)
                    ))),
                    status => Err(TraincastError::External(format!(
                        "directory lookup for '{identifier}' failed ({status}): {}",
                        graph_error_message(&item.body)
                    ))),
                }
            })
            .collect()
    }
}

#[async_trait]
impl DirectoryLookup for GraphDirectory {
    async fn resolve_user(&self, identifier: &str) -> Result<DirectoryUser> {
        let builder = self.client.request(Method::GET, &user_path(identifier)).await?;
        let user: GraphUser = self.client.send_json(builder).await.map_err(|err| match err {
            TraincastError::NotFound(_) => {
                TraincastError::NotFound(format!("directory user '{identifier}' not found"))
            }
            other => other,
        })?;
        Ok(user.into_directory_user(identifier))
    }

    async fn resolve_users(&self, identifiers: &[String]) -> Result<Vec<DirectoryUser>> {
        let mut users = Vec::with_capacity(identifiers.len());
        for chunk in identifiers.chunks(GRAPH_BATCH_LIMIT) {
            debug!(count = chunk.len(), "resolving directory users in batch");
            users.extend(self.resolve_chunk(chunk).await?);
        }
        Ok(users)
    }
}
