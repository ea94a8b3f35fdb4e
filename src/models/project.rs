//! Project model and trait implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::RollbarClient;
use crate::error::Result;
use crate::pagination::Envelope;
use crate::traits::{Create, Delete, Get};

/// A Rollbar project.
///
/// Projects are the top-level containers for reported items. The listing
/// endpoint returns every project of the account in one response; it is not
/// paginated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: u64,

    /// ID of the owning account.
    pub account_id: u64,

    /// Project name. The service omits the field for unnamed projects.
    #[serde(default)]
    pub name: String,

    /// Creation time as a Unix timestamp.
    pub date_created: i64,

    /// Last modification time as a Unix timestamp.
    pub date_modified: i64,
}

/// Parameters for creating a project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectCreateParams {
    /// Name of the new project.
    pub name: String,
}

#[async_trait]
impl Get for Project {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &RollbarClient, id: u64) -> Result<Self> {
        let bytes = client.get(&["project", &id.to_string()]).await?;
        let envelope: Envelope<Project> = serde_json::from_slice(&bytes)?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl Create for Project {
    type Params = ProjectCreateParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &RollbarClient, params: Self::Params) -> Result<Self> {
        let body = serde_json::to_vec(&params)?;
        let bytes = client.post(body, &["projects"]).await?;
        let envelope: Envelope<Project> = serde_json::from_slice(&bytes)?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl Delete for Project {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &RollbarClient, id: u64) -> Result<()> {
        client.delete(&["project", &id.to_string()]).await
    }
}

/// List every project of the account.
///
/// # Errors
///
/// Returns an error if the request fails or the response does not decode.
pub async fn list_projects(client: &RollbarClient) -> Result<Vec<Project>> {
    let bytes = client.get(&["projects"]).await?;
    let envelope: Envelope<Vec<Project>> = serde_json::from_slice(&bytes)?;
    Ok(envelope.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_decodes_service_shape() {
        let json = r#"{
            "id": 106671,
            "account_id": 8608,
            "name": "Client-Config",
            "date_created": 1489139046,
            "date_modified": 1549293583
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, 106671);
        assert_eq!(project.account_id, 8608);
        assert_eq!(project.name, "Client-Config");
    }

    #[test]
    fn project_without_name_decodes_to_empty() {
        let json = r#"{
            "id": 12112,
            "account_id": 8608,
            "date_created": 1407933721,
            "date_modified": 1457475137
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "");
    }

    #[test]
    fn project_list_envelope_decodes() {
        let json = r#"{
            "err": 0,
            "result": [
                {"id": 12112, "account_id": 8608, "date_created": 1407933721, "date_modified": 1457475137},
                {"id": 106671, "account_id": 8608, "name": "Client-Config", "date_created": 1489139046, "date_modified": 1549293583}
            ]
        }"#;

        let envelope: Envelope<Vec<Project>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.result.len(), 2);
        assert_eq!(envelope.result[1].name, "Client-Config");
    }
}
