use crate::ports::outbound::{BuildHistoryGateway, RepositoryGateway, TagSecurityGateway};
use crate::repository_detail::domain::{
    BuildPhase, BuildRecord, ImageId, Repository, RepositoryName, SecuritySummary, Tag,
};
use crate::shared::error::DetailError;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryResponse {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_public: bool,
    #[serde(default)]
    tags: Vec<TagResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagResponse {
    name: String,
    docker_image_id: String,
    last_modified: DateTime<Utc>,
    #[serde(default)]
    size: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryUpdate<'a> {
    description: Option<&'a str>,
    is_public: bool,
}

#[derive(Debug, Deserialize)]
struct BuildListResponse {
    #[serde(default)]
    builds: Vec<BuildResponse>,
}

#[derive(Debug, Deserialize)]
struct BuildResponse {
    id: String,
    phase: String,
    started: DateTime<Utc>,
}

/// RegistryApiClient adapter for the registry's REST API
///
/// Implements the repository, build-history and tag-security gateways
/// against one API base URL. Requests carry a bearer token when one is
/// configured. Each call is a single request; failures are returned to the
/// caller unchanged.
pub struct RegistryApiClient {
    client: reqwest::Client,
    api_url: String,
    auth_token: Option<String>,
}

impl RegistryApiClient {
    /// Creates a client for `api_url` (e.g. `https://registry.example.com/api/v1`)
    pub fn new(api_url: impl Into<String>, auth_token: Option<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("registry-detail/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    fn repository_url(&self, name: &RepositoryName) -> Result<String> {
        // Security: Validate URL components before using them
        validate_url_component(name.organization(), "Organization")?;
        validate_url_component(name.name(), "Repository name")?;

        Ok(format!(
            "{}/repository/{}/{}",
            self.api_url,
            urlencoding::encode(name.organization()),
            urlencoding::encode(name.name())
        ))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "registry request");
        let response = self.authorize(self.client.get(url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetailError::gateway_status(url, status.as_u16()).into());
        }

        Ok(response.json().await?)
    }
}

/// Tag names are percent-encoded into the path; only separators and
/// dot-only segments could still change which resource is addressed.
fn validate_tag_segment(tag_name: &str) -> Result<()> {
    if tag_name.is_empty()
        || tag_name.contains('/')
        || tag_name.contains('\\')
        || tag_name.chars().all(|c| c == '.')
    {
        return Err(DetailError::Validation {
            message: format!("Tag name '{}' cannot be used as a path segment", tag_name),
        }
        .into());
    }
    Ok(())
}

#[async_trait]
impl RepositoryGateway for RegistryApiClient {
    async fn fetch_repository(&self, name: &RepositoryName) -> Result<Repository> {
        let url = self.repository_url(name)?;
        let response: RepositoryResponse = self.get_json(&url).await?;

        let tags = response
            .tags
            .into_iter()
            .map(|tag| {
                Tag::new(
                    tag.name,
                    ImageId::new(tag.docker_image_id),
                    tag.last_modified,
                    tag.size,
                )
            })
            .collect();

        Ok(Repository::new(
            name.clone(),
            response.description,
            response.is_public,
            tags,
        ))
    }

    async fn update_repository(&self, repository: &Repository) -> Result<()> {
        let url = self.repository_url(repository.name())?;
        let body = RepositoryUpdate {
            description: repository.description(),
            is_public: repository.is_public(),
        };

        let response = self
            .authorize(self.client.put(&url).json(&body))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "repository update rejected");
            return Err(DetailError::gateway_status(url, status.as_u16()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl BuildHistoryGateway for RegistryApiClient {
    async fn fetch_builds(&self, name: &RepositoryName, window: usize) -> Result<Vec<BuildRecord>> {
        let url = format!("{}/build/?limit={}", self.repository_url(name)?, window);
        let response: BuildListResponse = self.get_json(&url).await?;

        Ok(response
            .builds
            .into_iter()
            .map(|build| BuildRecord::new(build.id, BuildPhase::new(build.phase), build.started))
            .collect())
    }
}

#[async_trait]
impl TagSecurityGateway for RegistryApiClient {
    async fn fetch_tag_security(
        &self,
        name: &RepositoryName,
        tag_name: &str,
    ) -> Result<SecuritySummary> {
        validate_tag_segment(tag_name)?;
        let url = format!(
            "{}/tag/{}/security",
            self.repository_url(name)?,
            urlencoding::encode(tag_name)
        );
        let payload: serde_json::Value = self.get_json(&url).await?;
        Ok(SecuritySummary::new(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn name() -> RepositoryName {
        RepositoryName::parse("acme/web").unwrap()
    }

    async fn client(server: &MockServer) -> RegistryApiClient {
        RegistryApiClient::new(format!("{}/api/v1/", server.uri()), Some("s3cret".to_string()))
            .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = RegistryApiClient::new("http://localhost:8080/api/v1", None);
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_repository_maps_tags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repository/acme/web"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "description": "Web frontend",
                "isPublic": true,
                "tags": [
                    {
                        "name": "latest",
                        "dockerImageId": "sha256:abc",
                        "lastModified": "2024-05-01T09:15:00Z",
                        "size": 1024
                    },
                    {
                        "name": "v1",
                        "dockerImageId": "sha256:def",
                        "lastModified": "2024-04-01T00:00:00Z"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repository = client(&server).await.fetch_repository(&name()).await.unwrap();

        assert_eq!(repository.description(), Some("Web frontend"));
        assert!(repository.is_public());
        assert_eq!(repository.tags().len(), 2);
        assert_eq!(repository.tags()[0].image_id().as_str(), "sha256:abc");
        assert_eq!(repository.tags()[0].size(), Some(1024));
        assert_eq!(repository.tags()[1].size(), None);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repository/acme/web"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .await
            .fetch_repository(&name())
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("organization and repository exist"));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repository/acme/web/build/"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).await.fetch_builds(&name(), 5).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_fetch_builds_passes_window() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repository/acme/web/build/"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "builds": [
                    {"id": "b-2", "phase": "building", "started": "2024-05-02T10:00:00Z"},
                    {"id": "b-1", "phase": "complete", "started": "2024-05-01T10:00:00Z"}
                ]
            })))
            .mount(&server)
            .await;

        let builds = client(&server).await.fetch_builds(&name(), 5).await.unwrap();
        assert_eq!(builds.len(), 2);
        assert_eq!(builds[0].id, "b-2");
        assert_eq!(builds[0].phase.as_str(), "building");
    }

    #[tokio::test]
    async fn test_fetch_tag_security_keeps_payload() {
        let server = MockServer::start().await;
        let payload = json!({"status": "scanned", "data": {"Layer": {"Features": []}}});
        Mock::given(method("GET"))
            .and(path("/api/v1/repository/acme/web/tag/v1.2/security"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let summary = client(&server)
            .await
            .fetch_tag_security(&name(), "v1.2")
            .await
            .unwrap();
        assert_eq!(summary.payload(), &payload);
    }

    #[tokio::test]
    async fn test_fetch_tag_security_rejects_unsafe_tag() {
        let server = MockServer::start().await;
        let client = client(&server).await;
        for tag_name in ["../../admin", "..", "a\\b", ""] {
            let result = client.fetch_tag_security(&name(), tag_name).await;
            assert!(result.is_err(), "{} should be rejected", tag_name);
        }
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_tag_security_accepts_dots_and_at_sign() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repository/acme/web/tag/v1..2/security"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "scanned"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repository/acme/web/tag/build%402/security"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "queued"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server).await;
        let dotted = client.fetch_tag_security(&name(), "v1..2").await.unwrap();
        assert_eq!(dotted.payload()["status"], "scanned");
        let at_sign = client.fetch_tag_security(&name(), "build@2").await.unwrap();
        assert_eq!(at_sign.payload()["status"], "queued");
    }

    #[tokio::test]
    async fn test_malformed_body_fails_after_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/repository/acme/web"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client(&server).await.fetch_repository(&name()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_repository_sends_description() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/repository/acme/web"))
            .and(body_json(json!({"description": "New text", "isPublic": false})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let repository = Repository::new(name(), Some("New text".to_string()), false, vec![]);
        client(&server)
            .await
            .update_repository(&repository)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_repository_reports_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let repository = Repository::new(name(), None, false, vec![]);
        let err = client(&server)
            .await
            .update_repository(&repository)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("auth token"));
    }
}
