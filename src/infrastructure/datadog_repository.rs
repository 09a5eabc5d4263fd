// Datadog dashboard API implementation
use crate::application::dashboard_repository::{CreatedDashboard, DashboardRepository};
use crate::domain::dashboard::DashboardRecord;
use crate::error::{ProvisionError, Result};
use crate::infrastructure::config::DatadogConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_ENCODING, CONTENT_TYPE};
use serde::Deserialize;

const DASHBOARD_PATH: &str = "/api/v1/dashboard";
const API_KEY_HEADER: HeaderName = HeaderName::from_static("dd-api-key");
const APPLICATION_KEY_HEADER: HeaderName = HeaderName::from_static("dd-application-key");

#[derive(Debug, Clone)]
pub struct DatadogRepository {
    config: DatadogConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct DashboardListResponse {
    #[serde(default)]
    dashboards: Option<Vec<DashboardRecord>>,
}

impl DatadogRepository {
    pub fn new(config: DatadogConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn dashboard_url(&self) -> String {
        format!("{}{}", self.config.base_url, DASHBOARD_PATH)
    }

    fn headers(&self) -> std::result::Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("identity"));

        let api_key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|_| "DD-API-KEY is not a valid header value".to_string())?;
        let app_key = HeaderValue::from_str(&self.config.application_key)
            .map_err(|_| "DD-APPLICATION-KEY is not a valid header value".to_string())?;
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(APPLICATION_KEY_HEADER, app_key);

        Ok(headers)
    }

    /// Parse a listing body; an empty or `null` body means no dashboards
    fn parse_listing(body: &str) -> std::result::Result<Vec<DashboardRecord>, serde_json::Error> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let listing: Option<DashboardListResponse> = serde_json::from_str(body)?;
        Ok(listing.and_then(|l| l.dashboards).unwrap_or_default())
    }
}

#[async_trait]
impl DashboardRepository for DatadogRepository {
    async fn list_dashboards(&self) -> Result<Vec<DashboardRecord>> {
        let url = self.dashboard_url();
        tracing::debug!("Listing dashboards from {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers().map_err(ProvisionError::RemoteList)?)
            .send()
            .await
            .map_err(|e| ProvisionError::RemoteList(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProvisionError::RemoteList(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ProvisionError::remote_list(status.as_u16(), body));
        }

        let dashboards = Self::parse_listing(&body)
            .map_err(|e| ProvisionError::RemoteList(format!("failed to parse response: {}", e)))?;
        tracing::debug!("Found {} dashboards", dashboards.len());
        Ok(dashboards)
    }

    async fn create_dashboard(&self, document: String) -> Result<CreatedDashboard> {
        let url = self.dashboard_url();
        tracing::debug!("Creating dashboard at {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers().map_err(ProvisionError::RemoteCreate)?)
            .body(document)
            .send()
            .await
            .map_err(|e| ProvisionError::RemoteCreate(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProvisionError::RemoteCreate(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ProvisionError::remote_create(status.as_u16(), body));
        }

        Ok(CreatedDashboard {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;

    fn repository_for(server: &MockServer) -> DatadogRepository {
        DatadogRepository::new(DatadogConfig {
            base_url: server.base_url(),
            api_key: "api-key".to_string(),
            application_key: "app-key".to_string(),
        })
    }

    #[tokio::test]
    async fn test_list_sends_auth_headers() {
        let server = MockServer::start_async().await;
        let listing = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/dashboard")
                    .header("dd-api-key", "api-key")
                    .header("dd-application-key", "app-key")
                    .header("accept", "application/json");
                then.status(200).body(
                    r#"{"dashboards": [
                        {"id": "abc-123", "title": "Release Health", "layout_type": "ordered",
                         "url": "/dashboard/abc-123", "is_read_only": false,
                         "created_at": "2024-01-01T00:00:00Z", "modified_at": null,
                         "deleted_at": null, "author_handle": "ci-bot"}
                    ]}"#,
                );
            })
            .await;

        let dashboards = repository_for(&server).list_dashboards().await.unwrap();

        listing.assert_async().await;
        assert_eq!(dashboards.len(), 1);
        assert_eq!(dashboards[0].title.as_deref(), Some("Release Health"));
        assert_eq!(dashboards[0].author_handle.as_deref(), Some("ci-bot"));
    }

    #[tokio::test]
    async fn test_list_without_dashboards_key_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/dashboard");
                then.status(200).body("{}");
            })
            .await;

        let dashboards = repository_for(&server).list_dashboards().await.unwrap();
        assert!(dashboards.is_empty());
    }

    #[test]
    fn test_parse_listing_null_and_empty() {
        assert!(DatadogRepository::parse_listing("null").unwrap().is_empty());
        assert!(DatadogRepository::parse_listing("").unwrap().is_empty());
        assert!(DatadogRepository::parse_listing(r#"{"dashboards": []}"#).unwrap().is_empty());
        assert!(DatadogRepository::parse_listing("<html>").is_err());
    }

    #[test]
    fn test_parse_listing_tolerates_null_fields() {
        let dashboards = DatadogRepository::parse_listing(
            r#"{"dashboards": [
                {"title": "Other", "is_read_only": null, "layout_type": "ordered"},
                {"title": null, "id": "no-title"},
                {"id": "missing-title", "layout_type": "something-new"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(dashboards.len(), 3);
        assert_eq!(dashboards[0].title.as_deref(), Some("Other"));
        assert_eq!(dashboards[0].is_read_only, None);
        assert!(dashboards[1].title.is_none());
        assert_eq!(dashboards[2].layout_type.as_deref(), Some("something-new"));
    }

    #[tokio::test]
    async fn test_list_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/dashboard");
                then.status(403).body(r#"{"errors": ["Forbidden"]}"#);
            })
            .await;

        let err = repository_for(&server).list_dashboards().await.unwrap_err();
        match err {
            ProvisionError::RemoteList(message) => assert!(message.contains("403")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_returns_raw_response() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/dashboard")
                    .header("content-type", "application/json")
                    .header("dd-api-key", "api-key")
                    .body(r#"{"title": "Release Health"}"#);
                then.status(200).body(r#"{"id": "abc-123", "title": "Release Health"}"#);
            })
            .await;

        let created = repository_for(&server)
            .create_dashboard(r#"{"title": "Release Health"}"#.to_string())
            .await
            .unwrap();

        create.assert_async().await;
        assert_eq!(created.status, 200);
        assert_eq!(created.body, r#"{"id": "abc-123", "title": "Release Health"}"#);
    }

    #[tokio::test]
    async fn test_create_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/dashboard");
                then.status(400).body(r#"{"errors": ["Invalid widget definition"]}"#);
            })
            .await;

        let err = repository_for(&server)
            .create_dashboard("{}".to_string())
            .await
            .unwrap_err();
        match err {
            ProvisionError::RemoteCreate(message) => {
                assert!(message.contains("400"));
                assert!(message.contains("Invalid widget definition"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_truncated_body_is_create_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.ends_with(b"{}") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 500\r\n\r\n{\"id\": \"abc")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let repository = DatadogRepository::new(DatadogConfig {
            base_url: format!("http://{}", addr),
            api_key: "api-key".to_string(),
            application_key: "app-key".to_string(),
        });
        let err = repository
            .create_dashboard("{}".to_string())
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, ProvisionError::RemoteCreate(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_list_error() {
        let repository = DatadogRepository::new(DatadogConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: "api-key".to_string(),
            application_key: "app-key".to_string(),
        });

        let err = repository.list_dashboards().await.unwrap_err();
        assert!(matches!(err, ProvisionError::RemoteList(_)));
    }
}
