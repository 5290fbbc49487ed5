//! Platform HTTP session.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::RestConfig;
use crate::error::{RestError, RestResult};
use crate::version::{PlatformVersion, VersionParseError};

const TOKEN_HEADER: &str = "x-api-key";

/// Blocking-free HTTP session against one platform instance.
///
/// All request paths are given relative to the configured base URL. Any
/// non-success response, including 204, is reported as
/// [`RestError::Status`] carrying the server's error text.
pub struct RestSession {
    http: Client,
    config: RestConfig,
    version: PlatformVersion,
}

impl RestSession {
    /// Create a new session. The platform version defaults to the current
    /// generation; use [`with_version`](Self::with_version) or
    /// [`refresh_version`](Self::refresh_version) for older servers.
    pub fn new(config: RestConfig) -> RestResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RestError::Network)?;

        Ok(Self {
            http,
            config,
            version: PlatformVersion::default(),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> RestResult<Self> {
        Self::new(RestConfig::from_env())
    }

    pub fn with_version(mut self, version: PlatformVersion) -> Self {
        self.version = version;
        self
    }

    /// Generation of the connected platform, used to select response-shape
    /// parsing.
    pub fn version(&self) -> PlatformVersion {
        self.version
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Query the server's product info and update the version discriminant.
    pub async fn refresh_version(&mut self) -> RestResult<PlatformVersion> {
        let info = self.get_json("product_info").await?;
        let version_string = info
            .get("product-version")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                VersionParseError::new("product info response has no 'product-version' field")
            })?;
        self.version = version_string.parse()?;
        debug!("platform version detected as {}", self.version);
        Ok(self.version)
    }

    /// GET a JSON resource.
    pub async fn get_json(&self, path: &str) -> RestResult<Value> {
        let response = self.send(self.http.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    /// GET a binary resource, e.g. result-media payloads.
    pub async fn get_bytes(&self, path: &str) -> RestResult<Vec<u8>> {
        let response = self.send(self.http.get(self.url(path))).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POST a JPEG-encoded body and return the JSON response.
    pub async fn post_jpeg(&self, path: &str, body: Vec<u8>) -> RestResult<Value> {
        let request = self
            .http
            .post(self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(body);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> RestResult<Response> {
        let request = match &self.config.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT || !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RestError::Status { status, message });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn session_for(server: &MockServer) -> RestSession {
        RestSession::new(RestConfig::new(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let session = session_for(&server).await;
        let body = session.get_json("projects").await.unwrap();
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_no_content_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let session = session_for(&server).await;
        let error = session.get_json("predictions").await.unwrap_err();
        assert_eq!(error.status_code(), Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn test_server_error_carries_body_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(500).set_body_string("inference worker crashed"))
            .mount(&server)
            .await;

        let session = session_for(&server).await;
        match session.get_json("boom").await.unwrap_err() {
            RestError::Status { status, message } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(message.contains("inference worker crashed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_token_header_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/secure"))
            .and(header(TOKEN_HEADER, "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let session =
            RestSession::new(RestConfig::new(server.uri()).with_token("secret")).unwrap();
        session.get_json("secure").await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/product_info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"product-version": "1.1.0-release-20220624125113"}),
            ))
            .mount(&server)
            .await;

        let mut session = session_for(&server).await;
        assert_eq!(session.version(), PlatformVersion::Current);
        let version = session.refresh_version().await.unwrap();
        assert!(version.is_legacy_v1());
        assert_eq!(session.version(), version);
    }
}
