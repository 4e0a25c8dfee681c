// HTTP client for the extraction service endpoints

use std::time::Duration;

use super::errors::ClientError;
use super::models::{DownloadRequest, ErrorBody, FormatsResponse};

/// Connection settings for the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the extraction service
    pub base_url: String,

    /// SOCKS5/HTTP proxy URL (e.g., "socks5://127.0.0.1:1080")
    pub proxy: Option<String>,

    /// Connect timeout in seconds. No overall timeout is applied to the
    /// download body, which can legitimately take minutes.
    pub connect_timeout_secs: u64,

    /// Overall timeout for the format lookup, mirroring the backend's own
    /// 60-second yt-dlp budget
    pub lookup_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            proxy: None,
            connect_timeout_secs: 10,
            lookup_timeout_secs: 60,
        }
    }
}

/// Thin wrapper around one `reqwest::Client`, speaking the two-endpoint
/// contract: `POST /get_formats` and `POST /download`.
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = config.proxy.as_deref() {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| ClientError::Network(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let http = builder
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// List downloadable formats for a validated video URL. Non-2xx
    /// statuses and `success: false` bodies are both failures; the
    /// server's own error string wins over a generic status message.
    pub async fn get_formats(&self, url: &str) -> Result<FormatsResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint("get_formats"))
            .timeout(Duration::from_secs(self.config.lookup_timeout_secs))
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?;

        let status = response.status();
        let body: FormatsResponse = match response.json().await {
            Ok(body) => body,
            // A non-JSON body on an error status is still just that error
            Err(_) if !status.is_success() => {
                return Err(ClientError::Status(status.as_u16()));
            }
            Err(e) => return Err(ClientError::Parse(e.to_string())),
        };

        if !status.is_success() || !body.success {
            return Err(match body.error {
                Some(msg) => ClientError::Remote(msg),
                None => ClientError::Status(status.as_u16()),
            });
        }
        Ok(body)
    }

    /// Request the binary payload for a chosen format. On success the
    /// streaming response is handed back untouched so the orchestrator can
    /// inspect headers and persist the body chunk by chunk.
    pub async fn download(
        &self,
        request: &DownloadRequest,
    ) -> Result<reqwest::Response, ClientError> {
        eprintln!(
            "[api] POST /download format_id={} filename={}",
            request.format_id, request.filename
        );

        let response = self
            .http
            .post(self.endpoint("download"))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            return Err(match error {
                Some(msg) => ClientError::Remote(msg),
                None => ClientError::Status(status.as_u16()),
            });
        }
        Ok(response)
    }
}
