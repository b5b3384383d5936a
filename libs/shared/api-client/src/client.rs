use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::error::ApiError;

/// Thin JSON client for the clinic REST backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(Client::new(), &config.api_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_headers(&self, auth_token: Option<&str>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        debug!("Making {} request to {}", method, url);

        let headers = self.get_headers(auth_token)?;

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(body_data);
        }

        let response = req.send().await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!("API error ({}): {}", status, text);
            return Err(ApiError::from_status(status.as_u16(), text));
        }

        Ok(text)
    }

    pub async fn request<T>(
        &self,
        method: Method,
        path: &str,
        auth_token: Option<&str>,
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let text = self.send(method, path, auth_token, body.as_ref()).await?;

        // Empty bodies (e.g. 201/204) decode as JSON null.
        let raw = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str::<T>(raw).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET a JSON array. Anything that is not an array of `T` is treated as an
    /// empty list; only transport and HTTP status failures are errors.
    pub async fn get_list<T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let text = self.send(Method::GET, path, None, None).await?;

        let value = match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!("GET {} returned a non-JSON body, using an empty list: {}", path, e);
                return Ok(Vec::new());
            }
        };

        if !value.is_array() {
            warn!("GET {} did not return an array, using an empty list", path);
            return Ok(Vec::new());
        }

        match serde_json::from_value::<Vec<T>>(value) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("GET {} returned malformed items, using an empty list: {}", path, e);
                Ok(Vec::new())
            }
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: Value,
        auth_token: &str,
    ) -> Result<Value, ApiError> {
        self.request::<Value>(Method::POST, path, Some(auth_token), Some(body)).await
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend-hosted path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
