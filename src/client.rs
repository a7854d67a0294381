use crate::config::ClientConfig;
use crate::endpoint::{Endpoints, Service};
use crate::error::{ClientError, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

const CLIENT_INFO: &str = concat!("supalink-rs/", env!("CARGO_PKG_VERSION"));

/// Handle to one backend project.
///
/// Cloning is cheap: every clone shares the same http stack and endpoint set,
/// so build one at startup and hand clones (or `&SupabaseClient`) to whoever needs it.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    endpoints: Endpoints,
    http: reqwest::Client,
}

/// Raw response of a successful call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Payload of the auth service health check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

impl SupabaseClient {
    /// Validates `config` and builds the http stack. No network traffic happens here.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoints = Endpoints::from_base(&config.url)?;
        if config.anon_key.trim().is_empty() {
            return Err(ClientError::MissingKey);
        }

        if config.timeout_secs == Some(0) {
            return Err(ClientError::InvalidTimeout);
        }

        let headers = default_headers(&config)?;
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        debug!(
            url = %endpoints.base,
            key = %config.redacted_key(),
            schema = ?config.schema,
            "backend client constructed"
        );

        Ok(SupabaseClient {
            inner: Arc::new(Inner {
                config,
                endpoints,
                http,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn url(&self) -> &Url {
        &self.inner.endpoints.base
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    pub fn endpoint(&self, service: Service) -> &Url {
        self.inner.endpoints.get(service)
    }

    /// True when both handles came from the same construction.
    pub fn ptr_eq(a: &SupabaseClient, b: &SupabaseClient) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Starts a request against `service` with the default headers already applied.
    pub fn request(&self, method: Method, service: Service, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.endpoints.join(service, path)?;
        Ok(self.inner.http.request(method, url))
    }

    pub async fn execute(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }

    pub async fn health(&self) -> Result<Health> {
        let request = self.request(Method::GET, Service::Auth, "health")?;
        match self.execute(request).await {
            Ok(response) => response.json(),
            Err(e) => {
                warn!(url = %self.url(), error = %e, "health check failed");
                Err(e)
            }
        }
    }
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut key = header_value("apikey", &config.anon_key)?;
    key.set_sensitive(true);
    headers.insert(HeaderName::from_static("apikey"), key);

    let mut bearer = header_value("authorization", &format!("Bearer {}", config.anon_key))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);

    headers.insert(
        HeaderName::from_static("x-client-info"),
        HeaderValue::from_static(CLIENT_INFO),
    );

    if let Some(schema) = &config.schema {
        let value = header_value("accept-profile", schema)?;
        headers.insert(HeaderName::from_static("accept-profile"), value.clone());
        headers.insert(HeaderName::from_static("content-profile"), value);
    }

    for (name, value) in &config.headers {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClientError::InvalidHeader(format!("name {name:?}")))?;
        let mut value = header_value(name, value)?;
        value.set_sensitive(true);
        headers.insert(header, value);
    }

    Ok(headers)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeader(format!("value of {name}")))
}

impl fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("config", &self.inner.config)
            .field("endpoints", &self.inner.endpoints)
            .finish()
    }
}
