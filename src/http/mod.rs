pub mod request;
pub mod response;

use std::time::Duration;

use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::Client;
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;
use url::Url;

use crate::config::{ProxyConfig, SuiteConfig};
use crate::errors::Result;
use crate::utils::http_logging::build_client_with_logging;

pub use request::{Cardinality, RequestDescriptor};
pub use response::ApiResponse;

const JSON: &str = "application/json";

/// Builder for a [`RequestContext`]: base URL, default headers, timeouts and
/// an optional proxy.
#[derive(Debug, Clone)]
pub struct Http {
    base_url: String,
    headers: IndexMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
    proxy: Option<ProxyConfig>,
}

impl Http {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: IndexMap::new(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            proxy: None,
        }
    }

    pub fn from_config(cfg: &SuiteConfig) -> Self {
        let mut http = Http::new(cfg.base_url.clone())
            .timeout(cfg.timeout())
            .connect_timeout(cfg.connect_timeout());
        for (k, v) in &cfg.extra_http_headers {
            http = http.header(k.clone(), v.clone());
        }
        if let Some(proxy) = &cfg.proxy {
            http = http.proxy(proxy.clone());
        }
        http
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Default headers for every request. `Accept: application/json` is
    /// always set last so a configured header cannot displace it.
    pub fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes())?;
            let val = HeaderValue::from_str(value)?;
            headers.insert(name, val);
        }
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        Ok(headers)
    }

    pub fn build_client(&self) -> Result<ClientWithMiddleware> {
        let mut builder = Client::builder()
            .default_headers(self.default_headers()?)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout);

        if let Some(p) = &self.proxy {
            builder = builder.proxy(p.to_reqwest()?);
        }

        Ok(build_client_with_logging(builder.build()?))
    }

    pub fn build(&self) -> Result<RequestContext> {
        Ok(RequestContext {
            base_url: Url::parse(&self.base_url)?,
            client: self.build_client()?,
        })
    }
}

/// A client bound to one base URL. Each scenario owns its own context.
#[derive(Debug, Clone)]
pub struct RequestContext {
    base_url: Url,
    client: ClientWithMiddleware,
}

impl RequestContext {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a path against the base URL the same way a browser resolves a
    /// link: an absolute path replaces whatever path the base URL carried.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Send the request once and buffer the response. Non-2xx statuses are
    /// returned as ordinary responses; only transport failures are errors.
    pub async fn execute(&self, req: &RequestDescriptor) -> Result<ApiResponse> {
        let url = self.url_for(req.path())?;
        let started = std::time::Instant::now();

        let resp = self
            .client
            .request(req.method().clone(), url)
            .query(&req.query_pairs())
            .send()
            .await?;

        let status = resp.status();
        let final_url = resp.url().clone();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;

        debug!(
            status = status.as_u16(),
            url = %final_url,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "http response received"
        );

        Ok(ApiResponse::new(
            status,
            final_url,
            headers,
            body.to_vec(),
            req.cardinality(),
        ))
    }
}
