// src/http/response.rs
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::errors::Result;
use crate::http::Cardinality;

/// A fully buffered HTTP response.
///
/// The body is read once when the response arrives so that callers can look
/// at it both as JSON and as raw text (the latter for failure diagnostics).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    url: Url,
    headers: HeaderMap,
    body: Vec<u8>,
    cardinality: Cardinality,
}

impl ApiResponse {
    pub fn new(
        status: StatusCode,
        url: Url,
        headers: HeaderMap,
        body: impl Into<Vec<u8>>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            status,
            url,
            headers,
            body: body.into(),
            cardinality,
        }
    }

    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// True for any status in 200..=299.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Cardinality declared by the endpoint that produced this response.
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
