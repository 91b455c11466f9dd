// HTTP client for the upstream statistics APIs.
// Handles default headers and response status checking.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{CovidError, Result};

/// HTTP client shared by the two upstream endpoints.
///
/// The country-report and global-statistics endpoints live on different
/// hosts, so requests take full URLs rather than paths against a base.
pub struct CovidClient {
    client: Client,
}

impl CovidClient {
    /// Create a new client with default headers.
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("covidmap"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(CovidError::Api)?;

        Ok(Self { client })
    }

    /// Make a GET request and check the response status.
    pub async fn get(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await.map_err(CovidError::Api)?;
        self.check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK => Ok(response),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(CovidError::NotFound(url))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(CovidError::RateLimited),
            status => Err(CovidError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
