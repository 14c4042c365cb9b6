use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{request::RouteRequest, validate::RequestError};

pub const GRAPHHOPPER_ROUTE_API_URL: &str = "https://graphhopper.com/api/1/route";

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(5_000);

#[derive(Debug, Error)]
pub enum RouteClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
}

pub struct RouteClientParams {
    pub route_service_url: String,

    /// POST is the default; GET drops custom-model support.
    pub post_request: bool,

    /// Client-wide defaults, overridable per request through the hints bag.
    pub instructions: bool,
    pub calc_points: bool,
    pub elevation: bool,
    pub optimize: bool,

    pub connect_timeout: Duration,
}

impl Default for RouteClientParams {
    fn default() -> Self {
        Self {
            route_service_url: GRAPHHOPPER_ROUTE_API_URL.to_string(),
            post_request: true,
            instructions: true,
            calc_points: true,
            elevation: false,
            optimize: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

pub struct RouteClient {
    pub(crate) params: RouteClientParams,
    client: reqwest::Client,
}

impl RouteClient {
    pub fn new(params: RouteClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_url(route_service_url: impl Into<String>) -> Self {
        Self::new(RouteClientParams {
            route_service_url: route_service_url.into(),
            ..RouteClientParams::default()
        })
    }

    pub fn set_post_request(mut self, post_request: bool) -> Self {
        self.params.post_request = post_request;
        self
    }

    /// Connect timeout for one request: the `timeout` hint when present,
    /// otherwise the client-wide default.
    pub fn connect_timeout_for(&self, request: &RouteRequest) -> Duration {
        request
            .hints
            .timeout
            .map(Duration::from_millis)
            .unwrap_or(self.params.connect_timeout)
    }

    fn client_for_request(&self, request: &RouteRequest) -> Result<reqwest::Client, reqwest::Error> {
        match request.hints.timeout {
            None => Ok(self.client.clone()),
            Some(_) => reqwest::Client::builder()
                .connect_timeout(self.connect_timeout_for(request))
                .build(),
        }
    }

    pub async fn route(&self, request: &RouteRequest) -> Result<Value, RouteClientError> {
        let client = self.client_for_request(request)?;

        let response = if self.params.post_request {
            let body = Value::Object(self.request_to_json(request)?);
            debug!(
                "RouteClient: posting route request to {}",
                self.params.route_service_url
            );
            client
                .post(&self.params.route_service_url)
                .json(&body)
                .send()
                .await?
        } else {
            let url = self.create_get_request(request)?;
            debug!("RouteClient: requesting {}", url);
            client.get(url).send().await?
        };

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<Value, RouteClientError> {
        if response.status().is_success() {
            let body: Value = response.json().await?;
            Ok(body)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(RouteClientError::Api { status, message })
        }
    }
}

/// Capability seam for callers that need a routing backend without caring
/// which transport sits behind it.
pub trait RoutingEngine: Send + Sync {
    fn route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<Value, RouteClientError>> + Send;
}

impl RoutingEngine for RouteClient {
    fn route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<Value, RouteClientError>> + Send {
        RouteClient::route(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_hint_reaches_the_transport_layer() {
        let client = RouteClient::new(RouteClientParams::default());
        let mut request = RouteRequest::default();
        request.hints.put("timeout", 5);

        assert_eq!(
            client.connect_timeout_for(&request),
            Duration::from_millis(5)
        );
        assert_eq!(
            client.connect_timeout_for(&RouteRequest::default()),
            DEFAULT_CONNECT_TIMEOUT
        );
    }
}
