use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::FutureExt;
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::api::envelope::{decode, Envelope, ListPayload};
use crate::api::rate_limiter::RateLimiter;
use crate::config::ApiConfig;
use crate::errors::{normalize, ClientFailure, ErrorBody, RequestFailed};
use crate::metrics::registry::{API_CALLS_TOTAL, API_REQUEST_DURATION_SECONDS};
use crate::session::SessionProvider;

/// One backend call: verb, path relative to the API base, query and JSON body
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Stable operation name, used for logs and metric labels
    pub operation: &'static str,
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    body: Option<std::result::Result<Value, String>>,
}

impl ApiRequest {
    pub fn new(operation: &'static str, method: Method, path: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, path)
    }

    pub fn post(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::POST, path)
    }

    pub fn put(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::PUT, path)
    }

    pub fn patch(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::PATCH, path)
    }

    pub fn delete(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::DELETE, path)
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present
    pub fn query_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Attach a JSON body. Serialization errors surface when the request is sent.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_value(body).map_err(|e| e.to_string()));
        self
    }

    pub fn body(&self) -> std::result::Result<Option<&Value>, ClientFailure> {
        match &self.body {
            None => Ok(None),
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(e)) => Err(ClientFailure::generic(format!(
                "Failed to serialize request body: {}",
                e
            ))),
        }
    }
}

/// A 2xx response with its parsed JSON body (`Null` when the body was empty)
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn into_envelope<T: DeserializeOwned>(
        self,
    ) -> std::result::Result<(u16, Envelope<T>), ClientFailure> {
        if self.body.is_null() {
            return Ok((self.status, Envelope::empty()));
        }
        let envelope = serde_json::from_value(self.body)?;
        Ok((self.status, envelope))
    }
}

/// The HTTP collaborator.
///
/// Implementations return `ClientFailure::Transport` for non-2xx statuses,
/// keeping the parsed error body when there is one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> std::result::Result<RawResponse, ClientFailure>;
}

/// `reqwest`-backed transport with outbound throttling and bearer auth
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
    rate_limiter: RateLimiter,
    session: SessionProvider,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig, session: SessionProvider) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .context("Failed to build HTTP client")?;

        info!(
            "Initialized API client for {} with rate limit: {} req/sec",
            config.base_url, config.rate_limit_per_second
        );

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            rate_limiter: RateLimiter::new(config.rate_limit_per_second),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> std::result::Result<RawResponse, ClientFailure> {
        self.rate_limiter.acquire(request.operation).await;

        let mut builder = self
            .http_client
            .request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body()? {
            builder = builder.json(body);
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let parsed = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice::<Value>(&bytes).ok()
        };

        if !(200..300).contains(&status) {
            return Err(ClientFailure::Transport {
                status: Some(status),
                body: parsed.and_then(|body| serde_json::from_value::<ErrorBody>(body).ok()),
                message: Some(format!("Request failed with status code {}", status)),
            });
        }

        match parsed {
            Some(body) => Ok(RawResponse::new(status, body)),
            None if bytes.is_empty() => Ok(RawResponse::new(status, Value::Null)),
            None => Err(ClientFailure::generic("Response body is not valid JSON")),
        }
    }
}

/// Runs every service operation through one fixed shape: send, decode the
/// envelope, and normalize any failure with the operation's fallback message.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionProvider) -> Result<Self> {
        let transport = HttpTransport::new(config, session)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Decode `data` as `T`, or `default` when the envelope has none
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        default: T,
        fallback: &str,
    ) -> std::result::Result<T, RequestFailed> {
        let operation = request.operation;
        API_CALLS_TOTAL.with_label_values(&[operation]).inc();
        let timer = API_REQUEST_DURATION_SECONDS
            .with_label_values(&[operation])
            .start_timer();

        let outcome = self.execute(&request, default).await;
        timer.observe_duration();

        outcome.map_err(|failure| normalize(failure, fallback))
    }

    /// List operations: bare or wrapped arrays, empty when `data` is absent
    pub async fn call_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> std::result::Result<Vec<T>, RequestFailed> {
        self.call::<ListPayload<T>>(request, ListPayload::default(), fallback)
            .await
            .map(ListPayload::into_vec)
    }

    /// Operations whose payload, if any, is not needed
    pub async fn call_unit(
        &self,
        request: ApiRequest,
        fallback: &str,
    ) -> std::result::Result<(), RequestFailed> {
        self.call::<IgnoredAny>(request, IgnoredAny, fallback)
            .await
            .map(|_| ())
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
        default: T,
    ) -> std::result::Result<T, ClientFailure> {
        debug!(
            operation = request.operation,
            method = %request.method,
            path = %request.path,
            "Sending API request"
        );

        // A transport that panics is reported like any other failure
        let response = AssertUnwindSafe(self.transport.send(request))
            .catch_unwind()
            .await
            .map_err(ClientFailure::Unknown)??;

        let (status, envelope) = response.into_envelope::<T>()?;
        Ok(decode(envelope, status, default)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays one canned outcome and records the requests it saw
    struct ScriptedTransport {
        outcome: Box<dyn Fn() -> std::result::Result<RawResponse, ClientFailure> + Send + Sync>,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        fn new(
            outcome: impl Fn() -> std::result::Result<RawResponse, ClientFailure> + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                outcome: Box::new(outcome),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: &ApiRequest) -> std::result::Result<RawResponse, ClientFailure> {
            self.seen.lock().unwrap().push(request.clone());
            (self.outcome)()
        }
    }

    struct PanickingTransport;

    #[async_trait]
    impl Transport for PanickingTransport {
        async fn send(&self, _request: &ApiRequest) -> std::result::Result<RawResponse, ClientFailure> {
            std::panic::panic_any("a plain string")
        }
    }

    #[derive(Debug, Default, PartialEq, Deserialize)]
    struct Course {
        code: String,
    }

    #[tokio::test]
    async fn test_call_returns_decoded_data() {
        let transport = ScriptedTransport::new(|| {
            Ok(RawResponse::new(
                200,
                json!({"status_code": 200, "message": "ok", "data": [{"code": "CS101"}]}),
            ))
        });
        let client = ApiClient::with_transport(transport.clone());

        let courses: Vec<Course> = client
            .call_list(ApiRequest::get("courses.list", "/courses"), "Failed to fetch courses")
            .await
            .unwrap();

        assert_eq!(courses, vec![Course { code: "CS101".to_string() }]);
        assert_eq!(transport.seen.lock().unwrap()[0].path, "/courses");
    }

    #[tokio::test]
    async fn test_missing_data_yields_default() {
        let transport = ScriptedTransport::new(|| {
            Ok(RawResponse::new(201, json!({"status_code": 201, "data": null})))
        });
        let client = ApiClient::with_transport(transport);

        let course: Course = client
            .call(ApiRequest::post("courses.create", "/courses"), Course::default(), "Failed")
            .await
            .unwrap();
        assert_eq!(course, Course::default());
    }

    #[tokio::test]
    async fn test_empty_body_uses_transport_status() {
        let transport = ScriptedTransport::new(|| Ok(RawResponse::new(204, Value::Null)));
        let client = ApiClient::with_transport(transport);

        let result = client
            .call_unit(ApiRequest::delete("notifications.clear", "/notifications"), "Failed")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_envelope_failure_message_survives_normalization() {
        let transport = ScriptedTransport::new(|| {
            Ok(RawResponse::new(200, json!({"status_code": 404, "message": "Not found"})))
        });
        let client = ApiClient::with_transport(transport);

        let err = client
            .call_list::<Course>(ApiRequest::get("courses.list", "/courses"), "Failed to fetch courses")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Not found");
    }

    #[tokio::test]
    async fn test_network_error_message_wins_over_fallback() {
        let transport = ScriptedTransport::new(|| Err(ClientFailure::network("Network Error")));
        let client = ApiClient::with_transport(transport);

        let err = client
            .call_list::<Course>(ApiRequest::get("courses.list", "/courses"), "Failed to fetch courses")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Network Error");
    }

    #[tokio::test]
    async fn test_panicking_transport_yields_fallback() {
        let client = ApiClient::with_transport(Arc::new(PanickingTransport));

        let err = client
            .call_list::<Course>(ApiRequest::get("courses.list", "/courses"), "Failed to fetch courses")
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Failed to fetch courses");
    }

    #[tokio::test]
    async fn test_payload_shape_mismatch_is_a_generic_failure() {
        let transport = ScriptedTransport::new(|| {
            Ok(RawResponse::new(200, json!({"status_code": 200, "data": "not a course"})))
        });
        let client = ApiClient::with_transport(transport);

        let err = client
            .call(ApiRequest::get("courses.get", "/courses/1"), Course::default(), "Failed")
            .await
            .unwrap_err();
        assert!(err.message().starts_with("Failed to parse API response"));
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::get("internships.list", "/internships")
            .query("status", "open")
            .query_opt("search", None::<String>)
            .query_opt("unit_id", Some(7));

        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.query,
            vec![("status", "open".to_string()), ("unit_id", "7".to_string())]
        );
        assert!(request.body().unwrap().is_none());

        let with_body = ApiRequest::post("tasks.create", "/tasks").json(&json!({"title": "Report"}));
        assert_eq!(with_body.body().unwrap(), Some(&json!({"title": "Report"})));
    }
}
