//! HTTP request executor.
//!
//! Turns a [`RequestIntent`] into one or more reqwest exchanges: the token is
//! injected on every attempt, each attempt runs under its own timeout, and
//! rate limiting or server faults are retried with backoff.

use std::{fmt, sync::Arc, time::Duration};

use reqwest::{
    Client, RequestBuilder, StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_json::Value;
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use super::{ClientConfig, DecodedResponse, RequestIntent};
use crate::{
    endpoint::HttpMethod,
    error::{BridgeError, Result},
    reliability::{
        AttemptOutcome, RetryFailure, RetryPolicy, is_retryable_status, retry_with_backoff,
    },
};

/// Name of the authentication parameter, in both query and body.
const API_TOKEN_PARAM: &str = "api_token";

const JSON_MEDIA_TYPE: &str = "application/json";

/// Executes Fakturownia API calls with timeout and retry.
///
/// Cloning is cheap; clones share the underlying connection pool. Concurrent
/// calls are independent and need no coordination.
///
/// # Examples
///
/// ```rust,no_run
/// use fakturownia_mcp_bridge::{
///     endpoint::Operation,
///     transport::{ClientConfig, RequestExecutor, RequestIntent},
/// };
///
/// # async fn example() -> fakturownia_mcp_bridge::error::Result<()> {
/// let executor = RequestExecutor::new(&ClientConfig::new("token", "mycompany"))?;
///
/// let intent = RequestIntent::for_operation(Operation::GetAccountInfo, None)?;
/// let account = executor.execute(&intent).await?;
/// println!("{account:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RequestExecutor {
    client: Client,
    base_url: Url,
    api_token: Arc<str>,
    timeout: Duration,
    connect_timeout: Duration,
    retry_policy: RetryPolicy,
}

impl fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

impl RequestExecutor {
    /// Creates an executor from a configuration.
    ///
    /// The reqwest client carries no overall timeout; each attempt is bounded
    /// separately in [`RequestExecutor::execute`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigError`] if the configuration is invalid, or
    /// [`BridgeError::HttpError`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;

        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(BridgeError::from)?;

        Ok(Self {
            client,
            base_url,
            api_token: Arc::from(config.api_token.as_str()),
            timeout: config.timeout(),
            connect_timeout: config.connect_timeout(),
            retry_policy: config.retry_policy(),
        })
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-attempt timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Bound on establishing a connection, reported when connecting times out.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Executes a logical call, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::RetriesExhausted`]: every attempt got a 429 or 5xx
    /// - [`BridgeError::Timeout`]: the last attempt timed out
    /// - [`BridgeError::Api`]: any other non-success status, returned at once
    /// - [`BridgeError::HttpError`]: connection level failure
    /// - [`BridgeError::InvalidResponse`]: a JSON body failed to parse
    #[instrument(
        skip(self, intent),
        fields(
            method = %intent.descriptor().method,
            path = intent.path(),
            call_id = %Uuid::new_v4()
        )
    )]
    pub async fn execute(&self, intent: &RequestIntent) -> Result<DecodedResponse> {
        let outcome =
            retry_with_backoff(&self.retry_policy, |attempt| self.attempt(intent, attempt)).await;

        match outcome {
            Ok(response) => Ok(response),
            Err(RetryFailure::Fatal(error)) => Err(error),
            Err(RetryFailure::Exhausted { attempts, last }) => Err(exhausted(last, attempts)),
        }
    }

    /// Runs one attempt under the configured timeout.
    ///
    /// The timer lives inside this future, so it ends with the attempt whatever
    /// the outcome.
    async fn attempt(
        &self,
        intent: &RequestIntent,
        attempt: u32,
    ) -> AttemptOutcome<DecodedResponse, BridgeError> {
        let method = intent.descriptor().method;
        let request = match self.build_request(intent) {
            Ok(request) => request,
            Err(error) => return AttemptOutcome::Fatal(error),
        };

        tracing::debug!(attempt = attempt + 1, "Sending request");

        match tokio::time::timeout(self.timeout, exchange(request)).await {
            Ok(Ok(raw)) => classify(method, intent.path(), raw),
            Ok(Err(error)) => self.transport_failure(method, intent.path(), error),
            Err(_elapsed) => AttemptOutcome::Retryable(BridgeError::Timeout {
                method,
                path: intent.path().to_owned(),
                timeout: self.timeout,
            }),
        }
    }

    /// Classifies a reqwest failure.
    ///
    /// The client has no overall timeout, so a reqwest timeout is always the
    /// connect bound firing.
    fn transport_failure(
        &self,
        method: HttpMethod,
        path: &str,
        error: reqwest::Error,
    ) -> AttemptOutcome<DecodedResponse, BridgeError> {
        if error.is_timeout() {
            AttemptOutcome::Retryable(BridgeError::Timeout {
                method,
                path: path.to_owned(),
                timeout: self.connect_timeout,
            })
        } else {
            AttemptOutcome::Fatal(BridgeError::from(error))
        }
    }

    /// Builds the request for one attempt, token included.
    fn build_request(&self, intent: &RequestIntent) -> Result<RequestBuilder> {
        let method = intent.descriptor().method;
        let url = self.build_url(intent)?;

        let request = self
            .client
            .request(method.into(), url)
            .header(ACCEPT, JSON_MEDIA_TYPE);

        match intent.body() {
            Some(fields) if method.carries_body() => {
                let mut payload = fields.clone();
                payload.insert(API_TOKEN_PARAM.to_owned(), Value::String(self.api_token.to_string()));
                // `json` also sets Content-Type: application/json
                Ok(request.json(&payload))
            }
            _ => Ok(request),
        }
    }

    /// Resolves the request URL and its query string.
    ///
    /// Fixed pairs come first, caller pairs override them, and a caller
    /// `api_token` is always dropped. Bodyless verbs get the token appended.
    fn build_url(&self, intent: &RequestIntent) -> Result<Url> {
        let descriptor = intent.descriptor();
        let relative = intent.path().trim_start_matches('/');
        let mut url = self.base_url.join(relative).map_err(|e| {
            BridgeError::InvalidInput(format!("invalid request path {}: {e}", intent.path()))
        })?;

        let mut pairs: Vec<(&str, &str)> = descriptor.fixed_query.to_vec();
        for (key, value) in intent.query() {
            if key == API_TOKEN_PARAM {
                continue;
            }
            match pairs.iter_mut().find(|(existing, _)| *existing == key.as_str()) {
                Some(slot) => slot.1 = value.as_str(),
                None => pairs.push((key.as_str(), value.as_str())),
            }
        }
        if !descriptor.method.carries_body() {
            pairs.push((API_TOKEN_PARAM, &*self.api_token));
        }

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

/// Raw outcome of one exchange: status, declared content type, body text.
#[derive(Debug)]
struct RawResponse {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

/// Sends the request and reads the whole body.
async fn exchange(request: RequestBuilder) -> reqwest::Result<RawResponse> {
    let response = request.send().await?;
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await?;
    Ok(RawResponse { status, content_type, body })
}

/// Sorts a completed exchange into success, retryable or fatal.
fn classify(
    method: HttpMethod,
    path: &str,
    raw: RawResponse,
) -> AttemptOutcome<DecodedResponse, BridgeError> {
    let status = raw.status.as_u16();

    if raw.status.is_success() {
        return match decode(raw.content_type.as_deref(), raw.body) {
            Ok(decoded) => AttemptOutcome::Success(decoded),
            Err(reason) => AttemptOutcome::Fatal(BridgeError::InvalidResponse {
                method,
                path: path.to_owned(),
                reason,
            }),
        };
    }

    let error = BridgeError::Api { method, path: path.to_owned(), status, body: raw.body };
    if is_retryable_status(status) {
        AttemptOutcome::Retryable(error)
    } else {
        AttemptOutcome::Fatal(error)
    }
}

/// Decodes a success body by its declared content type.
fn decode(
    content_type: Option<&str>,
    body: String,
) -> std::result::Result<DecodedResponse, String> {
    let is_json =
        content_type.is_some_and(|value| value.to_ascii_lowercase().contains(JSON_MEDIA_TYPE));
    if !is_json {
        return Ok(DecodedResponse::Text(body));
    }
    if body.trim().is_empty() {
        return Ok(DecodedResponse::Json(Value::Null));
    }
    serde_json::from_str(&body).map(DecodedResponse::Json).map_err(|e| e.to_string())
}

/// Maps the last transient error of an exhausted call to its terminal form.
fn exhausted(last: BridgeError, attempts: u32) -> BridgeError {
    match last {
        BridgeError::Api { method, path, status, body } => {
            BridgeError::RetriesExhausted { method, path, attempts, status, body }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::endpoint::Operation;

    fn executor() -> RequestExecutor {
        let config = ClientConfig::new("secret", "acme");
        RequestExecutor::new(&config).unwrap()
    }

    fn raw(status: u16, content_type: Option<&str>, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: content_type.map(str::to_owned),
            body: body.to_owned(),
        }
    }

    #[test]
    fn test_executor_new_rejects_invalid_config() {
        let result = RequestExecutor::new(&ClientConfig::new("", "acme"));
        assert!(matches!(result, Err(BridgeError::ConfigError(_))));
    }

    #[test]
    fn test_executor_debug_redacts_token() {
        let debug = format!("{:?}", executor());
        assert!(!debug.contains("secret"));
        assert!(debug.contains("acme.fakturownia.pl"));
    }

    #[test]
    fn test_build_url_get_appends_token() {
        let intent = RequestIntent::for_operation(Operation::GetInvoice, Some(42)).unwrap();
        let url = executor().build_url(&intent).unwrap();
        assert_eq!(url.as_str(), "https://acme.fakturownia.pl/invoices/42.json?api_token=secret");
    }

    #[test]
    fn test_build_url_post_has_no_token() {
        let intent = RequestIntent::for_operation(Operation::CreateInvoice, None).unwrap();
        let url = executor().build_url(&intent).unwrap();
        assert_eq!(url.as_str(), "https://acme.fakturownia.pl/invoices.json");
    }

    #[test]
    fn test_build_url_fixed_query_first() {
        let intent = RequestIntent::for_operation(Operation::SendInvoiceToKsef, Some(5)).unwrap();
        let url = executor().build_url(&intent).unwrap();
        assert_eq!(url.query(), Some("send_to_ksef=yes&api_token=secret"));
    }

    #[test]
    fn test_build_url_empty_fixed_value() {
        let intent = RequestIntent::for_operation(Operation::GetAccountInfo, None).unwrap();
        let url = executor().build_url(&intent).unwrap();
        assert_eq!(url.query(), Some("integration_token=&api_token=secret"));
    }

    #[test]
    fn test_build_url_caller_token_dropped() {
        let intent = RequestIntent::for_operation(Operation::ListInvoices, None)
            .unwrap()
            .with_query([("api_token", "forged"), ("page", "2")])
            .unwrap();
        let url = executor().build_url(&intent).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![("page".to_owned(), "2".to_owned()), ("api_token".to_owned(), "secret".to_owned())]
        );
    }

    #[test]
    fn test_build_url_encodes_values() {
        let intent = RequestIntent::for_operation(Operation::ListClients, None)
            .unwrap()
            .with_query([("name", "Kowalski & Syn")])
            .unwrap();
        let url = executor().build_url(&intent).unwrap();
        assert_eq!(url.query(), Some("name=Kowalski+%26+Syn&api_token=secret"));
    }

    #[test]
    fn test_classify_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            let outcome = classify(HttpMethod::Get, "/x.json", raw(status, None, "busy"));
            assert!(matches!(outcome, AttemptOutcome::Retryable(_)), "status {status}");
        }
    }

    #[test]
    fn test_classify_fatal_statuses() {
        for status in [400, 401, 403, 404, 422] {
            let outcome = classify(HttpMethod::Get, "/x.json", raw(status, None, "nope"));
            match outcome {
                AttemptOutcome::Fatal(BridgeError::Api { status: got, body, .. }) => {
                    assert_eq!(got, status);
                    assert_eq!(body, "nope");
                }
                other => panic!("expected fatal Api error for {status}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_decode_json_and_text() {
        let json_body = decode(Some("application/json; charset=utf-8"), r#"{"id":1}"#.to_owned());
        assert_eq!(json_body.unwrap(), DecodedResponse::Json(json!({"id": 1})));

        let text_body = decode(Some("text/plain"), "OK".to_owned());
        assert_eq!(text_body.unwrap(), DecodedResponse::Text("OK".to_owned()));

        let untyped = decode(None, "{\"id\":1}".to_owned());
        assert_eq!(untyped.unwrap(), DecodedResponse::Text("{\"id\":1}".to_owned()));
    }

    #[test]
    fn test_decode_empty_json_is_null() {
        let decoded = decode(Some("application/json"), String::new());
        assert_eq!(decoded.unwrap(), DecodedResponse::Json(Value::Null));
    }

    #[test]
    fn test_classify_malformed_json_is_fatal() {
        let outcome = classify(HttpMethod::Get, "/x.json", raw(200, Some("application/json"), "{oops"));
        assert!(matches!(outcome, AttemptOutcome::Fatal(BridgeError::InvalidResponse { .. })));
    }

    #[test]
    fn test_exhausted_maps_api_error() {
        let last = BridgeError::Api {
            method: HttpMethod::Get,
            path: "/invoices.json".to_owned(),
            status: 503,
            body: "down".to_owned(),
        };
        let error = exhausted(last, 4);
        assert!(matches!(error, BridgeError::RetriesExhausted { attempts: 4, status: 503, .. }));
    }

    #[test]
    fn test_exhausted_keeps_timeout() {
        let last = BridgeError::Timeout {
            method: HttpMethod::Get,
            path: "/invoices.json".to_owned(),
            timeout: Duration::from_millis(50),
        };
        assert!(matches!(exhausted(last, 4), BridgeError::Timeout { .. }));
    }

    /// A reqwest-level timeout from a client with a short overall bound.
    async fn reqwest_timeout_error() -> reqwest::Error {
        use wiremock::{Mock, MockServer, ResponseTemplate, matchers::any};

        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = Client::builder().timeout(Duration::from_millis(20)).build().unwrap();
        let url = format!("{}/account.json?api_token=secret", server.uri());
        let error = client.get(url).send().await.unwrap_err();
        assert!(error.is_timeout());
        error
    }

    #[tokio::test]
    async fn test_reqwest_timeout_reports_connect_bound() {
        let mut config = ClientConfig::new("secret", "acme");
        config.connect_timeout_secs = 7;
        let executor = RequestExecutor::new(&config).unwrap();
        let error = reqwest_timeout_error().await;

        let outcome = executor.transport_failure(HttpMethod::Get, "/account.json", error);
        let AttemptOutcome::Retryable(error) = outcome else {
            panic!("expected a retryable outcome");
        };

        assert!(matches!(error, BridgeError::Timeout { timeout, .. } if timeout == Duration::from_secs(7)));
        assert!(error.to_string().contains("7000ms"));
        assert!(!error.to_string().contains(&executor.timeout().as_millis().to_string()));
    }

    #[tokio::test]
    async fn test_reqwest_error_conversion_drops_url() {
        let error = BridgeError::from(reqwest_timeout_error().await);

        assert!(matches!(error, BridgeError::HttpError(ref e) if e.url().is_none()));
        assert!(!error.to_string().contains("secret"));
        assert!(!format!("{error:?}").contains("secret"));
    }
}
