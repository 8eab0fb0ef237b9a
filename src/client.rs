//! pretix API client.
//!
//! Low-level client that handles configuration, authentication, path
//! resolution and the conversion of response bodies into entities.
//! Resource operations are implemented via traits on entity types and as
//! convenience methods next to each model.

use std::env;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::collection::EntityCollection;
use crate::entity::{self, Entity};
use crate::error::{PretixError, Result};
use crate::pagination::{ListOptions, Page};
use crate::record::Origin;
use crate::transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

/// Maximum pages to follow (safety limit).
const MAX_PAGES: usize = 1000;

/// pretix API client.
///
/// Holds the instance URL, the organizer every organizer-scoped request
/// targets, and the API token. This struct is cheaply cloneable; clones
/// share the same transport.
///
/// # Example
///
/// ```no_run
/// use pretixapi::PretixClient;
///
/// # fn example() -> pretixapi::Result<()> {
/// // Create from environment variables
/// let client = PretixClient::from_env()?;
///
/// // Or configure manually
/// let client = PretixClient::new("https://pretix.eu", "acme", "your-api-token")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PretixClient {
    transport: Arc<dyn Transport>,
    url: String,
    base_url: Arc<Url>,
    organizer: String,
    token: String,
}

impl std::fmt::Debug for PretixClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PretixClient")
            .field("base_url", &self.base_url.as_str())
            .field("organizer", &self.organizer)
            .finish_non_exhaustive()
    }
}

impl PretixClient {
    /// Instance used when no URL is configured.
    pub const DEFAULT_URL: &'static str = "https://pretix.eu";

    /// Create a client from environment variables.
    ///
    /// Uses `PRETIX_API_TOKEN` and `PRETIX_ORGANIZER`, and optionally
    /// `PRETIX_URL` (defaults to `https://pretix.eu`).
    ///
    /// # Errors
    ///
    /// Returns an error if the token or organizer is not set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("PRETIX_API_TOKEN").map_err(|_| {
            PretixError::ConfigMissing("PRETIX_API_TOKEN environment variable not set".to_string())
        })?;
        let organizer = env::var("PRETIX_ORGANIZER").map_err(|_| {
            PretixError::ConfigMissing("PRETIX_ORGANIZER environment variable not set".to_string())
        })?;
        let url = env::var("PRETIX_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());

        Self::new(&url, &organizer, &token)
    }

    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `url` - pretix instance URL (e.g., `https://pretix.eu`)
    /// * `organizer` - Organizer slug used by organizer-scoped requests
    /// * `token` - API token
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(url: &str, organizer: &str, token: &str) -> Result<Self> {
        let url = url.trim_end_matches('/').to_string();
        let base_url = Url::parse(&format!("{url}/api/v1/"))?;

        Ok(Self {
            transport: Arc::new(ReqwestTransport::new()?),
            url,
            base_url: Arc::new(base_url),
            organizer: organizer.to_string(),
            token: token.to_string(),
        })
    }

    /// Replace the HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Instance URL without trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// API base URL (`<url>/api/v1/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current organizer slug.
    pub fn organizer(&self) -> &str {
        &self.organizer
    }

    /// Point organizer-scoped requests at another organizer.
    ///
    /// Must not be called while requests on this client are in flight.
    pub fn set_organizer(&mut self, organizer: impl Into<String>) -> &mut Self {
        self.organizer = organizer.into();
        self
    }

    /// Origin stamped on every entity this client builds.
    pub fn origin(&self) -> Origin {
        Origin {
            url: self.url.clone(),
            organizer: self.organizer.clone(),
        }
    }

    /// `organizers/<organizer>/`
    pub fn organizer_path(&self) -> String {
        format!("organizers/{}/", urlencoding::encode(&self.organizer))
    }

    /// `organizers/<organizer>/events/<event>/`
    pub fn event_path(&self, event: &str) -> String {
        format!("{}events/{}/", self.organizer_path(), urlencoding::encode(event))
    }

    /// Resolve a request path.
    ///
    /// Absolute URLs (such as `next` links) are used verbatim; anything
    /// else is relative to the API base.
    ///
    /// # Errors
    ///
    /// Returns an error if the result is not a valid URL.
    pub fn resolve(&self, path: &str) -> Result<Url> {
        match Url::parse(path) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(self.base_url.join(path.trim_start_matches('/'))?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/javascript"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let token = HeaderValue::from_str(&format!("Token {}", self.token)).map_err(|_| {
            PretixError::InvalidArgument("API token contains invalid characters".to_string())
        })?;
        headers.insert(AUTHORIZATION, token);
        Ok(headers)
    }

    /// Send a request and return the body of a successful response.
    #[tracing::instrument(skip(self, query, body))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Vec<u8>> {
        let mut url = self.resolve(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let request = TransportRequest {
            method,
            url,
            headers: self.headers()?,
            body: body.cloned(),
        };

        let response = self.transport.send(request).await?;
        Self::check_response(response)
    }

    /// Send a request and decode the JSON body (`null` when empty).
    pub async fn request_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let bytes = self.request(method, path, &[], body).await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request and materialize the body as an entity.
    pub async fn request_entity<E: Entity>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<E> {
        let raw = self.request_json(method, path, body).await?;
        self.materialize(raw)
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Wrap a raw payload as an entity stamped with this client's origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not a JSON object.
    pub fn materialize<E: Entity>(&self, raw: Value) -> Result<E> {
        entity::materialize(raw, Some(self.origin()))
    }

    /// Fetch one page of a collection.
    #[tracing::instrument(skip(self, query))]
    pub async fn fetch_page(&self, path: &str, query: &[(String, String)]) -> Result<Page<Value>> {
        let bytes = self.request(Method::GET, path, query, None).await?;
        let raw: Value = serde_json::from_slice(&bytes)?;
        let page: Page<Value> = serde_json::from_value(raw).map_err(|e| {
            PretixError::InvalidPayload(format!("expected a paged collection: {e}"))
        })?;

        tracing::debug!(
            items = page.items.len(),
            has_more = page.has_more(),
            "fetched page"
        );
        Ok(page)
    }

    /// Fetch a collection and materialize its items.
    ///
    /// When `options.fetch_all` is set and the endpoint is `paginated`,
    /// `next` links are followed until the last page; pages are fetched one
    /// after another and their items kept in page order.
    pub async fn fetch_collection<E: Entity>(
        &self,
        path: &str,
        options: &ListOptions,
        paginated: bool,
    ) -> Result<EntityCollection<E>> {
        if options.fetch_all && !paginated {
            tracing::warn!(path, "endpoint does not support fetching all pages, using first page");
        }

        let mut page = self.fetch_page(path, &options.query).await?;
        let mut raw = std::mem::take(&mut page.items);

        if options.fetch_all && paginated {
            let mut pages = 1;
            while let Some(next) = page.next.take() {
                if pages >= MAX_PAGES {
                    tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                    break;
                }
                page = self.fetch_page(&next, &[]).await?;
                raw.append(&mut page.items);
                pages += 1;
            }
        }

        raw.into_iter().map(|item| self.materialize(item)).collect()
    }

    /// Check response status and convert errors.
    fn check_response(response: TransportResponse) -> Result<Vec<u8>> {
        let status = response.status;

        if status.is_success() {
            return Ok(response.body);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(PretixError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        Err(PretixError::ApiError {
            message: Self::error_message(status, &response.body),
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract a human-readable message from an error body.
    fn error_message(status: reqwest::StatusCode, body: &[u8]) -> String {
        if let Ok(json) = serde_json::from_slice::<Value>(body) {
            for key in ["detail", "message", "error"] {
                if let Some(msg) = json.get(key).and_then(|m| m.as_str()) {
                    return msg.to_string();
                }
            }
            if !json.is_null() {
                return json.to_string();
            }
        }

        match std::str::from_utf8(body) {
            Ok(text) if !text.trim().is_empty() => text.to_string(),
            _ => format!("HTTP {status}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::ScriptedTransport;
    use serde_json::json;

    const BASE: &str = "https://pretix.test/api/v1/organizers/acme/events/";

    fn client(transport: Arc<ScriptedTransport>) -> PretixClient {
        PretixClient::new("https://pretix.test/", "acme", "secret-token")
            .unwrap()
            .with_transport(transport)
    }

    fn event(n: usize) -> Value {
        json!({"slug": format!("event-{n}"), "name": {"en": format!("Event {n}")}})
    }

    fn page(range: std::ops::Range<usize>, next: Option<&str>) -> Value {
        json!({
            "count": 24,
            "next": next,
            "previous": null,
            "results": range.map(event).collect::<Vec<_>>(),
        })
    }

    fn three_pages() -> Arc<ScriptedTransport> {
        let page2 = format!("{BASE}?page=2");
        let page3 = format!("{BASE}?page=3");
        Arc::new(
            ScriptedTransport::new()
                .respond(BASE, 200, page(0..10, Some(&page2)))
                .respond(&page2, 200, page(10..20, Some(&page3)))
                .respond(&page3, 200, page(20..24, None)),
        )
    }

    #[test]
    fn test_client_debug() {
        let client = PretixClient::new("https://pretix.eu", "acme", "test-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("PretixClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = PretixClient::new("https://pretix.eu", "acme", "token").unwrap();
        let client2 = PretixClient::new("https://pretix.eu/", "acme", "token").unwrap();
        assert_eq!(client1.base_url().as_str(), "https://pretix.eu/api/v1/");
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(client2.url(), "https://pretix.eu");
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let client = PretixClient::new("https://pretix.eu/tickets", "acme", "token").unwrap();
        assert_eq!(
            client.resolve("organizers/").unwrap().as_str(),
            "https://pretix.eu/tickets/api/v1/organizers/"
        );
        assert_eq!(
            client.resolve("/organizers/").unwrap().as_str(),
            "https://pretix.eu/tickets/api/v1/organizers/"
        );
        assert_eq!(
            client.resolve("https://other.example/api/v1/organizers/?page=2").unwrap().as_str(),
            "https://other.example/api/v1/organizers/?page=2"
        );
    }

    #[test]
    fn test_event_path_encodes_slugs() {
        let mut client = PretixClient::new("https://pretix.eu", "acme", "token").unwrap();
        assert_eq!(client.event_path("a b"), "organizers/acme/events/a%20b/");
        client.set_organizer("other");
        assert_eq!(client.organizer_path(), "organizers/other/");
    }

    #[tokio::test]
    async fn test_fetch_all_concatenates_pages_in_order() {
        let transport = three_pages();
        let client = client(transport.clone());

        let events: EntityCollection<crate::Event> = client
            .fetch_collection("organizers/acme/events/", &ListOptions::all_pages(), true)
            .await
            .unwrap();

        assert_eq!(events.len(), 24);
        let slugs: Vec<_> = events.iter().map(|e| e.slug().unwrap().unwrap().to_string()).collect();
        let expected: Vec<_> = (0..24).map(|n| format!("event-{n}")).collect();
        assert_eq!(slugs, expected);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_first_page_only_without_fetch_all() {
        let transport = three_pages();
        let client = client(transport.clone());

        let events: EntityCollection<crate::Event> = client
            .fetch_collection("organizers/acme/events/", &ListOptions::default(), true)
            .await
            .unwrap();

        assert_eq!(events.len(), 10);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_ignored_for_unpaginated_endpoint() {
        let transport = three_pages();
        let client = client(transport.clone());

        let events: EntityCollection<crate::Event> = client
            .fetch_collection("organizers/acme/events/", &ListOptions::all_pages(), false)
            .await
            .unwrap();

        assert_eq!(events.len(), 10);
    }

    #[tokio::test]
    async fn test_requests_carry_auth_headers() {
        let transport = three_pages();
        let client = client(transport.clone());

        client.fetch_page("organizers/acme/events/", &[]).await.unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.headers[AUTHORIZATION], "Token secret-token");
        assert_eq!(request.headers[ACCEPT], "application/json, text/javascript");
        assert_eq!(request.headers[CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_entities_carry_origin() {
        let transport = three_pages();
        let client = client(transport);

        let events: EntityCollection<crate::Event> = client
            .fetch_collection("organizers/acme/events/", &ListOptions::default(), true)
            .await
            .unwrap();

        assert_eq!(events[0].pretix_url(), Some("https://pretix.test"));
        assert_eq!(events[0].organizer_slug(), Some("acme"));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_api_error() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = client(transport);

        let err = client.fetch_page("organizers/acme/events/", &[]).await.unwrap_err();
        match err {
            PretixError::ApiError { message, status_code } => {
                assert_eq!(message, "Not found.");
                assert_eq!(status_code, Some(404));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_envelope_is_invalid_payload() {
        let transport = Arc::new(ScriptedTransport::new().respond(BASE, 200, json!({"slug": "x"})));
        let client = client(transport);

        let err = client.fetch_page("organizers/acme/events/", &[]).await.unwrap_err();
        assert!(matches!(err, PretixError::InvalidPayload(_)));
    }
}
