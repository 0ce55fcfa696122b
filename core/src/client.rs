//! Blocking client for the review-assignment API.
//!
//! # Design
//! `ReviewsClient` holds the header list built from the credentials, the
//! endpoint set and a `Transport`. None of these change after construction.
//! Every operation is split into a `build_*` method that produces an
//! `HttpRequest` and a call routed through `execute`, which performs exactly
//! one round trip and turns any failure into `UnauthorizedToken`.

use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{Credentials, Endpoints};
use crate::error::{CallFailure, ConfigError, TransportError, UnauthorizedToken};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::selection;
use crate::transport::UreqTransport;
use crate::types::ProjectSelection;

/// Client for the reviews API, generic over how requests reach the wire.
#[derive(Clone)]
pub struct ReviewsClient<T = UreqTransport> {
    headers: Vec<(String, String)>,
    endpoints: Endpoints,
    transport: T,
}

impl ReviewsClient<UreqTransport> {
    /// Build a network-backed client from `UDACITY_AUTH_TOKEN` and
    /// `REVAS_BASE_URL`. Fails before any request if the token is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials = Credentials::from_env()?;
        Ok(Self::new(credentials, Endpoints::from_env(), UreqTransport::new()))
    }
}

impl<T: Transport> ReviewsClient<T> {
    pub fn new(credentials: Credentials, endpoints: Endpoints, transport: T) -> Self {
        let headers = vec![
            ("Authorization".to_string(), credentials.token().to_string()),
            ("Content-Length".to_string(), "0".to_string()),
        ];
        Self {
            headers,
            endpoints,
            transport,
        }
    }

    /// Headers attached to every bodyless request. `Content-Length: 0` lives
    /// only in the request data; `UreqTransport` leaves body framing to ureq
    /// and does not put it on the wire.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_certifications(&self) -> HttpRequest {
        self.get(&self.endpoints.certifications)
    }

    pub fn build_certified_languages(&self) -> HttpRequest {
        self.get(&self.endpoints.reviewer)
    }

    /// The payload is sent exactly as given.
    pub fn build_request_reviews(&self, payload: &Value) -> HttpRequest {
        let mut headers: Vec<(String, String)> = self
            .headers
            .iter()
            .filter(|(key, _)| !key.eq_ignore_ascii_case("content-length"))
            .cloned()
            .collect();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoints.new_submission_requests.clone(),
            headers,
            body: Some(payload.to_string()),
        }
    }

    pub fn build_assigned_count(&self) -> HttpRequest {
        self.get(&self.endpoints.assigned_count)
    }

    pub fn build_submission_requests(&self) -> HttpRequest {
        self.get(&self.endpoints.submission_requests)
    }

    /// Run a deferred HTTP call once and translate the outcome.
    ///
    /// The body is parsed before the status is looked at. A non-2xx status,
    /// a transport failure and an unparseable success body all come back
    /// as `UnauthorizedToken`; a 2xx JSON body is returned untouched.
    pub fn execute<F>(&self, call: F) -> Result<Value, UnauthorizedToken>
    where
        F: FnOnce() -> Result<HttpResponse, TransportError>,
    {
        call()
            .map_err(CallFailure::from)
            .and_then(parse_response)
            .map_err(|failure| {
                warn!(error = %failure, "call rejected");
                UnauthorizedToken::new(failure)
            })
    }

    pub fn certifications(&self) -> Result<Value, UnauthorizedToken> {
        self.send(self.build_certifications())
    }

    pub fn certified_languages(&self) -> Result<Value, UnauthorizedToken> {
        self.send(self.build_certified_languages())
    }

    pub fn request_reviews(&self, payload: &Value) -> Result<Value, UnauthorizedToken> {
        self.send(self.build_request_reviews(payload))
    }

    pub fn assigned_count(&self) -> Result<Value, UnauthorizedToken> {
        self.send(self.build_assigned_count())
    }

    pub fn submission_requests(&self) -> Result<Value, UnauthorizedToken> {
        self.send(self.build_submission_requests())
    }

    /// Ids of the projects the reviewer is certified for.
    pub fn certified_project_ids(&self) -> Result<Vec<u64>, UnauthorizedToken> {
        self.certifications()
            .map(|certifications| selection::certified_project_ids(&certifications))
    }

    pub fn certified_language_codes(&self) -> Result<Vec<String>, UnauthorizedToken> {
        self.certified_languages()
            .map(|profile| selection::language_codes(&profile))
    }

    /// Pair `project_ids` with every language the reviewer is certified in.
    pub fn projects_with_languages(
        &self,
        project_ids: &[u64],
    ) -> Result<ProjectSelection, UnauthorizedToken> {
        let languages = self.certified_language_codes()?;
        Ok(selection::projects_with_languages(project_ids, &languages))
    }

    fn get(&self, url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: self.headers.clone(),
            body: None,
        }
    }

    fn send(&self, request: HttpRequest) -> Result<Value, UnauthorizedToken> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        self.execute(|| self.transport.send(request))
    }
}

impl<T> fmt::Debug for ReviewsClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewsClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

/// Parse the body, then check the status.
fn parse_response(response: HttpResponse) -> Result<Value, CallFailure> {
    let parsed = serde_json::from_str::<Value>(&response.body);
    if !response.is_success() {
        return Err(CallFailure::Status {
            status: response.status,
            body: response.body,
        });
    }
    Ok(parsed?)
}
