pub mod params;

pub use params::QueryParams;

use crate::config::PortalEndpoints;
use crate::error::PortalClientError;
use crate::session::Session;

use common::HttpStatusCode;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, COOKIE, ORIGIN, REFERER};
use url::Url;

/// Longest body excerpt kept in a [`PortalClientError::Query`].
pub const BODY_PREFIX_LIMIT: usize = 500;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
const X_REQUESTED_WITH_HEADER_KEY: &str = "x-requested-with";
const X_REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
const QUERY_STAGE: &str = "query";

/// Undecoded response from the query service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: HttpStatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Cut a response body down to at most `limit` bytes without splitting a character.
pub fn body_prefix(body: &[u8], limit: usize) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= limit {
        return text.into_owned();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Issues form-encoded POSTs against the portal with a borrowed session.
#[derive(Clone)]
pub struct QueryExecutor {
    client: Client,
    endpoints: Arc<PortalEndpoints>,
    timeout: Duration,
}

impl QueryExecutor {
    pub fn new(client: Client, endpoints: Arc<PortalEndpoints>, timeout: Duration) -> Self {
        Self {
            client,
            endpoints,
            timeout,
        }
    }

    /// Run one CDA query for the session's family.
    ///
    /// `params` carries only the dataset parameters; the CDA envelope
    /// (`path`, `dataAccessId`, paging) is added here.
    ///
    /// # Errors
    ///
    /// - [`PortalClientError::Query`] for any status >= 400
    /// - [`PortalClientError::Timeout`] if the call exceeds the configured deadline
    /// - [`PortalClientError::Http`] for any other transport failure
    pub async fn execute_query(
        &self,
        session: &Session,
        data_access_id: &str,
        params: &QueryParams,
    ) -> Result<RawResponse, PortalClientError> {
        let family = self.endpoints.family(session.family());

        let mut form = QueryParams::cda_envelope(&family.cda_path, data_access_id);
        form.extend(params);

        debug!(
            "CDA query {data_access_id} on {} ({} params)",
            session.family(),
            form.len()
        );
        self.post_form(session, &family.query_url, &form).await
    }

    /// POST to the server-side chart renderer; the body is image bytes.
    pub async fn execute_chart(
        &self,
        session: &Session,
        params: &QueryParams,
    ) -> Result<RawResponse, PortalClientError> {
        debug!("Chart request on {}", session.family());
        self.post_form(session, &self.endpoints.chart_url, params).await
    }

    async fn post_form(
        &self,
        session: &Session,
        url: &Url,
        form: &QueryParams,
    ) -> Result<RawResponse, PortalClientError> {
        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(COOKIE, session.cookie_header())
            .header(REFERER, session.referer().as_str())
            .header(X_REQUESTED_WITH_HEADER_KEY, X_REQUESTED_WITH_VALUE)
            .header(ORIGIN, self.endpoints.origin.as_str())
            .body(form.encode())
            .send()
            .await
            .map_err(|e| PortalClientError::transport(e, QUERY_STAGE, self.timeout))?;

        let status = HttpStatusCode::from(response.status().as_u16());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| PortalClientError::transport(e, QUERY_STAGE, self.timeout))?
            .to_vec();

        if status.is_error() {
            let prefix = body_prefix(&body, BODY_PREFIX_LIMIT);
            warn!("Query to {} failed with HTTP {status}", url.path());
            return Err(PortalClientError::query(status, prefix));
        }

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
