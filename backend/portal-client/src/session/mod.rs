//! Session bootstrap against the reporting portal.
//!
//! The portal has no login API. Fetching a family's dashboard page sets the
//! cookies the query service later requires; this module captures them and
//! nothing else.

use crate::config::{PortalEndpoints, ResourceFamily};
use crate::error::PortalClientError;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::SET_COOKIE;
use url::Url;

const BOOTSTRAP_STAGE: &str = "session bootstrap";

/// Cookie credential for one resource family.
///
/// Deliberately not `Clone`: a session belongs to one logical request and
/// queries only borrow it.
#[derive(Debug, PartialEq, Eq)]
pub struct Session {
    family: ResourceFamily,
    cookie_header: String,
    referer: Url,
}

impl Session {
    /// Build a session from an already joined cookie header.
    ///
    /// Returns `None` for a blank header so an empty credential can never exist.
    pub fn new(family: ResourceFamily, cookie_header: String, referer: Url) -> Option<Self> {
        if cookie_header.trim().is_empty() {
            return None;
        }
        Some(Self {
            family,
            cookie_header,
            referer,
        })
    }

    pub fn family(&self) -> ResourceFamily {
        self.family
    }

    /// Value for the `Cookie` request header (`name=value; name=value`).
    pub fn cookie_header(&self) -> &str {
        &self.cookie_header
    }

    /// Bootstrap page URL; replayed as `Referer` on every query.
    pub fn referer(&self) -> &Url {
        &self.referer
    }
}

/// Reduce raw `Set-Cookie` values to a single `Cookie` header value.
///
/// Keeps only the leading `name=value` pair of each header; attributes such
/// as `Path`, `HttpOnly`, `Secure` and `Expires` are dropped.
pub fn cookie_header_from<'a, I>(set_cookie_values: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let pairs: Vec<&str> = set_cookie_values
        .into_iter()
        .filter_map(|raw| raw.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('=') && !pair.starts_with('='))
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

/// Acquires fresh sessions; one per call, no caching.
#[derive(Clone)]
pub struct SessionManager {
    client: Client,
    endpoints: Arc<PortalEndpoints>,
    timeout: Duration,
}

impl SessionManager {
    pub fn new(client: Client, endpoints: Arc<PortalEndpoints>, timeout: Duration) -> Self {
        Self {
            client,
            endpoints,
            timeout,
        }
    }

    /// GET the family's bootstrap page and capture its session cookies.
    ///
    /// # Errors
    ///
    /// - [`PortalClientError::Session`] if the response carries no cookie
    /// - [`PortalClientError::Timeout`] if the call exceeds the configured deadline
    /// - [`PortalClientError::Http`] for any other transport failure
    pub async fn acquire_session(
        &self,
        family: ResourceFamily,
    ) -> Result<Session, PortalClientError> {
        let bootstrap_url = self.endpoints.family(family).bootstrap_url.clone();
        debug!("Acquiring {family} session from {bootstrap_url}");

        let response = self
            .client
            .get(bootstrap_url.clone())
            .send()
            .await
            .map_err(|e| PortalClientError::transport(e, BOOTSTRAP_STAGE, self.timeout))?;

        let status = response.status().as_u16();
        let headers = response.headers();
        let cookie_header =
            cookie_header_from(headers.get_all(SET_COOKIE).iter().filter_map(|v| v.to_str().ok()));

        match cookie_header.and_then(|header| Session::new(family, header, bootstrap_url)) {
            Some(session) => {
                if !response.status().is_success() {
                    warn!("{family} bootstrap answered HTTP {status} but still set cookies");
                }
                debug!("{family} session acquired");
                Ok(session)
            }
            None => {
                let header_names = headers.keys().map(|name| name.as_str().to_string()).collect();
                Err(PortalClientError::session(status, header_names))
            }
        }
    }
}
