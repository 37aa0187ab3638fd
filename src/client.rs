//! HTTP client for the PCDN API.

use crate::config::ClientConfig;
use crate::error::Error;
use crate::types::*;
use chrono::{FixedOffset, Utc};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;


const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP client for the PCDN API.
///
/// Every call is a single independent request; nothing is retried and
/// vendor `retcode` values are returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct PcdnClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    utc_offset: Option<FixedOffset>,
}

impl PcdnClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built or the
    /// configured UTC offset is out of range.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let utc_offset = config
            .utc_offset()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.resolved_base_url(),
            credentials: config.credentials,
            utc_offset,
        })
    }

    /// Creates a new client for `host` with otherwise default configuration.
    /// An empty `host` selects the vendor's default base URL.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_credentials(host: &str, credentials: Credentials) -> Result<Self, Error> {
        Self::new(ClientConfig::new(host, credentials))
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the client's credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Requests an access token, signing the request for `ctime`.
    ///
    /// # Arguments
    /// * `ctime` - Current time in seconds since the Unix epoch.
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn get_access_token(&self, ctime: i64) -> Result<AccessTokenResponse, Error> {
        let url = format!("{}/auth/token/get", self.base_url);
        let body = AccessTokenRequest::signed(&self.credentials, ctime);

        debug!(url = %url, ctime, "requesting access token");
        let request = self.client.post(&url);
        self.send_json(request, &body).await
    }

    /// Requests an access token signed with the current time.
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn get_access_token_now(&self) -> Result<AccessTokenResponse, Error> {
        self.get_access_token(Utc::now().timestamp()).await
    }

    // ========================================================================
    // Cache Management
    // ========================================================================

    /// Asks the CDN to cache `urls`.
    ///
    /// # Errors
    /// Returns [`Error::TooManyUrls`] without sending anything if more than
    /// [`MAX_URLS_PER_REQUEST`] URLs are given, otherwise error if the
    /// request fails or the response cannot be decoded.
    pub async fn preheat(
        &self,
        urls: &[String],
        access_token: &str,
    ) -> Result<PreheatResponse, Error> {
        check_url_count(urls)?;

        let url = format!("{}/pcdn/cdm/prefetch", self.base_url);
        let body = PreheatRequest { urls };

        debug!(url = %url, count = urls.len(), "preheating urls");
        let request = self.authorized(&url, access_token);
        self.send_json(request, &body).await
    }

    /// Asks the CDN to evict cached copies of `urls`.
    ///
    /// # Errors
    /// Returns [`Error::TooManyUrls`] without sending anything if more than
    /// [`MAX_URLS_PER_REQUEST`] URLs are given, otherwise error if the
    /// request fails or the response cannot be decoded.
    pub async fn purge(
        &self,
        urls: &[String],
        access_token: &str,
    ) -> Result<PurgeResponse, Error> {
        check_url_count(urls)?;

        let url = format!("{}/pcdn/cdm/purge", self.base_url);
        let body = PurgeRequest {
            urls,
            purge_type: PURGE_TYPE_FILE,
        };

        debug!(url = %url, count = urls.len(), "purging urls");
        let request = self.authorized(&url, access_token);
        self.send_json(request, &body).await
    }

    // ========================================================================
    // Domains & Logs
    // ========================================================================

    /// Lists the domains bound to the account.
    ///
    /// # Errors
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn domain_list(&self, access_token: &str) -> Result<DomainListResponse, Error> {
        let url = format!("{}/pcdn/cdm/domainlist", self.base_url);

        debug!(url = %url, "listing domains");
        let request = self.authorized(&url, access_token);
        self.send(request).await
    }

    /// Fetches log-file locations for a domain and time range.
    ///
    /// `begintime` and `endtime` are sent as `YYYYMMDDHHmm` in the configured
    /// offset, or the local time zone when none is configured.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTimestamp`] without sending anything if a time
    /// is out of range, otherwise error if the request fails or the response
    /// cannot be decoded.
    pub async fn get_logfile(
        &self,
        request: &LogfileRequest,
        access_token: &str,
    ) -> Result<LogfileResponse, Error> {
        let body = request.to_query(self.utc_offset)?;
        let url = format!("{}/pcdn/cdm/getlogfile", self.base_url);

        debug!(
            url = %url,
            domain = %body.domain,
            begintime = %body.begintime,
            endtime = %body.endtime,
            "fetching log files"
        );
        let builder = self.authorized(&url, access_token);
        self.send_json(builder, &body).await
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn authorized(&self, url: &str, access_token: &str) -> RequestBuilder {
        self.client.post(url).header(AUTHORIZATION, access_token)
    }

    async fn send_json<B, T>(&self, request: RequestBuilder, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(Error::Encode)?;
        let request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(payload);
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let resp = request.send().await?;
        self.handle_response(resp).await
    }

    /// Decodes the body whatever the HTTP status.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        debug!(status = %status, len = bytes.len(), "received response");
        serde_json::from_slice(&bytes).map_err(|source| Error::Decode {
            status: status.as_u16(),
            source,
        })
    }
}

fn check_url_count(urls: &[String]) -> Result<(), Error> {
    if urls.len() > MAX_URLS_PER_REQUEST {
        return Err(Error::TooManyUrls {
            count: urls.len(),
            max: MAX_URLS_PER_REQUEST,
        });
    }
    Ok(())
}
