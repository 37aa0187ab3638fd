//! Request and response types for the PCDN API.

use crate::error::Error;
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Deserializer, Serialize};


/// Maximum number of URLs accepted by a single preheat or purge call.
pub const MAX_URLS_PER_REQUEST: usize = 100;

/// Purge type sent with every purge request.
pub const PURGE_TYPE_FILE: &str = "file";

/// Layout of `begintime`/`endtime` on the log-file endpoint.
const LOG_TIME_FORMAT: &str = "%Y%m%d%H%M";

/// Decodes an explicit JSON `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Credentials
// ============================================================================

/// Vendor credentials used to sign token requests.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Vendor-assigned client identifier.
    pub cp: String,
    /// Shared secret key. Only used as signing input, never transmitted.
    pub seckey: String,
}

impl Credentials {
    /// Creates credentials from a client identifier and secret key.
    #[must_use]
    pub fn new(cp: impl Into<String>, seckey: impl Into<String>) -> Self {
        Self {
            cp: cp.into(),
            seckey: seckey.into(),
        }
    }

    /// Signs a token request made at `ctime` (seconds since the Unix epoch).
    #[must_use]
    pub fn sign(&self, ctime: i64) -> String {
        crate::sign::sign(&self.cp, ctime, &self.seckey)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("cp", &self.cp)
            .field("seckey", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Access Token
// ============================================================================

/// Token request body.
#[derive(Debug, Clone, Serialize)]
pub struct AccessTokenRequest {
    /// Client identifier.
    pub cp: String,
    /// Request time in seconds, as a decimal string.
    pub ctime: String,
    /// Signature over `cp`, `ctime` and the secret key.
    pub sign: String,
}

impl AccessTokenRequest {
    /// Builds a signed token request for the given time.
    #[must_use]
    pub fn signed(credentials: &Credentials, ctime: i64) -> Self {
        Self {
            cp: credentials.cp.clone(),
            ctime: ctime.to_string(),
            sign: credentials.sign(ctime),
        }
    }
}

/// Token response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessTokenResponse {
    /// Vendor return code.
    pub retcode: String,
    /// Vendor return message.
    pub retmsg: String,
    /// Access token for subsequent calls.
    pub access_token: String,
    /// Expiry as reported by the vendor.
    pub expire: String,
}

// ============================================================================
// Preheat & Purge
// ============================================================================

/// Preheat request body.
#[derive(Debug, Clone, Serialize)]
pub struct PreheatRequest<'a> {
    /// URLs to cache.
    #[serde(rename = "Urls")]
    pub urls: &'a [String],
}

/// Purge request body.
#[derive(Debug, Clone, Serialize)]
pub struct PurgeRequest<'a> {
    /// URLs to evict.
    #[serde(rename = "Urls")]
    pub urls: &'a [String],
    /// Purge type, always `"file"`.
    #[serde(rename = "Type")]
    pub purge_type: &'static str,
}

/// Task reference returned by preheat and purge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskData {
    /// Vendor task identifier.
    #[serde(rename = "TaskId")]
    pub task_id: String,
}

/// Preheat response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreheatResponse {
    /// Vendor return code.
    pub retcode: String,
    /// Vendor return message.
    pub retmsg: String,
    /// Created task.
    #[serde(deserialize_with = "null_as_default")]
    pub data: TaskData,
}

/// Purge response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgeResponse {
    /// Vendor return code.
    pub retcode: String,
    /// Vendor return message.
    pub retmsg: String,
    /// Created task.
    #[serde(deserialize_with = "null_as_default")]
    pub data: TaskData,
}

// ============================================================================
// Domains
// ============================================================================

/// Domain list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainListResponse {
    /// Vendor return code.
    pub retcode: String,
    /// Vendor return message.
    pub retmsg: String,
    /// Domains bound to the account.
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<DomainItem>,
}

/// A domain bound to the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainItem {
    /// Vendor value for the domain.
    pub value: String,
    /// Domain name.
    pub domain_name: String,
}

// ============================================================================
// Log Files
// ============================================================================

/// Log-file granularity understood by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogfileFormat {
    /// Hourly log files.
    Hour,
    /// Five-minute log files.
    FiveMin,
}

impl LogfileFormat {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::FiveMin => "5min",
        }
    }
}

impl std::fmt::Display for LogfileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogfileFormat> for String {
    fn from(format: LogfileFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Log-file request as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogfileRequest {
    /// Domain to fetch logs for.
    pub domain: String,
    /// Start time in seconds since the Unix epoch.
    pub begintime: i64,
    /// End time in seconds since the Unix epoch.
    pub endtime: i64,
    /// Granularity, passed through verbatim (see [`LogfileFormat`]).
    pub format_type: String,
}

impl LogfileRequest {
    /// Creates a log-file request.
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        begintime: i64,
        endtime: i64,
        format_type: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            begintime,
            endtime,
            format_type: format_type.into(),
        }
    }

    /// Converts to the wire form, formatting both times in `offset`
    /// or the local time zone when `offset` is `None`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTimestamp`] if a time is out of range.
    pub fn to_query(&self, offset: Option<FixedOffset>) -> Result<LogfileQuery<'_>, Error> {
        Ok(LogfileQuery {
            domain: &self.domain,
            begintime: format_log_time(self.begintime, offset)?,
            endtime: format_log_time(self.endtime, offset)?,
            format_type: &self.format_type,
        })
    }
}

/// Log-file request body as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogfileQuery<'a> {
    /// Domain to fetch logs for.
    pub domain: &'a str,
    /// Start time as `YYYYMMDDHHmm`.
    pub begintime: String,
    /// End time as `YYYYMMDDHHmm`.
    pub endtime: String,
    /// Granularity.
    pub format_type: &'a str,
}

/// Log-file response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogfileResponse {
    /// Vendor return code.
    pub retcode: String,
    /// Vendor return message.
    pub retmsg: String,
    /// Log-file locations.
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<LogfileItem>,
}

/// Location of a single log file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogfileItem {
    /// Serving host.
    pub host: String,
    /// Date the log covers.
    pub log_date: String,
    /// Granularity.
    pub format_type: String,
    /// Download path.
    pub log_path: String,
}

/// Formats epoch seconds as `YYYYMMDDHHmm`.
///
/// # Errors
/// Returns [`Error::InvalidTimestamp`] if `timestamp` is out of range.
pub fn format_log_time(timestamp: i64, offset: Option<FixedOffset>) -> Result<String, Error> {
    let utc = DateTime::from_timestamp(timestamp, 0).ok_or(Error::InvalidTimestamp(timestamp))?;

    let formatted = match offset {
        Some(offset) => utc.with_timezone(&offset).format(LOG_TIME_FORMAT).to_string(),
        None => utc.with_timezone(&Local).format(LOG_TIME_FORMAT).to_string(),
    };
    Ok(formatted)
}
