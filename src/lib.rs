//! HTTP client library for the Instafogging PCDN API.
//!
//! This crate signs token requests and wraps the vendor's cache management
//! endpoints: preheat, purge, domain listing and log-file lookup. Vendor
//! failures reported through `retcode`/`retmsg` are returned as ordinary
//! responses; only transport, encoding and validation problems are errors.
//!
//! # Example
//!
//! ```no_run
//! use pcdn_client::{Credentials, PcdnClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pcdn_client::Error> {
//!     let client = PcdnClient::with_credentials("", Credentials::new("my-cp", "my-seckey"))?;
//!
//!     let token = client.get_access_token_now().await?;
//!     println!("retcode: {}", token.retcode);
//!
//!     let urls = vec!["http://www.example.com/index.html".to_string()];
//!     let task = client.preheat(&urls, &token.access_token).await?;
//!     println!("task: {}", task.data.task_id);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod sign;
mod types;

pub use client::PcdnClient;
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_URL};
pub use error::Error;
pub use sign::sign;
pub use types::*;
