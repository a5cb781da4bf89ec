pub mod consts;
pub mod config;
pub mod check_domain;
pub mod schema;
pub mod client;
pub mod transport;
pub mod response;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::consts::*;
    pub use super::config::{AppToken, HttpScheme, ProxyConfig};
    pub use super::schema::{SchemaDocument, SchemaFetchError};
    pub use super::client::{ConfigurationError, EsiClient, RequestError};
    pub use super::client::auth::AppAuthentication;
    pub use super::client::operation::{Method, Operation, RequestDescriptor};
    pub use super::response::{ApiResponse, ResponseFormatError};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

lazy_static::lazy_static! {
    /// Timeout of the requests sent by this crate, in seconds
    ///
    /// Can be changed with the `ESI_PROXY_REQUESTS_TIMEOUT` environment variable
    pub static ref REQUESTS_TIMEOUT: u64 = std::env::var("ESI_PROXY_REQUESTS_TIMEOUT")
        .ok()
        .and_then(|timeout| timeout.parse().ok())
        .unwrap_or(consts::DEFAULT_REQUESTS_TIMEOUT);
}
