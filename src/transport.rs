use serde_json::Value;

use crate::client::operation::Method;

/// Fully resolved request, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,

    /// Query parameters, appended url-encoded by the transport
    pub params: Vec<(String, String)>,

    pub body: Option<Value>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: i32,
    pub reason_phrase: String,
    pub body: Vec<u8>
}

/// Narrow seam over the concrete HTTP library
///
/// The client only ever talks to the proxy through this trait,
/// so the underlying library stays swappable (and mockable)
pub trait Transport {
    fn execute(&self, request: &PreparedRequest) -> Result<RawResponse, minreq::Error>;
}

/// Default blocking transport
#[derive(Debug, Clone, Copy, Default)]
pub struct MinreqTransport;

impl Transport for MinreqTransport {
    fn execute(&self, request: &PreparedRequest) -> Result<RawResponse, minreq::Error> {
        let mut req = match request.method {
            Method::Get    => minreq::get(&request.url),
            Method::Post   => minreq::post(&request.url),
            Method::Put    => minreq::put(&request.url),
            Method::Delete => minreq::delete(&request.url)
        }.with_timeout(*crate::REQUESTS_TIMEOUT);

        for (name, value) in &request.headers {
            req = req.with_header(name, value);
        }

        for (name, value) in &request.params {
            req = req.with_param(name, value);
        }

        if let Some(body) = &request.body {
            req = req.with_json(body)?;
        }

        let response = req.send()?;

        Ok(RawResponse {
            status_code: response.status_code,
            reason_phrase: response.reason_phrase.clone(),
            body: response.as_bytes().to_vec()
        })
    }
}
