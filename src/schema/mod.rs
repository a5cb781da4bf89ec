pub mod document;

use thiserror::Error;

pub use document::SchemaDocument;

#[derive(Error, Debug)]
pub enum SchemaFetchError {
    /// Network failure, or the fetched document is not valid JSON
    #[error("minreq error: {0}")]
    Minreq(#[from] minreq::Error),

    /// Failed to read or write the local definition file
    #[error("failed to access local definition file: {0}")]
    File(#[from] fs_extra::error::Error),

    #[error("failed to serialize definition document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("definition document is not a JSON object")]
    NotAnObject,

    /// A node that has to be patched is missing from the document
    #[error("definition document has no `{0}` node")]
    MissingNode(&'static str)
}

/// Fetch the ESI definition file
///
/// The document comes back unpatched; apply [`SchemaDocument::patch`]
/// before building a client from it
#[cached::proc_macro::cached(result)]
#[tracing::instrument(level = "trace")]
pub fn fetch(uri: String) -> Result<SchemaDocument, SchemaFetchError> {
    tracing::trace!("Fetching ESI definition file");

    Ok(SchemaDocument::new(minreq::get(uri)
        .with_timeout(*crate::REQUESTS_TIMEOUT)
        .send()?.json()?))
}
