use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseFormatError {
    /// Payload carries neither a `data` field nor a top-level sequence
    #[error("response payload has no data sequence")]
    MissingData,

    /// The sequence is there but holds no elements
    #[error("response data sequence is empty")]
    EmptyData
}

/// Payload of an executed request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status_code: i32,
    body: Value
}

impl ApiResponse {
    #[inline]
    pub fn new(status_code: i32, body: Value) -> Self {
        Self {
            status_code,
            body
        }
    }

    #[inline]
    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    #[inline]
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Results sequence of the payload
    ///
    /// ESI operations respond with a bare array while the proxy's own
    /// operations wrap it in a `data` field; both shapes are accepted
    pub fn data(&self) -> Result<&Vec<Value>, ResponseFormatError> {
        match &self.body {
            Value::Array(values) => Ok(values),

            Value::Object(fields) => fields.get("data")
                .and_then(Value::as_array)
                .ok_or(ResponseFormatError::MissingData),

            _ => Err(ResponseFormatError::MissingData)
        }
    }

    /// First element of the results sequence
    ///
    /// An empty sequence is an error, never a silent default
    pub fn first(&self) -> Result<&Value, ResponseFormatError> {
        self.data()?.first()
            .ok_or(ResponseFormatError::EmptyData)
    }

    #[inline]
    pub fn into_body(self) -> Value {
        self.body
    }
}
